//! Image synthesis backend client.

use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use storyforge_core::Resolution;
use storyforge_error::{BackendError, BackendErrorKind, StoryforgeResult};
use tracing::{debug, instrument};

const DEFAULT_BASE_URL: &str = "https://image.pollinations.ai";
const DEFAULT_MODEL: &str = "flux";
const DEFAULT_TIMEOUT_SECS: u64 = 90;

/// Trait for image-synthesis backends.
///
/// One request per scene: a text prompt plus target dimensions in, raw
/// encoded image bytes out.
#[async_trait]
pub trait ImageSynthesizer: Send + Sync {
    /// Generate one image for the given prompt at the given dimensions.
    async fn synthesize(&self, prompt: &str, resolution: Resolution) -> StoryforgeResult<Vec<u8>>;

    /// File extension of the bytes this backend returns.
    fn output_extension(&self) -> &'static str {
        "png"
    }
}

/// Pollinations.ai image client.
///
/// The service generates images from a GET request with the prompt in the
/// URL path; no API key is required, which is also why it rate-limits
/// aggressively and the batch layer spaces requests out.
#[derive(Debug, Clone)]
pub struct PollinationsClient {
    client: Client,
    base_url: String,
    model: String,
    timeout_secs: u64,
}

impl PollinationsClient {
    /// Creates a new client against the public Pollinations endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(skip_all)]
    pub fn new() -> StoryforgeResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a new client against a specific endpoint (used in tests and
    /// for self-hosted deployments).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(skip_all)]
    pub fn with_base_url(base_url: impl Into<String>) -> StoryforgeResult<Self> {
        let timeout_secs = DEFAULT_TIMEOUT_SECS;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                BackendError::new(BackendErrorKind::InvalidConfiguration(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs,
        })
    }

    /// Override the generation model (e.g., "flux", "turbo").
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Build the generation URL with the prompt percent-encoded in the path.
    fn request_url(&self, prompt: &str, resolution: Resolution) -> StoryforgeResult<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            BackendError::new(BackendErrorKind::InvalidConfiguration(format!(
                "Invalid base URL '{}': {}",
                self.base_url, e
            )))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                BackendError::new(BackendErrorKind::InvalidConfiguration(format!(
                    "Base URL '{}' cannot carry a path",
                    self.base_url
                )))
            })?
            .push("prompt")
            .push(prompt);

        url.query_pairs_mut()
            .append_pair("width", &resolution.width.to_string())
            .append_pair("height", &resolution.height.to_string())
            .append_pair("model", &self.model)
            .append_pair("nologo", "true");

        Ok(url)
    }
}

#[async_trait]
impl ImageSynthesizer for PollinationsClient {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len(), width = resolution.width, height = resolution.height))]
    async fn synthesize(&self, prompt: &str, resolution: Resolution) -> StoryforgeResult<Vec<u8>> {
        let url = self.request_url(prompt, resolution)?;
        debug!(url = %url, "Sending image synthesis request");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                BackendError::new(BackendErrorKind::Timeout(self.timeout_secs))
            } else {
                BackendError::new(BackendErrorKind::Http(format!("Request failed: {}", e)))
            }
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(BackendError::new(BackendErrorKind::ApiError { status, message }).into());
        }

        let bytes = response.bytes().await.map_err(|e| {
            BackendError::new(BackendErrorKind::Decode(format!(
                "Failed to read image body: {}",
                e
            )))
        })?;

        debug!(size = bytes.len(), "Received image bytes");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_is_percent_encoded_in_path() {
        let client = PollinationsClient::with_base_url("https://example.com").unwrap();
        let url = client
            .request_url("misty forest, oil painting", Resolution::new(1024, 1792))
            .unwrap();

        let rendered = url.to_string();
        assert!(rendered.starts_with("https://example.com/prompt/"));
        assert!(!rendered.contains(' '));
        assert!(rendered.contains("width=1024"));
        assert!(rendered.contains("height=1792"));
        assert!(rendered.contains("model=flux"));
        assert!(rendered.contains("nologo=true"));
    }
}
