//! Text-to-speech backend client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use storyforge_core::VoiceSettings;
use storyforge_error::{BackendError, BackendErrorKind, StoryforgeResult};
use tracing::{debug, instrument};

const DEFAULT_TIMEOUT_SECS: u64 = 45;

/// One entry from the backend's voice catalog.
///
/// Consumed for UI population (voice pickers), not by the pipeline logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    /// Backend voice identifier (e.g., "en-US-AriaNeural")
    pub id: String,
    /// Human-readable display name
    pub name: String,
    /// Two-letter language code (e.g., "en")
    pub language: String,
    /// Voice gender as reported by the backend
    pub gender: String,
    /// Full locale tag (e.g., "en-US")
    pub locale: String,
}

/// Trait for text-to-speech backends.
///
/// One request per scene: narration text plus voice parameters in, raw
/// encoded audio bytes (one fixed format per backend) out.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize narration audio for the given text and voice.
    async fn synthesize(&self, text: &str, voice: &VoiceSettings) -> StoryforgeResult<Vec<u8>>;

    /// List the voices this backend offers.
    async fn list_voices(&self) -> StoryforgeResult<Vec<Voice>>;

    /// File extension of the bytes this backend returns.
    fn output_extension(&self) -> &'static str {
        "mp3"
    }
}

/// Raw voice entry as the Edge TTS gateway reports it.
#[derive(Debug, Deserialize)]
struct VoiceDto {
    #[serde(rename = "ShortName")]
    short_name: String,
    #[serde(rename = "FriendlyName")]
    friendly_name: String,
    #[serde(rename = "Locale")]
    locale: String,
    #[serde(rename = "Gender")]
    gender: String,
}

impl From<VoiceDto> for Voice {
    fn from(dto: VoiceDto) -> Self {
        let language = dto
            .locale
            .split('-')
            .next()
            .unwrap_or(&dto.locale)
            .to_string();
        Voice {
            id: dto.short_name,
            name: dto.friendly_name,
            language,
            gender: dto.gender,
            locale: dto.locale,
        }
    }
}

/// Synthesis request body for the Edge TTS gateway.
#[derive(Debug, Serialize)]
struct SynthesizeRequest<'a> {
    ssml: String,
    voice: &'a str,
    format: &'static str,
}

/// Client for an Edge-TTS-compatible HTTP gateway.
///
/// Microsoft Edge's neural voices are free and high quality; this client
/// expects a small gateway service exposing them over plain HTTP:
/// `POST {base}/synthesize` returning encoded MP3 bytes and
/// `GET {base}/voices` returning the catalog.
#[derive(Debug, Clone)]
pub struct EdgeTtsClient {
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl EdgeTtsClient {
    /// Creates a new client from the `STORYFORGE_TTS_URL` environment
    /// variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is unset or the HTTP client cannot
    /// be initialized.
    #[instrument(skip_all)]
    pub fn new() -> StoryforgeResult<Self> {
        let base_url = std::env::var("STORYFORGE_TTS_URL").map_err(|e| {
            BackendError::new(BackendErrorKind::InvalidConfiguration(format!(
                "STORYFORGE_TTS_URL not set: {}",
                e
            )))
        })?;
        Self::with_base_url(base_url)
    }

    /// Creates a new client against a specific gateway endpoint.
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
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_secs,
        })
    }

    fn map_send_error(&self, e: reqwest::Error) -> BackendError {
        if e.is_timeout() {
            BackendError::new(BackendErrorKind::Timeout(self.timeout_secs))
        } else {
            BackendError::new(BackendErrorKind::Http(format!("Request failed: {}", e)))
        }
    }
}

/// Build the SSML document carrying prosody (rate/pitch) control.
///
/// The gateway passes this through to the Edge service unchanged.
fn build_ssml(text: &str, voice: &VoiceSettings) -> String {
    format!(
        concat!(
            r#"<speak version="1.0" xmlns="http://www.w3.org/2001/10/synthesis" xml:lang="en-US">"#,
            r#"<voice name="{voice}">"#,
            r#"<prosody rate="{rate}" pitch="{pitch}">{text}</prosody>"#,
            r#"</voice></speak>"#
        ),
        voice = voice.voice_id(),
        rate = voice.speed(),
        pitch = voice.pitch(),
        text = escape_xml(text),
    )
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[async_trait]
impl SpeechSynthesizer for EdgeTtsClient {
    #[instrument(skip(self, text), fields(text_len = text.len(), voice = %voice.voice_id()))]
    async fn synthesize(&self, text: &str, voice: &VoiceSettings) -> StoryforgeResult<Vec<u8>> {
        let body = SynthesizeRequest {
            ssml: build_ssml(text, voice),
            voice: voice.voice_id(),
            format: "audio-24khz-96kbitrate-mono-mp3",
        };

        let url = format!("{}/synthesize", self.base_url);
        debug!(url = %url, "Sending TTS synthesis request");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(BackendError::new(BackendErrorKind::ApiError { status, message }).into());
        }

        let bytes = response.bytes().await.map_err(|e| {
            BackendError::new(BackendErrorKind::Decode(format!(
                "Failed to read audio body: {}",
                e
            )))
        })?;

        debug!(size = bytes.len(), "Received audio bytes");
        Ok(bytes.to_vec())
    }

    #[instrument(skip(self))]
    async fn list_voices(&self) -> StoryforgeResult<Vec<Voice>> {
        let url = format!("{}/voices", self.base_url);
        debug!(url = %url, "Fetching voice catalog");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(BackendError::new(BackendErrorKind::ApiError { status, message }).into());
        }

        let voices: Vec<VoiceDto> = response.json().await.map_err(|e| {
            BackendError::new(BackendErrorKind::Decode(format!(
                "Failed to parse voice catalog: {}",
                e
            )))
        })?;

        debug!(count = voices.len(), "Received voice catalog");
        Ok(voices.into_iter().map(Voice::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssml_carries_prosody_and_escapes_text() {
        let voice = VoiceSettings::new("en-GB-RyanNeural", 1.25, "+5Hz");
        let ssml = build_ssml("Tom & Jerry <3", &voice);

        assert!(ssml.contains(r#"<voice name="en-GB-RyanNeural">"#));
        assert!(ssml.contains(r#"rate="1.25""#));
        assert!(ssml.contains(r#"pitch="+5Hz""#));
        assert!(ssml.contains("Tom &amp; Jerry &lt;3"));
    }

    #[test]
    fn voice_dto_maps_language_from_locale() {
        let dto = VoiceDto {
            short_name: "fr-FR-DeniseNeural".into(),
            friendly_name: "Denise".into(),
            locale: "fr-FR".into(),
            gender: "Female".into(),
        };
        let voice = Voice::from(dto);
        assert_eq!(voice.language, "fr");
        assert_eq!(voice.locale, "fr-FR");
        assert_eq!(voice.id, "fr-FR-DeniseNeural");
    }
}
