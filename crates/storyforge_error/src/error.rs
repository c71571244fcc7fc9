//! Top-level error wrapper types.

use crate::{BackendError, ConfigError, PipelineError, RenderError, StorageError};

/// This is the foundation error enum. Each variant wraps one error family
/// from a Storyforge crate.
///
/// # Examples
///
/// ```
/// use storyforge_error::{StoryforgeError, ConfigError};
///
/// let config_err = ConfigError::new("Missing field");
/// let err: StoryforgeError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StoryforgeErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Media storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Generation backend error (image synthesis, text-to-speech)
    #[from(BackendError)]
    Backend(BackendError),
    /// ffmpeg render/concatenate error
    #[from(RenderError)]
    Render(RenderError),
    /// Pipeline stage error
    #[from(PipelineError)]
    Pipeline(PipelineError),
}

/// Storyforge error with kind discrimination.
///
/// # Examples
///
/// ```
/// use storyforge_error::{StoryforgeError, StoryforgeResult, ConfigError};
///
/// fn might_fail() -> StoryforgeResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storyforge Error: {}", _0)]
pub struct StoryforgeError(Box<StoryforgeErrorKind>);

impl StoryforgeError {
    /// Create a new error from a kind.
    pub fn new(kind: StoryforgeErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StoryforgeErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to StoryforgeErrorKind
impl<T> From<T> for StoryforgeError
where
    T: Into<StoryforgeErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Storyforge operations.
///
/// # Examples
///
/// ```
/// use storyforge_error::{StoryforgeResult, BackendError, BackendErrorKind};
///
/// fn fetch_data() -> StoryforgeResult<String> {
///     Err(BackendError::new(BackendErrorKind::Http("404 Not Found".into())))?
/// }
/// ```
pub type StoryforgeResult<T> = std::result::Result<T, StoryforgeError>;
