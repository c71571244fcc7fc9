//! Generation backend error types.
//!
//! Covers the external image-synthesis and text-to-speech services.

/// Specific error conditions for generation backends.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BackendErrorKind {
    /// Request could not be sent or the connection failed
    #[display("Request failed: {}", _0)]
    Http(String),
    /// Backend returned a non-success status
    #[display("API error (status {}): {}", status, message)]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body or status text
        message: String,
    },
    /// Request exceeded its configured timeout
    #[display("Request timed out after {}s", _0)]
    Timeout(u64),
    /// Response body could not be decoded
    #[display("Failed to decode response: {}", _0)]
    Decode(String),
    /// Invalid client configuration
    #[display("Invalid configuration: {}", _0)]
    InvalidConfiguration(String),
}

/// Generation backend error with location tracking.
///
/// # Examples
///
/// ```
/// use storyforge_error::{BackendError, BackendErrorKind};
///
/// let err = BackendError::new(BackendErrorKind::Timeout(60));
/// assert!(format!("{}", err).contains("timed out"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Backend Error: {} at line {} in {}", kind, line, file)]
pub struct BackendError {
    /// The kind of error that occurred
    pub kind: BackendErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl BackendError {
    /// Create a new backend error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: BackendErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
