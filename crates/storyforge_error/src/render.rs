//! Render error types.
//!
//! Covers the external ffmpeg process used for clip rendering and
//! concatenation.

/// Specific error conditions for render operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RenderErrorKind {
    /// ffmpeg binary could not be spawned
    #[display("Failed to spawn ffmpeg: {}", _0)]
    Spawn(String),
    /// ffmpeg exited with a non-zero status
    #[display("ffmpeg failed: {}", _0)]
    ProcessFailed(String),
    /// ffmpeg exceeded its configured timeout and was killed
    #[display("ffmpeg timed out after {}s", _0)]
    Timeout(u64),
    /// An input file for the render was missing or unreadable
    #[display("Missing render input: {}", _0)]
    MissingInput(String),
    /// Failed to prepare the render work area
    #[display("Failed to prepare work area: {}", _0)]
    WorkArea(String),
}

/// Render error with location tracking.
///
/// # Examples
///
/// ```
/// use storyforge_error::{RenderError, RenderErrorKind};
///
/// let err = RenderError::new(RenderErrorKind::Timeout(120));
/// assert!(format!("{}", err).contains("timed out"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Render Error: {} at line {} in {}", kind, line, file)]
pub struct RenderError {
    /// The kind of error that occurred
    pub kind: RenderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RenderError {
    /// Create a new render error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RenderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
