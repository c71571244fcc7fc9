//! Pipeline error types.
//!
//! These cover stage-level failures: precondition gates and fatal
//! infrastructure errors. Per-scene failures inside a batch are data in the
//! batch report, not errors.

/// Specific error conditions for pipeline stages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PipelineErrorKind {
    /// Composition precondition failed: scenes lack generated assets
    #[display("{} scene(s) missing image or audio; generate images and voices first", _0)]
    MissingAssets(usize),
    /// A stage was invoked with no scenes to process
    #[display("No scenes to process")]
    EmptyBatch,
    /// Every scene clip failed to render, leaving nothing to concatenate
    #[display("No scene clips rendered successfully; nothing to concatenate")]
    NothingToConcatenate,
}

/// Pipeline error with location tracking.
///
/// # Examples
///
/// ```
/// use storyforge_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::MissingAssets(3));
/// assert!(format!("{}", err).contains("3 scene(s)"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The kind of error that occurred
    pub kind: PipelineErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new pipeline error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
