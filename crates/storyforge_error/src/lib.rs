//! Error types for the Storyforge scene media pipeline.
//!
//! This crate provides the foundation error types used throughout the
//! Storyforge workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error
//! handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use storyforge_error::{StoryforgeResult, ConfigError};
//!
//! fn load_settings() -> StoryforgeResult<String> {
//!     Err(ConfigError::new("Missing project file"))?
//! }
//!
//! match load_settings() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod config;
mod error;
mod pipeline;
mod render;
mod storage;

pub use backend::{BackendError, BackendErrorKind};
pub use config::ConfigError;
pub use error::{StoryforgeError, StoryforgeErrorKind, StoryforgeResult};
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use render::{RenderError, RenderErrorKind};
pub use storage::{StorageError, StorageErrorKind};
