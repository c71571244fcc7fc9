//! Append-only media storage for Storyforge.
//!
//! This crate provides pluggable storage backends for the binary artifacts
//! the pipeline generates (scene images, narration audio, video clips).
//! Every store writes a new uniquely-named file; nothing is ever overwritten
//! in place, which makes stage reruns and retries safe without locking.
//!
//! References returned by a backend resolve to local filesystem paths,
//! because the render stage hands them to an external ffmpeg process.
//!
//! # Example
//!
//! ```rust
//! use storyforge_storage::{FileSystemStorage, MediaStorage, MediaCategory};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = FileSystemStorage::new("/tmp/media")?;
//!
//! // Store media
//! let data = vec![0u8; 1024]; // PNG data
//! let reference = storage.store(&data, "png", MediaCategory::Image).await?;
//!
//! // Retrieve media
//! let retrieved = storage.retrieve(&reference).await?;
//! assert_eq!(data, retrieved);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod category;
mod filesystem;
mod reference;
mod storage;

pub use category::MediaCategory;
pub use filesystem::FileSystemStorage;
pub use reference::MediaReference;
pub use storage::MediaStorage;
pub use storyforge_error::{StorageError, StorageErrorKind};
