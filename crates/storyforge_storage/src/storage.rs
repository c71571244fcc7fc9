//! Storage trait definition.

use crate::{MediaCategory, MediaReference};
use storyforge_error::StoryforgeResult;

/// Trait for pluggable media storage backends.
///
/// Implementations handle the actual storage and retrieval of binary media
/// data. Writes are append-only: each `store` call produces a new asset
/// under a fresh reference, even for identical bytes.
#[async_trait::async_trait]
pub trait MediaStorage: Send + Sync {
    /// Store media and return a reference.
    ///
    /// The implementation should:
    /// - Write the data to a new, uniquely-named location
    /// - Compute a content hash for later integrity verification
    /// - Return a reference whose `local_path()` can be read back
    ///
    /// # Arguments
    ///
    /// * `data` - The binary media data to store
    /// * `extension` - Suggested file extension (e.g., "png", "mp3", "mp4")
    /// * `category` - Asset category used to organize storage
    async fn store(
        &self,
        data: &[u8],
        extension: &str,
        category: MediaCategory,
    ) -> StoryforgeResult<MediaReference>;

    /// Retrieve media by reference.
    ///
    /// Verifies the content hash recorded at store time.
    async fn retrieve(&self, reference: &MediaReference) -> StoryforgeResult<Vec<u8>>;

    /// Delete media by reference.
    ///
    /// The pipeline itself never deletes; this exists for caller-driven
    /// cleanup of superseded assets.
    async fn delete(&self, reference: &MediaReference) -> StoryforgeResult<()>;

    /// Check if media exists.
    async fn exists(&self, reference: &MediaReference) -> StoryforgeResult<bool>;
}
