//! Filesystem-based media storage implementation.
//!
//! Assets land under `{base_path}/{category}/{uuid}.{ext}`. Each store call
//! mints a fresh UUID, so regeneration never clobbers an earlier asset.

use crate::{MediaCategory, MediaReference, MediaStorage};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use storyforge_error::{StorageError, StorageErrorKind, StoryforgeResult};
use uuid::Uuid;

/// Filesystem storage backend.
///
/// # Example Structure
///
/// ```text
/// /var/storyforge/media/
/// ├── images/
/// │   └── 7f9c2ba4-....png
/// ├── audio/
/// │   └── 09a3d1c2-....mp3
/// └── videos/
///     └── e1b5ff00-....mp4
/// ```
///
/// Writes go to a temp file first and are renamed into place, so a crashed
/// write never leaves a half-written asset under a valid reference.
pub struct FileSystemStorage {
    base_path: PathBuf,
}

impl FileSystemStorage {
    /// Create a new filesystem storage backend.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or accessed.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> StoryforgeResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created filesystem storage");
        Ok(Self { base_path })
    }

    /// Compute SHA-256 hash of data.
    fn compute_hash(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }

    /// Verify content hash matches expected hash.
    fn verify_hash(data: &[u8], expected_hash: &str) -> StoryforgeResult<()> {
        let actual_hash = Self::compute_hash(data);
        if actual_hash != expected_hash {
            return Err(StorageError::new(StorageErrorKind::HashMismatch(format!(
                "expected {}, got {}",
                expected_hash, actual_hash
            )))
            .into());
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl MediaStorage for FileSystemStorage {
    #[tracing::instrument(skip(self, data), fields(size = data.len(), category = %category))]
    async fn store(
        &self,
        data: &[u8],
        extension: &str,
        category: MediaCategory,
    ) -> StoryforgeResult<MediaReference> {
        let id = Uuid::new_v4();
        let dir = self.base_path.join(category.as_str());
        let path = dir.join(format!("{}.{}", id, extension.trim_start_matches('.')));

        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                dir.display(),
                e
            )))
        })?;

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        let hash = Self::compute_hash(data);

        tracing::info!(
            id = %id,
            path = %path.display(),
            size = data.len(),
            category = %category,
            "Stored media file"
        );

        Ok(MediaReference {
            id,
            content_hash: hash,
            storage_backend: "filesystem".to_string(),
            storage_path: path.to_string_lossy().to_string(),
            size_bytes: data.len() as i64,
            category,
        })
    }

    #[tracing::instrument(skip(self, reference), fields(id = %reference.id, path = %reference.storage_path))]
    async fn retrieve(&self, reference: &MediaReference) -> StoryforgeResult<Vec<u8>> {
        let path = Path::new(&reference.storage_path);

        let data = tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(reference.storage_path.clone()))
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })?;

        Self::verify_hash(&data, &reference.content_hash)?;

        tracing::debug!(
            id = %reference.id,
            path = %path.display(),
            size = data.len(),
            "Retrieved media file"
        );

        Ok(data)
    }

    #[tracing::instrument(skip(self, reference), fields(id = %reference.id, path = %reference.storage_path))]
    async fn delete(&self, reference: &MediaReference) -> StoryforgeResult<()> {
        let path = Path::new(&reference.storage_path);

        tokio::fs::remove_file(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(reference.storage_path.clone()))
            } else {
                StorageError::new(StorageErrorKind::FileWrite(format!(
                    "delete {}: {}",
                    path.display(),
                    e
                )))
            }
        })?;

        tracing::info!(id = %reference.id, path = %path.display(), "Deleted media file");

        Ok(())
    }

    #[tracing::instrument(skip(self, reference), fields(id = %reference.id, path = %reference.storage_path))]
    async fn exists(&self, reference: &MediaReference) -> StoryforgeResult<bool> {
        let path = Path::new(&reference.storage_path);
        Ok(tokio::fs::try_exists(path).await.unwrap_or(false))
    }
}
