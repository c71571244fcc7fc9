//! Media reference types.

use crate::MediaCategory;
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Reference to a stored media asset.
///
/// Contains everything needed to retrieve the asset from a storage backend.
/// The pipeline returns references to its caller, who owns writing them back
/// to durable storage.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MediaReference {
    /// Unique identifier for this media reference
    pub id: Uuid,
    /// SHA-256 hash of the content, verified on retrieve
    pub content_hash: String,
    /// Storage backend name (e.g., "filesystem")
    pub storage_backend: String,
    /// Backend-specific path to the media
    pub storage_path: String,
    /// Size of the media in bytes
    pub size_bytes: i64,
    /// Category of the asset
    pub category: MediaCategory,
}

impl MediaReference {
    /// The asset's location as a local filesystem path.
    ///
    /// The render stage feeds asset paths to an external ffmpeg process, so
    /// every backend must produce references readable as local files.
    pub fn local_path(&self) -> &Path {
        Path::new(&self.storage_path)
    }
}
