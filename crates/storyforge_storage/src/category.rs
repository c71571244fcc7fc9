//! Media category enumeration.

use serde::{Deserialize, Serialize};

/// Category of a stored media asset.
///
/// Categories partition the storage area by asset kind, matching the
/// pipeline's three artifact types.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    /// Generated scene images (PNG, JPEG)
    #[display("image")]
    Image,
    /// Narration audio (MP3)
    #[display("audio")]
    Audio,
    /// Rendered scene clips and final videos (MP4)
    #[display("video")]
    Video,
}

impl MediaCategory {
    /// Subdirectory name used by filesystem-backed storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaCategory::Image => "images",
            MediaCategory::Audio => "audio",
            MediaCategory::Video => "videos",
        }
    }
}

impl std::str::FromStr for MediaCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" | "images" => Ok(MediaCategory::Image),
            "audio" => Ok(MediaCategory::Audio),
            "video" | "videos" => Ok(MediaCategory::Video),
            _ => Err(format!("Unknown media category: {}", s)),
        }
    }
}
