//! Aspect ratios and the resolution tables for both generation backends.

use serde::{Deserialize, Serialize};

/// Pixel dimensions for a generated or rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Resolution {
    /// Create a new resolution.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when the frame is taller than it is wide.
    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Closed set of project aspect ratios.
///
/// Unknown tags fall back to [`AspectRatio::Landscape`] rather than erroring:
/// the resolver runs deep inside batch loops where failing closed would abort
/// unrelated scenes.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(from = "String", into = "String")]
pub enum AspectRatio {
    /// 9:16 vertical (TikTok, Reels, Shorts)
    #[display("9:16")]
    Portrait,
    /// 16:9 horizontal (YouTube)
    #[default]
    #[display("16:9")]
    Landscape,
    /// 1:1 square (Instagram)
    #[display("1:1")]
    Square,
}

impl AspectRatio {
    /// Target dimensions for the image-synthesis backend.
    ///
    /// These are the backend's native sweet spots and intentionally differ
    /// from the video table; only the orientation must agree.
    pub fn image_dimensions(&self) -> Resolution {
        match self {
            AspectRatio::Portrait => Resolution::new(1024, 1792),
            AspectRatio::Landscape => Resolution::new(1792, 1024),
            AspectRatio::Square => Resolution::new(1024, 1024),
        }
    }

    /// Target resolution for rendered video output.
    pub fn video_resolution(&self) -> Resolution {
        match self {
            AspectRatio::Portrait => Resolution::new(1080, 1920),
            AspectRatio::Landscape => Resolution::new(1920, 1080),
            AspectRatio::Square => Resolution::new(1080, 1080),
        }
    }

    /// Parse an aspect-ratio tag, falling back to landscape for unknown tags.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "9:16" | "portrait" => AspectRatio::Portrait,
            "16:9" | "landscape" => AspectRatio::Landscape,
            "1:1" | "square" => AspectRatio::Square,
            _ => AspectRatio::Landscape,
        }
    }
}

impl From<String> for AspectRatio {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<AspectRatio> for String {
    fn from(ratio: AspectRatio) -> Self {
        ratio.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn tables_are_total_and_oriented() {
        for ratio in AspectRatio::iter() {
            let image = ratio.image_dimensions();
            let video = ratio.video_resolution();
            assert!(image.width > 0 && image.height > 0);
            assert!(video.width > 0 && video.height > 0);
            // The two tables must agree on orientation.
            assert_eq!(image.is_portrait(), video.is_portrait());
        }
    }

    #[test]
    fn unknown_tag_falls_back_to_landscape() {
        assert_eq!(AspectRatio::from_tag("4:3"), AspectRatio::Landscape);
        assert_eq!(AspectRatio::from_tag(""), AspectRatio::Landscape);
        assert_eq!(AspectRatio::from_tag("9:16"), AspectRatio::Portrait);
    }

    #[test]
    fn display_round_trips_through_from_tag() {
        for ratio in AspectRatio::iter() {
            assert_eq!(AspectRatio::from_tag(&ratio.to_string()), ratio);
        }
    }
}
