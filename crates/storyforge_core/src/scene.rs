//! Scene records: one narrative beat with its narration, visual prompt and
//! generated asset references.

use crate::VoiceSettings;
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use storyforge_storage::MediaReference;
use uuid::Uuid;

/// Fallback clip length when a scene has no explicit duration.
pub const DEFAULT_SCENE_DURATION_SECS: f64 = 5.0;

/// Stable scene identifier.
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
    derive_more::Display,
)]
#[serde(transparent)]
pub struct SceneId(Uuid);

impl SceneId {
    /// Mint a fresh scene identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SceneId {
    fn default() -> Self {
        Self::new()
    }
}

/// One narrative beat.
///
/// `order` is an explicit sortable field, never an array position; the
/// pipeline iterates scenes in ascending `order` and the concatenator
/// selects by it. The surrounding application keeps orders contiguous 1..N
/// at rest, but the pipeline only requires a stable ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Builder)]
#[builder(setter(into, strip_option))]
pub struct Scene {
    /// Stable identifier
    #[builder(default = "SceneId::new()")]
    id: SceneId,
    /// 1-based playback position, unique within a project
    order: u32,
    /// Spoken narration content
    narration_text: String,
    /// Image-generation input
    visual_prompt: String,
    /// Descriptive camera metadata, not consumed by the pipeline
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    camera_direction: Option<String>,
    /// Descriptive mood metadata, not consumed by the pipeline
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mood: Option<String>,
    /// Clip length in seconds; falls back to [`DEFAULT_SCENE_DURATION_SECS`]
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
    /// Per-scene voice override used when regenerating a single scene
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    voice: Option<VoiceSettings>,
    /// Generated scene image
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_ref: Option<MediaReference>,
    /// Generated narration audio
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    audio_ref: Option<MediaReference>,
    /// Rendered scene clip from the last composition run
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    video_clip_ref: Option<MediaReference>,
}

impl Scene {
    /// Clip duration, falling back to the fixed default when unset.
    pub fn effective_duration_secs(&self) -> f64 {
        self.duration_secs.unwrap_or(DEFAULT_SCENE_DURATION_SECS)
    }

    /// True when the scene has both generated inputs composition needs.
    pub fn is_ready_for_composition(&self) -> bool {
        self.image_ref.is_some() && self.audio_ref.is_some()
    }

    /// Attach a generated image reference.
    pub fn set_image_ref(&mut self, reference: MediaReference) {
        self.image_ref = Some(reference);
    }

    /// Attach a generated audio reference.
    pub fn set_audio_ref(&mut self, reference: MediaReference) {
        self.audio_ref = Some(reference);
    }

    /// Attach a rendered clip reference.
    pub fn set_video_clip_ref(&mut self, reference: MediaReference) {
        self.video_clip_ref = Some(reference);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(order: u32) -> Scene {
        SceneBuilder::default()
            .order(order)
            .narration_text("Once upon a time")
            .visual_prompt("a quiet village at dawn")
            .build()
            .unwrap()
    }

    #[test]
    fn duration_falls_back_to_default() {
        let s = scene(1);
        assert_eq!(s.effective_duration_secs(), DEFAULT_SCENE_DURATION_SECS);
    }

    #[test]
    fn readiness_requires_both_assets() {
        let mut s = scene(1);
        assert!(!s.is_ready_for_composition());

        s.set_image_ref(test_reference());
        assert!(!s.is_ready_for_composition());

        s.set_audio_ref(test_reference());
        assert!(s.is_ready_for_composition());
    }

    #[test]
    fn builder_requires_order() {
        let result = SceneBuilder::default()
            .narration_text("text")
            .visual_prompt("prompt")
            .build();
        assert!(result.is_err());
    }

    fn test_reference() -> MediaReference {
        MediaReference {
            id: uuid::Uuid::new_v4(),
            content_hash: "hash".into(),
            storage_backend: "filesystem".into(),
            storage_path: "/tmp/x".into(),
            size_bytes: 1,
            category: storyforge_storage::MediaCategory::Image,
        }
    }
}
