//! Project-level media settings consumed by the pipeline.

use crate::AspectRatio;
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Accepted speaking-rate range of the TTS backend.
const SPEED_MIN: f32 = 0.5;
const SPEED_MAX: f32 = 2.0;

/// Narration voice parameters.
///
/// Defaults match the TTS backend's most widely supported voice. Speed is
/// clamped to the backend's accepted range on construction and on
/// deserialization, so an out-of-range value in a project file never
/// reaches the SSML prosody attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct VoiceSettings {
    /// Backend voice identifier (e.g., "en-US-AriaNeural")
    #[serde(default = "default_voice_id")]
    voice_id: String,
    /// Speaking rate, 0.5 to 2.0
    #[serde(default = "default_speed", deserialize_with = "deserialize_speed")]
    speed: f32,
    /// Pitch shift (e.g., "+0Hz", "+10Hz", "-5Hz")
    #[serde(default = "default_pitch")]
    pitch: String,
}

fn deserialize_speed<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let speed = f32::deserialize(deserializer)?;
    Ok(speed.clamp(SPEED_MIN, SPEED_MAX))
}

fn default_voice_id() -> String {
    "en-US-AriaNeural".to_string()
}

fn default_speed() -> f32 {
    1.0
}

fn default_pitch() -> String {
    "+0Hz".to_string()
}

impl VoiceSettings {
    /// Create voice settings, clamping speed to the accepted 0.5–2.0 range.
    pub fn new(voice_id: impl Into<String>, speed: f32, pitch: impl Into<String>) -> Self {
        Self {
            voice_id: voice_id.into(),
            speed: speed.clamp(SPEED_MIN, SPEED_MAX),
            pitch: pitch.into(),
        }
    }
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            voice_id: default_voice_id(),
            speed: default_speed(),
            pitch: default_pitch(),
        }
    }
}

/// Project-level configuration the pipeline reads immutably per run.
///
/// Owned and mutated by the surrounding application; the pipeline receives a
/// snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Builder)]
#[builder(setter(into))]
pub struct ProjectMediaSettings {
    /// Output aspect ratio for both generation backends
    #[builder(default)]
    #[serde(default)]
    aspect_ratio: AspectRatio,
    /// Style descriptor prefixed onto every scene's visual prompt
    image_style: String,
    /// Default narration voice, overridable per scene
    #[builder(default)]
    #[serde(default)]
    voice: VoiceSettings,
}
