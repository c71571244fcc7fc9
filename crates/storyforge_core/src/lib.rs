//! Core data types for the Storyforge scene media pipeline.
//!
//! This crate provides the domain model shared across the pipeline crates:
//! scenes, project media settings, aspect ratios and the resolution tables
//! for the image and video backends.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aspect;
mod scene;
mod settings;
mod telemetry;

pub use aspect::{AspectRatio, Resolution};
pub use scene::{Scene, SceneBuilder, SceneId, DEFAULT_SCENE_DURATION_SECS};
pub use settings::{ProjectMediaSettings, ProjectMediaSettingsBuilder, VoiceSettings};
pub use telemetry::init_telemetry;
