//! Sequential batch engine and generation stages for Storyforge.
//!
//! The pipeline turns an ordered list of scenes into a finished video in
//! three stages: image generation, voice generation, and composition
//! (per-scene clip rendering plus concatenation). Every stage runs through
//! [`SceneBatchProcessor`]: strictly one scene at a time in ascending scene
//! order, with a fixed pacing delay between scenes, and per-scene failures
//! recorded in a [`BatchReport`] instead of aborting the batch.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod compose;
mod config;
mod image;
mod processor;
mod report;
mod voice;

pub use compose::{CompositionOutcome, CompositionStage, RenderedClip};
pub use config::{PipelineConfig, RenderTimeouts, StageDelays};
pub use image::ImageGenerationStage;
pub use processor::SceneBatchProcessor;
pub use report::{BatchItemResult, BatchReport};
pub use voice::{VoiceGenerationStage, VoiceTake};
