//! Storyforge - scene-based media pipeline.
//!
//! Storyforge turns an ordered list of scenes (narration text plus a visual
//! prompt each) into a narrated video: one generated image and one
//! synthesized narration take per scene, each scene rendered into a short
//! Ken Burns clip, the clips concatenated into the final cut.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use storyforge::{
//!     FileSystemStorage, ImageGenerationStage, PollinationsClient, Project,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut project = Project::load("project.toml")?;
//!     let storage = Arc::new(FileSystemStorage::new("media")?);
//!     let images = ImageGenerationStage::new(
//!         Arc::new(PollinationsClient::new()?),
//!         storage,
//!         Duration::from_secs(2),
//!     );
//!     let settings = project.settings().clone();
//!     let report = images.run(project.scenes_mut(), &settings, None).await?;
//!     println!("{} of {} images generated", report.succeeded(), report.total());
//!     Ok(())
//! }
//! ```
//!
//! The pipeline is strictly sequential by design: the generation backends
//! are free services that throttle by IP, so stages pace one request at a
//! time with a configurable delay between scenes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod project;

pub use project::Project;

pub use storyforge_backends::{
    EdgeTtsClient, ImageSynthesizer, PollinationsClient, SpeechSynthesizer, Voice, VoiceCatalog,
};
pub use storyforge_core::{
    init_telemetry, AspectRatio, ProjectMediaSettings, ProjectMediaSettingsBuilder, Resolution,
    Scene, SceneBuilder, SceneId, VoiceSettings, DEFAULT_SCENE_DURATION_SECS,
};
pub use storyforge_error::{StoryforgeError, StoryforgeErrorKind, StoryforgeResult};
pub use storyforge_pipeline::{
    BatchItemResult, BatchReport, CompositionOutcome, CompositionStage, ImageGenerationStage,
    PipelineConfig, RenderTimeouts, RenderedClip, SceneBatchProcessor, StageDelays,
    VoiceGenerationStage, VoiceTake,
};
pub use storyforge_render::{
    ClipRenderer, Concatenator, SceneClipRenderer, VideoConcatenator,
};
pub use storyforge_storage::{FileSystemStorage, MediaCategory, MediaReference, MediaStorage};
