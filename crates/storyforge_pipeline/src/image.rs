//! Image generation stage.

use crate::{BatchReport, SceneBatchProcessor};
use std::sync::Arc;
use std::time::Duration;
use storyforge_backends::ImageSynthesizer;
use storyforge_core::{ProjectMediaSettings, Scene, SceneId};
use storyforge_error::StoryforgeResult;
use storyforge_storage::{MediaCategory, MediaReference, MediaStorage};
use tracing::instrument;

/// Generates one image per scene and persists it immediately.
///
/// Each scene's effective prompt is the project's image style prefixed onto
/// its visual prompt. Generated bytes go straight into storage so a later
/// failure in the batch cannot lose earlier work.
pub struct ImageGenerationStage {
    synthesizer: Arc<dyn ImageSynthesizer>,
    storage: Arc<dyn MediaStorage>,
    processor: SceneBatchProcessor,
}

impl ImageGenerationStage {
    /// Create the stage with the given inter-item delay.
    pub fn new(
        synthesizer: Arc<dyn ImageSynthesizer>,
        storage: Arc<dyn MediaStorage>,
        delay: Duration,
    ) -> Self {
        Self {
            synthesizer,
            storage,
            processor: SceneBatchProcessor::new(delay),
        }
    }

    /// Run the stage over `scenes` in ascending scene order.
    ///
    /// With `filter` set, only the named scenes are processed (single-scene
    /// regeneration); the report covers exactly the processed scenes. Each
    /// success replaces the scene's image reference in place.
    #[instrument(skip_all, fields(scenes = scenes.len(), filtered = filter.is_some()))]
    pub async fn run(
        &self,
        scenes: &mut [Scene],
        settings: &ProjectMediaSettings,
        filter: Option<&[SceneId]>,
    ) -> StoryforgeResult<BatchReport<MediaReference>> {
        let targets = select_targets(scenes, filter);
        let resolution = settings.aspect_ratio().image_dimensions();

        let report = self
            .processor
            .process(&targets, |scene| async move {
                let prompt =
                    format!("{} style, {}", settings.image_style(), scene.visual_prompt());
                let bytes = self.synthesizer.synthesize(&prompt, resolution).await?;
                self.storage
                    .store(
                        &bytes,
                        self.synthesizer.output_extension(),
                        MediaCategory::Image,
                    )
                    .await
            })
            .await?;

        for (scene_id, reference) in report.successes() {
            if let Some(scene) = scenes.iter_mut().find(|s| s.id() == scene_id) {
                scene.set_image_ref(reference.clone());
            }
        }

        Ok(report)
    }
}

/// Snapshot the scenes a stage should process, in ascending scene order.
pub(crate) fn select_targets(scenes: &[Scene], filter: Option<&[SceneId]>) -> Vec<Scene> {
    let mut targets: Vec<Scene> = scenes
        .iter()
        .filter(|scene| filter.is_none_or(|ids| ids.contains(scene.id())))
        .cloned()
        .collect();
    targets.sort_by_key(|scene| *scene.order());
    targets
}
