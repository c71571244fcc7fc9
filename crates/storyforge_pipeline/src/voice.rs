//! Voice generation stage.

use crate::image::select_targets;
use crate::{BatchReport, SceneBatchProcessor};
use derive_getters::Getters;
use std::sync::Arc;
use std::time::Duration;
use storyforge_backends::SpeechSynthesizer;
use storyforge_core::{ProjectMediaSettings, Scene, SceneId, VoiceSettings};
use storyforge_error::StoryforgeResult;
use storyforge_storage::{MediaCategory, MediaReference, MediaStorage};
use tracing::instrument;

/// One successful narration take: the stored audio plus the voice parameters
/// that actually produced it after per-scene override resolution.
#[derive(Debug, Clone, Getters)]
pub struct VoiceTake {
    /// Stored narration audio
    audio: MediaReference,
    /// Resolved voice parameters used for this take
    settings: VoiceSettings,
}

/// Generates narration audio per scene and persists it immediately.
///
/// Voice parameters resolve per scene: a scene-level override wins over the
/// project default. The resolved parameters are part of the take so the
/// report shows what each scene was actually read with.
pub struct VoiceGenerationStage {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    storage: Arc<dyn MediaStorage>,
    processor: SceneBatchProcessor,
}

impl VoiceGenerationStage {
    /// Create the stage with the given inter-item delay.
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
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
    /// With `filter` set, only the named scenes are processed. Each success
    /// replaces the scene's audio reference in place.
    #[instrument(skip_all, fields(scenes = scenes.len(), filtered = filter.is_some()))]
    pub async fn run(
        &self,
        scenes: &mut [Scene],
        settings: &ProjectMediaSettings,
        filter: Option<&[SceneId]>,
    ) -> StoryforgeResult<BatchReport<VoiceTake>> {
        let targets = select_targets(scenes, filter);

        let report = self
            .processor
            .process(&targets, |scene| async move {
                let voice = scene
                    .voice()
                    .clone()
                    .unwrap_or_else(|| settings.voice().clone());
                let bytes = self
                    .synthesizer
                    .synthesize(scene.narration_text(), &voice)
                    .await?;
                let audio = self
                    .storage
                    .store(
                        &bytes,
                        self.synthesizer.output_extension(),
                        MediaCategory::Audio,
                    )
                    .await?;
                Ok(VoiceTake {
                    audio,
                    settings: voice,
                })
            })
            .await?;

        for (scene_id, take) in report.successes() {
            if let Some(scene) = scenes.iter_mut().find(|s| s.id() == scene_id) {
                scene.set_audio_ref(take.audio().clone());
            }
        }

        Ok(report)
    }
}
