//! Composition stage: per-scene clip rendering plus final concatenation.

use crate::image::select_targets;
use crate::{BatchReport, SceneBatchProcessor};
use derive_getters::Getters;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use storyforge_core::{ProjectMediaSettings, Resolution, Scene, SceneId};
use storyforge_error::{
    PipelineError, PipelineErrorKind, RenderError, RenderErrorKind, StoryforgeResult,
};
use storyforge_render::{ClipRenderer, Concatenator};
use storyforge_storage::{MediaCategory, MediaReference, MediaStorage};
use tracing::{info, instrument, warn};

/// One successfully rendered scene clip.
#[derive(Debug, Clone, Getters)]
pub struct RenderedClip {
    /// Scene the clip belongs to
    scene_id: SceneId,
    /// The scene's playback position
    order: u32,
    /// Stored clip
    reference: MediaReference,
}

/// Outcome of a composition run.
#[derive(Debug, Clone, Getters)]
pub struct CompositionOutcome {
    /// Per-scene render outcomes
    report: BatchReport<RenderedClip>,
    /// Final concatenated video, `None` when no clip rendered successfully
    final_video: Option<MediaReference>,
}

/// Renders every scene into a clip, then concatenates the successful clips
/// in ascending scene order into one final video.
///
/// Composition is all-or-nothing at its gate: every scene must already
/// carry a generated image and audio before any rendering starts. Past the
/// gate, per-scene render failures degrade the final video (their clips are
/// simply absent) rather than aborting the run. Clips are always rendered
/// fresh; a recomposition never reuses clips from a prior run.
pub struct CompositionStage {
    renderer: Arc<dyn ClipRenderer>,
    concatenator: Arc<dyn Concatenator>,
    storage: Arc<dyn MediaStorage>,
    processor: SceneBatchProcessor,
}

impl CompositionStage {
    /// Create the stage with the given inter-item delay.
    pub fn new(
        renderer: Arc<dyn ClipRenderer>,
        concatenator: Arc<dyn Concatenator>,
        storage: Arc<dyn MediaStorage>,
        delay: Duration,
    ) -> Self {
        Self {
            renderer,
            concatenator,
            storage,
            processor: SceneBatchProcessor::new(delay),
        }
    }

    /// Run composition over every scene, writing intermediates under
    /// `work_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineErrorKind::MissingAssets`] before any rendering if
    /// any scene lacks an image or audio reference, and
    /// [`PipelineErrorKind::EmptyBatch`] for an empty scene list.
    /// Concatenation failure is fatal for the run.
    #[instrument(skip_all, fields(scenes = scenes.len(), work_dir = %work_dir.display()))]
    pub async fn run(
        &self,
        scenes: &mut [Scene],
        settings: &ProjectMediaSettings,
        work_dir: &Path,
    ) -> StoryforgeResult<CompositionOutcome> {
        if scenes.is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::EmptyBatch).into());
        }

        let missing = scenes
            .iter()
            .filter(|scene| !scene.is_ready_for_composition())
            .count();
        if missing > 0 {
            return Err(PipelineError::new(PipelineErrorKind::MissingAssets(missing)).into());
        }

        tokio::fs::create_dir_all(work_dir).await.map_err(|e| {
            RenderError::new(RenderErrorKind::WorkArea(format!(
                "Failed to create {}: {}",
                work_dir.display(),
                e
            )))
        })?;

        let targets = select_targets(scenes, None);
        let resolution = settings.aspect_ratio().video_resolution();

        let report = self
            .processor
            .process(&targets, |scene| async move {
                self.render_scene(scene, resolution, work_dir).await
            })
            .await?;

        for (scene_id, clip) in report.successes() {
            if let Some(scene) = scenes.iter_mut().find(|s| s.id() == scene_id) {
                scene.set_video_clip_ref(clip.reference().clone());
            }
        }

        let mut clips: Vec<&RenderedClip> = report.successes().map(|(_, clip)| clip).collect();
        clips.sort_by_key(|clip| *clip.order());

        let final_video = match clips.as_slice() {
            [] => {
                warn!("No scene clip rendered successfully; skipping concatenation");
                None
            }
            // A single clip is the final video as-is; concatenation never
            // runs for it.
            [only] => {
                info!(scene = %only.scene_id(), video = %only.reference().id, "Single clip is the final video");
                Some(only.reference().clone())
            }
            clips => {
                let clip_paths: Vec<PathBuf> = clips
                    .iter()
                    .map(|clip| clip_path(work_dir, *clip.order()))
                    .collect();
                let final_path = work_dir.join("final.mp4");
                self.concatenator
                    .concatenate(&clip_paths, &final_path)
                    .await?;

                let bytes = read_work_file(&final_path).await?;
                let reference = self
                    .storage
                    .store(&bytes, "mp4", MediaCategory::Video)
                    .await?;
                info!(clips = clips.len(), video = %reference.id, "Stored final video");
                Some(reference)
            }
        };

        Ok(CompositionOutcome {
            report,
            final_video,
        })
    }

    /// Render one scene: stage its inputs in the work area, run ffmpeg,
    /// store the resulting clip.
    async fn render_scene(
        &self,
        scene: &Scene,
        resolution: Resolution,
        work_dir: &Path,
    ) -> StoryforgeResult<RenderedClip> {
        let image_ref = scene.image_ref().as_ref().ok_or_else(|| {
            RenderError::new(RenderErrorKind::MissingInput(format!(
                "scene {} has no image",
                scene.order()
            )))
        })?;
        let audio_ref = scene.audio_ref().as_ref().ok_or_else(|| {
            RenderError::new(RenderErrorKind::MissingInput(format!(
                "scene {} has no audio",
                scene.order()
            )))
        })?;

        // Retrieval verifies the stored content hash before ffmpeg sees the
        // bytes.
        let image_path = self
            .stage_input(image_ref, work_dir, *scene.order(), "image")
            .await?;
        let audio_path = self
            .stage_input(audio_ref, work_dir, *scene.order(), "audio")
            .await?;

        let out_path = clip_path(work_dir, *scene.order());
        self.renderer
            .render(
                &image_path,
                &audio_path,
                scene.effective_duration_secs(),
                resolution,
                &out_path,
            )
            .await?;

        let bytes = read_work_file(&out_path).await?;
        let reference = self
            .storage
            .store(&bytes, "mp4", MediaCategory::Video)
            .await?;

        Ok(RenderedClip {
            scene_id: *scene.id(),
            order: *scene.order(),
            reference,
        })
    }

    /// Copy one stored asset into the work area and return its path.
    async fn stage_input(
        &self,
        reference: &MediaReference,
        work_dir: &Path,
        order: u32,
        role: &str,
    ) -> StoryforgeResult<PathBuf> {
        let extension = reference
            .local_path()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("bin");
        let path = work_dir.join(format!("scene_{}_{}.{}", order, role, extension));

        let bytes = self.storage.retrieve(reference).await?;
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            RenderError::new(RenderErrorKind::WorkArea(format!(
                "Failed to stage {}: {}",
                path.display(),
                e
            )))
        })?;
        Ok(path)
    }
}

fn clip_path(work_dir: &Path, order: u32) -> PathBuf {
    work_dir.join(format!("scene_{}.mp4", order))
}

async fn read_work_file(path: &Path) -> StoryforgeResult<Vec<u8>> {
    tokio::fs::read(path).await.map_err(|e| {
        RenderError::new(RenderErrorKind::WorkArea(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        )))
        .into()
    })
}
