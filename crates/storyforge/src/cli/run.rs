//! Full pipeline run command handler.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use storyforge::{
    BatchReport, CompositionStage, EdgeTtsClient, FileSystemStorage, ImageGenerationStage,
    PipelineConfig, PollinationsClient, Project, SceneClipRenderer, StoryforgeResult,
    VideoConcatenator, VoiceGenerationStage,
};
use storyforge_error::{PipelineError, PipelineErrorKind};
use tracing::info;

/// Load a project, run every stage, and print the reports.
///
/// With `save` set, the project file is rewritten with the generated asset
/// references attached to each scene.
pub async fn run_project(
    project_path: &Path,
    media_dir: PathBuf,
    work_dir: Option<PathBuf>,
    save: bool,
) -> StoryforgeResult<()> {
    let config = PipelineConfig::load()?;
    let mut project = Project::load(project_path)?;
    info!(title = %project.title(), scenes = project.scenes().len(), "Loaded project");

    let storage = Arc::new(FileSystemStorage::new(&media_dir)?);
    let settings = project.settings().clone();
    let work_dir = work_dir.unwrap_or_else(|| media_dir.join("work"));

    let images = ImageGenerationStage::new(
        Arc::new(PollinationsClient::new()?),
        storage.clone(),
        config.delays.image(),
    );
    let image_report = images.run(project.scenes_mut(), &settings, None).await?;
    print_report("Images", &image_report);

    let voices = VoiceGenerationStage::new(
        Arc::new(EdgeTtsClient::new()?),
        storage.clone(),
        config.delays.voice(),
    );
    let voice_report = voices.run(project.scenes_mut(), &settings, None).await?;
    print_report("Voices", &voice_report);

    let composition = CompositionStage::new(
        Arc::new(SceneClipRenderer::new(config.timeouts.render())),
        Arc::new(VideoConcatenator::new(config.timeouts.concat())),
        storage,
        config.delays.video(),
    );
    let outcome = composition
        .run(project.scenes_mut(), &settings, &work_dir)
        .await?;
    print_report("Clips", outcome.report());

    if save {
        project.save(project_path)?;
        info!(path = %project_path.display(), "Saved project with asset references");
    }

    match outcome.final_video() {
        Some(video) => {
            println!("Final video: {}", video.local_path().display());
            Ok(())
        }
        // A run that produced no final video failed as a whole, even though
        // the per-scene report above is well-formed.
        None => Err(PipelineError::new(PipelineErrorKind::NothingToConcatenate).into()),
    }
}

fn print_report<T>(stage: &str, report: &BatchReport<T>) {
    println!(
        "{}: {}/{} succeeded",
        stage,
        report.succeeded(),
        report.total()
    );
    for (scene_id, message) in report.failures() {
        println!("  scene {} failed: {}", scene_id, message);
    }
}
