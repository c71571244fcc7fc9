//! Scene clip rendering (Ken Burns effect + audio mux).

use crate::command::run_ffmpeg;
use async_trait::async_trait;
use derive_new::new;
use std::path::Path;
use std::time::Duration;
use storyforge_core::Resolution;
use storyforge_error::{RenderError, RenderErrorKind, StoryforgeResult};
use tracing::{info, instrument};

const FPS: u32 = 30;
const ZOOM_START: f64 = 1.0;
const ZOOM_MAX: f64 = 1.5;

/// Trait for rendering a single scene clip from a still image and audio.
#[async_trait]
pub trait ClipRenderer: Send + Sync {
    /// Render one clip: animate `image_path` for `duration_secs`, mux in
    /// `audio_path`, write the result to `out_path`.
    async fn render(
        &self,
        image_path: &Path,
        audio_path: &Path,
        duration_secs: f64,
        resolution: Resolution,
        out_path: &Path,
    ) -> StoryforgeResult<()>;
}

/// Renders a still image into a clip with a slow Ken Burns zoom, muxed with
/// the scene's narration audio.
///
/// The image is upscaled 2x before `zoompan` so the per-frame crop has
/// subpixel headroom; without it the pan visibly jitters. Zoom runs from
/// 1.0 toward a 1.5 cap, with the increment derived from the clip duration
/// so every clip ends at the same zoom level regardless of length.
#[derive(Debug, Clone, new)]
pub struct SceneClipRenderer {
    /// Hard wall-clock limit for a single clip encode.
    timeout: Duration,
}

impl SceneClipRenderer {
    fn build_filter(duration_secs: f64, resolution: Resolution) -> String {
        let frames = frame_count(duration_secs);
        let increment = (ZOOM_MAX - ZOOM_START) / frames as f64;
        format!(
            "[0:v]scale={sw}:{sh},zoompan=z='min(zoom+{inc:.6},{max})':d={frames}:s={w}x{h}:fps={fps}[v]",
            sw = resolution.width * 2,
            sh = resolution.height * 2,
            inc = increment,
            max = ZOOM_MAX,
            frames = frames,
            w = resolution.width,
            h = resolution.height,
            fps = FPS,
        )
    }
}

fn frame_count(duration_secs: f64) -> u32 {
    ((duration_secs * FPS as f64).round() as u32).max(1)
}

#[async_trait]
impl ClipRenderer for SceneClipRenderer {
    #[instrument(skip(self))]
    async fn render(
        &self,
        image_path: &Path,
        audio_path: &Path,
        duration_secs: f64,
        resolution: Resolution,
        out_path: &Path,
    ) -> StoryforgeResult<()> {
        for input in [image_path, audio_path] {
            if !input.exists() {
                return Err(RenderError::new(RenderErrorKind::MissingInput(
                    input.display().to_string(),
                ))
                .into());
            }
        }

        let filter = Self::build_filter(duration_secs, resolution);
        let args: Vec<String> = vec![
            "-y".into(),
            "-loop".into(),
            "1".into(),
            "-i".into(),
            image_path.display().to_string(),
            "-i".into(),
            audio_path.display().to_string(),
            "-filter_complex".into(),
            filter,
            "-map".into(),
            "[v]".into(),
            "-map".into(),
            "1:a".into(),
            "-shortest".into(),
            "-c:v".into(),
            "libx264".into(),
            "-c:a".into(),
            "aac".into(),
            "-pix_fmt".into(),
            "yuv420p".into(),
            out_path.display().to_string(),
        ];

        run_ffmpeg(&args, self.timeout).await?;
        info!(out = %out_path.display(), "Rendered scene clip");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_derives_zoom_rate_from_duration() {
        let filter = SceneClipRenderer::build_filter(5.0, Resolution::new(1080, 1920));

        // 5s at 30fps is 150 frames; 0.5 of zoom over 150 frames.
        assert!(filter.contains(":d=150:"));
        assert!(filter.contains("min(zoom+0.003333,1.5)"));
        assert!(filter.contains("scale=2160:3840"));
        assert!(filter.contains("s=1080x1920:fps=30"));
    }

    #[test]
    fn longer_clips_zoom_slower() {
        let short = SceneClipRenderer::build_filter(2.0, Resolution::new(1920, 1080));
        let long = SceneClipRenderer::build_filter(10.0, Resolution::new(1920, 1080));

        assert!(short.contains("zoom+0.008333"));
        assert!(long.contains("zoom+0.001667"));
    }

    #[test]
    fn tiny_durations_still_produce_a_frame() {
        assert_eq!(frame_count(0.0), 1);
        assert_eq!(frame_count(0.01), 1);
    }

    #[tokio::test]
    async fn missing_image_fails_before_spawning() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("a.mp3");
        std::fs::write(&audio, b"x").unwrap();

        let renderer = SceneClipRenderer::new(Duration::from_secs(1));
        let err = renderer
            .render(
                &dir.path().join("missing.png"),
                &audio,
                5.0,
                Resolution::new(1080, 1920),
                &dir.path().join("out.mp4"),
            )
            .await
            .unwrap_err();

        assert!(format!("{}", err).contains("Missing render input"));
    }
}
