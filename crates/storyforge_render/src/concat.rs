//! Clip concatenation via the ffmpeg concat demuxer.

use crate::command::run_ffmpeg;
use async_trait::async_trait;
use derive_new::new;
use std::path::{Path, PathBuf};
use std::time::Duration;
use storyforge_error::{RenderError, RenderErrorKind, StoryforgeResult};
use tracing::{debug, info, instrument};

/// Trait for joining rendered clips into one video.
#[async_trait]
pub trait Concatenator: Send + Sync {
    /// Join `clips` in the given order and write the result to `out_path`.
    async fn concatenate(&self, clips: &[PathBuf], out_path: &Path) -> StoryforgeResult<()>;
}

/// Joins clips with the concat demuxer and stream copy.
///
/// All clips come from [`super::SceneClipRenderer`] with identical codec
/// parameters, so no re-encode is needed. A single clip is copied straight
/// to the output; ffmpeg never runs.
#[derive(Debug, Clone, new)]
pub struct VideoConcatenator {
    /// Hard wall-clock limit for the concat process.
    timeout: Duration,
}

/// Build the concat demuxer list document. Paths are absolute and single
/// quotes are escaped per the demuxer's quoting rules.
fn build_concat_list(clips: &[PathBuf]) -> String {
    clips
        .iter()
        .map(|clip| {
            let escaped = clip.display().to_string().replace('\'', r"'\''");
            format!("file '{}'\n", escaped)
        })
        .collect()
}

#[async_trait]
impl Concatenator for VideoConcatenator {
    #[instrument(skip(self, clips), fields(clip_count = clips.len()))]
    async fn concatenate(&self, clips: &[PathBuf], out_path: &Path) -> StoryforgeResult<()> {
        match clips {
            [] => Err(RenderError::new(RenderErrorKind::MissingInput(
                "no clips to concatenate".to_string(),
            ))
            .into()),
            [only] => {
                debug!(clip = %only.display(), "Single clip; copying without concatenation");
                tokio::fs::copy(only, out_path).await.map_err(|e| {
                    RenderError::new(RenderErrorKind::WorkArea(format!(
                        "Failed to copy single clip: {}",
                        e
                    )))
                })?;
                info!(out = %out_path.display(), "Wrote final video");
                Ok(())
            }
            clips => {
                let list_path = out_path.with_extension("txt");
                tokio::fs::write(&list_path, build_concat_list(clips))
                    .await
                    .map_err(|e| {
                        RenderError::new(RenderErrorKind::WorkArea(format!(
                            "Failed to write concat list: {}",
                            e
                        )))
                    })?;

                let args: Vec<String> = vec![
                    "-y".into(),
                    "-f".into(),
                    "concat".into(),
                    "-safe".into(),
                    "0".into(),
                    "-i".into(),
                    list_path.display().to_string(),
                    "-c".into(),
                    "copy".into(),
                    out_path.display().to_string(),
                ];

                let result = run_ffmpeg(&args, self.timeout).await;
                let _ = tokio::fs::remove_file(&list_path).await;
                result?;

                info!(out = %out_path.display(), clips = clips.len(), "Wrote final video");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concat_list_quotes_and_orders_paths() {
        let clips = vec![
            PathBuf::from("/work/scene_1.mp4"),
            PathBuf::from("/work/it's_scene_2.mp4"),
        ];
        let list = build_concat_list(&clips);

        assert_eq!(
            list,
            "file '/work/scene_1.mp4'\nfile '/work/it'\\''s_scene_2.mp4'\n"
        );
    }

    #[tokio::test]
    async fn single_clip_is_copied_not_concatenated() {
        let dir = tempfile::tempdir().unwrap();
        let clip = dir.path().join("only.mp4");
        std::fs::write(&clip, b"clip-bytes").unwrap();
        let out = dir.path().join("final.mp4");

        let concatenator = VideoConcatenator::new(Duration::from_secs(1));
        concatenator
            .concatenate(&[clip], &out)
            .await
            .unwrap();

        assert_eq!(std::fs::read(&out).unwrap(), b"clip-bytes");
        // No concat list was ever written.
        assert!(!dir.path().join("final.txt").exists());
    }

    #[tokio::test]
    async fn empty_clip_list_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let concatenator = VideoConcatenator::new(Duration::from_secs(1));

        let err = concatenator
            .concatenate(&[], &dir.path().join("final.mp4"))
            .await
            .unwrap_err();

        assert!(format!("{}", err).contains("no clips"));
    }
}
