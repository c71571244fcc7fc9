//! Sequential batch executor.

use crate::{BatchItemResult, BatchReport};
use std::future::Future;
use std::time::Duration;
use storyforge_core::Scene;
use storyforge_error::{PipelineError, PipelineErrorKind, StoryforgeResult};
use tracing::{info, instrument, warn};

/// Runs one operation over a batch of scenes, strictly one at a time in
/// input order, sleeping a fixed delay between consecutive scenes.
///
/// The delay is deliberate pacing for rate-limited backends and is never
/// skipped on failure; a failed scene is recorded in the report and the
/// batch moves on. There is no retry and no parallelism here.
#[derive(Debug, Clone, Copy)]
pub struct SceneBatchProcessor {
    delay: Duration,
}

impl SceneBatchProcessor {
    /// Create a processor with the given inter-item delay.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Run `op` over every scene in order, collecting a [`BatchReport`].
    ///
    /// The delay is applied after every scene except the last, on success
    /// and failure alike.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineErrorKind::EmptyBatch`] when `scenes` is empty.
    /// Per-scene failures never surface here.
    #[instrument(skip(self, scenes, op), fields(count = scenes.len(), delay = ?self.delay))]
    pub async fn process<'a, T, F, Fut>(
        &self,
        scenes: &'a [Scene],
        op: F,
    ) -> StoryforgeResult<BatchReport<T>>
    where
        F: Fn(&'a Scene) -> Fut,
        Fut: Future<Output = StoryforgeResult<T>>,
    {
        if scenes.is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::EmptyBatch).into());
        }

        let mut details = Vec::with_capacity(scenes.len());
        for (index, scene) in scenes.iter().enumerate() {
            match op(scene).await {
                Ok(output) => {
                    info!(scene = %scene.id(), order = scene.order(), "Scene succeeded");
                    details.push(BatchItemResult::success(*scene.id(), output));
                }
                Err(e) => {
                    warn!(scene = %scene.id(), order = scene.order(), error = %e, "Scene failed");
                    details.push(BatchItemResult::failure(*scene.id(), e.to_string()));
                }
            }

            if index + 1 < scenes.len() {
                tokio::time::sleep(self.delay).await;
            }
        }

        let report = BatchReport::from_details(details);
        info!(
            total = report.total(),
            succeeded = report.succeeded(),
            failed = report.failed(),
            "Batch finished"
        );
        Ok(report)
    }
}
