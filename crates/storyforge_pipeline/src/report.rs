//! Batch outcome aggregates.
//!
//! Per-scene failures are data in these reports, never errors to the batch
//! caller. A stage that ran to completion returns `Ok(report)` even when
//! every scene inside it failed.

use derive_getters::Getters;
use storyforge_core::SceneId;

/// Outcome of one scene within a batch.
#[derive(Debug, Clone, Getters)]
pub struct BatchItemResult<T> {
    /// The scene this result belongs to
    scene_id: SceneId,
    /// Stage output, present on success
    output: Option<T>,
    /// Failure description, present on failure
    error_message: Option<String>,
}

impl<T> BatchItemResult<T> {
    /// Record a success.
    pub fn success(scene_id: SceneId, output: T) -> Self {
        Self {
            scene_id,
            output: Some(output),
            error_message: None,
        }
    }

    /// Record a failure.
    pub fn failure(scene_id: SceneId, error_message: impl Into<String>) -> Self {
        Self {
            scene_id,
            output: None,
            error_message: Some(error_message.into()),
        }
    }

    /// True when the scene's operation succeeded.
    pub fn is_success(&self) -> bool {
        self.output.is_some()
    }
}

/// Aggregate outcome of a batch run.
///
/// `details` preserves the input order of the batch, and the counts always
/// reconcile: `succeeded + failed == total == details.len()`.
#[derive(Debug, Clone, Getters)]
pub struct BatchReport<T> {
    /// Number of scenes attempted
    total: usize,
    /// Number of scenes that succeeded
    succeeded: usize,
    /// Number of scenes that failed
    failed: usize,
    /// Per-scene outcomes in input order
    details: Vec<BatchItemResult<T>>,
}

impl<T> BatchReport<T> {
    /// Build a report from per-scene results, deriving the counts.
    pub fn from_details(details: Vec<BatchItemResult<T>>) -> Self {
        let total = details.len();
        let succeeded = details.iter().filter(|d| d.is_success()).count();
        Self {
            total,
            succeeded,
            failed: total - succeeded,
            details,
        }
    }

    /// Iterate the successful results in input order.
    pub fn successes(&self) -> impl Iterator<Item = (&SceneId, &T)> {
        self.details
            .iter()
            .filter_map(|d| d.output.as_ref().map(|o| (&d.scene_id, o)))
    }

    /// Iterate the failed results in input order.
    pub fn failures(&self) -> impl Iterator<Item = (&SceneId, &str)> {
        self.details.iter().filter_map(|d| {
            d.error_message
                .as_deref()
                .map(|message| (&d.scene_id, message))
        })
    }

    /// True when every scene in the batch succeeded.
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_reconcile() {
        let a = SceneId::new();
        let b = SceneId::new();
        let c = SceneId::new();
        let report = BatchReport::from_details(vec![
            BatchItemResult::success(a, 1u32),
            BatchItemResult::failure(b, "backend 500"),
            BatchItemResult::success(c, 3u32),
        ]);

        assert_eq!(*report.total(), 3);
        assert_eq!(*report.succeeded(), 2);
        assert_eq!(*report.failed(), 1);
        assert_eq!(report.details().len(), 3);
        assert!(!report.is_complete());

        let successes: Vec<_> = report.successes().collect();
        assert_eq!(successes, vec![(&a, &1u32), (&c, &3u32)]);

        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures, vec![(&b, "backend 500")]);
    }
}
