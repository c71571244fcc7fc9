//! Batch processor behavior: ordering, failure isolation, pacing.

mod common;

use common::scene;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use storyforge_error::{BackendError, BackendErrorKind, StoryforgeErrorKind};
use storyforge_pipeline::SceneBatchProcessor;

#[tokio::test]
async fn details_preserve_input_order_and_counts_reconcile() {
    let scenes: Vec<_> = (1..=5).map(scene).collect();
    let processor = SceneBatchProcessor::new(Duration::ZERO);

    // Scenes 2 and 4 fail; everything else succeeds.
    let report = processor
        .process(&scenes, |s| async move {
            if *s.order() == 2 || *s.order() == 4 {
                Err(BackendError::new(BackendErrorKind::ApiError {
                    status: 429,
                    message: "slow down".into(),
                })
                .into())
            } else {
                Ok(*s.order())
            }
        })
        .await
        .unwrap();

    assert_eq!(*report.total(), 5);
    assert_eq!(*report.succeeded(), 3);
    assert_eq!(*report.failed(), 2);
    assert_eq!(report.details().len(), 5);

    let detail_ids: Vec<_> = report.details().iter().map(|d| *d.scene_id()).collect();
    let input_ids: Vec<_> = scenes.iter().map(|s| *s.id()).collect();
    assert_eq!(detail_ids, input_ids);

    let succeeded_orders: Vec<_> = report.successes().map(|(_, order)| *order).collect();
    assert_eq!(succeeded_orders, vec![1, 3, 5]);

    for (_, message) in report.failures() {
        assert!(message.contains("429"));
    }
}

#[tokio::test]
async fn failure_does_not_stop_the_batch() {
    let scenes: Vec<_> = (1..=3).map(scene).collect();
    let processor = SceneBatchProcessor::new(Duration::ZERO);

    let attempted = Mutex::new(Vec::new());
    let report = processor
        .process(&scenes, |s| {
            attempted.lock().unwrap().push(*s.order());
            async move {
                if *s.order() == 1 {
                    Err(BackendError::new(BackendErrorKind::Http("boom".into())).into())
                } else {
                    Ok(())
                }
            }
        })
        .await
        .unwrap();

    // All three scenes were attempted despite the first failing.
    assert_eq!(*attempted.lock().unwrap(), vec![1, 2, 3]);
    assert_eq!(*report.failed(), 1);
}

#[tokio::test]
async fn delay_is_applied_between_items_but_not_after_the_last() {
    let scenes: Vec<_> = (1..=3).map(scene).collect();
    let delay = Duration::from_millis(40);
    let processor = SceneBatchProcessor::new(delay);

    let started = Instant::now();
    processor
        .process(&scenes, |_| async move { Ok(()) })
        .await
        .unwrap();
    let elapsed = started.elapsed();

    // Two gaps for three items.
    assert!(elapsed >= delay * 2, "elapsed {elapsed:?}");
}

#[tokio::test]
async fn operations_never_overlap() {
    let scenes: Vec<_> = (1..=4).map(scene).collect();
    let processor = SceneBatchProcessor::new(Duration::from_millis(5));

    let in_flight = Mutex::new(0u32);
    let max_in_flight = Mutex::new(0u32);
    processor
        .process(&scenes, |_| async {
            {
                let mut current = in_flight.lock().unwrap();
                *current += 1;
                let mut max = max_in_flight.lock().unwrap();
                *max = (*max).max(*current);
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
            *in_flight.lock().unwrap() -= 1;
            Ok(())
        })
        .await
        .unwrap();

    assert_eq!(*max_in_flight.lock().unwrap(), 1);
}

#[tokio::test]
async fn empty_batch_is_an_error() {
    let processor = SceneBatchProcessor::new(Duration::ZERO);
    let err = processor
        .process(&[], |_| async move { Ok(()) })
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), StoryforgeErrorKind::Pipeline(_)));
}
