use std::sync::Arc;

use crate::config::IngestConfig;
use crate::pipeline::IngestPipeline;
use crate::pipeline::test_helpers::{drain_events, txt};
use crate::resolver::StaticOutcomeResolver;
use crate::types::{Event, Status};

// These tests use default (second-scale) timings on the paused tokio clock,
// which auto-advances whenever the runtime is otherwise idle.

fn paused_pipeline(config: IngestConfig) -> IngestPipeline {
    IngestPipeline::new(config)
        .unwrap()
        .with_resolver(Arc::new(StaticOutcomeResolver::succeeding()))
}

fn transfer_percents(events: &[Event]) -> Vec<u8> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Transferring { percent, .. } => Some(*percent),
            _ => None,
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn progress_steps_are_monotonic_and_end_at_exactly_100() {
    let pipeline = paused_pipeline(IngestConfig::default());
    let mut rx = pipeline.subscribe();

    let outcome = pipeline.submit_batch(vec![txt("notes.txt", 2048)]).await;

    assert_eq!(outcome.len(), 1);
    assert_eq!(outcome[0].status, Status::Succeeded);
    assert_eq!(outcome[0].progress, 100);

    let events = drain_events(&mut rx);
    let percents = transfer_percents(&events);
    assert_eq!(
        percents,
        vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100],
        "default 10% steps should walk the full range"
    );
    assert!(
        percents.windows(2).all(|w| w[0] <= w[1]),
        "progress must be non-decreasing"
    );
    assert!(percents[0] <= 10, "first observed progress must be at most one step");
}

#[tokio::test(start_paused = true)]
async fn processing_begins_only_after_progress_reaches_100() {
    let pipeline = paused_pipeline(IngestConfig::default());
    let mut rx = pipeline.subscribe();

    pipeline.submit_batch(vec![txt("notes.txt", 2048)]).await;

    let events = drain_events(&mut rx);
    let processing_pos = events
        .iter()
        .position(|e| matches!(e, Event::Processing { .. }))
        .expect("a processing event must be emitted");
    let last_transfer_pos = events
        .iter()
        .rposition(|e| matches!(e, Event::Transferring { .. }))
        .expect("transfer events must be emitted");

    assert!(
        last_transfer_pos < processing_pos,
        "every transfer step must precede processing"
    );
    match &events[last_transfer_pos] {
        Event::Transferring { percent, .. } => assert_eq!(*percent, 100),
        other => panic!("expected Transferring, got: {other:?}"),
    }
    assert!(
        matches!(events.last(), Some(Event::Succeeded { .. })),
        "terminal event must come last"
    );
}

#[tokio::test(start_paused = true)]
async fn non_dividing_step_size_clamps_the_final_step_at_100() {
    let mut config = IngestConfig::default();
    config.transfer.step_percent = 30;
    let pipeline = paused_pipeline(config);
    let mut rx = pipeline.subscribe();

    let outcome = pipeline.submit_batch(vec![txt("notes.txt", 64)]).await;

    assert_eq!(outcome[0].progress, 100);
    let percents = transfer_percents(&drain_events(&mut rx));
    assert_eq!(percents, vec![30, 60, 90, 100]);
}

#[tokio::test(start_paused = true)]
async fn failed_upload_records_error_and_keeps_last_progress() {
    let pipeline = IngestPipeline::new(IngestConfig::default())
        .unwrap()
        .with_resolver(Arc::new(StaticOutcomeResolver::failing(
            "Failed to process document. Please try again.",
        )));
    let mut rx = pipeline.subscribe();

    let outcome = pipeline.submit_batch(vec![txt("notes.txt", 2048)]).await;

    assert_eq!(outcome[0].status, Status::Failed);
    assert_eq!(
        outcome[0].progress, 100,
        "failure after transfer leaves progress at its last observed value"
    );
    assert_eq!(
        outcome[0].error.as_deref(),
        Some("Failed to process document. Please try again.")
    );

    let events = drain_events(&mut rx);
    match events.last() {
        Some(Event::Failed { name, error, .. }) => {
            assert_eq!(name, "notes.txt");
            assert_eq!(error, "Failed to process document. Please try again.");
        }
        other => panic!("expected Failed as the terminal event, got: {other:?}"),
    }

    // The store mirrors the terminal state under the same identifier
    let stored = pipeline.get(outcome[0].id).expect("upload still tracked");
    assert_eq!(stored.status, Status::Failed);
    assert_eq!(stored.error, outcome[0].error);
}

#[tokio::test(start_paused = true)]
async fn succeeded_upload_carries_no_error() {
    let pipeline = paused_pipeline(IngestConfig::default());

    let outcome = pipeline.submit_batch(vec![txt("notes.txt", 2048)]).await;

    assert_eq!(outcome[0].status, Status::Succeeded);
    assert!(
        outcome[0].error.is_none(),
        "exactly one of {{error present, succeeded}} may hold"
    );
}
