//! Shared test helpers for creating IngestPipeline instances in tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::IngestConfig;
use crate::error::ProcessingFailure;
use crate::pipeline::IngestPipeline;
use crate::resolver::{OutcomeResolver, SIMULATED_FAILURE_MESSAGE, StaticOutcomeResolver};
use crate::types::{CandidateFile, Event, TrackedUpload};

/// Default config with millisecond-scale delays so real-time tests stay fast
pub(crate) fn fast_config() -> IngestConfig {
    let mut config = IngestConfig::default();
    config.transfer.step_delay = Duration::from_millis(2);
    config.transfer.processing_delay = Duration::from_millis(5);
    config
}

/// Fast pipeline with a deterministic always-succeed resolver
pub(crate) fn create_test_pipeline() -> IngestPipeline {
    let pipeline = IngestPipeline::new(fast_config()).unwrap();
    pipeline.with_resolver(Arc::new(StaticOutcomeResolver::succeeding()))
}

pub(crate) fn pdf(name: &str, size_bytes: u64) -> CandidateFile {
    CandidateFile::new(name, size_bytes, "application/pdf")
}

pub(crate) fn txt(name: &str, size_bytes: u64) -> CandidateFile {
    CandidateFile::new(name, size_bytes, "text/plain")
}

pub(crate) fn png(name: &str, size_bytes: u64) -> CandidateFile {
    CandidateFile::new(name, size_bytes, "image/png")
}

/// Resolver that fails exactly the uploads carrying the given file name
pub(crate) struct FailNamed(pub &'static str);

#[async_trait]
impl OutcomeResolver for FailNamed {
    async fn resolve(&self, upload: &TrackedUpload) -> Result<(), ProcessingFailure> {
        if upload.name == self.0 {
            Err(ProcessingFailure {
                name: upload.name.clone(),
                reason: SIMULATED_FAILURE_MESSAGE.to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn name(&self) -> &'static str {
        "fail-named"
    }
}

/// Drain every currently buffered event from a subscriber
pub(crate) fn drain_events(rx: &mut tokio::sync::broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
