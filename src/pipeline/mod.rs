//! Core ingestion pipeline implementation split into focused submodules.
//!
//! The `IngestPipeline` struct and its methods are organized by domain:
//! - [`intake`] - Acceptance-policy screening of candidate batches
//! - [`batch`] - Batch submission and outcome coordination
//! - [`transfer`] - Per-upload lifecycle driver
//! - [`control`] - Store mutators and read views

mod batch;
mod control;
mod intake;
mod transfer;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::IngestConfig;
use crate::error::Result;
use crate::resolver::{OutcomeResolver, RandomOutcomeResolver};
use crate::store::UploadStore;
use crate::types::{BatchOutcome, Event, UploadId};

/// Buffer size for the event broadcast channel
const EVENT_CHANNEL_CAPACITY: usize = 1000;

/// Completion handler invoked with each finished batch outcome
pub(crate) type CompletionHandler = Arc<dyn Fn(BatchOutcome) + Send + Sync>;

/// Main ingestion pipeline instance (cloneable - all fields are shared handles)
///
/// One instance tracks one session's uploads. Clones share the store, the
/// event channel, and the identifier counter.
#[derive(Clone)]
pub struct IngestPipeline {
    /// Configuration (immutable for the pipeline's lifetime)
    pub(crate) config: Arc<IngestConfig>,
    /// Event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: tokio::sync::broadcast::Sender<Event>,
    /// The tracked-upload store — single source of truth for rendering
    pub(crate) store: UploadStore,
    /// Session-scoped upload identifier counter
    pub(crate) next_id: Arc<AtomicU64>,
    /// Terminal outcome decision point (pluggable)
    pub(crate) resolver: Arc<dyn OutcomeResolver>,
    /// Optional completion handler, invoked once per batch with admitted files
    pub(crate) on_batch_complete: Option<CompletionHandler>,
}

impl IngestPipeline {
    /// Create a new IngestPipeline instance
    ///
    /// Validates the configuration and sets up the event broadcast channel.
    /// The default outcome resolver simulates occasional processing
    /// failures; swap it with [`with_resolver`](Self::with_resolver).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::error::Error::Config) if the
    /// configuration cannot be run with (zero delays, empty allow-list).
    pub fn new(config: IngestConfig) -> Result<Self> {
        config.validate()?;

        // Buffered so slow subscribers don't stall the pipeline; a
        // subscriber lagging more than the buffer receives RecvError::Lagged
        let (event_tx, _rx) = tokio::sync::broadcast::channel(EVENT_CHANNEL_CAPACITY);

        tracing::info!(
            allowed_types = config.policy.allowed_types.len(),
            max_size_bytes = config.policy.max_size_bytes,
            step_percent = config.transfer.step_percent,
            "Ingest pipeline initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            event_tx,
            store: UploadStore::new(),
            next_id: Arc::new(AtomicU64::new(1)),
            resolver: Arc::new(RandomOutcomeResolver::default()),
            on_batch_complete: None,
        })
    }

    /// Replace the terminal outcome resolver
    ///
    /// Embedders with a real extraction backend plug it in here; the state
    /// machine is unchanged.
    pub fn with_resolver(mut self, resolver: Arc<dyn OutcomeResolver>) -> Self {
        tracing::info!(resolver = resolver.name(), "Outcome resolver installed");
        self.resolver = resolver;
        self
    }

    /// Install a completion handler
    ///
    /// The handler receives the full ordered outcome of each batch, exactly
    /// once per [`submit_batch`](Self::submit_batch) call that admitted at
    /// least one file. Absence of a handler is not an error.
    pub fn with_completion_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(BatchOutcome) + Send + Sync + 'static,
    {
        self.on_batch_complete = Some(Arc::new(handler));
        self
    }

    /// Subscribe to ingestion events
    ///
    /// Multiple subscribers are supported. Each subscriber receives all
    /// events independently, starting from the moment of subscription.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Get the current configuration
    pub fn config(&self) -> Arc<IngestConfig> {
        Arc::clone(&self.config)
    }

    /// Emit an event to all subscribers
    ///
    /// If there are no active subscribers the event is silently dropped;
    /// ingestion proceeds whether or not anyone is listening.
    pub(crate) fn emit_event(&self, event: Event) {
        self.event_tx.send(event).ok();
    }

    /// Allocate the next session-unique upload identifier
    pub(crate) fn next_upload_id(&self) -> UploadId {
        UploadId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}
