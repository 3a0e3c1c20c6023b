//! Terminal outcome resolution for processed uploads
//!
//! The processing phase ends with a success/failure decision that this
//! core cannot make for real — there is no actual document extraction
//! behind it. The decision point is therefore a trait object on the
//! pipeline: the default [`RandomOutcomeResolver`] simulates occasional
//! failures, while embedders with a real extraction backend (and tests)
//! plug in their own implementation without touching the state machine.

use async_trait::async_trait;

use crate::error::ProcessingFailure;
use crate::types::TrackedUpload;

/// Error message attached to simulated processing failures
pub const SIMULATED_FAILURE_MESSAGE: &str = "Failed to process document. Please try again.";

/// Default probability that the simulated resolver fails an upload
pub const DEFAULT_FAILURE_RATE: f64 = 0.1;

/// Decides the terminal outcome of an upload once processing completes
///
/// Implementations must not mutate pipeline state; the lifecycle driver
/// records the decision on the tracked upload and emits the corresponding
/// event.
#[async_trait]
pub trait OutcomeResolver: Send + Sync {
    /// Resolve the terminal outcome for a processed upload
    ///
    /// `Ok(())` marks the upload `Succeeded`; `Err` marks it `Failed` with
    /// the failure's reason recorded as the upload's error message.
    async fn resolve(&self, upload: &TrackedUpload) -> Result<(), ProcessingFailure>;

    /// Name of this resolver implementation (for logs)
    fn name(&self) -> &'static str;
}

/// Simulated resolver: fails with a fixed small probability
///
/// This is the crate's default. The draw happens per upload, independently
/// of every other upload in the batch.
#[derive(Clone, Debug)]
pub struct RandomOutcomeResolver {
    failure_rate: f64,
}

impl RandomOutcomeResolver {
    /// Create a resolver with the given failure probability (clamped to 0..=1)
    pub fn new(failure_rate: f64) -> Self {
        Self {
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }
}

impl Default for RandomOutcomeResolver {
    fn default() -> Self {
        Self::new(DEFAULT_FAILURE_RATE)
    }
}

#[async_trait]
impl OutcomeResolver for RandomOutcomeResolver {
    async fn resolve(&self, upload: &TrackedUpload) -> Result<(), ProcessingFailure> {
        if rand::random::<f64>() < self.failure_rate {
            Err(ProcessingFailure {
                name: upload.name.clone(),
                reason: SIMULATED_FAILURE_MESSAGE.to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Deterministic resolver: always succeeds, or always fails with a fixed
/// reason
///
/// Useful in tests and in embedders that resolve outcomes elsewhere.
#[derive(Clone, Debug, Default)]
pub struct StaticOutcomeResolver {
    failure: Option<String>,
}

impl StaticOutcomeResolver {
    /// A resolver that succeeds every upload
    pub fn succeeding() -> Self {
        Self { failure: None }
    }

    /// A resolver that fails every upload with the given reason
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
        }
    }
}

#[async_trait]
impl OutcomeResolver for StaticOutcomeResolver {
    async fn resolve(&self, upload: &TrackedUpload) -> Result<(), ProcessingFailure> {
        match &self.failure {
            None => Ok(()),
            Some(reason) => Err(ProcessingFailure {
                name: upload.name.clone(),
                reason: reason.clone(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
