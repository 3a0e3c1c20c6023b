//! Core types for kb-ingest

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a tracked upload
///
/// Assigned from a session-scoped atomic counter at admission; collision-free
/// within a pipeline instance. Re-submitting the same file produces a new
/// identifier.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UploadId(pub u64);

impl UploadId {
    /// Create a new UploadId
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner u64 value
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for UploadId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<UploadId> for u64 {
    fn from(id: UploadId) -> Self {
        id.0
    }
}

impl PartialEq<u64> for UploadId {
    fn eq(&self, other: &u64) -> bool {
        self.0 == *other
    }
}

impl PartialEq<UploadId> for u64 {
    fn eq(&self, other: &UploadId) -> bool {
        *self == other.0
    }
}

impl std::fmt::Display for UploadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Upload lifecycle status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Admitted and waiting to start
    Queued,
    /// Transfer in progress (progress percentage is meaningful)
    Transferring,
    /// Content extraction in progress (transfer complete)
    Processing,
    /// Successfully added to the knowledge base
    Succeeded,
    /// Failed during processing
    Failed,
}

impl Status {
    /// Whether this status is terminal (no further transitions occur)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Succeeded | Status::Failed)
    }
}

/// A caller-supplied file proposed for ingestion
///
/// Read-only input to the pipeline; candidates that fail validation are
/// discarded without ever becoming tracked uploads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFile {
    /// File name as presented to the user
    pub name: String,

    /// Size in bytes
    pub size_bytes: u64,

    /// Content-type identifier (e.g., "application/pdf")
    pub content_type: String,
}

impl CandidateFile {
    /// Create a new candidate file
    pub fn new(
        name: impl Into<String>,
        size_bytes: u64,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            content_type: content_type.into(),
        }
    }
}

/// The pipeline's mutable record for one admitted file
///
/// Owned by the [`UploadStore`](crate::store::UploadStore) for its lifetime
/// and mutated only by the upload's own lifecycle driver. Removed only by
/// explicit caller action (dismiss or clear-all), never by the pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrackedUpload {
    /// Unique upload identifier
    pub id: UploadId,

    /// File name
    pub name: String,

    /// Size in bytes
    pub size_bytes: u64,

    /// Content-type identifier
    pub content_type: String,

    /// Current lifecycle status
    pub status: Status,

    /// Transfer progress percentage (0–100, meaningful during `Transferring`)
    pub progress: u8,

    /// Error message (present only in the `Failed` terminal state)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// When the upload was admitted to the pipeline
    pub created_at: DateTime<Utc>,
}

impl TrackedUpload {
    /// Create a fresh record for an admitted candidate
    pub(crate) fn admitted(id: UploadId, candidate: &CandidateFile) -> Self {
        Self {
            id,
            name: candidate.name.clone(),
            size_bytes: candidate.size_bytes,
            content_type: candidate.content_type.clone(),
            status: Status::Queued,
            progress: 0,
            error: None,
            created_at: Utc::now(),
        }
    }

    /// Whether the upload has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// The aggregated result of one batch submission
///
/// Terminal snapshots in admission order, one per admitted file. Rejected
/// candidates are not included; they are reported at rejection time via
/// [`Event::Rejected`].
pub type BatchOutcome = Vec<TrackedUpload>;

/// Counts of tracked uploads per status bucket
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Total number of tracked uploads
    pub total: usize,

    /// Number admitted but not yet transferring
    pub queued: usize,

    /// Number currently transferring
    pub transferring: usize,

    /// Number in the processing phase
    pub processing: usize,

    /// Number successfully added to the knowledge base
    pub succeeded: usize,

    /// Number that failed processing
    pub failed: usize,
}

/// Event emitted during the ingestion lifecycle
///
/// Consumers subscribe via
/// [`IngestPipeline::subscribe`](crate::pipeline::IngestPipeline::subscribe);
/// multiple subscribers each receive all events independently.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Candidate refused admission by the acceptance policy
    Rejected {
        /// Name of the rejected file
        name: String,
        /// Human-readable rejection reason
        reason: String,
    },

    /// File admitted and tracked
    Queued {
        /// Upload ID
        id: UploadId,
        /// File name
        name: String,
    },

    /// Transfer progress update
    Transferring {
        /// Upload ID
        id: UploadId,
        /// Progress percentage (0–100)
        percent: u8,
    },

    /// Transfer complete, content extraction started
    Processing {
        /// Upload ID
        id: UploadId,
    },

    /// Upload fully complete
    Succeeded {
        /// Upload ID
        id: UploadId,
        /// File name
        name: String,
    },

    /// Upload failed during processing
    Failed {
        /// Upload ID
        id: UploadId,
        /// File name
        name: String,
        /// Error message recorded on the upload
        error: String,
    },

    /// Upload dismissed by the caller
    Removed {
        /// Upload ID
        id: UploadId,
    },

    /// All tracked uploads cleared by the caller
    Cleared,
}

impl Event {
    /// Toast-ready message for events a user should be told about
    ///
    /// Returns `Some` for rejection, success, and failure events — the seam
    /// to a notification collaborator — and `None` for the rest.
    pub fn notification(&self) -> Option<String> {
        match self {
            Event::Rejected { reason, .. } => Some(reason.clone()),
            Event::Succeeded { name, .. } => Some(format!("{name} added to knowledge base")),
            Event::Failed { name, .. } => Some(format!("Failed to upload {name}")),
            _ => None,
        }
    }
}
