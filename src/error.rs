//! Error types for kb-ingest
//!
//! This module provides the error taxonomy for the library:
//! - `ValidationError` — intake policy violations, recovered locally and
//!   surfaced only through the event channel
//! - `ProcessingFailure` — terminal per-item failure, recorded on the
//!   tracked upload and present in the batch outcome
//! - `Error` — hard errors (currently only configuration problems)

use thiserror::Error;

/// Result type alias for kb-ingest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for kb-ingest
///
/// There is deliberately no batch-level failure variant: a batch can only
/// fail partially, item by item, and those failures travel inside the
/// batch outcome rather than through `Result`.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "step_delay")
        key: Option<String>,
    },

    /// Intake validation error
    ///
    /// Not returned by any pipeline operation — rejections are reported
    /// through the event channel — but embedders calling
    /// [`AcceptancePolicy::check`](crate::config::AcceptancePolicy::check)
    /// directly can propagate it.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Reasons a candidate file is refused admission to the pipeline
///
/// Rejected files never become tracked uploads and never appear in a batch
/// outcome; each rejection is reported once via
/// [`Event::Rejected`](crate::types::Event::Rejected). When a file violates
/// both rules, only the size violation is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// File exceeds the configured size ceiling
    #[error("{name} is too large. Maximum file size is {limit_bytes} bytes.")]
    TooLarge {
        /// Name of the rejected file
        name: String,
        /// Size of the rejected file in bytes
        size_bytes: u64,
        /// The configured maximum in bytes
        limit_bytes: u64,
    },

    /// File's content type is not in the acceptance policy
    #[error("{name} is not a supported file type.")]
    UnsupportedType {
        /// Name of the rejected file
        name: String,
        /// The offending content-type identifier
        content_type: String,
    },
}

impl ValidationError {
    /// Toast-ready rejection message with the size limit rendered
    /// human-readably ("10 MB" rather than a raw byte count)
    pub fn notification(&self) -> String {
        match self {
            Self::TooLarge {
                name, limit_bytes, ..
            } => format!(
                "{name} is too large. Maximum file size is {}.",
                crate::utils::format_size(*limit_bytes)
            ),
            Self::UnsupportedType { name, .. } => {
                format!("{name} is not a supported file type.")
            }
        }
    }
}

/// Terminal per-item failure produced by an outcome resolver
///
/// Recorded on the tracked upload (`Failed` status + message), surfaced via
/// [`Event::Failed`](crate::types::Event::Failed), and carried in the batch
/// outcome as a failed entry. Never retried automatically and never
/// propagated as a failure of the batch as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to process {name}: {reason}")]
pub struct ProcessingFailure {
    /// Name of the file that failed processing
    pub name: String,
    /// Human-readable reason, stored on the tracked upload
    pub reason: String,
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_large_message_names_file_and_limit() {
        let err = ValidationError::TooLarge {
            name: "report.pdf".to_string(),
            size_bytes: 15_000_000,
            limit_bytes: 10_485_760,
        };
        let msg = err.to_string();
        assert!(msg.contains("report.pdf"), "message should name the file");
        assert!(
            msg.contains("10485760"),
            "message should state the limit, got: {msg}"
        );
    }

    #[test]
    fn unsupported_type_message_names_file() {
        let err = ValidationError::UnsupportedType {
            name: "diagram.png".to_string(),
            content_type: "image/png".to_string(),
        };
        assert_eq!(err.to_string(), "diagram.png is not a supported file type.");
    }

    #[test]
    fn validation_error_converts_into_top_level_error() {
        let err: Error = ValidationError::UnsupportedType {
            name: "x".to_string(),
            content_type: "image/png".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn too_large_notification_renders_limit_human_readably() {
        let err = ValidationError::TooLarge {
            name: "report.pdf".to_string(),
            size_bytes: 15_000_000,
            limit_bytes: 10 * 1024 * 1024,
        };
        assert_eq!(
            err.notification(),
            "report.pdf is too large. Maximum file size is 10 MB."
        );
    }

    #[test]
    fn processing_failure_display_includes_name_and_reason() {
        let failure = ProcessingFailure {
            name: "notes.txt".to_string(),
            reason: "corrupt stream".to_string(),
        };
        assert_eq!(
            failure.to_string(),
            "failed to process notes.txt: corrupt stream"
        );
    }
}
