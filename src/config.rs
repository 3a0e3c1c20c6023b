//! Configuration types for kb-ingest

use crate::error::{Error, Result, ValidationError};
use crate::types::CandidateFile;
use crate::utils::format_size;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, time::Duration};

/// Acceptance policy for candidate files (type allow-list, size ceiling)
///
/// Immutable for the lifetime of a pipeline instance. A file is rejected if
/// it exceeds `max_size_bytes` or if its content type is not a key of
/// `allowed_types`; the size check wins when both rules are violated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AcceptancePolicy {
    /// Allowed content-type identifiers mapped to display extensions
    /// (default: common document formats — PDF, Word, plain text,
    /// Markdown, PowerPoint)
    #[serde(default = "default_allowed_types")]
    pub allowed_types: HashMap<String, String>,

    /// Maximum file size in bytes (default: 10 MiB)
    #[serde(default = "default_max_size_bytes")]
    pub max_size_bytes: u64,
}

impl Default for AcceptancePolicy {
    fn default() -> Self {
        Self {
            allowed_types: default_allowed_types(),
            max_size_bytes: default_max_size_bytes(),
        }
    }
}

impl AcceptancePolicy {
    /// Evaluate a candidate against the policy
    ///
    /// Pure: performs no side effects on pipeline state. Size is checked
    /// first, so a file violating both rules reports only the size
    /// violation.
    pub fn check(&self, candidate: &CandidateFile) -> std::result::Result<(), ValidationError> {
        if candidate.size_bytes > self.max_size_bytes {
            return Err(ValidationError::TooLarge {
                name: candidate.name.clone(),
                size_bytes: candidate.size_bytes,
                limit_bytes: self.max_size_bytes,
            });
        }
        if !self.allowed_types.contains_key(&candidate.content_type) {
            return Err(ValidationError::UnsupportedType {
                name: candidate.name.clone(),
                content_type: candidate.content_type.clone(),
            });
        }
        Ok(())
    }

    /// Display extension for an allowed content type (e.g., ".pdf")
    pub fn extension_for(&self, content_type: &str) -> Option<&str> {
        self.allowed_types.get(content_type).map(String::as_str)
    }

    /// One-line summary of accepted formats for UI hints
    ///
    /// Extensions are rendered uppercase without the leading dot, sorted for
    /// stable output: "DOC, DOCX, MD, PDF, PPT, PPTX, TXT (max 10 MB)".
    pub fn accepted_summary(&self) -> String {
        let mut labels: Vec<String> = self
            .allowed_types
            .values()
            .map(|ext| ext.trim_start_matches('.').to_uppercase())
            .collect();
        labels.sort();
        labels.dedup();
        format!(
            "{} (max {})",
            labels.join(", "),
            format_size(self.max_size_bytes)
        )
    }
}

/// Timing of the synthetic transfer and processing phases
///
/// The delays stand in for real I/O latency; they must be non-zero so the
/// transferring and processing states are observable mid-flight.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Progress increment per transfer step, in percentage points
    /// (default: 10)
    #[serde(default = "default_step_percent")]
    pub step_percent: u8,

    /// Delay between transfer steps (default: 200 ms)
    #[serde(default = "default_step_delay", with = "duration_millis_serde")]
    pub step_delay: Duration,

    /// Duration of the processing phase (default: 1500 ms)
    #[serde(default = "default_processing_delay", with = "duration_millis_serde")]
    pub processing_delay: Duration,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            step_percent: default_step_percent(),
            step_delay: default_step_delay(),
            processing_delay: default_processing_delay(),
        }
    }
}

/// Main configuration for [`IngestPipeline`](crate::pipeline::IngestPipeline)
///
/// Fields are organized into logical sub-configs:
/// - [`policy`](AcceptancePolicy) — type allow-list and size ceiling
/// - [`transfer`](TransferConfig) — phase timing constants
///
/// Sub-config fields are flattened for serialization, so the JSON/TOML
/// format has no nesting.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Acceptance policy for candidate files
    #[serde(flatten)]
    pub policy: AcceptancePolicy,

    /// Transfer and processing phase timing
    #[serde(flatten)]
    pub transfer: TransferConfig,
}

impl IngestConfig {
    /// Check the configuration for values the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.policy.allowed_types.is_empty() {
            return Err(Error::Config {
                message: "allowed_types must contain at least one content type".to_string(),
                key: Some("allowed_types".to_string()),
            });
        }
        if self.policy.max_size_bytes == 0 {
            return Err(Error::Config {
                message: "max_size_bytes must be greater than zero".to_string(),
                key: Some("max_size_bytes".to_string()),
            });
        }
        if self.transfer.step_percent == 0 || self.transfer.step_percent > 100 {
            return Err(Error::Config {
                message: format!(
                    "step_percent must be between 1 and 100, got {}",
                    self.transfer.step_percent
                ),
                key: Some("step_percent".to_string()),
            });
        }
        if self.transfer.step_delay.is_zero() {
            return Err(Error::Config {
                message: "step_delay must be non-zero so transfers are observable".to_string(),
                key: Some("step_delay".to_string()),
            });
        }
        if self.transfer.processing_delay.is_zero() {
            return Err(Error::Config {
                message: "processing_delay must be non-zero so processing is observable"
                    .to_string(),
                key: Some("processing_delay".to_string()),
            });
        }
        Ok(())
    }
}

fn default_allowed_types() -> HashMap<String, String> {
    [
        ("application/pdf", ".pdf"),
        ("application/msword", ".doc"),
        (
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            ".docx",
        ),
        ("text/plain", ".txt"),
        ("text/markdown", ".md"),
        ("application/vnd.ms-powerpoint", ".ppt"),
        (
            "application/vnd.openxmlformats-officedocument.presentationml.presentation",
            ".pptx",
        ),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn default_max_size_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_step_percent() -> u8 {
    10
}

fn default_step_delay() -> Duration {
    Duration::from_millis(200)
}

fn default_processing_delay() -> Duration {
    Duration::from_millis(1500)
}

// Duration serialization helper — the phase delays are sub-second, so the
// wire format is integer milliseconds
mod duration_millis_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
