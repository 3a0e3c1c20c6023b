//! # kb-ingest
//!
//! Embeddable document ingestion pipeline for knowledge-base assistants.
//!
//! ## Design Philosophy
//!
//! kb-ingest is designed to be:
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Event-driven** - Consumers subscribe to events, no polling required
//! - **Isolated per file** - One upload failing never disturbs its siblings
//! - **Honest about its seams** - The transfer and processing phases are
//!   synthetic; the terminal outcome is a pluggable resolver so a real
//!   extraction backend can be dropped in without touching the state machine
//!
//! ## Quick Start
//!
//! ```no_run
//! use kb_ingest::{CandidateFile, IngestConfig, IngestPipeline, Status};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = IngestPipeline::new(IngestConfig::default())?;
//!
//!     // Subscribe to events (rejections, progress, terminal outcomes)
//!     let mut events = pipeline.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             if let Some(message) = event.notification() {
//!                 println!("{message}");
//!             }
//!         }
//!     });
//!
//!     let outcome = pipeline
//!         .submit_batch(vec![
//!             CandidateFile::new("notes.md", 2_048, "text/markdown"),
//!             CandidateFile::new("paper.pdf", 300_000, "application/pdf"),
//!         ])
//!         .await;
//!
//!     let succeeded = outcome.iter().filter(|u| u.status == Status::Succeeded).count();
//!     println!("{succeeded} of {} uploads succeeded", outcome.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Core pipeline implementation (decomposed into focused submodules)
pub mod pipeline;
/// Terminal outcome resolution
pub mod resolver;
/// Tracked-upload store
pub mod store;
/// Core types and events
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use config::{AcceptancePolicy, IngestConfig, TransferConfig};
pub use error::{Error, ProcessingFailure, Result, ValidationError};
pub use pipeline::IngestPipeline;
pub use resolver::{
    OutcomeResolver, RandomOutcomeResolver, StaticOutcomeResolver,
};
pub use store::UploadStore;
pub use types::{
    BatchOutcome, CandidateFile, Event, Status, StoreStats, TrackedUpload, UploadId,
};
