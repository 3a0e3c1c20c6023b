//! Batch submission and outcome coordination.

use std::sync::Arc;

use super::IngestPipeline;
use super::transfer::{UploadTaskContext, run_upload_task};
use crate::types::{BatchOutcome, CandidateFile, Event, TrackedUpload};

impl IngestPipeline {
    /// Submit a batch of candidate files for ingestion
    ///
    /// Candidates failing the acceptance policy are reported through the
    /// event channel at evaluation time and never become tracked uploads.
    /// Every admitted file gets its own concurrently running lifecycle
    /// driver; drivers run to a terminal state even if this future is
    /// dropped. The returned outcome contains one terminal snapshot per
    /// admitted file, in admission order, and is also handed to the
    /// completion handler (if one is installed) exactly once — but only
    /// when at least one file was admitted.
    ///
    /// A failed upload is a failed entry in the outcome, not a failure of
    /// the batch: there is no batch-level error.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use kb_ingest::{CandidateFile, IngestConfig, IngestPipeline};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let pipeline = IngestPipeline::new(IngestConfig::default())?;
    ///
    ///     let outcome = pipeline
    ///         .submit_batch(vec![
    ///             CandidateFile::new("notes.md", 2_048, "text/markdown"),
    ///             CandidateFile::new("paper.pdf", 300_000, "application/pdf"),
    ///         ])
    ///         .await;
    ///
    ///     for upload in &outcome {
    ///         println!("{}: {:?}", upload.name, upload.status);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn submit_batch(&self, candidates: Vec<CandidateFile>) -> BatchOutcome {
        let submitted = candidates.len();
        let admitted = self.screen_candidates(candidates);

        if admitted.is_empty() {
            // Nothing was admitted: no drivers, and the completion handler
            // stays silent for this batch
            tracing::debug!(submitted, "No candidates admitted");
            return Vec::new();
        }

        tracing::info!(
            admitted = admitted.len(),
            rejected = submitted - admitted.len(),
            "Starting upload batch"
        );

        let mut ids = Vec::with_capacity(admitted.len());
        let mut handles = Vec::with_capacity(admitted.len());
        for candidate in &admitted {
            let id = self.next_upload_id();
            let upload = TrackedUpload::admitted(id, candidate);
            self.store.admit(upload.clone());
            self.emit_event(Event::Queued {
                id,
                name: upload.name.clone(),
            });

            let ctx = UploadTaskContext {
                upload,
                store: self.store.clone(),
                config: Arc::clone(&self.config),
                event_tx: self.event_tx.clone(),
                resolver: Arc::clone(&self.resolver),
            };
            ids.push(id);
            handles.push(tokio::spawn(run_upload_task(ctx)));
        }

        // join_all preserves input order, so the outcome lines up with
        // admission order no matter which driver finishes first
        let results = futures::future::join_all(handles).await;

        let mut outcomes = Vec::with_capacity(results.len());
        for (id, result) in ids.into_iter().zip(results) {
            match result {
                Ok(upload) => outcomes.push(upload),
                Err(e) => {
                    // A driver panic is a bug; degrade to whatever the
                    // store still holds for this upload
                    tracing::error!(upload_id = id.0, error = %e, "Upload driver task aborted");
                    if let Some(upload) = self.store.get(id) {
                        outcomes.push(upload);
                    }
                }
            }
        }

        if let Some(handler) = &self.on_batch_complete {
            handler(outcomes.clone());
        }

        outcomes
    }
}
