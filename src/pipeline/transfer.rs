//! Per-upload lifecycle driver.
//!
//! One driver task per admitted upload, advancing it through
//! `Queued → Transferring → Processing → {Succeeded | Failed}`. Drivers
//! are fully isolated from each other: a driver mutates only its own
//! upload, and its failure never aborts or alters a sibling.

use std::sync::Arc;

use crate::config::IngestConfig;
use crate::resolver::OutcomeResolver;
use crate::store::UploadStore;
use crate::types::{Event, Status, TrackedUpload};

/// Everything a lifecycle driver needs to run one upload to a terminal state
pub(crate) struct UploadTaskContext {
    /// The driver's record of the upload, as admitted
    pub upload: TrackedUpload,
    /// Shared store to mirror mutations into
    pub store: UploadStore,
    /// Pipeline configuration (timing constants)
    pub config: Arc<IngestConfig>,
    /// Event broadcast sender
    pub event_tx: tokio::sync::broadcast::Sender<Event>,
    /// Terminal outcome decision point
    pub resolver: Arc<dyn OutcomeResolver>,
}

/// Drive one upload from admission to a terminal state
///
/// Returns the terminal snapshot. The driver keeps its own copy of the
/// record and mirrors every mutation into the store, so the returned
/// snapshot is complete even if the caller dismissed the upload from the
/// store mid-flight (dismissal does not stop in-flight work).
pub(crate) async fn run_upload_task(ctx: UploadTaskContext) -> TrackedUpload {
    let UploadTaskContext {
        mut upload,
        store,
        config,
        event_tx,
        resolver,
    } = ctx;
    let id = upload.id;

    apply(&store, &mut upload, |u| u.status = Status::Transferring);

    // Fixed-increment transfer steps; the step delay keeps the state
    // observable mid-flight. Clamped so progress lands on exactly 100 even
    // for step sizes that do not divide it.
    let step = config.transfer.step_percent;
    while upload.progress < 100 {
        tokio::time::sleep(config.transfer.step_delay).await;
        let percent = upload.progress.saturating_add(step).min(100);
        apply(&store, &mut upload, |u| u.progress = percent);
        event_tx.send(Event::Transferring { id, percent }).ok();
        tracing::trace!(upload_id = id.0, percent, "Transfer step");
    }

    // Progress is exactly 100 here — the only entry point to processing
    apply(&store, &mut upload, |u| u.status = Status::Processing);
    event_tx.send(Event::Processing { id }).ok();
    tokio::time::sleep(config.transfer.processing_delay).await;

    match resolver.resolve(&upload).await {
        Ok(()) => {
            apply(&store, &mut upload, |u| u.status = Status::Succeeded);
            event_tx
                .send(Event::Succeeded {
                    id,
                    name: upload.name.clone(),
                })
                .ok();
            tracing::info!(upload_id = id.0, name = %upload.name, "Upload added to knowledge base");
        }
        Err(failure) => {
            // Progress stays at its last observed value
            let reason = &failure.reason;
            apply(&store, &mut upload, |u| {
                u.status = Status::Failed;
                u.error = Some(reason.clone());
            });
            event_tx
                .send(Event::Failed {
                    id,
                    name: upload.name.clone(),
                    error: failure.reason.clone(),
                })
                .ok();
            tracing::warn!(
                upload_id = id.0,
                name = %upload.name,
                error = %failure.reason,
                "Upload failed during processing"
            );
        }
    }

    upload
}

/// Mutate the driver's local record and mirror the same mutation into the
/// store
///
/// The store update is a merge-by-identifier read-modify-write; it becomes
/// a no-op once the caller has removed the upload.
fn apply<F>(store: &UploadStore, upload: &mut TrackedUpload, mutate: F)
where
    F: Fn(&mut TrackedUpload),
{
    mutate(upload);
    store.update(upload.id, |u| mutate(u));
}
