//! Store mutators and read views exposed to the caller.

use crate::types::{Event, StoreStats, TrackedUpload, UploadId};

use super::IngestPipeline;

impl IngestPipeline {
    /// Dismiss a tracked upload
    ///
    /// Immediate and synchronous. Returns `true` if the upload was present;
    /// dismissing an unknown identifier is a no-op. Dismissal does not stop
    /// an in-flight driver — the upload simply stops being rendered.
    pub fn remove_upload(&self, id: UploadId) -> bool {
        let removed = self.store.remove(id);
        if removed {
            tracing::debug!(upload_id = id.0, "Upload dismissed");
            self.emit_event(Event::Removed { id });
        }
        removed
    }

    /// Dismiss every tracked upload
    ///
    /// Immediate and synchronous; never fails, including on an already
    /// empty store.
    pub fn clear_all(&self) {
        self.store.clear();
        tracing::debug!("All uploads dismissed");
        self.emit_event(Event::Cleared);
    }

    /// Snapshot of all tracked uploads, in admission order
    pub fn uploads(&self) -> Vec<TrackedUpload> {
        self.store.snapshot()
    }

    /// Snapshot of a single tracked upload
    pub fn get(&self, id: UploadId) -> Option<TrackedUpload> {
        self.store.get(id)
    }

    /// Counts of tracked uploads per status bucket
    pub fn stats(&self) -> StoreStats {
        self.store.stats()
    }
}
