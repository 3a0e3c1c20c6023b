//! In-memory store of tracked uploads — the single source of truth for
//! what a consumer renders.
//!
//! Insertion order is preserved and entries are keyed by [`UploadId`].
//! All operations are synchronous and total: they never fail, and an
//! update or removal targeting an absent identifier is a no-op. Lifecycle
//! drivers communicate only through [`UploadStore::update`], a single-item
//! read-modify-write under the write lock, so one driver's write can never
//! clobber another upload's fields.

use std::sync::{Arc, PoisonError, RwLock};

use crate::types::{Status, StoreStats, TrackedUpload, UploadId};

/// Cloneable handle to the shared upload collection
#[derive(Clone, Debug, Default)]
pub struct UploadStore {
    inner: Arc<RwLock<Vec<TrackedUpload>>>,
}

impl UploadStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a newly admitted upload
    pub fn admit(&self, upload: TrackedUpload) {
        self.write().push(upload);
    }

    /// Apply a mutation to the upload with the given identifier
    ///
    /// The closure runs under the write lock, making the read-modify-write
    /// atomic with respect to concurrent drivers. Returns `false` (and does
    /// not run the closure) if the identifier is absent — e.g. the caller
    /// dismissed the upload while its driver was still in flight.
    pub fn update<F>(&self, id: UploadId, mutate: F) -> bool
    where
        F: FnOnce(&mut TrackedUpload),
    {
        let mut uploads = self.write();
        match uploads.iter_mut().find(|u| u.id == id) {
            Some(upload) => {
                mutate(upload);
                true
            }
            None => false,
        }
    }

    /// Snapshot of a single upload by identifier
    pub fn get(&self, id: UploadId) -> Option<TrackedUpload> {
        self.read().iter().find(|u| u.id == id).cloned()
    }

    /// Remove an upload by identifier
    ///
    /// Returns `true` if something was removed. Removing an absent
    /// identifier is a no-op.
    pub fn remove(&self, id: UploadId) -> bool {
        let mut uploads = self.write();
        let before = uploads.len();
        uploads.retain(|u| u.id != id);
        uploads.len() < before
    }

    /// Remove every tracked upload
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Snapshot of all tracked uploads, in insertion order
    pub fn snapshot(&self) -> Vec<TrackedUpload> {
        self.read().clone()
    }

    /// Number of tracked uploads
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Counts of uploads per status bucket
    pub fn stats(&self) -> StoreStats {
        let uploads = self.read();
        let mut stats = StoreStats {
            total: uploads.len(),
            ..StoreStats::default()
        };
        for upload in uploads.iter() {
            match upload.status {
                Status::Queued => stats.queued += 1,
                Status::Transferring => stats.transferring += 1,
                Status::Processing => stats.processing += 1,
                Status::Succeeded => stats.succeeded += 1,
                Status::Failed => stats.failed += 1,
            }
        }
        stats
    }

    // A poisoned lock means a panic mid-mutation elsewhere; the data is
    // still structurally valid, so operations stay total.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<TrackedUpload>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<TrackedUpload>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
