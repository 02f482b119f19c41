/// All event types emitted during index synchronization.
#[derive(Debug, Clone)]
pub enum SyncEvent {
    /// A synchronization run is starting on a non-empty difference set.
    SyncStarted {
        new: usize,
        missing: usize,
        modified: usize,
    },
    /// Missing packages were deleted from the index.
    PackagesRemoved {
        count: usize,
    },
    /// A new package was added to the index.
    PackageIndexed {
        path: String,
    },
    /// A modified package was re-indexed with its server statistics
    /// carried forward.
    PackageUpdated {
        path: String,
    },
    /// A package file could not be loaded; the rest of the run continues.
    PackageLoadFailed {
        path: String,
        error: String,
    },
    /// The run's mutations were committed.
    Committed {
        removed: usize,
        added: usize,
        updated: usize,
    },
}
