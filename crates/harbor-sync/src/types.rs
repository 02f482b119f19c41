/// Report returned after a synchronization run completes cleanly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Documents deleted for paths no longer on disk.
    pub removed: usize,
    /// Documents inserted for paths new on disk.
    pub added: usize,
    /// Documents rebuilt for rewritten files, server statistics preserved.
    pub updated: usize,
}

impl SyncReport {
    /// Total session mutations applied by the run.
    pub fn applied(&self) -> usize {
        self.removed + self.added + self.updated
    }
}
