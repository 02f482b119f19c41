//! The index session abstraction.

use harbor_package::{FileStamp, PackageDocument};

use crate::{error::Result, query::TermQuery};

/// Collision policy applied when adding documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyConstraint {
    /// Unconditional insert; the caller guarantees no existing document
    /// shares the key.
    None,
    /// The insert targets exactly the one existing document sharing the
    /// key, effectively replacing it.
    Unique,
}

/// A transactional handle over the search index.
///
/// One session spans one synchronization run; mutations become durable and
/// visible at [`commit`](IndexSession::commit). The session is the only
/// write path into the index, and it is not safe for concurrent mutation
/// from multiple callers, which the synchronizer guarantees by owning the
/// session exclusively for the duration of a run.
pub trait IndexSession: Send {
    /// Lists the currently indexed documents as path + last-modified
    /// stamps, for difference calculation.
    fn list(&self) -> Result<Vec<FileStamp>>;

    /// Fetches the committed document keyed by the given path, if any.
    fn find_by_path(&self, path: &str) -> Result<Option<PackageDocument>>;

    /// Adds documents under the stated key-collision policy.
    fn add(&mut self, constraint: KeyConstraint, documents: Vec<PackageDocument>) -> Result<()>;

    /// Deletes all documents matching any of the given term queries.
    /// Deleting a non-existent key is a no-op, not an error.
    fn delete(&mut self, queries: &[TermQuery]) -> Result<()>;

    /// Makes prior mutations durable and visible.
    fn commit(&mut self) -> Result<()>;

    /// Full-text search over the file-derived text fields.
    fn search(&self, query: &str, limit: usize) -> Result<Vec<PackageDocument>>;
}
