//! Package index synchronizer for the harbor package feed.
//!
//! Reconciles the on-disk set of package files with the search index's
//! document set: deletions for files that disappeared, inserts for new
//! files, metadata-preserving updates for rewritten files. Per-file load
//! failures are isolated and reported only after everything that did
//! succeed has been committed.

pub mod listing;
pub mod sync;
pub mod types;

pub use listing::scan_package_files;
pub use sync::PackageIndexSynchronizer;
pub use types::SyncReport;
