//! The package index synchronizer.

use std::sync::Arc;

use harbor_core::{
    error::HarborError, reduce_failures, HarborResult, IndexDifferences, LoadFailure,
};
use harbor_events::{EventSinkHandle, NullSink, SyncEvent};
use harbor_index::{IndexSession, KeyConstraint, TermQuery};
use harbor_package::{copy_server_fields, PackageDocument, PackageLoader};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::types::SyncReport;

/// Default bound on concurrently running package loads.
const DEFAULT_PARALLEL_LOADS: usize = 4;

/// Reconciles the search index with the feed directory.
///
/// One call to [`synchronize_index_with_file_system`] is one run: it owns
/// the index session exclusively for its duration, applies the given
/// difference set, commits once, and only then surfaces per-file load
/// failures. A run over an empty difference set never touches the session.
///
/// [`synchronize_index_with_file_system`]: PackageIndexSynchronizer::synchronize_index_with_file_system
pub struct PackageIndexSynchronizer<L> {
    loader: Arc<L>,
    events: EventSinkHandle,
    parallel_loads: usize,
}

impl<L: PackageLoader + 'static> PackageIndexSynchronizer<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader: Arc::new(loader),
            events: Arc::new(NullSink),
            parallel_loads: DEFAULT_PARALLEL_LOADS,
        }
    }

    /// Replaces the event sink. Emits through [`NullSink`] by default.
    pub fn with_events(mut self, events: EventSinkHandle) -> Self {
        self.events = events;
        self
    }

    /// Bounds the load phase's concurrency. Clamped to at least one.
    pub fn with_parallel_loads(mut self, limit: usize) -> Self {
        self.parallel_loads = limit.max(1);
        self
    }

    /// Applies a difference set to the index session.
    ///
    /// Phases run in order: deletions for missing paths, concurrent loads
    /// for new and modified paths, merge-replaces for modified paths with
    /// server-derived fields carried forward, inserts for new paths, one
    /// commit. Load failures exclude their path from the later phases but
    /// never stop the run; they are reduced into a single error after the
    /// commit, so partial success is durable before the caller hears about
    /// the failures.
    ///
    /// Cancellation observed before any mutation aborts the run with the
    /// session untouched. Once mutations have begun, cancellation only
    /// keeps further loads from starting; whatever was applied is still
    /// committed.
    ///
    /// # Errors
    ///
    /// - [`HarborError::Cancelled`] when cancelled before any mutation.
    /// - [`HarborError::PackageLoad`] when exactly one load failed.
    /// - [`HarborError::MultipleLoadFailures`] when several loads failed.
    /// - Session errors (add/delete/commit) propagate as-is.
    pub async fn synchronize_index_with_file_system(
        &self,
        session: &mut dyn IndexSession,
        differences: &IndexDifferences,
        cancel: &CancellationToken,
    ) -> HarborResult<SyncReport> {
        if differences.is_empty() {
            debug!("no index differences; nothing to synchronize");
            return Ok(SyncReport::default());
        }

        if cancel.is_cancelled() {
            return Err(HarborError::Cancelled);
        }

        debug!(
            new = differences.new.len(),
            missing = differences.missing.len(),
            modified = differences.modified.len(),
            "synchronizing index with file system"
        );
        self.events.emit(SyncEvent::SyncStarted {
            new: differences.new.len(),
            missing: differences.missing.len(),
            modified: differences.modified.len(),
        });

        let mut report = SyncReport::default();

        if !differences.missing.is_empty() {
            let queries: Vec<TermQuery> = differences
                .missing
                .iter()
                .map(|path| TermQuery::path(path.clone()))
                .collect();
            session.delete(&queries)?;
            report.removed = queries.len();
            self.events.emit(SyncEvent::PackagesRemoved {
                count: queries.len(),
            });
        }

        let (loaded, failures) = self.load_packages(differences, cancel).await?;

        let mut new_documents = Vec::new();
        for (mut document, is_modified) in loaded {
            if is_modified {
                match session.find_by_path(&document.path)? {
                    Some(current) => copy_server_fields(&mut document, &current),
                    None => {
                        debug!(
                            path = %document.path,
                            "modified package has no indexed record; inserting fresh"
                        );
                    }
                }
                let path = document.path.clone();
                session.add(KeyConstraint::Unique, vec![document])?;
                report.updated += 1;
                self.events.emit(SyncEvent::PackageUpdated {
                    path,
                });
            } else {
                new_documents.push(document);
            }
        }

        if !new_documents.is_empty() {
            report.added = new_documents.len();
            for document in &new_documents {
                self.events.emit(SyncEvent::PackageIndexed {
                    path: document.path.clone(),
                });
            }
            session.add(KeyConstraint::None, new_documents)?;
        }

        // Commit before reporting failures: everything that succeeded must
        // stay durable even when some files were broken.
        session.commit()?;
        self.events.emit(SyncEvent::Committed {
            removed: report.removed,
            added: report.added,
            updated: report.updated,
        });

        match reduce_failures(failures) {
            None => Ok(report),
            Some(err) => Err(err),
        }
    }

    /// Scatter phase: loads new and modified paths concurrently, bounded
    /// by the parallel limit, then gathers results into successes and
    /// per-path failures. One path's failure never blocks another's load.
    async fn load_packages(
        &self,
        differences: &IndexDifferences,
        cancel: &CancellationToken,
    ) -> HarborResult<(Vec<(PackageDocument, bool)>, Vec<LoadFailure>)> {
        let targets: Vec<(String, bool)> = differences
            .new
            .iter()
            .map(|path| (path.clone(), false))
            .chain(differences.modified.iter().map(|path| (path.clone(), true)))
            .collect();

        let semaphore = Arc::new(Semaphore::new(self.parallel_loads));
        let mut handles = Vec::with_capacity(targets.len());

        for (path, is_modified) in targets {
            if cancel.is_cancelled() {
                debug!("cancellation requested; no further package loads will start");
                break;
            }

            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|err| HarborError::Custom(format!("acquiring load permit: {err}")))?;
            let loader = self.loader.clone();

            handles.push(tokio::spawn(async move {
                let result = loader.load_from_file_system(&path);
                drop(permit);
                (path, is_modified, result)
            }));
        }

        let mut loaded = Vec::new();
        let mut failures = Vec::new();
        for handle in handles {
            let (path, is_modified, result) = handle
                .await
                .map_err(|err| HarborError::TaskJoin(err.to_string()))?;

            match result {
                Ok(document) => loaded.push((document, is_modified)),
                Err(err) => {
                    warn!(path = %path, error = %err, "package file could not be loaded");
                    self.events.emit(SyncEvent::PackageLoadFailed {
                        path: path.clone(),
                        error: err.to_string(),
                    });
                    failures.push(LoadFailure {
                        path,
                        source: err,
                    });
                }
            }
        }

        Ok((loaded, failures))
    }
}
