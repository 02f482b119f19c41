//! The package loader seam.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::{
    document::PackageDocument,
    error::{ErrorContext, Result},
    manifest::parse_manifest,
};

/// Loads a package file into an index-ready document.
///
/// The synchronizer depends only on this trait, so tests can substitute
/// loaders that fail on demand.
pub trait PackageLoader: Send + Sync {
    /// Parses the package file at the given feed-relative path.
    ///
    /// # Errors
    ///
    /// Fails with a [`crate::PackageError`] when the file is unreadable or
    /// its manifest is malformed.
    fn load_from_file_system(&self, path: &str) -> Result<PackageDocument>;
}

/// Production loader reading package files from the feed directory.
#[derive(Debug, Clone)]
pub struct FileSystemLoader {
    root: PathBuf,
}

impl FileSystemLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PackageLoader for FileSystemLoader {
    fn load_from_file_system(&self, path: &str) -> Result<PackageDocument> {
        let full_path = self.root.join(path);
        debug!("loading package file {}", full_path.display());

        let content = fs::read(&full_path)
            .with_context(|| format!("reading package file {}", full_path.display()))?;

        let manifest = parse_manifest(&content)?;
        manifest.validate()?;

        let metadata = fs::metadata(&full_path)
            .with_context(|| format!("reading file metadata from {}", full_path.display()))?;
        let modified = metadata
            .modified()
            .with_context(|| format!("reading mtime from {}", full_path.display()))?;
        let last_modified = DateTime::<Utc>::from(modified);

        Ok(PackageDocument::from_manifest(manifest, path, last_modified))
    }
}
