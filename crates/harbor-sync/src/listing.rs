//! Feed directory enumeration.

use std::{fs, path::Path};

use chrono::{DateTime, Utc};
use harbor_core::{ErrorContext, HarborResult};
use harbor_package::FileStamp;
use tracing::warn;

/// Enumerates the package files in the feed directory as path +
/// last-modified stamps, sorted by path.
///
/// Only regular files directly in the directory are listed; the feed is
/// flat. An unreadable directory is a fatal precondition: the caller must
/// not start a synchronization run without a listing.
pub fn scan_package_files(dir: &Path) -> HarborResult<Vec<FileStamp>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("listing package directory {}", dir.display()))?;

    let mut stamps = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("listing package directory {}", dir.display()))?;
        let metadata = entry
            .metadata()
            .with_context(|| format!("reading file metadata from {}", entry.path().display()))?;
        if !metadata.is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str().map(String::from) else {
            warn!("skipping package file with non-UTF-8 name: {:?}", entry.file_name());
            continue;
        };

        let modified = metadata
            .modified()
            .with_context(|| format!("reading mtime from {}", entry.path().display()))?;
        stamps.push(FileStamp {
            path: name,
            last_modified: DateTime::<Utc>::from(modified),
        });
    }

    stamps.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(stamps)
}
