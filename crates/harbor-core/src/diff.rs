//! Difference calculation between the feed directory and the index.

use std::collections::HashMap;

use harbor_package::FileStamp;

/// The partition of package paths a synchronization run has to apply.
///
/// The three sequences are disjoint; a path unchanged since the last run
/// appears in none of them. Empty sequences mean no work for that
/// category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexDifferences {
    /// On disk but not indexed.
    pub new: Vec<String>,
    /// Indexed but no longer on disk.
    pub missing: Vec<String>,
    /// Present in both, with the on-disk file newer than the indexed one.
    pub modified: Vec<String>,
}

impl IndexDifferences {
    pub fn new(new: Vec<String>, missing: Vec<String>, modified: Vec<String>) -> Self {
        Self {
            new,
            missing,
            modified,
        }
    }

    /// True when a run over these differences would be a no-op.
    pub fn is_empty(&self) -> bool {
        self.new.is_empty() && self.missing.is_empty() && self.modified.is_empty()
    }
}

/// Compares the current filesystem listing against the current index
/// listing and partitions paths into new, missing, and modified sets.
///
/// Pure function of the two listings; acquiring either listing is the
/// caller's problem, and a listing failure must stop the run before it
/// gets here. Staleness is judged on last-modified timestamps at second
/// granularity: strictly newer on disk means modified, equal means
/// unchanged.
pub fn calculate_differences(on_disk: &[FileStamp], indexed: &[FileStamp]) -> IndexDifferences {
    let disk_stamps: HashMap<&str, i64> = on_disk
        .iter()
        .map(|stamp| (stamp.path.as_str(), stamp.last_modified.timestamp()))
        .collect();
    let index_stamps: HashMap<&str, i64> = indexed
        .iter()
        .map(|stamp| (stamp.path.as_str(), stamp.last_modified.timestamp()))
        .collect();

    let mut new = Vec::new();
    let mut modified = Vec::new();
    for stamp in on_disk {
        match index_stamps.get(stamp.path.as_str()) {
            None => new.push(stamp.path.clone()),
            Some(&indexed_at) if stamp.last_modified.timestamp() > indexed_at => {
                modified.push(stamp.path.clone());
            }
            Some(_) => {}
        }
    }

    let mut missing: Vec<String> = indexed
        .iter()
        .filter(|stamp| !disk_stamps.contains_key(stamp.path.as_str()))
        .map(|stamp| stamp.path.clone())
        .collect();

    new.sort();
    missing.sort();
    modified.sort();

    IndexDifferences::new(new, missing, modified)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn stamp(path: &str, hour: u32) -> FileStamp {
        FileStamp {
            path: path.to_string(),
            last_modified: Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_listings() {
        let differences = calculate_differences(&[], &[]);
        assert!(differences.is_empty());
    }

    #[test]
    fn test_partitions_are_disjoint() {
        let on_disk = vec![stamp("new.pkg", 1), stamp("same.pkg", 1), stamp("touched.pkg", 2)];
        let indexed = vec![stamp("same.pkg", 1), stamp("touched.pkg", 1), stamp("gone.pkg", 1)];

        let differences = calculate_differences(&on_disk, &indexed);

        assert_eq!(differences.new, vec!["new.pkg"]);
        assert_eq!(differences.missing, vec!["gone.pkg"]);
        assert_eq!(differences.modified, vec!["touched.pkg"]);
    }

    #[test]
    fn test_unchanged_paths_excluded() {
        let listing = vec![stamp("a.pkg", 1), stamp("b.pkg", 2)];
        let differences = calculate_differences(&listing, &listing);
        assert!(differences.is_empty());
    }

    #[test]
    fn test_older_disk_file_is_not_modified() {
        // An indexed timestamp ahead of the disk mtime means someone
        // re-indexed already; it must not loop back into modified.
        let on_disk = vec![stamp("a.pkg", 1)];
        let indexed = vec![stamp("a.pkg", 2)];

        let differences = calculate_differences(&on_disk, &indexed);
        assert!(differences.is_empty());
    }
}
