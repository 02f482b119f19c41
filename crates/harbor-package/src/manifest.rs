//! Package manifest parsing.
//!
//! A package file carries its metadata as a JSON manifest, optionally
//! compressed with zstd. The format is detected from the file's magic
//! bytes rather than its extension, so a feed directory can mix both.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PackageError, Result};

/// Magic bytes for Zstandard compressed files.
pub const ZST_MAGIC_BYTES: [u8; 4] = [0x28, 0xb5, 0x2f, 0xfd];

/// A dependency declared by a package manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Identifier of the package depended upon.
    pub id: String,
    /// Version requirement expression, verbatim from the manifest.
    #[serde(default)]
    pub requirement: String,
}

/// Metadata embedded in a package file.
///
/// Every field here is file-derived: it is overwritten whenever the package
/// file is re-read from disk. Server-side statistics live on
/// [`crate::document::PackageDocument`] instead and are never part of the
/// manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageManifest {
    /// Unique package identifier.
    pub id: String,
    /// Package version string.
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    /// Publication timestamp declared by the package author.
    #[serde(default)]
    pub published: Option<DateTime<Utc>>,
}

impl PackageManifest {
    /// Checks the fields a feed cannot operate without.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(PackageError::InvalidManifest(
                "package id is empty".to_string(),
            ));
        }
        if self.version.trim().is_empty() {
            return Err(PackageError::InvalidManifest(
                "package version is empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parses raw package file content into a manifest.
///
/// Inspects the magic bytes to decide whether the content is
/// zstd-compressed JSON or plain JSON, decompressing as needed.
///
/// # Errors
///
/// Returns [`PackageError`] if:
/// - Content is less than 4 bytes (too short to identify)
/// - Zstd decompression fails
/// - JSON parsing fails
pub fn parse_manifest(content: &[u8]) -> Result<PackageManifest> {
    if content.len() < 4 {
        return Err(PackageError::ManifestTooShort);
    }

    if content[..4] == ZST_MAGIC_BYTES {
        let decoded = zstd::decode_all(content)
            .map_err(|err| PackageError::DecompressionFailed(err.to_string()))?;
        let manifest: PackageManifest = serde_json::from_slice(&decoded)?;
        Ok(manifest)
    } else {
        let manifest: PackageManifest = serde_json::from_slice(content)?;
        Ok(manifest)
    }
}
