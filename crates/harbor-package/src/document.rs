//! The index-ready package document and its field provenance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::manifest::{Dependency, PackageManifest};

/// The document stored in the search index for one package file.
///
/// Fields fall into two provenance classes. File-derived fields come from
/// the package manifest and are overwritten every time the document is
/// rebuilt from disk. Server-derived fields are accumulated by the feed
/// over the document's lifetime and must be copied forward unchanged when
/// a rebuild happens; see [`copy_server_fields`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageDocument {
    /// Relative filename of the package file. Unique document key,
    /// indexed under the `Path` field.
    pub path: String,
    /// Last-modified timestamp of the file at load time.
    pub last_modified: DateTime<Utc>,

    // File-derived fields.
    pub id: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    #[serde(default)]
    pub published: Option<DateTime<Utc>>,

    // Server-derived fields.
    #[serde(default)]
    pub download_count: u64,
    #[serde(default)]
    pub version_download_count: u64,
    #[serde(default)]
    pub origin_url: Option<Url>,
}

impl PackageDocument {
    /// Builds a document from a freshly parsed manifest.
    ///
    /// Server-derived fields start at their zero values; they are filled
    /// in from the previously indexed document when the synchronizer
    /// rebuilds an existing entry.
    pub fn from_manifest(
        manifest: PackageManifest,
        path: impl Into<String>,
        last_modified: DateTime<Utc>,
    ) -> Self {
        Self {
            path: path.into(),
            last_modified,
            id: manifest.id,
            version: manifest.version,
            description: manifest.description,
            authors: manifest.authors,
            tags: manifest.tags,
            dependencies: manifest.dependencies,
            published: manifest.published,
            download_count: 0,
            version_download_count: 0,
            origin_url: None,
        }
    }
}

/// One listing entry: a package path and when it was last modified.
///
/// Produced both by filesystem enumeration and by the index session, and
/// consumed by the difference calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStamp {
    pub path: String,
    pub last_modified: DateTime<Utc>,
}

type ServerFieldCopy = fn(&mut PackageDocument, &PackageDocument);

/// The preserved field set: one copy-forward selector per server-derived
/// field. Adding a server-side statistic means adding one entry here.
const SERVER_DERIVED_FIELDS: &[ServerFieldCopy] = &[
    |dst, src| dst.download_count = src.download_count,
    |dst, src| dst.version_download_count = src.version_download_count,
    |dst, src| dst.origin_url = src.origin_url.clone(),
];

/// Copies every server-derived field from `src` onto `dst` in one pass.
pub fn copy_server_fields(dst: &mut PackageDocument, src: &PackageDocument) {
    for copy in SERVER_DERIVED_FIELDS {
        copy(dst, src);
    }
}
