//! Package manifest handling for the harbor package feed.
//!
//! This crate parses package files into index-ready documents. A package
//! file carries a JSON manifest, optionally zstd-compressed; the format is
//! detected from magic bytes. The [`PackageLoader`] trait is the seam the
//! synchronizer loads through, with [`FileSystemLoader`] as the production
//! implementation.

pub mod document;
pub mod error;
pub mod loader;
pub mod manifest;

pub use document::{copy_server_fields, FileStamp, PackageDocument};
pub use error::{ErrorContext, PackageError, Result};
pub use loader::{FileSystemLoader, PackageLoader};
pub use manifest::{parse_manifest, Dependency, PackageManifest, ZST_MAGIC_BYTES};
