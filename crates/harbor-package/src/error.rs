//! Error types for the package crate.

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while reading or parsing a package file.
#[derive(Error, Diagnostic, Debug)]
pub enum PackageError {
    #[error("Error while {action}: {source}")]
    #[diagnostic(code(harbor_package::io))]
    IoError {
        action: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(
        code(harbor_package::json),
        help("The package manifest may be corrupted or in an invalid format")
    )]
    JsonError(#[from] serde_json::Error),

    #[error("Package manifest content is too short")]
    #[diagnostic(
        code(harbor_package::manifest_too_short),
        help("The package file appears to be truncated")
    )]
    ManifestTooShort,

    #[error("Failed to decompress package manifest: {0}")]
    #[diagnostic(
        code(harbor_package::decompress),
        help("The package file claims zstd compression but could not be decoded")
    )]
    DecompressionFailed(String),

    #[error("Invalid package manifest: {0}")]
    #[diagnostic(code(harbor_package::invalid_manifest))]
    InvalidManifest(String),

    #[error(transparent)]
    #[diagnostic(code(harbor_package::system_time))]
    SystemTimeError(#[from] std::time::SystemTimeError),
}

/// A specialized Result type for package operations.
pub type Result<T> = std::result::Result<T, PackageError>;

/// Extension trait for adding context to I/O errors.
pub trait ErrorContext<T> {
    /// Adds context to an error, describing what action was being performed.
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: FnOnce() -> String;
}

impl<T> ErrorContext<T> for std::io::Result<T> {
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: FnOnce() -> String,
    {
        self.map_err(|err| {
            PackageError::IoError {
                action: context(),
                source: err,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PackageError::ManifestTooShort;
        assert_eq!(err.to_string(), "Package manifest content is too short");

        let err = PackageError::InvalidManifest("missing id".to_string());
        assert_eq!(err.to_string(), "Invalid package manifest: missing id");
    }

    #[test]
    fn test_io_error_context() {
        let result: std::io::Result<()> = Err(std::io::Error::other("boom"));
        let err = result
            .with_context(|| "reading package file".to_string())
            .unwrap_err();
        assert_eq!(err.to_string(), "Error while reading package file: boom");
    }
}
