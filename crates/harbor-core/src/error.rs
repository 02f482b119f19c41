//! Error types for harbor-core.

use harbor_index::IndexError;
use harbor_package::PackageError;
use miette::Diagnostic;
use thiserror::Error;

/// Core error type for harbor feed operations.
#[derive(Error, Diagnostic, Debug)]
pub enum HarborError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Package(#[from] PackageError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Index(#[from] IndexError),

    #[error("The package file '{path}' could not be loaded.")]
    #[diagnostic(
        code(harbor::package_load),
        help("Check that the file is readable and carries a valid manifest")
    )]
    PackageLoad {
        path: String,
        #[source]
        source: PackageError,
    },

    #[error("{} package files could not be loaded", .related.len())]
    #[diagnostic(code(harbor::multiple_load_failures))]
    MultipleLoadFailures {
        #[related]
        related: Vec<HarborError>,
    },

    #[error("Synchronization was cancelled before the index was touched")]
    #[diagnostic(code(harbor::cancelled))]
    Cancelled,

    #[error("Error while {action}")]
    #[diagnostic(code(harbor::io), help("Check file permissions and disk space"))]
    IoError {
        action: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Background task failed: {0}")]
    #[diagnostic(code(harbor::task_join))]
    TaskJoin(String),

    #[error("{0}")]
    #[diagnostic(code(harbor::custom))]
    Custom(String),
}

/// A package path paired with the error raised while loading it.
///
/// Created during a synchronization run and reduced into a [`HarborError`]
/// once the run's mutations have been committed; never persisted.
#[derive(Debug)]
pub struct LoadFailure {
    pub path: String,
    pub source: PackageError,
}

impl LoadFailure {
    fn into_error(self) -> HarborError {
        HarborError::PackageLoad {
            path: self.path,
            source: self.source,
        }
    }
}

/// Reduces collected load failures into the error surfaced to the caller:
/// none yields `None`, exactly one yields the wrapped error itself, more
/// than one yields an aggregate with one wrapped entry per failed path.
pub fn reduce_failures(failures: Vec<LoadFailure>) -> Option<HarborError> {
    let mut wrapped: Vec<HarborError> = failures.into_iter().map(LoadFailure::into_error).collect();
    match wrapped.len() {
        0 => None,
        1 => Some(wrapped.remove(0)),
        _ => {
            Some(HarborError::MultipleLoadFailures {
                related: wrapped,
            })
        }
    }
}

/// Extension trait for adding context to I/O errors.
pub trait ErrorContext<T> {
    /// Adds context to an error, describing what action was being performed.
    fn with_context<C>(self, context: C) -> Result<T, HarborError>
    where
        C: FnOnce() -> String;
}

impl<T> ErrorContext<T> for std::io::Result<T> {
    fn with_context<C>(self, context: C) -> Result<T, HarborError>
    where
        C: FnOnce() -> String,
    {
        self.map_err(|err| {
            HarborError::IoError {
                action: context(),
                source: err,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    fn failure(path: &str, message: &str) -> LoadFailure {
        LoadFailure {
            path: path.to_string(),
            source: PackageError::InvalidManifest(message.to_string()),
        }
    }

    #[test]
    fn test_reduce_no_failures() {
        assert!(reduce_failures(Vec::new()).is_none());
    }

    #[test]
    fn test_reduce_single_failure_wraps_path_and_cause() {
        let err = reduce_failures(vec![failure("a-1.0.0.pkg", "invalid package")]).unwrap();
        assert_eq!(
            err.to_string(),
            "The package file 'a-1.0.0.pkg' could not be loaded."
        );
        let cause = err.source().unwrap();
        assert_eq!(cause.to_string(), "Invalid package manifest: invalid package");
    }

    #[test]
    fn test_reduce_many_failures_aggregates() {
        let err = reduce_failures(vec![
            failure("a-1.0.0.pkg", "invalid package"),
            failure("b-1.0.0.pkg", "unsupported package"),
        ])
        .unwrap();

        assert_eq!(err.to_string(), "2 package files could not be loaded");

        let HarborError::MultipleLoadFailures {
            related: entries,
        } = err
        else {
            panic!("expected aggregate error");
        };
        let messages: Vec<String> = entries.iter().map(|e| e.to_string()).collect();
        assert!(messages.contains(&"The package file 'a-1.0.0.pkg' could not be loaded.".to_string()));
        assert!(messages.contains(&"The package file 'b-1.0.0.pkg' could not be loaded.".to_string()));
    }
}
