//! Error types for the index crate.

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised by index session operations.
#[derive(Error, Diagnostic, Debug)]
pub enum IndexError {
    #[error(transparent)]
    #[diagnostic(code(harbor_index::tantivy))]
    Tantivy(#[from] tantivy::TantivyError),

    #[error("Invalid search query: {0}")]
    #[diagnostic(
        code(harbor_index::query),
        help("Check the query syntax; it is parsed by the index's query parser")
    )]
    InvalidQuery(String),

    #[error("Unknown index field: {0}")]
    #[diagnostic(code(harbor_index::unknown_field))]
    UnknownField(String),

    #[error("Stored record could not be decoded: {0}")]
    #[diagnostic(
        code(harbor_index::record),
        help("The index may have been written by an incompatible version")
    )]
    Record(String),

    #[error("Error while {action}: {source}")]
    #[diagnostic(code(harbor_index::io))]
    IoError {
        action: String,
        source: std::io::Error,
    },
}

/// A specialized Result type for index operations.
pub type Result<T> = std::result::Result<T, IndexError>;
