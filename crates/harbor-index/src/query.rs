//! Term-equality queries against index fields.

/// Name of the index field holding the package path key.
///
/// Field contract: usable both for term-equality deletion and for
/// uniqueness lookups during merge.
pub const PATH_FIELD: &str = "Path";

/// A term-equality query against a single index field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TermQuery {
    pub field: String,
    pub value: String,
}

impl TermQuery {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Builds a `Path`-equality query for one package path.
    pub fn path(value: impl Into<String>) -> Self {
        Self::new(PATH_FIELD, value)
    }
}
