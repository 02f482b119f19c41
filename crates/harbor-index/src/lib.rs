//! Search index session for the harbor package feed.
//!
//! [`IndexSession`] is the only sanctioned write path into the search
//! index: query, add under a key-collision policy, delete by term, commit.
//! One session spans one synchronization run. [`TantivySession`] is the
//! production implementation over a tantivy index keyed by the `Path`
//! field.

pub mod error;
pub mod query;
pub mod schema;
pub mod session;
pub mod tantivy_session;

pub use error::{IndexError, Result};
pub use query::{TermQuery, PATH_FIELD};
pub use session::{IndexSession, KeyConstraint};
pub use tantivy_session::TantivySession;
