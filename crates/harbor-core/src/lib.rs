//! Core library for the harbor package feed.

pub mod diff;
pub mod error;

pub use diff::{calculate_differences, IndexDifferences};
pub use error::{reduce_failures, ErrorContext, HarborError, LoadFailure};

pub type HarborResult<T> = std::result::Result<T, HarborError>;
