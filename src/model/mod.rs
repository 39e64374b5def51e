//! Domain model types (pure).
//!
//! All types in this module are pure data. No I/O, no async; everything here
//! is testable with plain unit tests.

pub mod error;
pub mod filters;
pub mod repo;

// Re-export for convenience
pub use error::{AppError, ReadmeError, SearchError};
pub use filters::{FilterDraft, FilterField, FilterSet, SortKey, SortOrder};
pub use repo::{RepoId, RepoRecord, ResultPage, PAGE_SIZE};
