//! External collaborator interfaces (impure boundary).
//!
//! The engine only ever sees these traits; the production implementation
//! ([`GithubClient`]) talks to the GitHub REST API over HTTPS, and tests
//! substitute in-memory stubs.

pub mod github;

pub use github::GithubClient;

use crate::model::{FilterSet, ReadmeError, RepoRecord, SearchError};
use async_trait::async_trait;

// ===== SearchApi =====

/// Repository-search collaborator.
#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Fetch one page of repositories matching `filters`.
    ///
    /// `page` is 1-based; `per_page` is the fixed page size the caller
    /// expects back (a shorter response signals exhaustion upstream).
    async fn search(
        &self,
        filters: &FilterSet,
        page: u32,
        per_page: usize,
    ) -> Result<Vec<RepoRecord>, SearchError>;
}

// ===== ReadmeApi =====

/// README-retrieval collaborator.
#[async_trait]
pub trait ReadmeApi: Send + Sync {
    /// Fetch the raw README document for `(owner, repo)`.
    async fn fetch_readme(&self, owner: &str, repo: &str) -> Result<String, ReadmeError>;
}
