//! Repository records and result pages.

use crate::model::FilterSet;
use chrono::{DateTime, Utc};
use std::fmt;

/// Fixed number of records requested per page.
///
/// Sent with every search request; a response shorter than this is treated
/// as the exhaustion signal (see `ResultAccumulator`).
pub const PAGE_SIZE: usize = 10;

// ===== RepoId =====

/// Backend-assigned unique repository identifier.
///
/// Identity for deduplication: within a result list, ids are unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepoId(u64);

impl RepoId {
    /// Wrap a raw backend id.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw id value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ===== RepoRecord =====

/// A single repository search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRecord {
    /// Unique identity within a result list.
    pub id: RepoId,
    /// "owner/name" form.
    pub full_name: String,
    /// Short description, if the repository has one.
    pub description: Option<String>,
    /// Login of the owning user or organization.
    pub owner_login: String,
    /// Repository name without the owner prefix.
    pub name: String,
    /// Web URL of the repository.
    pub url: String,
    /// Star count, for list display.
    pub stars: u64,
    /// Primary language, if detected.
    pub language: Option<String>,
    /// Last-updated timestamp, if reported.
    pub updated_at: Option<DateTime<Utc>>,
}

// ===== ResultPage =====

/// One page of search results, tagged with the request that produced it.
///
/// The tags are the staleness check: a page whose `requested_filters` no
/// longer equals the session's current `FilterSet` (or whose generation is
/// out of date) must be discarded, never merged.
#[derive(Debug, Clone)]
pub struct ResultPage {
    /// Records in backend order.
    pub items: Vec<RepoRecord>,
    /// 1-based page number this page was requested with.
    pub requested_page: u32,
    /// Filters this page was requested with.
    pub requested_filters: FilterSet,
}

impl ResultPage {
    /// True when the backend returned fewer items than requested,
    /// the heuristic signal that no further pages exist.
    pub fn is_short(&self) -> bool {
        self.items.len() < PAGE_SIZE
    }
}
