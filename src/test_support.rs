//! Shared test fixtures: record builders and stub collaborators.
//!
//! Only compiled for tests. The stubs record every call they receive so
//! tests can assert on exactly what reached the "network".

use crate::api::{ReadmeApi, SearchApi};
use crate::model::{FilterSet, ReadmeError, RepoId, RepoRecord, ResultPage, SearchError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

// ===== Record builders =====

/// Deterministic record with the given id.
pub fn repo(id: u64) -> RepoRecord {
    RepoRecord {
        id: RepoId::new(id),
        full_name: format!("owner{id}/repo{id}"),
        description: Some(format!("Test repository {id}")),
        owner_login: format!("owner{id}"),
        name: format!("repo{id}"),
        url: format!("https://example.com/owner{id}/repo{id}"),
        stars: id * 10,
        language: Some("Rust".to_string()),
        updated_at: None,
    }
}

/// Records for each id, in order.
pub fn repos(ids: impl IntoIterator<Item = u64>) -> Vec<RepoRecord> {
    ids.into_iter().map(repo).collect()
}

/// Filter set with only the free-text field populated.
pub fn text_filters(text: &str) -> FilterSet {
    FilterSet {
        text: text.to_string(),
        ..FilterSet::default()
    }
}

/// Page of records for the given ids, tagged with `filters` and `page`.
pub fn page_for(filters: &FilterSet, page: u32, ids: impl IntoIterator<Item = u64>) -> ResultPage {
    ResultPage {
        items: repos(ids),
        requested_page: page,
        requested_filters: filters.clone(),
    }
}

// ===== StubSearchApi =====

/// Scripted search collaborator.
///
/// Responses are consumed front-to-back; when the queue is empty an empty
/// page is returned. An optional per-call delay simulates network latency
/// under tokio's paused test clock.
#[derive(Default)]
pub struct StubSearchApi {
    responses: Mutex<VecDeque<Result<Vec<RepoRecord>, SearchError>>>,
    calls: Mutex<Vec<(FilterSet, u32, usize)>>,
    delay: Mutex<Duration>,
}

impl StubSearchApi {
    /// Stub with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next response.
    pub fn enqueue(&self, response: Result<Vec<RepoRecord>, SearchError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Make every call take `delay` of (test-clock) time before answering.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = delay;
    }

    /// All `(filters, page, per_page)` tuples that reached the stub.
    pub fn calls(&self) -> Vec<(FilterSet, u32, usize)> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls that reached the stub.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SearchApi for StubSearchApi {
    async fn search(
        &self,
        filters: &FilterSet,
        page: u32,
        per_page: usize,
    ) -> Result<Vec<RepoRecord>, SearchError> {
        self.calls
            .lock()
            .unwrap()
            .push((filters.clone(), page, per_page));
        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(Vec::new()))
    }
}

// ===== StubReadmeApi =====

/// Scripted README collaborator.
#[derive(Default)]
pub struct StubReadmeApi {
    responses: Mutex<VecDeque<Result<String, ReadmeError>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl StubReadmeApi {
    /// Stub with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next response.
    pub fn enqueue(&self, response: Result<String, ReadmeError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// All `(owner, repo)` pairs that reached the stub.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReadmeApi for StubReadmeApi {
    async fn fetch_readme(&self, owner: &str, repo: &str) -> Result<String, ReadmeError> {
        self.calls
            .lock()
            .unwrap()
            .push((owner.to_string(), repo.to_string()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(format!("# {owner}/{repo}\n")))
    }
}
