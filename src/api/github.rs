//! GitHub REST API client implementing the collaborator traits.
//!
//! Search goes through `GET /search/repositories`; READMEs through
//! `GET /repos/{owner}/{repo}/readme` with the raw media type, so the body
//! arrives as Markdown text rather than a base64 envelope.

use crate::api::{ReadmeApi, SearchApi};
use crate::model::{FilterSet, ReadmeError, RepoId, RepoRecord, SearchError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("reposcope/", env!("CARGO_PKG_VERSION"));
const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw";

// ===== GithubClient =====

/// HTTPS client for the GitHub REST API.
///
/// Unauthenticated: the search endpoint allows a small anonymous rate
/// budget, which the debounced pipeline is designed to stay within.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    base: String,
}

impl GithubClient {
    /// Build a client against `base` (normally `https://api.github.com`).
    ///
    /// `timeout` bounds each request at the transport level, in addition to
    /// the pipeline's own deadline.
    pub fn new(base: impl Into<String>, timeout: Duration) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::Network {
                reason: format!("failed to construct HTTP client: {e}"),
            })?;
        let base = base.into();
        Ok(Self {
            http,
            base: base.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SearchApi for GithubClient {
    async fn search(
        &self,
        filters: &FilterSet,
        page: u32,
        per_page: usize,
    ) -> Result<Vec<RepoRecord>, SearchError> {
        let query = build_query(filters);
        let url = format!("{}/search/repositories", self.base);
        debug!(%query, page, per_page, "issuing search request");

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, JSON_MEDIA_TYPE)
            .query(&[
                ("q", query.as_str()),
                ("sort", filters.sort_key.as_str()),
                ("order", filters.order.as_str()),
                ("page", &page.to_string()),
                ("per_page", &per_page.to_string()),
            ])
            .send()
            .await
            .map_err(map_search_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Backend {
                status: status.as_u16(),
                message: extract_backend_message(&body),
            });
        }

        let body: SearchResponseWire =
            response.json().await.map_err(|e| SearchError::Decode {
                reason: e.to_string(),
            })?;

        Ok(body.items.into_iter().map(RepoRecord::from).collect())
    }
}

#[async_trait]
impl ReadmeApi for GithubClient {
    async fn fetch_readme(&self, owner: &str, repo: &str) -> Result<String, ReadmeError> {
        let url = format!("{}/repos/{owner}/{repo}/readme", self.base);
        debug!(owner, repo, "issuing readme request");

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, RAW_MEDIA_TYPE)
            .send()
            .await
            .map_err(map_readme_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReadmeError::Backend {
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| ReadmeError::Render {
            reason: e.to_string(),
        })
    }
}

// ===== Query construction =====

/// Build the `q` search parameter from a filter set.
///
/// Free text and keywords pass through verbatim; language, topics, stars
/// and license become search qualifiers. The search endpoint rejects an
/// empty `q`, so a fully empty filter set falls back to a match-everything
/// star qualifier.
fn build_query(filters: &FilterSet) -> String {
    let mut parts: Vec<String> = Vec::new();

    if !filters.text.trim().is_empty() {
        parts.push(filters.text.trim().to_string());
    }
    if !filters.keywords.trim().is_empty() {
        parts.push(filters.keywords.trim().to_string());
    }
    if let Some(language) = &filters.language {
        parts.push(format!("language:{}", language.trim()));
    }
    for topic in filters.topics.split(',') {
        let topic = topic.trim();
        if !topic.is_empty() {
            parts.push(format!("topic:{topic}"));
        }
    }
    if let Some(min_stars) = filters.min_stars {
        parts.push(format!("stars:>={min_stars}"));
    }
    if let Some(license) = &filters.license {
        parts.push(format!("license:{}", license.trim()));
    }

    if parts.is_empty() {
        "stars:>=1".to_string()
    } else {
        parts.join(" ")
    }
}

fn map_search_transport(e: reqwest::Error) -> SearchError {
    if e.is_timeout() {
        SearchError::TimedOut
    } else {
        SearchError::Network {
            reason: e.to_string(),
        }
    }
}

fn map_readme_transport(e: reqwest::Error) -> ReadmeError {
    if e.is_timeout() {
        ReadmeError::TimedOut
    } else {
        ReadmeError::Network {
            reason: e.to_string(),
        }
    }
}

/// Pull the `message` field out of a GitHub error body, falling back to a
/// trimmed snippet of the raw body.
fn extract_backend_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorWire {
        message: String,
    }

    match serde_json::from_str::<ErrorWire>(body) {
        Ok(wire) => wire.message,
        Err(_) => body.chars().take(120).collect(),
    }
}

// ===== Wire types =====

/// Envelope of `GET /search/repositories`.
#[derive(Debug, Deserialize)]
struct SearchResponseWire {
    items: Vec<RepoWire>,
}

/// One repository object as the backend sends it.
#[derive(Debug, Deserialize)]
struct RepoWire {
    id: u64,
    full_name: String,
    name: String,
    html_url: String,
    #[serde(default)]
    description: Option<String>,
    owner: OwnerWire,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct OwnerWire {
    login: String,
}

impl From<RepoWire> for RepoRecord {
    fn from(wire: RepoWire) -> Self {
        RepoRecord {
            id: RepoId::new(wire.id),
            full_name: wire.full_name,
            description: wire.description,
            owner_login: wire.owner.login,
            name: wire.name,
            url: wire.html_url,
            stars: wire.stargazers_count,
            language: wire.language,
            updated_at: wire.updated_at,
        }
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "github_tests.rs"]
mod tests;
