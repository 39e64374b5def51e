//! On-demand README fetch-and-display lifecycle.

use crate::model::ReadmeError;
use std::fmt;
use tracing::debug;

// ===== DocumentKey =====

/// Identity of a README request: the `(owner, repo)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentKey {
    /// Repository owner login.
    pub owner: String,
    /// Repository name.
    pub repo: String,
}

impl DocumentKey {
    /// Key for `(owner, repo)`.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

// ===== DocumentStatus =====

/// Lifecycle status of the document overlay.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DocumentStatus {
    /// Nothing open.
    #[default]
    Idle,
    /// A fetch is in flight for the current key.
    Loading,
    /// Document fetched; Markdown available for rendering.
    Shown,
    /// The fetch or decode failed; the cause is kept for display.
    Errored(ReadmeError),
}

// ===== DocumentViewer =====

/// Single-document display state, independent of the search session.
///
/// At most one document is tracked at a time. A response is applied only if
/// its key equals the current key; a late arrival for a closed or replaced
/// request is discarded, so closing the overlay can never be undone by a
/// slow network.
#[derive(Debug, Clone, Default)]
pub struct DocumentViewer {
    key: Option<DocumentKey>,
    markdown: Option<String>,
    status: DocumentStatus,
}

impl DocumentViewer {
    /// Closed viewer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin fetching the README for `(owner, repo)`.
    ///
    /// Replaces whatever was tracked before and returns the key the caller
    /// must tag the fetch with.
    pub fn open(&mut self, owner: &str, repo: &str) -> DocumentKey {
        let key = DocumentKey::new(owner, repo);
        self.key = Some(key.clone());
        self.markdown = None;
        self.status = DocumentStatus::Loading;
        key
    }

    /// Apply a fetch result, if it still belongs to the current request.
    ///
    /// Returns true when the result was applied, false when discarded.
    pub fn resolve(&mut self, key: &DocumentKey, result: Result<String, ReadmeError>) -> bool {
        if self.key.as_ref() != Some(key) {
            debug!(%key, "discarding readme response for abandoned request");
            return false;
        }
        match result {
            Ok(text) if text.trim().is_empty() => {
                self.key = None;
                self.markdown = None;
                self.status = DocumentStatus::Errored(ReadmeError::Render {
                    reason: "empty document".to_string(),
                });
            }
            Ok(text) => {
                self.markdown = Some(text);
                self.status = DocumentStatus::Shown;
            }
            Err(e) => {
                self.key = None;
                self.markdown = None;
                self.status = DocumentStatus::Errored(e);
            }
        }
        true
    }

    /// Dismiss the overlay unconditionally, abandoning any in-flight fetch.
    pub fn close(&mut self) {
        self.key = None;
        self.markdown = None;
        self.status = DocumentStatus::Idle;
    }

    /// Current status.
    pub fn status(&self) -> &DocumentStatus {
        &self.status
    }

    /// Key of the tracked request, if any.
    pub fn key(&self) -> Option<&DocumentKey> {
        self.key.as_ref()
    }

    /// Raw Markdown of the shown document.
    ///
    /// Rendering to terminal text is the view's job (a pure function of
    /// this string), kept out of the lifecycle state.
    pub fn markdown(&self) -> Option<&str> {
        self.markdown.as_deref()
    }

    /// True when the overlay should occupy the screen (any non-idle state).
    pub fn is_open(&self) -> bool {
        !matches!(self.status, DocumentStatus::Idle)
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "viewer_tests.rs"]
mod tests;
