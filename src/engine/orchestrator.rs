//! Orchestrator: the message/command state machine tying the engine together.
//!
//! Elm-shaped: the shell feeds [`Msg`] values in, [`Orchestrator::update`]
//! mutates the session/viewer and hands back a [`Cmd`] describing the I/O
//! the shell must perform. All consistency rules (one in-flight page
//! request, stale-response discarding, reset-before-merge) live in this
//! pure transition function, so every one of them is testable without a
//! network or a runtime.

use crate::engine::{
    DocumentKey, DocumentViewer, ScrollTrigger, SearchOutcome, SearchSession, SessionStatus,
};
use crate::model::{FilterSet, ReadmeError, SearchError};
use tracing::{debug, warn};

// ===== Msg =====

/// Everything that can happen to the engine.
#[derive(Debug, Clone)]
pub enum Msg {
    /// The user committed the filter draft.
    CommitFilters(FilterSet),
    /// The sentinel became visible while idle: request the next page.
    ScrollAdvance,
    /// A pipeline call resolved.
    PageResolved {
        /// Session generation the fetch was issued under.
        generation: u64,
        /// Page, superseded marker, or failure.
        outcome: Result<SearchOutcome, SearchError>,
    },
    /// The user requested the README of a record.
    OpenReadme {
        /// Repository owner login.
        owner: String,
        /// Repository name.
        repo: String,
    },
    /// A README fetch resolved.
    ReadmeResolved {
        /// Key the fetch was issued for.
        key: DocumentKey,
        /// Raw document text or failure.
        result: Result<String, ReadmeError>,
    },
    /// The user dismissed the README overlay.
    CloseReadme,
    /// The user asked to retry after a failure.
    Retry,
}

// ===== Cmd =====

/// I/O the shell must perform in response to an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Nothing to do.
    None,
    /// Run the pipeline for `(filters, page)` and post back a
    /// [`Msg::PageResolved`] tagged with `generation`.
    FetchPage {
        /// Session generation to tag the response with.
        generation: u64,
        /// Committed filters for the fetch.
        filters: FilterSet,
        /// 1-based page to request.
        page: u32,
    },
    /// Fetch the README for `key` and post back a [`Msg::ReadmeResolved`].
    FetchReadme {
        /// Key identifying the request.
        key: DocumentKey,
    },
}

// ===== Orchestrator =====

/// Owner of all engine state. Mutated only through [`Orchestrator::update`]
/// on the event-loop thread; concurrent fetches communicate exclusively by
/// posting messages back through the shell's channel.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    session: SearchSession,
    viewer: DocumentViewer,
    trigger: ScrollTrigger,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Orchestrator {
    /// Idle orchestrator with an empty session.
    pub fn new() -> Self {
        Self {
            session: SearchSession::new(),
            viewer: DocumentViewer::new(),
            trigger: ScrollTrigger::new(),
        }
    }

    /// The search session (read-only; all mutation goes through `update`).
    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// The README viewer state.
    pub fn viewer(&self) -> &DocumentViewer {
        &self.viewer
    }

    /// Feed one sentinel-visibility observation from the shell.
    ///
    /// Returns the fetch command when the trigger fires, `Cmd::None`
    /// otherwise.
    pub fn observe_sentinel(&mut self, visible: bool) -> Cmd {
        if self.trigger.observe(visible, &self.session.status) {
            self.update(Msg::ScrollAdvance)
        } else {
            Cmd::None
        }
    }

    /// Apply one message and return the command to execute.
    pub fn update(&mut self, msg: Msg) -> Cmd {
        match msg {
            Msg::CommitFilters(filters) => self.commit(filters),
            Msg::ScrollAdvance => self.scroll_advance(),
            Msg::PageResolved {
                generation,
                outcome,
            } => self.page_resolved(generation, outcome),
            Msg::OpenReadme { owner, repo } => {
                let key = self.viewer.open(&owner, &repo);
                Cmd::FetchReadme { key }
            }
            Msg::ReadmeResolved { key, result } => {
                self.viewer.resolve(&key, result);
                Cmd::None
            }
            Msg::CloseReadme => {
                self.viewer.close();
                Cmd::None
            }
            Msg::Retry => self.retry(),
        }
    }

    /// Start a new search epoch. Allowed from any state.
    fn commit(&mut self, filters: FilterSet) -> Cmd {
        self.session.begin_epoch(filters);
        debug!(
            generation = self.session.generation,
            filters = ?self.session.filters,
            "filter commit: new search epoch"
        );
        Cmd::FetchPage {
            generation: self.session.generation,
            filters: self.session.filters.clone(),
            page: 1,
        }
    }

    /// Advance the page cursor. Only legal while idle and after at least
    /// one commit; the guards make the one-in-flight-request invariant hold
    /// even if the shell misfires.
    fn scroll_advance(&mut self) -> Cmd {
        if self.session.generation == 0 || !self.session.status.is_idle() {
            return Cmd::None;
        }
        self.session.next_page += 1;
        self.session.status = SessionStatus::Loading;
        Cmd::FetchPage {
            generation: self.session.generation,
            filters: self.session.filters.clone(),
            page: self.session.next_page,
        }
    }

    fn page_resolved(
        &mut self,
        generation: u64,
        outcome: Result<SearchOutcome, SearchError>,
    ) -> Cmd {
        if generation != self.session.generation {
            debug!(
                generation,
                current = self.session.generation,
                "discarding response from superseded epoch"
            );
            return Cmd::None;
        }
        match outcome {
            Ok(SearchOutcome::Page(page)) => {
                // Generation match already implies filter match, but the
                // page carries its filters and the check is the contract.
                if page.requested_filters != self.session.filters {
                    debug!("discarding page tagged with stale filters");
                    return Cmd::None;
                }
                let appended = self.session.accumulator_mut().merge(&page);
                self.session.status = if page.is_short() {
                    SessionStatus::Exhausted
                } else {
                    SessionStatus::Idle
                };
                debug!(
                    page = page.requested_page,
                    appended,
                    total = self.session.result_count(),
                    status = ?self.session.status,
                    "page merged"
                );
            }
            Ok(SearchOutcome::Superseded) => {
                // The newer call that displaced this one will resolve the
                // Loading status; nothing to do here.
                debug!("pipeline call superseded; awaiting trailing call");
            }
            Err(e) => {
                warn!(error = %e, "search failed");
                self.session.status = SessionStatus::Errored(e);
            }
        }
        Cmd::None
    }

    /// Re-run the current epoch's filters after a failure. No-op unless the
    /// session is errored: retry is a user trigger, never automatic.
    fn retry(&mut self) -> Cmd {
        match self.session.status {
            SessionStatus::Errored(_) => self.commit(self.session.filters.clone()),
            _ => Cmd::None,
        }
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
