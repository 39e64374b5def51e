//! The mutable search session aggregate.

use crate::engine::ResultAccumulator;
use crate::model::{FilterSet, SearchError};

// ===== SessionStatus =====

/// Lifecycle status of the current search epoch.
///
/// Transitions (driven exclusively by the orchestrator):
///
/// - `Idle → Loading` via scroll advance
/// - any → `Loading` via filter commit
/// - `Loading → Idle` on a full page, `Loading → Exhausted` on a short page
/// - `Loading → Errored` on failure; re-entered to `Loading` only by an
///   explicit new user trigger
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// No request in flight; more pages may exist.
    #[default]
    Idle,
    /// A page request is in flight.
    Loading,
    /// A short page signalled that no further pages exist.
    Exhausted,
    /// The last request failed; the cause is kept for display.
    Errored(SearchError),
}

impl SessionStatus {
    /// True when a scroll advance is permitted.
    pub fn is_idle(&self) -> bool {
        matches!(self, SessionStatus::Idle)
    }

    /// True while a page request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionStatus::Loading)
    }
}

// ===== SearchSession =====

/// Mutable aggregate owned by the orchestrator.
///
/// Created conceptually anew on every filter commit; in practice
/// [`SearchSession::begin_epoch`] resets it in place and bumps the
/// generation counter, which tags every fetch so that responses from a
/// superseded epoch can be recognized and discarded on arrival.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    /// Filters driving the current epoch.
    pub filters: FilterSet,
    /// 1-based cursor of the most recently requested page.
    pub next_page: u32,
    /// Current lifecycle status.
    pub status: SessionStatus,
    /// Monotonic epoch counter, bumped on every commit.
    pub generation: u64,
    accumulator: ResultAccumulator,
}

impl SearchSession {
    /// Fresh session: no filters, cursor 1, idle, nothing accumulated.
    pub fn new() -> Self {
        Self {
            next_page: 1,
            ..Self::default()
        }
    }

    /// Start a new epoch for `filters`: clear results, reset the cursor to
    /// 1, bump the generation, and mark the session loading.
    pub fn begin_epoch(&mut self, filters: FilterSet) {
        self.filters = filters;
        self.next_page = 1;
        self.generation += 1;
        self.status = SessionStatus::Loading;
        self.accumulator.reset();
    }

    /// Accumulated records in first-arrival order.
    pub fn records(&self) -> &[crate::model::RepoRecord] {
        self.accumulator.records()
    }

    /// Number of accumulated records.
    pub fn result_count(&self) -> usize {
        self.accumulator.len()
    }

    /// Mutable accumulator access for the orchestrator's merge step.
    pub(crate) fn accumulator_mut(&mut self) -> &mut ResultAccumulator {
        &mut self.accumulator
    }
}
