//! Incremental result accumulation with identity-based deduplication.

use crate::model::{RepoId, RepoRecord, ResultPage};
use std::collections::HashSet;

// ===== ResultAccumulator =====

/// Merges incoming pages into the visible ordered result list.
///
/// # Invariant
///
/// No two records with equal id: a record whose id was already merged is
/// dropped, preserving the arrival order of first occurrence. Membership is
/// checked against an auxiliary id set, so merging stays O(page size).
///
/// # Exhaustion heuristic
///
/// A page shorter than [`crate::model::PAGE_SIZE`] is treated as the signal
/// that no further pages exist. This is a heuristic, not a backend
/// guarantee: a backend that filters items out of a page server-side could
/// produce a short page with more results remaining. Callers accept the
/// trade-off to keep the engine independent of backend-specific total
/// counts.
#[derive(Debug, Clone, Default)]
pub struct ResultAccumulator {
    records: Vec<RepoRecord>,
    seen: HashSet<RepoId>,
}

impl ResultAccumulator {
    /// Empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the page's items, skipping ids already present.
    ///
    /// Returns the number of records actually appended.
    pub fn merge(&mut self, page: &ResultPage) -> usize {
        let before = self.records.len();
        for record in &page.items {
            if self.seen.insert(record.id) {
                self.records.push(record.clone());
            }
        }
        self.records.len() - before
    }

    /// Merged records in first-arrival order.
    pub fn records(&self) -> &[RepoRecord] {
        &self.records
    }

    /// Number of merged records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing has been merged since the last reset.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Clear to an empty sequence. Called on every filter commit.
    pub fn reset(&mut self) {
        self.records.clear();
        self.seen.clear();
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "accumulator_tests.rs"]
mod tests;
