//! Filter values driving repository search.
//!
//! Two layers: [`FilterDraft`] holds the values the user is currently
//! editing; [`FilterSet`] is the immutable snapshot produced by
//! [`FilterDraft::commit`]. Only a commit starts a new search epoch;
//! edits to the draft have no side effects until then.

use std::fmt;

// ===== FilterSet =====

/// Committed search filters. Immutable value type.
///
/// Structural equality is the staleness check: a page response tagged with a
/// `FilterSet` that no longer equals the session's current one is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSet {
    /// Free-text query.
    pub text: String,
    /// Language qualifier (e.g. "rust"). `None` means unconstrained.
    pub language: Option<String>,
    /// Field the backend sorts by.
    pub sort_key: SortKey,
    /// Sort direction.
    pub order: SortOrder,
    /// Additional space-separated keywords appended to the query.
    pub keywords: String,
    /// Comma-separated topic qualifiers.
    pub topics: String,
    /// Minimum star count qualifier. Not exposed in the interactive editor;
    /// the backend may ignore it.
    pub min_stars: Option<u32>,
    /// License qualifier (e.g. "mit"). Not exposed in the interactive
    /// editor; the backend may ignore it.
    pub license: Option<String>,
}

impl FilterSet {
    /// True when no field would contribute to a query.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
            && self.language.is_none()
            && self.keywords.trim().is_empty()
            && self.topics.trim().is_empty()
            && self.min_stars.is_none()
            && self.license.is_none()
    }
}

// ===== SortKey =====

/// Field the backend sorts results by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Star count (default).
    #[default]
    Stars,
    /// Fork count.
    Forks,
    /// Last-updated timestamp.
    Updated,
}

impl SortKey {
    /// Wire parameter value.
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Stars => "stars",
            SortKey::Forks => "forks",
            SortKey::Updated => "updated",
        }
    }

    /// Cycle to the next sort key (for the filter editor).
    pub fn next(self) -> Self {
        match self {
            SortKey::Stars => SortKey::Forks,
            SortKey::Forks => SortKey::Updated,
            SortKey::Updated => SortKey::Stars,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== SortOrder =====

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Descending (default, most stars first).
    #[default]
    Desc,
    /// Ascending.
    Asc,
}

impl SortOrder {
    /// Wire parameter value.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Desc => "desc",
            SortOrder::Asc => "asc",
        }
    }

    /// Flip direction (for the filter editor).
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Desc => SortOrder::Asc,
            SortOrder::Asc => SortOrder::Desc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== FilterField =====

/// Which editable field of the draft has input focus.
///
/// Only the text-like fields are cycled through in the editor; sort key and
/// order are toggled with dedicated keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    /// Free-text query.
    Text,
    /// Language qualifier.
    Language,
    /// Extra keywords.
    Keywords,
    /// Topic qualifiers.
    Topics,
}

impl FilterField {
    /// Cycle to the next editable field.
    pub fn next(self) -> Self {
        match self {
            FilterField::Text => FilterField::Language,
            FilterField::Language => FilterField::Keywords,
            FilterField::Keywords => FilterField::Topics,
            FilterField::Topics => FilterField::Text,
        }
    }

    /// Label shown in the filter bar.
    pub fn label(self) -> &'static str {
        match self {
            FilterField::Text => "query",
            FilterField::Language => "language",
            FilterField::Keywords => "keywords",
            FilterField::Topics => "topics",
        }
    }
}

// ===== FilterDraft =====

/// The user-editable filter values, separate from the committed set.
///
/// Edits mutate only the draft; [`FilterDraft::commit`] snapshots it as a
/// [`FilterSet`]. Draft and committed sets diverge freely; there is no
/// implicit synchronization in either direction.
#[derive(Debug, Clone, Default)]
pub struct FilterDraft {
    draft: FilterSet,
}

impl FilterDraft {
    /// Create a draft pre-populated with initial values (e.g. CLI args).
    pub fn new(initial: FilterSet) -> Self {
        Self { draft: initial }
    }

    /// Current draft values (read-only view for rendering).
    pub fn draft(&self) -> &FilterSet {
        &self.draft
    }

    /// Replace the string value of an editable field.
    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FilterField::Text => self.draft.text = value,
            FilterField::Language => {
                self.draft.language = if value.trim().is_empty() {
                    None
                } else {
                    Some(value)
                };
            }
            FilterField::Keywords => self.draft.keywords = value,
            FilterField::Topics => self.draft.topics = value,
        }
    }

    /// String value of an editable field, for seeding the editor.
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Text => &self.draft.text,
            FilterField::Language => self.draft.language.as_deref().unwrap_or(""),
            FilterField::Keywords => &self.draft.keywords,
            FilterField::Topics => &self.draft.topics,
        }
    }

    /// Cycle the draft's sort key.
    pub fn cycle_sort_key(&mut self) {
        self.draft.sort_key = self.draft.sort_key.next();
    }

    /// Flip the draft's sort order.
    pub fn toggle_order(&mut self) {
        self.draft.order = self.draft.order.toggled();
    }

    /// Snapshot the draft as a committed `FilterSet`.
    ///
    /// This is the sole trigger for starting a new search epoch; the draft
    /// itself is left untouched.
    pub fn commit(&self) -> FilterSet {
        self.draft.clone()
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "filters_tests.rs"]
mod tests;
