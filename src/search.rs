//! Free-text search over entry text.
//!
//! A case-insensitive substring filter: an entry stays visible when the
//! lower-cased term occurs in its lower-cased flattened text. The apply
//! pass skips entries already hidden by the tag filter (their search
//! flag is left untouched; visibility is the AND of both flags, so
//! nothing can leak back in) and finishes with the group collapse.

use serde::{Deserialize, Serialize};

use crate::filter::collapse_groups;
use crate::page::{Entry, Page};

/// Search state: the normalized (trimmed, lower-cased) term.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilter {
    term: String,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the term, normalizing it. An empty or whitespace-only
    /// term deactivates the filter.
    pub fn set_term(&mut self, term: &str) {
        self.term = term.trim().to_lowercase();
    }

    /// The normalized term.
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn is_active(&self) -> bool {
        !self.term.is_empty()
    }

    /// Whether the entry matches the current term.
    pub fn matches(&self, entry: &Entry) -> bool {
        self.term.is_empty() || entry.visible_text.to_lowercase().contains(&self.term)
    }

    /// Apply the filter to the page. Writes only `hidden_by_search`, then
    /// collapses group headers. Idempotent for a fixed term.
    pub fn apply(&self, page: &mut Page) {
        for entry in page.entries_mut() {
            if entry.display.hidden_by_tag {
                continue;
            }
            entry.display.hidden_by_search = !self.matches(entry);
        }
        collapse_groups(page);
    }
}
