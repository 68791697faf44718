//! Pure visibility computation.
//!
//! `(entries, selected tags, search term) → visibility map`, no side
//! effects. Applying the result to the page happens elsewhere, which
//! keeps this testable without any rendered output.

use std::collections::{BTreeSet, HashMap};

use crate::page::Entry;

/// Per-entry eligibility under each filter mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryVisibility {
    /// Every selected tag is present on the entry (or nothing selected).
    pub tag_eligible: bool,
    /// The search term is a substring of the entry text (or empty).
    pub search_eligible: bool,
}

impl EntryVisibility {
    /// Visible iff eligible under both filters.
    pub fn is_visible(&self) -> bool {
        self.tag_eligible && self.search_eligible
    }
}

/// Visibility decisions keyed by entry id.
#[derive(Debug, Clone, Default)]
pub struct VisibilityMap {
    by_id: HashMap<String, EntryVisibility>,
}

impl VisibilityMap {
    pub fn get(&self, id: &str) -> Option<EntryVisibility> {
        self.by_id.get(id).copied()
    }

    /// Whether the entry ends up visible; unknown ids count as visible
    /// (an entry the computation never saw must not be hidden).
    pub fn is_visible(&self, id: &str) -> bool {
        self.get(id).is_none_or(|v| v.is_visible())
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Compute visibility for every entry.
///
/// Tag semantics are AND: an entry is tag-eligible iff the selected set
/// is a subset of its tags, case-insensitively. An empty selection makes
/// every entry tag-eligible. Search is a case-insensitive substring
/// match over the flattened entry text; an empty term matches all.
pub fn compute<'a>(
    entries: impl IntoIterator<Item = &'a Entry>,
    selected: &BTreeSet<String>,
    term: &str,
) -> VisibilityMap {
    let needle = term.trim().to_lowercase();

    let by_id = entries
        .into_iter()
        .map(|entry| {
            let tag_eligible = selected.iter().all(|tag| entry.has_tag(tag));
            let search_eligible =
                needle.is_empty() || entry.visible_text.to_lowercase().contains(&needle);
            (
                entry.id.clone(),
                EntryVisibility {
                    tag_eligible,
                    search_eligible,
                },
            )
        })
        .collect();

    VisibilityMap { by_id }
}
