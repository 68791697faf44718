//! Tag filter state and recomputation.
//!
//! The controller owns the selected tag set and the search term. On any
//! change it recomputes visibility for the whole page: the pure
//! computation in [`visibility`], a side-effect-only apply of the tag
//! flags, a re-trigger of the search pass with the current term, and the
//! group collapse in [`collapse`].
//!
//! # Example
//!
//! ```
//! use bibfilter::filter::{FilterConfig, FilterController};
//! use bibfilter::page::{Entry, Page};
//!
//! let mut page = Page::new("/papers/");
//! let mut a = Entry::new("a");
//! a.tags = vec!["agn".into()];
//! page.push_listing(vec![a, Entry::new("b")]);
//!
//! let mut controller = FilterController::new(FilterConfig::default());
//! controller.toggle_tag("agn", true);
//! controller.recompute(&mut page);
//!
//! assert_eq!(page.visible_ids(), vec!["a"]);
//! ```

mod collapse;
mod visibility;

pub use collapse::collapse_groups;
pub use visibility::{EntryVisibility, VisibilityMap, compute};

use std::collections::BTreeSet;

use compact_str::CompactString;
use itertools::Itertools;

use crate::catalog::TagCatalog;
use crate::page::Page;
use crate::search::SearchFilter;

/// Listings that must not get the tag UI.
///
/// The proposal and kick-off paper pages carry the search box but no
/// tag filter; fragments are matched case-insensitively against the
/// page path.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub excluded_paths: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            excluded_paths: vec!["proposal".to_string(), "kick-off".to_string()],
        }
    }
}

/// One checkbox model per known tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCheckbox {
    /// Label in the tag's original casing.
    pub label: CompactString,
    /// Description for the checkbox title attribute, when known.
    pub title: Option<String>,
    pub checked: bool,
}

/// Mutable filter state for one page.
#[derive(Debug, Clone)]
pub struct FilterController {
    selected: BTreeSet<String>,
    search: SearchFilter,
    config: FilterConfig,
}

impl FilterController {
    pub fn new(config: FilterConfig) -> Self {
        Self {
            selected: BTreeSet::new(),
            search: SearchFilter::new(),
            config,
        }
    }

    /// Whether the tag UI should be built on this page at all. Search is
    /// wired independently and keeps working on excluded listings.
    pub fn attaches_to(&self, path: &str) -> bool {
        let path = path.to_lowercase();
        !self
            .config
            .excluded_paths
            .iter()
            .any(|fragment| path.contains(&fragment.to_lowercase()))
    }

    /// Build one checkbox per catalog tag, sorted by name.
    pub fn tag_checkboxes(&self, catalog: &TagCatalog) -> Vec<TagCheckbox> {
        catalog
            .definitions()
            .iter()
            .sorted_by_key(|def| def.name.as_str().to_lowercase())
            .map(|def| TagCheckbox {
                label: def.name.clone(),
                title: def.description.clone(),
                checked: self.selected.contains(&def.name.as_str().to_lowercase()),
            })
            .collect()
    }

    /// Check or uncheck a tag. Names are normalized to lower case.
    pub fn toggle_tag(&mut self, tag: &str, checked: bool) {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() {
            return;
        }
        if checked {
            self.selected.insert(tag);
        } else {
            self.selected.remove(&tag);
        }
    }

    /// Uncheck everything.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Currently selected (lower-cased) tag names.
    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.search.set_term(term);
    }

    pub fn search(&self) -> &SearchFilter {
        &self.search
    }

    /// Full recomputation pass.
    ///
    /// The pure visibility map drives the tag flags; the search filter
    /// then applies its own flag (respecting tag-hidden entries) and
    /// runs the group collapse. Idempotent: recomputing twice with the
    /// same state yields the same visible set.
    pub fn recompute(&self, page: &mut Page) {
        let map = visibility::compute(page.entries(), &self.selected, self.search.term());

        for entry in page.entries_mut() {
            if let Some(v) = map.get(&entry.id) {
                entry.display.hidden_by_tag = !v.tag_eligible;
            }
        }

        self.search.apply(page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogConfig, NoFetcher};
    use crate::page::Entry;
    use pretty_assertions::assert_eq;

    fn tagged(id: &str, tags: &[&str]) -> Entry {
        let mut entry = Entry::new(id).with_visible_text(id);
        entry.tags = tags.iter().map(|t| (*t).into()).collect();
        entry
    }

    fn sample_page() -> Page {
        let mut page = Page::new("/papers/");
        page.push_header(2, "2024");
        page.push_listing(vec![
            tagged("a", &["agn", "jwst"]),
            tagged("b", &["jwst"]),
            tagged("c", &[]),
        ]);
        page
    }

    #[test]
    fn test_toggle_and_clear() {
        let mut page = sample_page();
        let mut controller = FilterController::new(FilterConfig::default());

        controller.toggle_tag("JWST", true);
        controller.recompute(&mut page);
        assert_eq!(page.visible_ids(), vec!["a", "b"]);

        controller.toggle_tag("agn", true);
        controller.recompute(&mut page);
        assert_eq!(page.visible_ids(), vec!["a"]);

        // Clearing restores the unfiltered set.
        controller.clear();
        controller.recompute(&mut page);
        assert_eq!(page.visible_ids(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut page = sample_page();
        let mut controller = FilterController::new(FilterConfig::default());
        controller.toggle_tag("jwst", true);

        controller.recompute(&mut page);
        let first: Vec<String> = page.visible_ids().into_iter().map(String::from).collect();
        controller.recompute(&mut page);
        assert_eq!(page.visible_ids(), first);
    }

    #[test]
    fn test_tag_and_search_flags_stay_independent() {
        let mut page = sample_page();
        let mut controller = FilterController::new(FilterConfig::default());

        controller.set_search_term("b");
        controller.recompute(&mut page);
        assert_eq!(page.visible_ids(), vec!["b"]);

        // Adding a tag filter must not wipe the search-hidden state.
        controller.toggle_tag("jwst", true);
        controller.recompute(&mut page);
        assert_eq!(page.visible_ids(), vec!["b"]);

        let a = page.entry("a").unwrap();
        assert!(!a.display.hidden_by_tag);
        assert!(a.display.hidden_by_search);
    }

    #[test]
    fn test_excluded_pages_refuse_tag_ui() {
        let controller = FilterController::new(FilterConfig::default());
        assert!(controller.attaches_to("/papers/"));
        assert!(!controller.attaches_to("/Proposal-papers/"));
        assert!(!controller.attaches_to("/kick-off/"));
    }

    #[test]
    fn test_checkboxes_sorted_with_titles() {
        let mut page = Page::new("/papers/");
        page.tag_regions.descriptions = vec![
            ("jwst".into(), "JWST observations".to_string()),
            ("AGN".into(), "Active nuclei".to_string()),
        ];
        let catalog = TagCatalog::resolve(&page, &NoFetcher, &CatalogConfig::default());

        let mut controller = FilterController::new(FilterConfig::default());
        controller.toggle_tag("jwst", true);

        let boxes = controller.tag_checkboxes(&catalog);
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].label, "AGN");
        assert_eq!(boxes[0].title.as_deref(), Some("Active nuclei"));
        assert!(!boxes[0].checked);
        assert!(boxes[1].checked);
    }
}
