//! Entry tag derivation and chip rendering.
//!
//! For every entry on the page: derive its tag set (pre-parsed records
//! first, raw citation scan as fallback), write the normalized tag
//! annotation back onto the entry, and render one chip per tag with its
//! catalog description as the hover tooltip.

use std::collections::HashMap;

use compact_str::CompactString;

use crate::catalog::TagCatalog;
use crate::citation;
use crate::page::{Chip, Page};

/// Pre-parsed citation records keyed by entry id.
///
/// When the host already has structured records (parsed BibTeX from the
/// generator), those take priority over scanning each entry's embedded
/// raw text. Tags are stored in their original casing.
#[derive(Debug, Clone, Default)]
pub struct ParsedRecords {
    tags_by_id: HashMap<String, Vec<CompactString>>,
}

impl ParsedRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the tag list for an entry id, trimming tokens and
    /// discarding empty ones.
    pub fn insert<I, S>(&mut self, id: impl Into<String>, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tags = tags
            .into_iter()
            .map(|t| CompactString::from(t.as_ref().trim()))
            .filter(|t| !t.is_empty())
            .collect();
        self.tags_by_id.insert(id.into(), tags);
    }

    /// Tags recorded for an entry, if any.
    pub fn get(&self, id: &str) -> Option<&[CompactString]> {
        self.tags_by_id.get(id).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.tags_by_id.is_empty()
    }
}

/// Annotate every entry on the page.
///
/// Entries whose citation text has no `lrdKeys` field end up with an
/// empty tag set and no annotation; entries without a chip anchor get
/// their tags but no chips.
pub fn annotate(page: &mut Page, catalog: &TagCatalog, records: &ParsedRecords) {
    for entry in page.entries_mut() {
        let labels: Vec<CompactString> = match records.get(&entry.id) {
            Some(tags) => tags.to_vec(),
            None => entry
                .raw_citation
                .as_deref()
                .and_then(citation::lrd_keys)
                .map(|value| citation::split_tags(&value))
                .unwrap_or_default(),
        };

        entry.tags = labels
            .iter()
            .map(|label| CompactString::from(label.to_lowercase()))
            .collect();
        entry.tag_attr = if entry.tags.is_empty() {
            None
        } else {
            Some(entry.tags.join(","))
        };

        entry.chips.clear();
        if entry.chip_anchor().is_some() {
            entry.chips = labels
                .iter()
                .map(|label| Chip {
                    label: label.clone(),
                    tooltip: catalog.description(label).map(str::to_string),
                })
                .collect();
        }
    }
}
