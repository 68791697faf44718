//! Typed model of the rendered bibliography page.
//!
//! The site generator renders the bibliography ahead of time; this module
//! describes that output as data so the filter pipeline can run without a
//! DOM. Group headers and listing elements appear in document order in
//! [`Page::nodes`]; header ownership of entries is always derived by
//! walking that order, never stored.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// How an entry is currently hidden, tracked per mechanism.
///
/// The tag filter and the text search hide entries through different
/// mechanisms on the rendered page (an inline display style vs. a CSS
/// class), so each writes only its own flag and must respect the other's
/// rather than overwrite it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    pub hidden_by_tag: bool,
    pub hidden_by_search: bool,
}

impl DisplayState {
    /// Visible iff no mechanism hides the entry.
    pub fn is_visible(&self) -> bool {
        !self.hidden_by_tag && !self.hidden_by_search
    }
}

/// Where an entry's chip container is inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChipAnchor {
    /// Immediately after the periodical sub-element.
    AfterPeriodical,
    /// Immediately before the links sub-element.
    BeforeLinks,
}

/// A visible tag label attached to an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chip {
    /// Label in the tag's original casing.
    pub label: CompactString,
    /// Hover tooltip, when the catalog knows the tag.
    pub tooltip: Option<String>,
}

/// One rendered bibliography entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entry {
    /// Stable key (citation key / ADS bibcode).
    pub id: String,
    /// Hidden block of raw citation text, when the renderer emitted one.
    pub raw_citation: Option<String>,
    /// Flattened visible text, used by the substring search.
    pub visible_text: String,
    /// Lower-cased tags derived from the `lrdKeys` field.
    pub tags: Vec<CompactString>,
    /// Normalized tag annotation written back onto the entry node.
    pub tag_attr: Option<String>,
    /// Whether the entry has a periodical sub-element.
    pub has_periodical: bool,
    /// Whether the entry has a links sub-element.
    pub has_links: bool,
    /// Rendered chips; empty until annotation runs or when no anchor exists.
    pub chips: Vec<Chip>,
    pub display: DisplayState,
}

impl Entry {
    /// Create an empty entry with the given stable key.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Attach the embedded raw citation text.
    pub fn with_raw_citation(mut self, raw: impl Into<String>) -> Self {
        self.raw_citation = Some(raw.into());
        self
    }

    /// Set the flattened visible text.
    pub fn with_visible_text(mut self, text: impl Into<String>) -> Self {
        self.visible_text = text.into();
        self
    }

    /// Mark the periodical sub-element as present.
    pub fn with_periodical(mut self) -> Self {
        self.has_periodical = true;
        self
    }

    /// Mark the links sub-element as present.
    pub fn with_links(mut self) -> Self {
        self.has_links = true;
        self
    }

    /// Case-insensitive tag membership. Stored tags are lower-cased, so
    /// only the needle needs normalizing.
    pub fn has_tag(&self, tag: &str) -> bool {
        let needle = tag.trim().to_lowercase();
        self.tags.iter().any(|t| t.as_str() == needle)
    }

    /// Where this entry's chip container goes, if anywhere. Entries with
    /// neither anchor sub-element get no chips.
    pub fn chip_anchor(&self) -> Option<ChipAnchor> {
        if self.has_periodical {
            Some(ChipAnchor::AfterPeriodical)
        } else if self.has_links {
            Some(ChipAnchor::BeforeLinks)
        } else {
            None
        }
    }
}

/// A heading node that visually groups the run of entries after it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupHeader {
    /// Heading level (2 for a year heading, deeper for sub-groups).
    pub level: u8,
    pub text: String,
    pub hidden: bool,
}

/// A listing element owning a contiguous run of entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Listing {
    pub entries: Vec<Entry>,
    pub hidden: bool,
}

/// One node of the rendered page, in document order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Node {
    Header(GroupHeader),
    Listing(Listing),
}

/// Tag data embedded in the page as element attributes.
///
/// The descriptions region carries full name/description pairs; the
/// related names region carries bare tag names only. Either may be
/// absent on a given page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagRegions {
    pub descriptions: Vec<(CompactString, String)>,
    pub names: Vec<CompactString>,
}

/// The rendered bibliography page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Path the page is served at; used for the excluded-listing check.
    pub path: String,
    /// Headers and listings in document order.
    pub nodes: Vec<Node>,
    pub tag_regions: TagRegions,
    /// Whether the page carries the search box.
    pub has_search_box: bool,
}

impl Page {
    /// Create an empty page at the given path, with a search box.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            nodes: Vec::new(),
            tag_regions: TagRegions::default(),
            has_search_box: true,
        }
    }

    /// Append a group header.
    pub fn push_header(&mut self, level: u8, text: impl Into<String>) {
        self.nodes.push(Node::Header(GroupHeader {
            level,
            text: text.into(),
            hidden: false,
        }));
    }

    /// Append a listing element owning `entries`.
    pub fn push_listing(&mut self, entries: Vec<Entry>) {
        self.nodes.push(Node::Listing(Listing {
            entries,
            hidden: false,
        }));
    }

    /// All entries in document order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Listing(l) => Some(&l.entries),
            Node::Header(_) => None,
        })
        .flatten()
    }

    /// All entries in document order, mutable.
    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut Entry> {
        self.nodes
            .iter_mut()
            .filter_map(|n| match n {
                Node::Listing(l) => Some(&mut l.entries),
                Node::Header(_) => None,
            })
            .flatten()
    }

    /// Look up an entry by its stable key.
    pub fn entry(&self, id: &str) -> Option<&Entry> {
        self.entries().find(|e| e.id == id)
    }

    /// Ids of all currently visible entries, in document order.
    pub fn visible_ids(&self) -> Vec<&str> {
        self.entries()
            .filter(|e| e.display.is_visible())
            .map(|e| e.id.as_str())
            .collect()
    }
}
