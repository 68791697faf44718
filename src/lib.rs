//! Filtering, search, and charting over rendered academic bibliography
//! listings.
//!
//! `bibfilter` models the interactive layer of a static bibliography site:
//! a page of pre-rendered citation entries is loaded once, each entry is
//! annotated with classification tags extracted from its embedded raw
//! citation text, and a filter controller recomputes entry visibility on
//! every interaction (tag checkboxes with AND semantics, a debounced
//! free-text search, and a group-header collapse pass). A monthly
//! publication chart and a floating search bar observe the same page
//! model independently.
//!
//! The crate is deliberately split into pure state and explicit apply
//! steps: visibility is a function from `(entries, selected tags, search
//! term)` to a [`filter::VisibilityMap`], and applying it to the page is a
//! separate side-effect-only pass. Nothing here touches a real DOM; the
//! host builds a [`page::Page`] from whatever it rendered and mirrors the
//! display flags back.
//!
//! # Features
//!
//! - `chart` - Monthly publication chart model (enabled by default)
//! - `fetch` - HTTP retrieval of the tag description resource via `ureq`
//!   (enabled by default)
//! - `regex` - Use the full `regex` engine for citation field extraction
//!   (enabled by default)
//! - `lite` - Use `regex-lite` instead, for smaller builds
//!
//! # Basic Usage
//!
//! ```rust
//! use bibfilter::annotate::ParsedRecords;
//! use bibfilter::app::{App, AppConfig};
//! use bibfilter::catalog::NoFetcher;
//! use bibfilter::page::{Entry, Page};
//!
//! let mut page = Page::new("/papers/");
//! page.push_header(2, "2024");
//! page.push_listing(vec![
//!     Entry::new("2024arXiv0001B")
//!         .with_raw_citation("@article{b, year = {2024}, lrdKeys = {agn, jwst}}")
//!         .with_visible_text("Broad-line AGN candidates in JWST imaging"),
//!     Entry::new("2024arXiv0002C")
//!         .with_raw_citation("@article{c, year = {2024}, lrdKeys = {dust}}")
//!         .with_visible_text("Dust attenuation in compact red sources"),
//! ]);
//!
//! let records = ParsedRecords::default();
//! let mut app = App::init(&mut page, &NoFetcher, &records, AppConfig::default());
//!
//! // Checking a tag hides every entry that does not carry it.
//! app.on_checkbox_change(&mut page, "agn", true);
//! assert!(page.entry("2024arXiv0001B").unwrap().display.is_visible());
//! assert!(!page.entry("2024arXiv0002C").unwrap().display.is_visible());
//! ```
//!
//! # Error Handling
//!
//! No operation is fatal (see [`error`]): a missing page region makes a
//! component no-op, a failed resource fetch cascades to the next catalog
//! tier, an entry without an `lrdKeys` field simply gets an empty tag
//! set, and a chart with no dated entries renders nothing.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

pub mod annotate;
pub mod app;
pub mod catalog;
#[cfg(feature = "chart")]
pub mod chart;
pub mod citation;
pub mod error;
pub mod filter;
pub mod float;
pub mod page;
pub mod search;
pub mod timing;

// Reexports
pub use catalog::{ResourceFetcher, TagCatalog};
#[cfg(feature = "chart")]
pub use chart::{ChartModel, MonthlyCount};
pub use error::CatalogError;
pub use filter::FilterController;
pub use search::SearchFilter;

mod regex;

/// A single tag definition: a unique (case-insensitive) name and an
/// optional human-readable description used for hover tooltips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDefinition {
    /// Tag name in its original casing.
    pub name: CompactString,
    /// Human-readable description; `None` for bare-name fallback tiers.
    pub description: Option<String>,
}

impl TagDefinition {
    /// Create a definition with no description.
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Create a definition with a description.
    pub fn described(name: impl Into<CompactString>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
        }
    }
}

/// A calendar month key (`YYYY-MM`), ordered chronologically.
///
/// Used for chart bucketing; the publication year is required, the month
/// defaults to January when the citation carries none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u8,
}

impl MonthKey {
    /// Create a key, clamping the month into `[1, 12]`.
    pub fn new(year: i32, month: u8) -> Self {
        Self {
            year,
            month: month.clamp(1, 12),
        }
    }

    /// The next calendar month.
    pub fn succ(self) -> Self {
        if self.month >= 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// `YYYY-MM` label.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
