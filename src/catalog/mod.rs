//! Tag catalog resolution.
//!
//! Produces the tag → description mapping with best-effort fallback,
//! never failing the page. Tiers, in order:
//!
//! 1. name/description pairs embedded in the page's descriptions region
//! 2. a fetched text resource, trying each candidate relative path once
//! 3. bare tag names from the page's names region
//! 4. a small built-in fallback set
//!
//! # Example
//!
//! ```
//! use bibfilter::catalog::{CatalogConfig, NoFetcher, TagCatalog};
//! use bibfilter::page::Page;
//!
//! let page = Page::new("/papers/");
//! let catalog = TagCatalog::resolve(&page, &NoFetcher, &CatalogConfig::default());
//! // Nothing embedded, nothing fetched: the built-in set is used.
//! assert!(catalog.description("agn").is_some());
//! ```

mod parse;

use std::collections::HashMap;
use std::path::PathBuf;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::TagDefinition;
use crate::error::CatalogError;
use crate::page::Page;

/// Which tier produced the resolved catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogSource {
    /// Name/description pairs embedded in the page.
    PageDescriptions,
    /// Parsed out of the fetched text resource.
    FetchedResource,
    /// Bare names embedded in the page, no descriptions.
    PageNames,
    /// The built-in fallback set.
    Builtin,
}

/// Best-effort retrieval of the tag description resource.
///
/// One attempt per path, no retries; `None` covers network errors,
/// non-OK statuses, and unreadable files alike.
pub trait ResourceFetcher {
    fn fetch(&self, path: &str) -> Option<String>;
}

/// Fetcher that never yields anything, forcing the fallback tiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFetcher;

impl ResourceFetcher for NoFetcher {
    fn fetch(&self, _path: &str) -> Option<String> {
        None
    }
}

/// Reads candidate paths relative to a site root on disk.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceFetcher for FsFetcher {
    fn fetch(&self, path: &str) -> Option<String> {
        std::fs::read_to_string(self.root.join(path.trim_start_matches('/'))).ok()
    }
}

/// Fetches candidate paths over HTTP relative to a base URL.
#[cfg(feature = "fetch")]
#[derive(Debug)]
pub struct HttpFetcher {
    agent: ureq::Agent,
    base: String,
}

#[cfg(feature = "fetch")]
impl HttpFetcher {
    /// Create a fetcher with short timeouts; a slow resource must not
    /// stall page initialization.
    pub fn new(base: impl Into<String>) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_connect(Some(std::time::Duration::from_secs(5)))
            .timeout_global(Some(std::time::Duration::from_secs(15)))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
            base: base.into(),
        }
    }
}

#[cfg(feature = "fetch")]
impl ResourceFetcher for HttpFetcher {
    fn fetch(&self, path: &str) -> Option<String> {
        let url = format!(
            "{}/{}",
            self.base.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        self.agent
            .get(&url)
            .call()
            .ok()?
            .body_mut()
            .read_to_string()
            .ok()
    }
}

/// Candidate relative paths for the tag resource.
///
/// Several candidates tolerate variable deployment base-paths; the first
/// path that fetches successfully wins.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub candidate_paths: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            candidate_paths: vec![
                "assets/tags.yml".to_string(),
                "../assets/tags.yml".to_string(),
                "/assets/tags.yml".to_string(),
            ],
        }
    }
}

/// Built-in last-resort tag set.
const FALLBACK_TAGS: &[(&str, &str)] = &[
    ("agn", "Active galactic nucleus interpretation"),
    ("jwst", "JWST observations"),
    ("dust", "Dust attenuation and reddening"),
    ("spectroscopy", "Spectroscopic follow-up"),
    ("photometry", "Photometric selection and SEDs"),
    ("emission lines", "Emission line measurements"),
    ("variability", "Photometric or spectroscopic variability"),
    ("x-ray", "X-ray constraints"),
    ("black holes", "Black hole masses and growth"),
    ("high-z", "High-redshift samples"),
];

/// The resolved tag → description mapping. Immutable after resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagCatalog {
    definitions: Vec<TagDefinition>,
    /// Lower-cased name → index into `definitions`.
    index: HashMap<CompactString, usize>,
    source: CatalogSource,
}

impl TagCatalog {
    /// Resolve the catalog through the fallback tiers. Never fails.
    pub fn resolve(page: &Page, fetcher: &dyn ResourceFetcher, config: &CatalogConfig) -> Self {
        if !page.tag_regions.descriptions.is_empty() {
            let defs = page
                .tag_regions
                .descriptions
                .iter()
                .map(|(name, desc)| TagDefinition::described(name.clone(), desc.clone()))
                .collect();
            return Self::from_definitions(defs, CatalogSource::PageDescriptions);
        }

        if let Ok(defs) = Self::fetch_tier(fetcher, config) {
            return Self::from_definitions(defs, CatalogSource::FetchedResource);
        }

        if !page.tag_regions.names.is_empty() {
            let defs = page
                .tag_regions
                .names
                .iter()
                .map(|name| TagDefinition::new(name.clone()))
                .collect();
            return Self::from_definitions(defs, CatalogSource::PageNames);
        }

        let defs = FALLBACK_TAGS
            .iter()
            .map(|(name, desc)| TagDefinition::described(*name, *desc))
            .collect();
        Self::from_definitions(defs, CatalogSource::Builtin)
    }

    /// The fetch tier: one attempt per candidate path. A fetch that
    /// succeeds but parses to zero records ends the tier — the resource
    /// exists, it just has nothing usable.
    fn fetch_tier(
        fetcher: &dyn ResourceFetcher,
        config: &CatalogConfig,
    ) -> Result<Vec<TagDefinition>, CatalogError> {
        for path in &config.candidate_paths {
            let Some(text) = fetcher.fetch(path) else {
                continue;
            };
            let defs = parse::parse_records(&text);
            if defs.is_empty() {
                return Err(CatalogError::EmptyResource { path: path.clone() });
            }
            return Ok(defs);
        }
        Err(CatalogError::AllPathsFailed)
    }

    /// Build the catalog, deduplicating names case-insensitively
    /// (first definition wins).
    fn from_definitions(defs: Vec<TagDefinition>, source: CatalogSource) -> Self {
        let mut definitions: Vec<TagDefinition> = Vec::with_capacity(defs.len());
        let mut index = HashMap::with_capacity(defs.len());
        for def in defs {
            let key = CompactString::from(def.name.to_lowercase());
            if index.contains_key(&key) {
                continue;
            }
            index.insert(key, definitions.len());
            definitions.push(def);
        }
        Self {
            definitions,
            index,
            source,
        }
    }

    /// Look up a description case-insensitively.
    pub fn description(&self, name: &str) -> Option<&str> {
        let key = name.trim().to_lowercase();
        self.index
            .get(key.as_str())
            .and_then(|&i| self.definitions[i].description.as_deref())
    }

    /// Whether the catalog knows this tag (case-insensitive).
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name.trim().to_lowercase().as_str())
    }

    /// All definitions in resolution order.
    pub fn definitions(&self) -> &[TagDefinition] {
        &self.definitions
    }

    /// Which tier produced this catalog.
    pub fn source(&self) -> CatalogSource {
        self.source
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Fetcher serving a fixed body for one path.
    struct OnePath {
        path: &'static str,
        body: &'static str,
    }

    impl ResourceFetcher for OnePath {
        fn fetch(&self, path: &str) -> Option<String> {
            (path == self.path).then(|| self.body.to_string())
        }
    }

    const RESOURCE: &str = "\
tags:
  - tag: AGN
    description: Active galactic nucleus interpretation
  - tag: dust
    description: Dust attenuation
";

    fn page_with_descriptions() -> Page {
        let mut page = Page::new("/papers/");
        page.tag_regions.descriptions = vec![
            ("jwst".into(), "JWST observations".to_string()),
            ("high-z".into(), "High-redshift samples".to_string()),
        ];
        page
    }

    #[test]
    fn test_page_descriptions_win_over_fetch() {
        let page = page_with_descriptions();
        let fetcher = OnePath {
            path: "assets/tags.yml",
            body: RESOURCE,
        };
        let catalog = TagCatalog::resolve(&page, &fetcher, &CatalogConfig::default());
        assert_eq!(catalog.source(), CatalogSource::PageDescriptions);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.description("JWST"), Some("JWST observations"));
        assert!(catalog.description("agn").is_none());
    }

    #[test]
    fn test_fetch_tier_used_when_page_has_no_descriptions() {
        let page = Page::new("/papers/");
        let fetcher = OnePath {
            path: "assets/tags.yml",
            body: RESOURCE,
        };
        let catalog = TagCatalog::resolve(&page, &fetcher, &CatalogConfig::default());
        assert_eq!(catalog.source(), CatalogSource::FetchedResource);
        assert_eq!(
            catalog.description("agn"),
            Some("Active galactic nucleus interpretation")
        );
    }

    #[test]
    fn test_later_candidate_path_is_tried() {
        let page = Page::new("/papers/");
        let fetcher = OnePath {
            path: "/assets/tags.yml",
            body: RESOURCE,
        };
        let catalog = TagCatalog::resolve(&page, &fetcher, &CatalogConfig::default());
        assert_eq!(catalog.source(), CatalogSource::FetchedResource);
    }

    #[test]
    fn test_bare_names_beat_builtin_fallback() {
        let mut page = Page::new("/papers/");
        page.tag_regions.names = vec!["AGN".into(), "dust".into()];
        let catalog = TagCatalog::resolve(&page, &NoFetcher, &CatalogConfig::default());
        assert_eq!(catalog.source(), CatalogSource::PageNames);
        assert!(catalog.contains("agn"));
        assert_eq!(catalog.description("agn"), None);
    }

    #[test]
    fn test_builtin_fallback_is_last_resort() {
        let page = Page::new("/papers/");
        let catalog = TagCatalog::resolve(&page, &NoFetcher, &CatalogConfig::default());
        assert_eq!(catalog.source(), CatalogSource::Builtin);
        assert!(catalog.len() <= 10);
        assert!(catalog.contains("jwst"));
    }

    #[test]
    fn test_empty_resource_falls_through_to_next_tier() {
        let mut page = Page::new("/papers/");
        page.tag_regions.names = vec!["dust".into()];
        let fetcher = OnePath {
            path: "assets/tags.yml",
            body: "tags: []\n",
        };
        let catalog = TagCatalog::resolve(&page, &fetcher, &CatalogConfig::default());
        assert_eq!(catalog.source(), CatalogSource::PageNames);
    }

    #[test]
    fn test_duplicate_names_first_wins() {
        let defs = vec![
            TagDefinition::described("AGN", "first"),
            TagDefinition::described("agn", "second"),
        ];
        let catalog = TagCatalog::from_definitions(defs, CatalogSource::Builtin);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.description("agn"), Some("first"));
    }

    #[test]
    fn test_fs_fetcher_reads_relative_to_root() {
        let dir = std::env::temp_dir().join("bibfilter-fs-fetcher-test");
        std::fs::create_dir_all(dir.join("assets")).unwrap();
        std::fs::write(dir.join("assets/tags.yml"), RESOURCE).unwrap();

        let fetcher = FsFetcher::new(&dir);
        assert!(fetcher.fetch("assets/tags.yml").is_some());
        assert!(fetcher.fetch("/assets/tags.yml").is_some());
        assert!(fetcher.fetch("missing.yml").is_none());
    }
}
