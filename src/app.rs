//! Page-load initialization and event wiring.
//!
//! One explicit context object replaces the page's former module-level
//! globals: [`App::init`] resolves the tag catalog, annotates every
//! entry, and builds the checkbox models once; every event handler then
//! receives the context and the page and runs to completion. Single
//! threaded and cooperative — the only suspension point is the one
//! catalog fetch inside `init`.

use std::time::Instant;

use crate::annotate::{ParsedRecords, annotate};
use crate::catalog::{CatalogConfig, ResourceFetcher, TagCatalog};
#[cfg(feature = "chart")]
use crate::chart::{ChartModel, aggregate};
use crate::filter::{FilterConfig, FilterController, TagCheckbox};
use crate::float::FloatingBar;
use crate::page::Page;
use crate::timing::{Debouncer, SEARCH_DEBOUNCE};

/// Initialization-time configuration and host measurements.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub filter: FilterConfig,
    /// Chart viewport width in pixels.
    pub chart_viewport: f32,
    /// Search bar document offset in normal flow.
    pub search_bar_top: f32,
    /// Search bar rendered height.
    pub search_bar_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            filter: FilterConfig::default(),
            chart_viewport: 800.0,
            search_bar_top: 120.0,
            search_bar_height: 40.0,
        }
    }
}

/// The per-page context object.
pub struct App {
    catalog: TagCatalog,
    controller: FilterController,
    checkboxes: Vec<TagCheckbox>,
    search_debounce: Debouncer,
    pending_term: Option<String>,
    floating: Option<FloatingBar>,
    #[cfg(feature = "chart")]
    chart: Option<ChartModel>,
    #[cfg(feature = "chart")]
    chart_viewport: f32,
}

impl App {
    /// Initialize the page: resolve the catalog, annotate entries,
    /// build the filter UI models. Never fails; every missing piece
    /// degrades to a smaller UI.
    pub fn init(
        page: &mut Page,
        fetcher: &dyn ResourceFetcher,
        records: &ParsedRecords,
        config: AppConfig,
    ) -> Self {
        let catalog = TagCatalog::resolve(page, fetcher, &config.catalog);
        annotate(page, &catalog, records);

        let controller = FilterController::new(config.filter);
        let checkboxes = if controller.attaches_to(&page.path) {
            controller.tag_checkboxes(&catalog)
        } else {
            Vec::new()
        };

        let floating = page
            .has_search_box
            .then(|| FloatingBar::new(config.search_bar_top, config.search_bar_height));

        #[cfg(feature = "chart")]
        let chart = ChartModel::build(&aggregate(page.entries()), config.chart_viewport);

        Self {
            catalog,
            controller,
            checkboxes,
            search_debounce: Debouncer::new(SEARCH_DEBOUNCE),
            pending_term: None,
            floating,
            #[cfg(feature = "chart")]
            chart,
            #[cfg(feature = "chart")]
            chart_viewport: config.chart_viewport,
        }
    }

    pub fn catalog(&self) -> &TagCatalog {
        &self.catalog
    }

    pub fn controller(&self) -> &FilterController {
        &self.controller
    }

    /// Checkbox models; empty on excluded listings.
    pub fn checkboxes(&self) -> &[TagCheckbox] {
        &self.checkboxes
    }

    pub fn floating_bar(&self) -> Option<&FloatingBar> {
        self.floating.as_ref()
    }

    #[cfg(feature = "chart")]
    pub fn chart(&self) -> Option<&ChartModel> {
        self.chart.as_ref()
    }

    /// A checkbox changed: update the selection and recompute the whole
    /// page synchronously (the search pass re-runs with its current
    /// term, so both filters stay consistent).
    pub fn on_checkbox_change(&mut self, page: &mut Page, tag: &str, checked: bool) {
        self.controller.toggle_tag(tag, checked);
        let key = tag.trim().to_lowercase();
        for model in &mut self.checkboxes {
            if model.label.as_str().to_lowercase() == key {
                model.checked = checked;
            }
        }
        self.controller.recompute(page);
    }

    /// Uncheck everything and restore tag-unfiltered visibility.
    pub fn clear_filters(&mut self, page: &mut Page) {
        self.controller.clear();
        for model in &mut self.checkboxes {
            model.checked = false;
        }
        self.controller.recompute(page);
    }

    /// A search keystroke: debounced, the pass itself runs from
    /// [`App::tick`] once the quiet period elapses.
    pub fn on_search_input(&mut self, term: &str, now: Instant) {
        self.pending_term = Some(term.to_string());
        self.search_debounce.trigger(now);
    }

    /// Fire due timers. Returns true when a search pass ran.
    pub fn tick(&mut self, page: &mut Page, now: Instant) -> bool {
        if self.search_debounce.fire(now)
            && let Some(term) = self.pending_term.take()
        {
            self.controller.set_search_term(&term);
            self.controller.search().apply(page);
            return true;
        }
        false
    }

    /// Scroll event; drives the floating bar only.
    pub fn on_scroll(&mut self, scroll_y: f32, now: Instant) -> bool {
        match &mut self.floating {
            Some(bar) => bar.on_scroll(scroll_y, now),
            None => false,
        }
    }

    /// Resize event: the floating bar re-measures and the chart is
    /// rebuilt from scratch for the new viewport.
    pub fn on_resize(
        &mut self,
        page: &Page,
        viewport_width: f32,
        search_bar_top: f32,
        search_bar_height: f32,
        now: Instant,
    ) {
        if let Some(bar) = &mut self.floating {
            bar.on_resize(search_bar_top, search_bar_height, now);
        }
        #[cfg(feature = "chart")]
        {
            self.chart_viewport = viewport_width;
            self.chart = ChartModel::build(&aggregate(page.entries()), viewport_width);
        }
        #[cfg(not(feature = "chart"))]
        {
            let _ = (page, viewport_width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NoFetcher;
    use crate::page::Entry;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn entry(id: &str, keys: &str, text: &str) -> Entry {
        Entry::new(id)
            .with_raw_citation(format!(
                "@article{{{id}, year = {{2024}}, month = {{jun}}, lrdKeys = {{{keys}}}}}"
            ))
            .with_visible_text(text)
            .with_links()
    }

    fn sample_page(path: &str) -> Page {
        let mut page = Page::new(path);
        page.push_header(2, "2024");
        page.push_listing(vec![
            entry("a", "agn, jwst", "Broad-line AGN candidates"),
            entry("b", "jwst", "JWST photometry of compact sources"),
            entry("c", "dust", "Dust attenuation in red objects"),
        ]);
        page
    }

    fn init(page: &mut Page) -> App {
        App::init(page, &NoFetcher, &ParsedRecords::default(), AppConfig::default())
    }

    #[test]
    fn test_init_annotates_and_builds_ui() {
        let mut page = sample_page("/papers/");
        let app = init(&mut page);

        assert_eq!(page.entry("a").unwrap().tags, vec!["agn", "jwst"]);
        assert!(!app.checkboxes().is_empty());
        assert!(app.floating_bar().is_some());
        #[cfg(feature = "chart")]
        assert!(app.chart().is_some());
    }

    #[test]
    fn test_checkbox_change_recomputes_visibility() {
        let mut page = sample_page("/papers/");
        let mut app = init(&mut page);

        app.on_checkbox_change(&mut page, "jwst", true);
        assert_eq!(page.visible_ids(), vec!["a", "b"]);

        app.on_checkbox_change(&mut page, "agn", true);
        assert_eq!(page.visible_ids(), vec!["a"]);

        app.clear_filters(&mut page);
        assert_eq!(page.visible_ids(), vec!["a", "b", "c"]);
        assert!(app.checkboxes().iter().all(|c| !c.checked));
    }

    #[test]
    fn test_search_input_waits_for_debounce() {
        let start = Instant::now();
        let mut page = sample_page("/papers/");
        let mut app = init(&mut page);

        app.on_search_input("agn", start);
        assert!(!app.tick(&mut page, start + Duration::from_millis(100)));
        assert_eq!(page.visible_ids().len(), 3, "pass must not run early");

        assert!(app.tick(&mut page, start + Duration::from_millis(300)));
        assert_eq!(page.visible_ids(), vec!["a"]);
    }

    #[test]
    fn test_rapid_keystrokes_keep_only_the_last_term() {
        let start = Instant::now();
        let mut page = sample_page("/papers/");
        let mut app = init(&mut page);

        app.on_search_input("agn", start);
        app.on_search_input("dust", start + Duration::from_millis(200));

        assert!(!app.tick(&mut page, start + Duration::from_millis(350)));
        assert!(app.tick(&mut page, start + Duration::from_millis(500)));
        assert_eq!(page.visible_ids(), vec!["c"]);
    }

    #[test]
    fn test_excluded_page_gets_no_tag_ui_but_search_works() {
        let start = Instant::now();
        let mut page = sample_page("/proposal-papers/");
        let mut app = init(&mut page);

        assert!(app.checkboxes().is_empty());

        app.on_search_input("dust", start);
        app.tick(&mut page, start + Duration::from_secs(1));
        assert_eq!(page.visible_ids(), vec!["c"]);
    }

    #[cfg(feature = "chart")]
    #[test]
    fn test_resize_rebuilds_chart() {
        let start = Instant::now();
        let mut page = sample_page("/papers/");
        let mut app = init(&mut page);

        app.on_resize(&page, 200.0, 120.0, 40.0, start);
        let chart = app.chart().unwrap();
        // Three entries, all 2024-06: a single bucket.
        assert_eq!(chart.bars.len(), 1);
        assert_eq!(chart.bars[0].count, 3);
    }
}
