//! Monthly publication chart model.
//!
//! Aggregates entry counts by publication month, zero-fills the full
//! range between the earliest and latest observed month (the one real
//! algorithmic step on the page), and models a horizontally scrollable
//! bar chart that opens at the most recent month.
//!
//! # Example
//!
//! ```
//! use bibfilter::chart::{ChartModel, aggregate};
//! use bibfilter::page::Entry;
//!
//! let entries = [
//!     Entry::new("a").with_raw_citation("@article{a, year = {2023}, month = {mar}}"),
//!     Entry::new("b").with_raw_citation("@article{b, year = {2023}, month = {jun}}"),
//! ];
//! let counts = aggregate(&entries);
//! // 2023-03 through 2023-06, gaps zero-filled.
//! assert_eq!(counts.len(), 4);
//!
//! let chart = ChartModel::build(&counts, 300.0).unwrap();
//! assert_eq!(chart.bars.last().unwrap().count, 1);
//! ```

use std::collections::HashMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::MonthKey;
use crate::citation;
use crate::page::Entry;

/// Pixel width of one month column, bar plus gutter.
const BAR_SLOT_WIDTH: f32 = 18.0;

/// Entry count for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub key: MonthKey,
    pub count: u32,
}

/// Count entries per publication month.
///
/// Entries without raw citation text or without a year are skipped. The
/// result covers every month in the inclusive observed range, in order,
/// with zero counts for months no entry falls in. Empty when no entry
/// has a date.
pub fn aggregate<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> Vec<MonthlyCount> {
    let keys: Vec<MonthKey> = entries
        .into_iter()
        .filter_map(|entry| entry.raw_citation.as_deref())
        .filter_map(citation::publication_month)
        .collect();

    let Some((min, max)) = keys.iter().copied().minmax().into_option() else {
        return Vec::new();
    };

    let mut counts: HashMap<MonthKey, u32> = HashMap::new();
    for key in &keys {
        *counts.entry(*key).or_default() += 1;
    }

    let mut out = Vec::new();
    let mut key = min;
    loop {
        out.push(MonthlyCount {
            key,
            count: counts.get(&key).copied().unwrap_or(0),
        });
        if key == max {
            break;
        }
        key = key.succ();
    }
    out
}

/// One rendered bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub key: MonthKey,
    pub count: u32,
    /// Height as a fraction of the tallest bar, in `[0, 1]`.
    pub height_frac: f32,
    /// Hover tooltip text with the exact count.
    pub tooltip: String,
}

/// The scrollable bar chart.
///
/// Rebuilt from scratch on window resize rather than patched in place;
/// the model is cheap and a full rebuild keeps scroll clamping simple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartModel {
    pub bars: Vec<Bar>,
    pub max_count: u32,
    viewport_width: f32,
    scroll: f32,
}

impl ChartModel {
    /// Build the chart from aggregated counts. `None` when there is
    /// nothing to draw.
    pub fn build(counts: &[MonthlyCount], viewport_width: f32) -> Option<Self> {
        if counts.is_empty() {
            return None;
        }

        let max_count = counts.iter().map(|c| c.count).max().unwrap_or(0);
        // Scale floor of 1 keeps the division defined when every count
        // in range is zero.
        let scale = max_count.max(1) as f32;

        let bars = counts
            .iter()
            .map(|c| Bar {
                key: c.key,
                count: c.count,
                height_frac: c.count as f32 / scale,
                tooltip: format!("{}: {}", c.key.label(), c.count),
            })
            .collect();

        let mut chart = Self {
            bars,
            max_count,
            viewport_width: viewport_width.max(0.0),
            scroll: 0.0,
        };
        // Open at the most recent month.
        chart.scroll = chart.max_scroll();
        Some(chart)
    }

    /// Total content width across all month columns.
    pub fn content_width(&self) -> f32 {
        self.bars.len() as f32 * BAR_SLOT_WIDTH
    }

    /// Maximum scroll offset; zero when everything fits.
    pub fn max_scroll(&self) -> f32 {
        (self.content_width() - self.viewport_width).max(0.0)
    }

    /// Current scroll offset.
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Wheel or drag delta, clamped to the content.
    pub fn scroll_by(&mut self, dx: f32) {
        self.scroll = (self.scroll + dx).clamp(0.0, self.max_scroll());
    }

    /// The bar under a viewport x position, for hover tooltips.
    pub fn bar_at(&self, viewport_x: f32) -> Option<&Bar> {
        if viewport_x < 0.0 || viewport_x >= self.viewport_width {
            return None;
        }
        let index = ((self.scroll + viewport_x) / BAR_SLOT_WIDTH).floor();
        if index < 0.0 {
            return None;
        }
        self.bars.get(index as usize)
    }
}
