//! Floating search bar pinning.
//!
//! Purely presentational: once the page scrolls past the search bar's
//! natural resting position the bar is pinned to the viewport top, and a
//! placeholder of the same height keeps the layout from jumping. Scroll
//! updates are throttled to roughly 60 fps and resize updates to roughly
//! 4 fps; a resize re-measures the resting position only while the bar
//! is in normal flow (pinned bars are out of flow and would measure
//! wrong).

use std::time::Instant;

use crate::timing::{RESIZE_THROTTLE, SCROLL_THROTTLE, Throttler};

/// Pin state machine for the search bar.
#[derive(Debug, Clone)]
pub struct FloatingBar {
    natural_top: f32,
    bar_height: f32,
    pinned: bool,
    scroll_gate: Throttler,
    resize_gate: Throttler,
}

impl FloatingBar {
    /// `natural_top` is the bar's document offset in normal flow;
    /// `bar_height` its rendered height.
    pub fn new(natural_top: f32, bar_height: f32) -> Self {
        Self {
            natural_top,
            bar_height,
            pinned: false,
            scroll_gate: Throttler::new(SCROLL_THROTTLE),
            resize_gate: Throttler::new(RESIZE_THROTTLE),
        }
    }

    pub fn pinned(&self) -> bool {
        self.pinned
    }

    /// Height the placeholder must occupy to preserve layout.
    pub fn placeholder_height(&self) -> f32 {
        if self.pinned { self.bar_height } else { 0.0 }
    }

    /// Throttled scroll update. Returns true when the pin state changed
    /// (the only case the host needs to restyle for).
    pub fn on_scroll(&mut self, scroll_y: f32, now: Instant) -> bool {
        if !self.scroll_gate.allow(now) {
            return false;
        }
        let was_pinned = self.pinned;
        self.pinned = scroll_y > self.natural_top;
        self.pinned != was_pinned
    }

    /// Throttled resize update with fresh measurements.
    pub fn on_resize(&mut self, natural_top: f32, bar_height: f32, now: Instant) {
        if !self.resize_gate.allow(now) {
            return;
        }
        self.bar_height = bar_height;
        if !self.pinned {
            self.natural_top = natural_top;
        }
    }
}
