//! Debounce and throttle gates with caller-supplied time.
//!
//! Event handlers pass their own `Instant`, so tests never sleep. There
//! is no cancellation machinery beyond discarding a superseded deadline;
//! every downstream pass is an idempotent full recomputation, so a
//! dropped callback costs nothing.

use std::time::{Duration, Instant};

/// Delay after the last keystroke before the search pass runs.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Scroll handler gate, roughly 60 fps.
pub const SCROLL_THROTTLE: Duration = Duration::from_millis(16);

/// Resize handler gate, roughly 4 fps.
pub const RESIZE_THROTTLE: Duration = Duration::from_millis(250);

/// Trailing-edge debouncer: each trigger supersedes the pending
/// deadline, so only the last event in a burst fires.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Arm (or re-arm) the deadline at `now + delay`.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// True exactly once after the delay elapses with no new trigger.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

/// Leading-edge throttler: passes the first event, gates the rest of
/// the interval.
#[derive(Debug, Clone)]
pub struct Throttler {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Whether an event at `now` may pass; records it when it does.
    pub fn allow(&mut self, now: Instant) -> bool {
        let allowed = self
            .last
            .is_none_or(|last| now.duration_since(last) >= self.interval);
        if allowed {
            self.last = Some(now);
        }
        allowed
    }
}
