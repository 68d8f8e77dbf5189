//! Redraw scheduling.
//!
//! A single pending deadline. Scheduling again replaces it, so a burst of
//! resize events collapses into one redraw. The host owns the clock and
//! passes `now` in; nothing here sleeps.

use std::time::Duration;

/// Delay before the first connector draw, so layout can settle.
pub const INITIAL_RENDER_DELAY: Duration = Duration::from_millis(100);
/// Debounce applied to resize events.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(5);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedrawScheduler {
    deadline: Option<Duration>,
}

impl RedrawScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any pending deadline with `now + delay`.
    pub fn schedule(&mut self, now: Duration, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    /// True once when the deadline has passed; the deadline is then cleared.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_scheduler.rs"]
mod tests;
