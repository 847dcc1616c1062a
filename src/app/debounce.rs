//! Cancellable trailing-edge debounce driven by host timers.
//!
//! The host has no way to cancel a timer once `set_timeout` was called, so
//! cancellation is by generation: every [`schedule`](Debouncer::schedule)
//! bumps a counter and every elapsed timer bumps another. Only the timer that
//! brings both counters level carries the pending value; the others are
//! leftovers of restarted windows.

use std::time::Duration;

/// Holds the latest scheduled value until its quiet period has elapsed.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<T>,
    scheduled: u64,
    elapsed: u64,
}

impl<T> Debouncer<T> {
    /// Creates an idle debouncer with a fixed quiet period.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            scheduled: 0,
            elapsed: 0,
        }
    }

    /// Replaces the pending value and restarts the window.
    ///
    /// Returns the delay of the timer the caller must start. Exactly one
    /// [`tick`](Self::tick) is expected per returned delay.
    pub fn schedule(&mut self, value: T) -> Duration {
        self.pending = Some(value);
        self.scheduled += 1;
        self.delay
    }

    /// Drops the pending value. Timers already started elapse silently.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Records one elapsed timer.
    ///
    /// Returns the pending value if this was the most recently started timer.
    pub fn tick(&mut self) -> Option<T> {
        if self.elapsed < self.scheduled {
            self.elapsed += 1;
        }

        if self.elapsed == self.scheduled {
            self.pending.take()
        } else {
            None
        }
    }

    /// A value is waiting for its timer.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Timers started but not yet elapsed.
    #[must_use]
    pub const fn outstanding(&self) -> u64 {
        self.scheduled - self.elapsed
    }
}
