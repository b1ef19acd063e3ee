//! Quiet-window debouncing for bursts of events such as viewport resizes.
//!
//! The page runs on a single event loop, so rather than owning a timer the debouncer records a
//! deadline and is polled with the current time. Each new event replaces the pending one and
//! restarts the window (last-event-wins).

use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
/// Holds at most one pending value until no newer value has arrived for the quiet window.
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    #[must_use]
    /// Creates a debouncer with the given quiet window.
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Records `value` at `now`, cancelling and replacing anything pending.
    pub fn schedule(&mut self, now: Instant, value: T) {
        self.pending = Some((now + self.quiet, value));
    }

    #[must_use]
    /// When the pending value becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    #[must_use]
    /// Whether a value is waiting for its quiet window.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Releases the pending value once its quiet window has elapsed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline() {
            Some(deadline) if now >= deadline => self.pending.take().map(|(_, value)| value),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "tests/debounce.rs"]
mod tests;
