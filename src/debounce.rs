//! Search input debouncing.
//!
//! Raw input is recorded immediately; the settled term only follows after the
//! quiescence window passes with no further input. Each new input cancels the
//! outstanding timer before scheduling its own, so at most one settle is ever
//! pending and it always carries the latest term.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::timer::{TimerHandle, TimerQueue};

pub const DEFAULT_QUIESCENCE_MS: u64 = 500;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub raw_term: String,
    pub settled_term: String,
}

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    state: SearchState,
    timers: TimerQueue<String>,
    pending: Option<TimerHandle>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: SearchState::default(),
            timers: TimerQueue::new(),
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn raw_term(&self) -> &str {
        &self.state.raw_term
    }

    pub fn settled_term(&self) -> &str {
        &self.state.settled_term
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn on_input(&mut self, now: Instant, term: impl Into<String>) {
        let term = term.into();
        self.cancel_pending();
        self.state.raw_term = term.clone();
        self.pending = Some(self.timers.schedule(now, self.delay, term));
    }

    /// Settle the pending term if its window has elapsed.
    ///
    /// Returns `true` when a settle happened on this call.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut settled = false;
        for (handle, term) in self.timers.take_expired(now) {
            if self.pending != Some(handle) {
                continue;
            }
            self.pending = None;
            debug!(term = %term, "search term settled");
            self.state.settled_term = term;
            settled = true;
        }
        settled
    }

    /// Change the window. Any pending settle is dropped, not rescheduled.
    pub fn set_delay(&mut self, delay: Duration) {
        self.cancel_pending();
        self.delay = delay;
    }

    /// Drop the pending settle, leaving raw and settled terms as they are.
    pub fn teardown(&mut self) {
        self.cancel_pending();
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.timers.cancel(handle);
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_QUIESCENCE_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn settles_after_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();
        debouncer.on_input(start, "milk");
        assert_eq!(debouncer.raw_term(), "milk");
        assert!(!debouncer.poll(start + ms(499)));
        assert_eq!(debouncer.settled_term(), "");
        assert!(debouncer.poll(start + ms(500)));
        assert_eq!(debouncer.settled_term(), "milk");
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn teardown_prevents_stale_settle() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();
        debouncer.on_input(start, "milk");
        debouncer.teardown();
        assert!(!debouncer.poll(start + ms(10_000)));
        assert_eq!(debouncer.settled_term(), "");
        assert_eq!(debouncer.raw_term(), "milk");
    }

    #[test]
    fn reconfigure_drops_pending_settle() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();
        debouncer.on_input(start, "milk");
        debouncer.set_delay(ms(50));
        assert!(!debouncer.poll(start + ms(1_000)));
        debouncer.on_input(start + ms(1_000), "dog");
        assert!(debouncer.poll(start + ms(1_050)));
        assert_eq!(debouncer.settled_term(), "dog");
    }
}
