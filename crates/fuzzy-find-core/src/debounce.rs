//! Poll-driven debouncing.
//!
//! A [`Debouncer`] holds at most one pending task. Scheduling a new task replaces (cancels) the
//! previous one, so only the most recently scheduled payload ever becomes due. Time is passed in
//! explicitly; the host's event loop decides when to call [`Debouncer::take_due`].

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Pending<T> {
    due: Instant,
    payload: T,
}

/// A single-slot, last-write-wins scheduled task.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer that delays every task by `delay`.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `payload` to become due at `now + delay`, cancelling any pending task.
    ///
    /// Returns `true` if a pending task was cancelled.
    pub fn schedule(&mut self, now: Instant, payload: T) -> bool {
        let cancelled = self.pending.is_some();
        self.pending = Some(Pending {
            due: now + self.delay,
            payload,
        });
        cancelled
    }

    /// Cancel the pending task, if any, and return its payload.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.payload)
    }

    /// Whether a task is pending.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending task becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Time left until the pending task is due (zero if already due).
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline().map(|due| due.saturating_duration_since(now))
    }

    /// Take the pending payload if it is due at `now`.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(p) if p.due <= now => self.pending.take().map(|p| p.payload),
            _ => None,
        }
    }
}
