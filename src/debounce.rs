//! Trailing-edge debounce for interactive re-evaluation.
//!
//! Rapid successive edits are coalesced so only the latest input set is
//! classified. Superseded submissions are discarded, not queued; no
//! cancellation token is needed because every evaluation is independent
//! and idempotent. Time is injected so tests run without sleeping.

use std::time::{Duration, Instant};

#[derive(Debug)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// Coalesces submissions: the value becomes due once `window` has elapsed
/// with no newer submission.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Submit a value, replacing any pending one and restarting the window.
    pub fn submit(&mut self, value: T, at: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: at + self.window,
        });
    }

    /// Take the pending value if its window has elapsed.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => {
                self.pending.take().map(|p| p.value)
            }
            _ => None,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Discard the pending value without evaluating it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
