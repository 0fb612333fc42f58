//! Repeating timer for cooperative event loops.

use std::time::{Duration, Instant};

/// Fires every `interval`, re-armed by the caller after each tick.
///
/// The timer does no waiting of its own: an event loop asks how long it may
/// block (`time_until_due`), handles input in the meantime, and runs the tick
/// once `is_due` holds. Re-arming from the time the tick finished keeps ticks
/// from piling up when one runs long.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    interval: Duration,
    next_due: Instant,
}

impl IntervalTimer {
    /// A timer that is due immediately, so the first tick runs at startup.
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(interval, Instant::now())
    }

    pub fn starting_at(interval: Duration, first_due: Instant) -> Self {
        Self {
            interval,
            next_due: first_due,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_due
    }

    pub fn time_until_due(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    pub fn rearm(&mut self, now: Instant) {
        self.next_due = now + self.interval;
    }

    /// Run `tick` and re-arm if the timer is due. Returns whether it ran.
    pub fn poll<F: FnOnce()>(&mut self, now: Instant, tick: F) -> bool {
        if !self.is_due(now) {
            return false;
        }
        tick();
        self.rearm(Instant::now().max(now));
        true
    }
}
