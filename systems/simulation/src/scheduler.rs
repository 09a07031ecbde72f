//! Fixed-interval tick gating.

use std::time::Duration;

/// Decides when the next fixed tick is due.
///
/// Time is sampled by the caller every loop iteration; a tick is due once the
/// elapsed time since the previous tick reaches the interval. Ticks never
/// catch up: a long stall yields a single tick.
#[derive(Clone, Copy, Debug)]
pub struct TickScheduler {
    interval: f64,
    last_tick: f64,
}

impl TickScheduler {
    /// Creates a scheduler whose first tick is due one interval after `now`.
    #[must_use]
    pub fn new(interval: Duration, now: f64) -> Self {
        Self {
            interval: interval.as_secs_f64(),
            last_tick: now,
        }
    }

    /// Returns `true` and restarts the interval when a tick is due at `now`.
    pub fn poll(&mut self, now: f64) -> bool {
        if now - self.last_tick >= self.interval {
            self.last_tick = now;
            true
        } else {
            false
        }
    }
}
