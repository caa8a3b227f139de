//! Settable clock for deterministic dates.

use chrono::{Duration, NaiveDateTime};
use parking_lot::Mutex;

use crate::port::outbound::clock::Clock;

/// Clock that returns a fixed instant until moved.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Jump to an absolute instant.
    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock() = now;
    }

    /// Move forward (or back, for negative durations).
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock()
    }
}
