//! Wall-clock port.

use chrono::{Local, NaiveDateTime};

/// Source of the current local time.
///
/// Entries are stamped and grouped by the user's calendar day, so the
/// clock yields naive local time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Clock backed by the host's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
