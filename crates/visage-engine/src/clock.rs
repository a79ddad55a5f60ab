//! Tick clocks - where the scheduler reads "now" from

use std::time::Instant;

use visage_core::MediaTime;

/// Source of timestamps for the scheduler's frame ticks.
///
/// The clock's timeline is arbitrary but must be monotonic; the scheduler
/// only ever uses differences against a captured start timestamp.
pub trait TickClock {
    /// Current position on the clock's own timeline.
    fn now(&self) -> MediaTime;
}

/// Wall clock anchored at construction, backed by the monotonic OS clock.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        MonotonicClock {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickClock for MonotonicClock {
    fn now(&self) -> MediaTime {
        MediaTime::from_micros(self.origin.elapsed().as_micros() as i64)
    }
}
