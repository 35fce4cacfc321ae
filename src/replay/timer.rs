use std::time::Duration;

/// Smallest interval a timer accepts
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// A repeating virtual timer driven by the host.
///
/// The host feeds elapsed time; every full interval yields one tick. A `Ticker` is owned by at
/// most one place at a time: dropping or replacing it cancels all of its future ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticker {
    interval: Duration,
    elapsed: Duration,
    fired: u64,
}

impl Ticker {
    /// Creates a timer that fires every `interval` (at least [`MIN_INTERVAL`])
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            elapsed: Duration::ZERO,
            fired: 0,
        }
    }

    /// Tick interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of ticks fired so far
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Time until the next tick is due
    pub fn remaining(&self) -> Duration {
        self.interval.saturating_sub(self.elapsed)
    }

    /// Adds elapsed time
    pub fn feed(&mut self, elapsed: Duration) {
        self.elapsed = self.elapsed.saturating_add(elapsed);
    }

    /// Consumes one due tick, if any
    pub fn take_due(&mut self) -> bool {
        if self.elapsed < self.interval {
            return false;
        }
        self.elapsed -= self.interval;
        self.fired += 1;
        true
    }
}
