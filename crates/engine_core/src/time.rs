//! Fixed-interval polling for loops that watch for configuration changes.

use std::time::{Duration, Instant};

/// Accumulates elapsed time and reports when a fixed poll interval has passed.
#[derive(Debug)]
pub struct PollClock {
    /// Time of the last tick.
    last_tick: Instant,
    /// Poll interval.
    interval: Duration,
    /// Accumulated time not yet consumed by a poll.
    accumulator: Duration,
    /// Polls fired since creation.
    poll_count: u64,
}

impl PollClock {
    /// Create a clock that fires every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(Instant::now(), interval)
    }

    /// Create a clock whose first tick is measured from `start`.
    pub fn starting_at(start: Instant, interval: Duration) -> Self {
        Self {
            last_tick: start,
            interval,
            accumulator: Duration::ZERO,
            poll_count: 0,
        }
    }

    /// Advance to `now`. Returns true when at least one interval has elapsed.
    ///
    /// Missed intervals collapse into a single poll.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        self.accumulator += now.saturating_duration_since(self.last_tick);
        self.last_tick = now;

        if self.interval.is_zero() {
            self.poll_count += 1;
            return true;
        }
        if self.accumulator < self.interval {
            return false;
        }

        let missed = (self.accumulator.as_nanos() / self.interval.as_nanos()) as u64;
        if missed > 1 {
            log::trace!("poll clock fell behind by {} intervals", missed - 1);
        }
        self.accumulator = Duration::ZERO;
        self.poll_count += 1;
        true
    }

    /// Advance to the current instant.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Time left until the next poll fires.
    pub fn remaining(&self) -> Duration {
        self.interval.saturating_sub(self.accumulator)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn poll_count(&self) -> u64 {
        self.poll_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_interval() {
        let start = Instant::now();
        let mut clock = PollClock::starting_at(start, Duration::from_millis(100));
        assert!(!clock.tick_at(start + Duration::from_millis(40)));
        assert!(!clock.tick_at(start + Duration::from_millis(90)));
        assert!(clock.tick_at(start + Duration::from_millis(120)));
        assert_eq!(clock.poll_count(), 1);
        assert_eq!(clock.interval(), Duration::from_millis(100));
        assert_eq!(clock.remaining(), Duration::from_millis(100));
    }

    #[test]
    fn missed_intervals_collapse() {
        let start = Instant::now();
        let mut clock = PollClock::starting_at(start, Duration::from_millis(10));
        assert!(clock.tick_at(start + Duration::from_millis(55)));
        assert!(!clock.tick_at(start + Duration::from_millis(56)));
        assert_eq!(clock.poll_count(), 1);
    }
}
