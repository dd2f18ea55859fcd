//! Fixed-interval timer driven by elapsed frame time.
//!
//! The terminal loop reports how much wall time passed since the last
//! frame; the timer converts that into a whole number of due ticks and
//! carries the remainder forward. A cancelled timer never fires again
//! until it is restarted, and dropping its owner drops it with no
//! callback left behind.

use std::time::Duration;

/// Smallest interval accepted; a zero interval would fire unboundedly.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Owned, cancellable interval timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalTimer {
    /// Time between ticks.
    interval: Duration,
    /// Elapsed time not yet converted into ticks.
    pending: Duration,
    /// Whether the timer is running.
    armed: bool,
    /// Ticks fired since the last start.
    fired: u64,
}

impl IntervalTimer {
    /// Create a stopped timer with the given interval.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            pending: Duration::ZERO,
            armed: false,
            fired: 0,
        }
    }

    /// Create a timer that is already running.
    #[must_use]
    pub fn started(interval: Duration) -> Self {
        let mut timer = Self::new(interval);
        timer.start();
        timer
    }

    /// Arm the timer, discarding any partial interval and tick count.
    pub fn start(&mut self) {
        self.armed = true;
        self.pending = Duration::ZERO;
        self.fired = 0;
    }

    /// Disarm the timer.
    pub fn cancel(&mut self) {
        self.armed = false;
        self.pending = Duration::ZERO;
    }

    /// Whether the timer will fire on a future `advance`.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed
    }

    /// Tick interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Ticks fired since the last `start`.
    #[must_use]
    pub const fn fired(&self) -> u64 {
        self.fired
    }

    /// Feed elapsed time and return how many ticks became due.
    pub fn advance(&mut self, elapsed: Duration) -> u64 {
        if !self.armed {
            return 0;
        }

        self.pending = self.pending.saturating_add(elapsed);
        let due = self.pending.as_nanos() / self.interval.as_nanos();
        if due == 0 {
            return 0;
        }

        #[allow(clippy::cast_possible_truncation)]
        let due = due.min(u128::from(u32::MAX)) as u32;
        self.pending = self.pending.saturating_sub(self.interval * due);
        self.fired += u64::from(due);
        u64::from(due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALF_SECOND: Duration = Duration::from_millis(500);

    #[test]
    fn test_new_timer_is_stopped() {
        let mut timer = IntervalTimer::new(HALF_SECOND);
        assert!(!timer.is_armed());
        assert_eq!(timer.advance(Duration::from_secs(10)), 0);
    }

    #[test]
    fn test_fires_on_whole_intervals() {
        let mut timer = IntervalTimer::started(HALF_SECOND);
        assert_eq!(timer.advance(Duration::from_millis(499)), 0);
        assert_eq!(timer.advance(Duration::from_millis(1)), 1);
        assert_eq!(timer.advance(Duration::from_millis(1250)), 2);
        assert_eq!(timer.fired(), 3);
    }

    #[test]
    fn test_remainder_carries_over() {
        let mut timer = IntervalTimer::started(HALF_SECOND);
        assert_eq!(timer.advance(Duration::from_millis(300)), 0);
        assert_eq!(timer.advance(Duration::from_millis(300)), 1);
        assert_eq!(timer.advance(Duration::from_millis(400)), 1);
    }

    #[test]
    fn test_cancel_stops_ticks() {
        let mut timer = IntervalTimer::started(HALF_SECOND);
        assert_eq!(timer.advance(HALF_SECOND), 1);
        timer.cancel();
        assert!(!timer.is_armed());
        assert_eq!(timer.advance(Duration::from_secs(5)), 0);
    }

    #[test]
    fn test_restart_resets_count() {
        let mut timer = IntervalTimer::started(HALF_SECOND);
        timer.advance(Duration::from_millis(1200));
        timer.start();
        assert_eq!(timer.fired(), 0);
        assert_eq!(timer.advance(Duration::from_millis(400)), 0);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let timer = IntervalTimer::new(Duration::ZERO);
        assert_eq!(timer.interval(), MIN_INTERVAL);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Total ticks equal total elapsed time divided by the interval,
        /// regardless of how the time is split into frames.
        #[test]
        fn prop_ticks_independent_of_framing(
            interval_ms in 1u64..1000,
            frames in proptest::collection::vec(0u64..700, 1..50),
        ) {
            let mut timer = IntervalTimer::started(Duration::from_millis(interval_ms));
            let total: u64 = frames.iter().map(|&ms| timer.advance(Duration::from_millis(ms))).sum();
            let elapsed: u64 = frames.iter().sum();
            prop_assert_eq!(total, elapsed / interval_ms);
        }
    }
}
