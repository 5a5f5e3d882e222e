// Zoom debounce and the clock it reads

use std::time::{Duration, Instant};

/// Source of the current time for the loop
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock backed by `Instant::now`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Minimum-interval gate for one action class.
///
/// One instance is shared by zoom-in and zoom-out, so alternating directions
/// are throttled together.
#[derive(Debug, Clone)]
pub struct Debouncer {
    interval: Duration,
    last_fired: Option<Instant>,
}

impl Debouncer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fired: None,
        }
    }

    /// Fire if more than `interval` has passed since the last firing.
    /// Records `now` on success.
    pub fn try_fire(&mut self, now: Instant) -> bool {
        if !self.is_ready(now) {
            return false;
        }
        self.last_fired = Some(now);
        true
    }

    pub fn is_ready(&self, now: Instant) -> bool {
        match self.last_fired {
            None => true,
            Some(last) => now.saturating_duration_since(last) > self.interval,
        }
    }

    pub fn last_fired(&self) -> Option<Instant> {
        self.last_fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALF_SECOND: Duration = Duration::from_millis(500);

    #[test]
    fn test_first_candidate_fires() {
        let mut debouncer = Debouncer::new(HALF_SECOND);
        let now = Instant::now();
        assert!(debouncer.try_fire(now));
        assert_eq!(debouncer.last_fired(), Some(now));
    }

    #[test]
    fn test_candidate_inside_window_is_suppressed() {
        let mut debouncer = Debouncer::new(HALF_SECOND);
        let start = Instant::now();
        assert!(debouncer.try_fire(start));

        assert!(!debouncer.try_fire(start + Duration::from_millis(100)));
        assert!(!debouncer.try_fire(start + Duration::from_millis(499)));
        // A suppressed candidate does not move the window
        assert_eq!(debouncer.last_fired(), Some(start));
    }

    #[test]
    fn test_window_boundary_is_exclusive() {
        let mut debouncer = Debouncer::new(HALF_SECOND);
        let start = Instant::now();
        assert!(debouncer.try_fire(start));

        assert!(!debouncer.try_fire(start + HALF_SECOND));
        assert!(debouncer.try_fire(start + HALF_SECOND + Duration::from_millis(1)));
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
