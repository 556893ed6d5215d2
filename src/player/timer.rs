use std::time::{Duration, Instant};

/// A repeating deadline, driven by whoever owns the event loop.
///
/// Missed ticks are skipped rather than replayed, so a stalled loop
/// produces one catch-up tick instead of a burst.
#[derive(Debug, Clone)]
pub struct PollTimer {
    interval: Duration,
    next_fire: Instant,
}

impl PollTimer {
    /// First fire is one `interval` after `now`.
    pub fn new(interval: Duration, now: Instant) -> Self {
        let interval = interval.max(Duration::from_millis(1));
        Self {
            interval,
            next_fire: now + interval,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.next_fire
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_fire
    }

    /// Returns true (and re-arms) if the timer was due at `now`.
    pub fn fire(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.next_fire += self.interval;
        if self.next_fire <= now {
            self.next_fire = now + self.interval;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_on_cadence() {
        let start = Instant::now();
        let mut timer = PollTimer::new(Duration::from_millis(100), start);

        assert!(!timer.fire(start + Duration::from_millis(50)));
        assert!(timer.fire(start + Duration::from_millis(100)));
        assert_eq!(timer.deadline(), start + Duration::from_millis(200));
    }

    #[test]
    fn test_skips_missed_ticks() {
        let start = Instant::now();
        let mut timer = PollTimer::new(Duration::from_millis(100), start);
        let late = start + Duration::from_millis(1050);

        assert!(timer.fire(late));
        assert!(!timer.fire(late));
        assert_eq!(timer.deadline(), late + Duration::from_millis(100));
    }
}
