use std::time::{Duration, Instant};

use crate::player::time::MediaTime;
use crate::player::timer::PollTimer;
use crate::player::traits::{ObserverHandle, ObserverList, TimeCallback};

/// Time observers that each fire on their own interval.
#[derive(Default)]
pub struct PeriodicObservers {
    list: ObserverList<(PollTimer, TimeCallback)>,
}

impl PeriodicObservers {
    pub fn insert(
        &mut self,
        interval: Duration,
        callback: TimeCallback,
        now: Instant,
    ) -> ObserverHandle {
        self.list.insert((PollTimer::new(interval, now), callback))
    }

    pub fn remove(&mut self, handle: ObserverHandle) -> bool {
        self.list.remove(handle)
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.list.iter().map(|(timer, _)| timer.deadline()).min()
    }

    /// Invokes, in registration order, every observer due at `now`.
    pub fn fire_due(&mut self, now: Instant, position: MediaTime) -> usize {
        let mut fired = 0;
        for (timer, callback) in self.list.iter_mut() {
            if timer.fire(now) {
                callback(position);
                fired += 1;
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_each_observer_keeps_its_interval() {
        let start = Instant::now();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut observers = PeriodicObservers::default();

        let fast = seen.clone();
        observers.insert(
            Duration::from_millis(100),
            Box::new(move |_| fast.borrow_mut().push("fast")),
            start,
        );
        let slow = seen.clone();
        observers.insert(
            Duration::from_millis(250),
            Box::new(move |_| slow.borrow_mut().push("slow")),
            start,
        );

        assert_eq!(
            observers.next_deadline(),
            Some(start + Duration::from_millis(100))
        );
        for ms in [100, 200, 250, 300] {
            observers.fire_due(start + Duration::from_millis(ms), MediaTime::ZERO);
        }
        assert_eq!(*seen.borrow(), vec!["fast", "fast", "slow", "fast"]);
    }

    #[test]
    fn test_removed_observer_stops_firing() {
        let start = Instant::now();
        let mut observers = PeriodicObservers::default();
        let handle = observers.insert(Duration::from_millis(10), Box::new(|_| {}), start);

        assert!(observers.remove(handle));
        assert!(observers.is_empty());
        assert_eq!(observers.next_deadline(), None);
        assert_eq!(
            observers.fire_due(start + Duration::from_secs(1), MediaTime::ZERO),
            0
        );
    }
}
