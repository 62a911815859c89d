use std::time::{Duration, Instant};

/// One-shot deadline polled from the UI loop.
///
/// A timer never runs code on its own: the owner calls [`Timer::fire`] on
/// each tick. Dropping the owner drops any pending deadline with it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    deadline: Option<Instant>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the timer to fire `after` from `now`.
    pub fn schedule(&mut self, now: Instant, after: Duration) {
        self.deadline = Some(now + after);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns true exactly once when the deadline has passed, then disarms.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_deadline() {
        let now = Instant::now();
        let mut timer = Timer::new();
        timer.schedule(now, Duration::from_millis(100));

        assert!(!timer.fire(now + Duration::from_millis(99)));
        assert!(timer.fire(now + Duration::from_millis(100)));
        assert!(!timer.fire(now + Duration::from_millis(200)));
        assert_eq!(timer, Timer::new());
    }

    #[test]
    fn test_cancel() {
        let now = Instant::now();
        let mut timer = Timer::new();
        timer.schedule(now, Duration::from_millis(10));
        timer.cancel();
        assert!(!timer.fire(now + Duration::from_secs(1)));
    }

    #[test]
    fn test_reschedule_moves_deadline() {
        let now = Instant::now();
        let mut timer = Timer::new();
        timer.schedule(now, Duration::from_millis(100));
        timer.schedule(now + Duration::from_millis(50), Duration::from_millis(100));

        assert!(!timer.fire(now + Duration::from_millis(149)));
        assert!(timer.fire(now + Duration::from_millis(150)));
    }
}
