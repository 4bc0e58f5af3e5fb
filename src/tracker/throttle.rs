use std::time::{Duration, Instant};

/// Rate limiter with a trailing call.
///
/// The first hit in a window runs immediately. Hits inside the window
/// collapse into a single pending run, due when the window closes.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last_run: Option<Instant>,
    pending: bool,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
            pending: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Register a call at `now`. Returns whether it should run right away.
    pub fn hit(&mut self, now: Instant) -> bool {
        match self.last_run {
            Some(last) if now.saturating_duration_since(last) < self.interval => {
                self.pending = true;
                false
            }
            _ => {
                self.last_run = Some(now);
                self.pending = false;
                true
            }
        }
    }

    /// When the trailing call is due, if one is pending
    pub fn deadline(&self) -> Option<Instant> {
        match (self.pending, self.last_run) {
            (true, Some(last)) => Some(last + self.interval),
            _ => None,
        }
    }

    /// Consume the trailing call if it is due at `now`
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline() {
            Some(deadline) if now >= deadline => {
                self.pending = false;
                self.last_run = Some(now);
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
    fn test_leading_then_trailing() {
        let start = Instant::now();
        let ms = Duration::from_millis;
        let mut throttle = Throttle::new(ms(100));

        assert!(throttle.hit(start));
        assert!(!throttle.hit(start + ms(10)));
        assert!(!throttle.hit(start + ms(50)));
        assert_eq!(throttle.deadline(), Some(start + ms(100)));

        assert!(!throttle.take_due(start + ms(99)));
        assert!(throttle.take_due(start + ms(100)));
        assert!(!throttle.take_due(start + ms(300)));
        assert_eq!(throttle.deadline(), None);
    }

    #[test]
    fn test_spaced_hits_all_run() {
        let start = Instant::now();
        let mut throttle = Throttle::new(Duration::from_millis(100));
        assert!(throttle.hit(start));
        assert!(throttle.hit(start + Duration::from_millis(150)));
        assert!(throttle.deadline().is_none());
    }
}
