/// Trailing-edge debounce driven by explicit timestamps.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Record an event. Each call pushes the deadline out again.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Returns true once, when the last event of a burst has aged past the delay.
    pub fn poll(&mut self, now: Instant) -> bool {
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

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_once_after_delay() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(250));
        assert!(!d.poll(t0));

        d.trigger(t0);
        assert!(!d.poll(t0 + ms(249)));
        assert!(d.poll(t0 + ms(250)));
        assert!(!d.poll(t0 + ms(500)));
    }

    #[test]
    fn test_burst_coalesces_to_last_event() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(250));
        d.trigger(t0);
        d.trigger(t0 + ms(100));
        d.trigger(t0 + ms(200));

        // 250ms after the first event, but only 50ms after the last
        assert!(!d.poll(t0 + ms(250)));
        assert!(!d.poll(t0 + ms(449)));
        assert!(d.poll(t0 + ms(450)));
    }
}
