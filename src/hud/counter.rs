/// Count-up number display used by the HUD overlay.

use crate::core::config;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Counter {
    target: f64,
    decimals: usize,
    prefix: String,
    suffix: String,
    duration: Duration,
    started: Option<Instant>,
}

impl Counter {
    /// `target` is the text form of the final value. It keeps one decimal place
    /// if written with a '.', and counts to 0 if it does not parse.
    pub fn new(target: &str, prefix: &str, suffix: &str) -> Self {
        Self {
            target: target.trim().parse().unwrap_or(0.0),
            decimals: if target.contains('.') { 1 } else { 0 },
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            duration: Duration::from_secs_f64(config::COUNTER_DURATION_MS / 1000.0),
            started: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.started = Some(now);
    }

    /// Linear progress in 0.0..=1.0; 0 before `start`.
    pub fn progress(&self, now: Instant) -> f64 {
        let Some(started) = self.started else {
            return 0.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn text(&self, now: Instant) -> String {
        let value = self.target * self.progress(now);
        format!(
            "{}{:.*}{}",
            self.prefix, self.decimals, value, self.suffix
        )
    }
}
