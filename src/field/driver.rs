/// Fixed-interval frame loop with cooperative shutdown.

use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

pub struct FrameDriver {
    interval: Duration,
}

impl FrameDriver {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Call `on_frame` once per interval until `token` is cancelled.
    ///
    /// Each callback finishes before the next one is scheduled. The loop keeps
    /// ticking regardless of what the callback chooses to do with the frame.
    /// Returns the number of frames dispatched.
    pub fn run<F>(&self, token: &CancellationToken, mut on_frame: F) -> u64
    where
        F: FnMut(Instant),
    {
        let mut frames = 0;
        while !token.is_cancelled() {
            let started = Instant::now();
            on_frame(started);
            frames += 1;

            // Sleep off the remainder of the frame budget
            if let Some(rest) = self.interval.checked_sub(started.elapsed()) {
                if !rest.is_zero() && !token.is_cancelled() {
                    std::thread::sleep(rest);
                }
            }
        }
        log::debug!("Frame loop stopped after {} frames", frames);
        frames
    }
}
