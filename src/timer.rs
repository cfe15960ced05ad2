//! Wall-clock timer used for the final runtime report.

use std::time::Instant;

pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Records the start timestamp.
    pub fn start() -> Self {
        log::trace!("timer started");
        Timer {
            start: Instant::now(),
        }
    }

    /// Milliseconds since `start`.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}
