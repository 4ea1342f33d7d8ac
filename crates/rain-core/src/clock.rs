//! Frame timing

use std::time::{Duration, Instant};

/// High-resolution clock driving the time uniform
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    start: Instant,
}

impl FrameClock {
    /// Start counting from now
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Start counting from an earlier instant
    pub fn since(start: Instant) -> Self {
        Self { start }
    }

    /// Milliseconds since start, with sub-millisecond precision
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms_at(Instant::now())
    }

    /// Seconds since start, the value written to the time uniform
    pub fn elapsed_secs(&self) -> f32 {
        Self::ms_to_secs(self.elapsed_ms())
    }

    fn elapsed_ms_at(&self, now: Instant) -> f64 {
        let elapsed: Duration = now.saturating_duration_since(self.start);
        elapsed.as_secs_f64() * 1000.0
    }

    /// Convert a millisecond timestamp into uniform seconds
    pub fn ms_to_secs(ms: f64) -> f32 {
        (ms / 1000.0) as f32
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::start()
    }
}
