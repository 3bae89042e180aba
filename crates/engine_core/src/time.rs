//! Time management for the game loop.

use std::time::{Duration, Instant};

/// Per-tick time source consumed by simulation systems.
///
/// Both values are read once at the start of a tick and stay fixed until the
/// caller advances the clock again.
pub trait Clock {
    /// Length of the current frame in seconds.
    fn delta_seconds(&self) -> f32;
    /// Monotonic time since the clock started, in seconds.
    fn elapsed_seconds(&self) -> f32;
}

/// Manages frame timing and delta time calculation.
#[derive(Debug)]
pub struct Time {
    /// Time when the engine started.
    start_time: Instant,
    /// Time of the last frame.
    last_frame: Instant,
    /// Duration of the last frame.
    delta: Duration,
    /// Total elapsed time since start.
    elapsed: Duration,
    /// Frame count since start.
    frame_count: u64,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a new time manager.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_frame: now,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Update timing at the start of a new frame.
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta = now - self.last_frame;
        self.last_frame = now;
        self.elapsed = now - self.start_time;
        self.frame_count += 1;
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the current FPS (averaged over last frame).
    pub fn fps(&self) -> f32 {
        if self.delta.as_secs_f32() > 0.0 {
            1.0 / self.delta.as_secs_f32()
        } else {
            0.0
        }
    }
}

impl Clock for Time {
    fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}

/// Deterministic clock advanced by hand.
///
/// Used by replays, benchmarks and tests where wall-clock jitter would make
/// expiry timing unreproducible.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ManualClock {
    delta: f32,
    elapsed: f32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step forward by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.delta = dt;
        self.elapsed += dt;
    }

    /// Jump to an absolute time. The delta becomes the distance travelled.
    pub fn set_elapsed(&mut self, elapsed: f32) {
        self.delta = elapsed - self.elapsed;
        self.elapsed = elapsed;
    }
}

impl Clock for ManualClock {
    fn delta_seconds(&self) -> f32 {
        self.delta
    }

    fn elapsed_seconds(&self) -> f32 {
        self.elapsed
    }
}
