//! Frame timing.

use std::time::{Duration, Instant};

/// Measures elapsed and per-frame time.
#[derive(Debug)]
pub struct Timer {
    start: Instant,
    last_tick: Instant,
}

impl Timer {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
        }
    }

    /// Total time since the timer was created or reset.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Time since the previous `tick()`.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let delta = now - self.last_tick;
        self.last_tick = now;
        delta
    }

    pub fn reset(&mut self) {
        let now = Instant::now();
        self.start = now;
        self.last_tick = now;
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

/// Rolling frames-per-second estimate, refreshed once per `window`.
#[derive(Debug)]
pub struct FpsCounter {
    window: Duration,
    frames: u32,
    accumulated: Duration,
    fps: f32,
}

impl FpsCounter {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            frames: 0,
            accumulated: Duration::ZERO,
            fps: 0.0,
        }
    }

    /// Record one frame of length `delta`.
    ///
    /// Returns the new estimate when a full window has elapsed.
    pub fn record(&mut self, delta: Duration) -> Option<f32> {
        self.frames += 1;
        self.accumulated += delta;
        if self.accumulated < self.window {
            return None;
        }
        self.fps = self.frames as f32 / self.accumulated.as_secs_f32();
        self.frames = 0;
        self.accumulated = Duration::ZERO;
        Some(self.fps)
    }

    /// Last published estimate.
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
