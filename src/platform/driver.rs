//! Frame-to-tick driver
//!
//! Display frames arrive at whatever rate the browser likes; the engine wants
//! one tick per interval. The driver accumulates elapsed time and hands out
//! ticks, capped per frame so a long stall can't trigger a burst.

use crate::consts::{MAX_FRAME_DELTA_MS, MAX_TICKS_PER_FRAME};

#[derive(Debug, Clone, Default)]
pub struct TickDriver {
    accumulator_ms: f64,
    last_frame_ms: Option<f64>,
    ticks_this_frame: u32,
}

impl TickDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a display frame at `now_ms`.
    ///
    /// When the game isn't running the driver stops: time is discarded so
    /// resuming doesn't replay the paused interval.
    pub fn begin_frame(&mut self, now_ms: f64, running: bool) {
        let delta = self
            .last_frame_ms
            .map(|last| (now_ms - last).clamp(0.0, MAX_FRAME_DELTA_MS))
            .unwrap_or(0.0);
        self.last_frame_ms = Some(now_ms);
        self.ticks_this_frame = 0;

        if running {
            self.accumulator_ms += delta;
        } else {
            self.accumulator_ms = 0.0;
        }
    }

    /// Consume one tick worth of time if available
    pub fn take_tick(&mut self, interval_ms: f64) -> bool {
        if interval_ms <= 0.0
            || self.ticks_this_frame >= MAX_TICKS_PER_FRAME
            || self.accumulator_ms < interval_ms
        {
            return false;
        }
        self.accumulator_ms -= interval_ms;
        self.ticks_this_frame += 1;
        true
    }

    /// Forget all timing (new run, menu)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fraction of the way to the next tick (0..1), for render interpolation
    pub fn alpha(&self, interval_ms: f64) -> f32 {
        if interval_ms <= 0.0 {
            return 0.0;
        }
        (self.accumulator_ms / interval_ms).clamp(0.0, 1.0) as f32
    }
}
