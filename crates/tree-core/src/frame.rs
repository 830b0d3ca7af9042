//! Per-frame context handed to every update.

use crate::mode::Mode;
use instant::Instant;

/// Snapshot of time and mode for one frame. Groups read the mode from here
/// rather than from shared state.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput {
    /// Seconds since the previous frame.
    pub delta: f32,
    /// Seconds since the clock started.
    pub elapsed: f32,
    pub mode: Mode,
}

impl FrameInput {
    pub fn new(delta: f32, elapsed: f32, mode: Mode) -> Self {
        Self {
            delta,
            elapsed,
            mode,
        }
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.mode.target()
    }
}

/// Wall clock producing `FrameInput`s for the render loop.
pub struct FrameClock {
    start: Instant,
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
        }
    }

    pub fn tick(&mut self, mode: Mode) -> FrameInput {
        let now = Instant::now();
        let delta = (now - self.last).as_secs_f32();
        self.last = now;
        FrameInput::new(delta, (now - self.start).as_secs_f32(), mode)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-step clock for simulations and tests.
#[derive(Clone, Debug)]
pub struct SteppedClock {
    step: f32,
    elapsed: f32,
}

impl SteppedClock {
    pub fn new(step: f32) -> Self {
        Self { step, elapsed: 0.0 }
    }

    pub fn tick(&mut self, mode: Mode) -> FrameInput {
        self.elapsed += self.step;
        FrameInput::new(self.step, self.elapsed, mode)
    }
}
