/// Fixed timestep accumulator plus the simulated clock the stage reads.
///
/// Behaviour probabilities and timers are expressed per tick, so the host's
/// refresh rate only changes how many ticks run per displayed frame.
pub struct FrameClock {
    /// The fixed delta time per tick, in seconds.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
    /// Ticks completed since start.
    ticks: u64,
}

/// Upper bound on catch-up ticks per host frame.
const MAX_STEPS_PER_FRAME: u32 = 10;

impl FrameClock {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            ticks: 0,
        }
    }

    /// Add host frame time (seconds). Returns the number of ticks to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if self.dt <= 0.0 || !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt;
        // Cap to prevent spiral of death after a stalled tab
        self.accumulator = self.accumulator.min(self.dt * MAX_STEPS_PER_FRAME as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Record one completed tick.
    pub fn advance(&mut self) {
        self.ticks += 1;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated milliseconds since start, derived from completed ticks.
    pub fn elapsed_ms(&self) -> f64 {
        self.ticks as f64 * self.dt as f64 * 1000.0
    }
}
