/// Upper bound on fixed steps per frame, so a long stall cannot snowball.
pub const MAX_STEPS_PER_FRAME: u32 = 10;

/// Fixed timestep accumulator.
/// Turns variable frame times into a whole number of fixed ticks.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        self.accumulator = self.accumulator.min(self.dt * MAX_STEPS_PER_FRAME as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Drop any partially accumulated time.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}
