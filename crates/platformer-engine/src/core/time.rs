/// Clock reading for one simulation step.
///
/// Sampled once per step and passed down to every timer comparison, so all
/// systems in a step agree on "now".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Seconds since the clock started (monotonic).
    pub now: f64,
    /// Seconds covered by this step.
    pub dt: f32,
}

impl FrameTime {
    pub fn new(now: f64, dt: f32) -> Self {
        Self { now, dt }
    }

    /// Seconds elapsed since `earlier`, as seen from this step.
    pub fn since(&self, earlier: f64) -> f64 {
        self.now - earlier
    }
}

/// Monotonic simulation clock, advanced explicitly by the frame loop.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    now: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { now: 0.0 }
    }

    /// Advance by `dt` seconds and return the sample for this step.
    /// Negative deltas are treated as zero so the clock never runs backwards.
    pub fn advance(&mut self, dt: f32) -> FrameTime {
        let dt = dt.max(0.0);
        self.now += dt as f64;
        FrameTime::new(self.now, dt)
    }

    pub fn now(&self) -> f64 {
        self.now
    }
}

/// Fixed timestep accumulator.
/// Turns variable display-callback deltas into a whole number of fixed steps.
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    /// Upper bound on steps per callback (prevents the spiral of death after a stall).
    pub const MAX_STEPS: u32 = 10;

    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        self.accumulator = self.accumulator.min(self.dt * Self::MAX_STEPS as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Interpolation alpha for rendering between steps (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_accumulates_steps() {
        let mut clock = FrameClock::new();
        let a = clock.advance(0.25);
        let b = clock.advance(0.5);
        assert!((a.now - 0.25).abs() < 1e-9);
        assert!((b.now - 0.75).abs() < 1e-9);
        assert_eq!(b.dt, 0.5);
        assert!((b.since(a.now) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn clock_ignores_negative_delta() {
        let mut clock = FrameClock::new();
        clock.advance(1.0);
        let t = clock.advance(-0.5);
        assert_eq!(t.dt, 0.0);
        assert!((clock.now() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(0.008), 0);
        assert_eq!(ts.accumulate(0.010), 1);
    }

    #[test]
    fn caps_steps_after_stall() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0), FixedTimestep::MAX_STEPS);
    }

    #[test]
    fn alpha_is_between_zero_and_one() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        ts.accumulate(0.008);
        let a = ts.alpha();
        assert!((0.0..=1.0).contains(&a), "alpha was {}", a);
    }
}
