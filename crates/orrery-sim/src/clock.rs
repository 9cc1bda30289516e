//! Frame-driven simulated-day clock.
//!
//! Simulated time is decoupled from wall-clock time: every rendered frame
//! advances it by the same fixed number of days, however long the frame took.

/// Default simulated days per frame (one hour).
pub const DEFAULT_DAY_STEP: f64 = 1.0 / 24.0;

/// Owns the simulated day counter.
///
/// Call [`advance`](Self::advance) exactly once per frame, before computing
/// that frame's transforms.
#[derive(Clone, Debug)]
pub struct SimulationClock {
    day: f64,
    step: f64,
    frame_count: u64,
}

impl SimulationClock {
    /// Creates a clock at day 0 advancing by `step` days per frame.
    ///
    /// A step that is not a finite positive number is replaced by
    /// [`DEFAULT_DAY_STEP`], since time must only move forward.
    pub fn new(step: f64) -> Self {
        let step = if step.is_finite() && step > 0.0 {
            step
        } else {
            log::warn!("Invalid day step {step}, using {DEFAULT_DAY_STEP}");
            DEFAULT_DAY_STEP
        };
        Self {
            day: 0.0,
            step,
            frame_count: 0,
        }
    }

    /// Moves time forward by one step and returns the new day.
    pub fn advance(&mut self) -> f64 {
        self.frame_count += 1;
        // Multiply instead of accumulating so long runs do not drift.
        self.day = self.step * self.frame_count as f64;
        self.day
    }

    /// Current simulated day.
    pub fn day(&self) -> f64 {
        self.day
    }

    /// Days added per frame.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of frames advanced so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(DEFAULT_DAY_STEP)
    }
}
