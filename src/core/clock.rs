//! Clock module - fixed-step simulation time
//!
//! The render loop owns wall time; the simulation only ever sees whole fixed
//! steps. `SimClock` converts elapsed wall milliseconds into a number of
//! steps and keeps a monotonic tick counter. Ticks are strictly increasing
//! and no tick is ever re-applied.

/// Default fixed step for arcade-physics games (~60 Hz).
pub const DEFAULT_STEP_MS: u32 = 16;

/// Fixed-step accumulator clock.
#[derive(Debug, Clone)]
pub struct SimClock {
    step_ms: u32,
    accumulator_ms: u32,
    tick_count: u64,
}

impl SimClock {
    /// Create a clock with the given fixed step. A zero step is clamped to 1.
    pub fn new(step_ms: u32) -> Self {
        Self {
            step_ms: step_ms.max(1),
            accumulator_ms: 0,
            tick_count: 0,
        }
    }

    pub fn step_ms(&self) -> u32 {
        self.step_ms
    }

    /// Total number of ticks issued since construction.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Feed elapsed wall time and return how many whole fixed steps are due.
    /// The remainder stays in the accumulator for the next call.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        self.accumulator_ms = self.accumulator_ms.saturating_add(elapsed_ms);
        let steps = self.accumulator_ms / self.step_ms;
        self.accumulator_ms -= steps * self.step_ms;
        self.tick_count += steps as u64;
        steps
    }

    /// Drop any banked partial step (used on restart so a new session does
    /// not inherit leftover time from the previous one).
    pub fn reset_accumulator(&mut self) {
        self.accumulator_ms = 0;
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_MS)
    }
}
