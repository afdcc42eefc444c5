//! Simulation time model.
//!
//! # Design
//!
//! Time is an absolute, signed step counter.  Ticks are scheduled as
//! `now + delay` and persisted as `trigger_step - save_step`, so all
//! arithmetic is exact integer math and comparisons are O(1).
//!
//! `Step` is signed because delays relative to a save point may be negative
//! (a tick that was overdue when its chunk unloaded).

use std::fmt;

use crate::{TickError, TickResult};

// ── Step ─────────────────────────────────────────────────────────────────────

/// An absolute simulation step.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step(pub i64);

impl Step {
    pub const ZERO: Step = Step(0);

    /// Return the step `n` after `self` (`n` may be negative).
    #[inline]
    pub fn offset(self, n: i64) -> Step {
        Step(self.0 + n)
    }

    /// The following step.
    #[inline]
    pub fn next(self) -> Step {
        Step(self.0 + 1)
    }
}

impl std::ops::Add<i64> for Step {
    type Output = Step;
    #[inline]
    fn add(self, rhs: i64) -> Step {
        Step(self.0 + rhs)
    }
}

impl std::ops::Sub for Step {
    type Output = i64;
    #[inline]
    fn sub(self, rhs: Step) -> i64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

// ── TickConfig ────────────────────────────────────────────────────────────────

/// Scheduler tuning shared by the host simulation.
///
/// Typically loaded from a TOML/JSON file by the application crate (with the
/// `serde` feature) and consulted once per cycle for the tick budget.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TickConfig {
    /// Upper bound on ticks run per cycle.  Default: 65,536.
    pub max_ticks_per_cycle: usize,
}

impl TickConfig {
    pub const DEFAULT_MAX_TICKS_PER_CYCLE: usize = 65_536;

    /// Reject configurations the scheduler cannot make progress with.
    pub fn validate(&self) -> TickResult<()> {
        if self.max_ticks_per_cycle == 0 {
            return Err(TickError::Config(
                "max_ticks_per_cycle must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            max_ticks_per_cycle: Self::DEFAULT_MAX_TICKS_PER_CYCLE,
        }
    }
}
