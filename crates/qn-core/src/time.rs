//! Simulation time model.
//!
//! # Design
//!
//! Time is continuous: a `SimTime` wraps an `f64` number of model time
//! units.  It is advanced only by popping the next event from the scheduler,
//! so it moves in irregular jumps rather than fixed ticks.
//!
//! `SimTime` is totally ordered (via `f64::total_cmp`) so it can key a heap
//! directly.  Constructing a NaN time is a contract violation that
//! `SimClock::advance_to` rejects.

use std::cmp::Ordering;
use std::fmt;

use crate::{QnError, QnResult};

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute point in simulated time.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Time units elapsed from `earlier` to `self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.3}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The single monotonically non-decreasing clock of one simulation run.
///
/// A run owns exactly one clock; starting a new run means building a new
/// clock.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    now:     SimTime,
    horizon: SimTime,
}

impl SimClock {
    /// Create a clock at time zero that stops at `horizon`.
    pub fn new(horizon: f64) -> Self {
        Self {
            now:     SimTime::ZERO,
            horizon: SimTime(horizon),
        }
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// `true` if `t` lies strictly beyond the horizon.
    #[inline]
    pub fn is_beyond_horizon(&self, t: SimTime) -> bool {
        t > self.horizon
    }

    /// Move the clock forward to `t`.
    ///
    /// Fails with [`QnError::ContractViolation`] if `t` is NaN or earlier than
    /// the current time: the scheduler must never hand out events out of
    /// order.
    pub fn advance_to(&mut self, t: SimTime) -> QnResult<()> {
        if t.0.is_nan() || t < self.now {
            return Err(QnError::ContractViolation(format!(
                "clock moved backwards: {} -> {}",
                self.now, t
            )));
        }
        self.now = t;
        Ok(())
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.now, self.horizon)
    }
}
