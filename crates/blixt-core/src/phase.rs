//! The current position in the step sequence and what it implies for the
//! animation.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::step::{STEP_COUNT, STEPS, Step};

/// A validated, zero-based step index.
///
/// Navigation saturates at both ends instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Phase(u8);

impl Phase {
    /// The opening step.
    pub const FIRST: Phase = Phase(0);
    /// The step in which lightning strikes.
    pub const FINAL: Phase = Phase(STEP_COUNT as u8 - 1);

    /// Build a phase from a zero-based index.
    pub fn new(index: usize) -> CoreResult<Self> {
        if index < STEP_COUNT {
            Ok(Phase(index as u8))
        } else {
            Err(CoreError::InvalidStep {
                number: index + 1,
                count: STEP_COUNT,
            })
        }
    }

    /// Build a phase from the 1-based number shown to users.
    pub fn from_number(number: usize) -> CoreResult<Self> {
        match number.checked_sub(1) {
            Some(index) => Self::new(index),
            None => Err(CoreError::InvalidStep {
                number,
                count: STEP_COUNT,
            }),
        }
    }

    /// Zero-based index.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// 1-based number, as shown to users.
    pub fn number(self) -> usize {
        self.index() + 1
    }

    /// The following step, or `self` on the final step.
    pub fn next(self) -> Phase {
        Phase((self.0 + 1).min(Self::FINAL.0))
    }

    /// The preceding step, or `self` on the first step.
    pub fn prev(self) -> Phase {
        Phase(self.0.saturating_sub(1))
    }

    /// Whether this is the opening step.
    pub fn is_first(self) -> bool {
        self == Self::FIRST
    }

    /// Whether this is the step in which lightning strikes.
    pub fn is_final(self) -> bool {
        self == Self::FINAL
    }

    /// Text for this step.
    pub fn step(self) -> &'static Step {
        &STEPS[self.index()]
    }

    /// Every phase in order.
    pub fn all() -> impl Iterator<Item = Phase> {
        (0..STEP_COUNT as u8).map(Phase)
    }

    /// Which particle rule applies in this phase.
    ///
    /// The first two steps share the free-drift rule, the third step adds the
    /// updraft, and from the fourth step on particles separate by charge.
    pub fn motion(self) -> MotionPhase {
        match self.0 {
            0 | 1 => MotionPhase::Drift,
            2 => MotionPhase::Updraft,
            _ => MotionPhase::Separation,
        }
    }

    /// The dashed 0°C line across the cloud.
    pub fn shows_freezing_line(self) -> bool {
        self.0 <= 1
    }

    /// The warm-air arrows under the cloud.
    pub fn shows_updraft(self) -> bool {
        self.0 == 1
    }

    /// Darkened cloud body and positive charges on the ground.
    pub fn is_charged(self) -> bool {
        self.0 >= 3
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Steg {} av {}", self.number(), STEP_COUNT)
    }
}

/// The particle engine's rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionPhase {
    /// Particles bounce freely inside the cloud box.
    Drift,
    /// Free bouncing plus a constant upward push.
    Updraft,
    /// Particles settle at a height set by their charge.
    Separation,
}

impl MotionPhase {
    /// Whether particles are drawn with their charge colour and sign.
    pub fn shows_charge(self) -> bool {
        self == MotionPhase::Separation
    }
}
