//! Timer-driven lightning strikes for the final step.
//!
//! The trigger is a two-state machine, idle or struck. While the storm is on
//! its final step a repeating timer fires; each firing picks a category,
//! generates its bolt, and holds the struck state for a short flash before
//! falling back to idle on its own. Leaving the final step cancels the timer
//! and forces idle immediately.

use std::time::Duration;

use blixt_core::{Phase, Point};
use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bolt::{BoltPath, BoltSpec};

/// The kind of discharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrikeCategory {
    /// Between the negative bottom and positive top of the cloud.
    Internal,
    /// From the cloud out into the open air.
    Air,
    /// From the cloud down into the tree.
    GroundTree,
    /// From the cloud down into the house.
    GroundHouse,
}

/// Draw table: internal discharges are twice as likely as each other kind.
pub const STRIKE_TABLE: [StrikeCategory; 5] = [
    StrikeCategory::Internal,
    StrikeCategory::Internal,
    StrikeCategory::Air,
    StrikeCategory::GroundTree,
    StrikeCategory::GroundHouse,
];

impl StrikeCategory {
    /// Every category once.
    pub const ALL: [StrikeCategory; 4] = [
        StrikeCategory::Internal,
        StrikeCategory::Air,
        StrikeCategory::GroundTree,
        StrikeCategory::GroundHouse,
    ];

    /// Caption shown while and after the strike.
    pub fn label(self) -> &'static str {
        match self {
            Self::Internal => "Urladdning inuti molnet",
            Self::Air => "Lufturladdning",
            Self::GroundTree => "Blixt mot marken (träd)",
            Self::GroundHouse => "Blixt mot marken (hus)",
        }
    }

    /// Short machine name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::Air => "air",
            Self::GroundTree => "ground_tree",
            Self::GroundHouse => "ground_house",
        }
    }

    /// Opacity of the white full-scene flash.
    pub fn flash_opacity(self) -> f64 {
        match self {
            Self::Internal => 0.1,
            Self::Air => 0.05,
            Self::GroundTree | Self::GroundHouse => 0.15,
        }
    }

    /// Whether the bolt reaches the ground.
    pub fn hits_ground(self) -> bool {
        matches!(self, Self::GroundTree | Self::GroundHouse)
    }

    /// Bolt parameters; internal strikes run along the given path.
    pub fn bolt_spec(self, internal: InternalPath) -> BoltSpec {
        match self {
            Self::Internal => BoltSpec::new(internal.start, internal.end, 8, 25.0),
            Self::Air => BoltSpec::new(Point::new(500.0, 220.0), Point::new(750.0, 350.0), 8, 50.0),
            Self::GroundTree => {
                BoltSpec::new(Point::new(400.0, 250.0), Point::new(615.0, 430.0), 12, 40.0)
            }
            Self::GroundHouse => {
                BoltSpec::new(Point::new(300.0, 260.0), Point::new(170.0, 430.0), 12, 40.0)
            }
        }
    }
}

impl std::fmt::Display for StrikeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Pick a category from [`STRIKE_TABLE`].
pub fn choose_category(rng: &mut StdRng) -> StrikeCategory {
    STRIKE_TABLE[rng.random_range(0..STRIKE_TABLE.len())]
}

/// Endpoints of an internal discharge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InternalPath {
    /// Start in the negative lower region.
    pub start: Point,
    /// End in the positive upper region.
    pub end: Point,
}

impl Default for InternalPath {
    fn default() -> Self {
        Self {
            start: Point::new(350.0, 260.0),
            end: Point::new(450.0, 130.0),
        }
    }
}

impl InternalPath {
    /// Draw a path from the lower part of the cloud body to the upper part.
    pub fn random(rng: &mut StdRng) -> Self {
        Self {
            start: Point::new(
                250.0 + rng.random::<f64>() * 300.0,
                230.0 + rng.random::<f64>() * 50.0,
            ),
            end: Point::new(
                250.0 + rng.random::<f64>() * 300.0,
                120.0 + rng.random::<f64>() * 80.0,
            ),
        }
    }
}

/// One visible strike.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Strike {
    /// What kind of discharge.
    pub category: StrikeCategory,
    /// The freshly drawn path for internal strikes.
    pub internal_path: Option<InternalPath>,
    /// The polyline to draw.
    pub bolt: BoltPath,
}

/// Whether a strike is currently visible.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StrikeState {
    /// Nothing is flashing.
    #[default]
    Idle,
    /// A strike is flashing.
    Struck(Strike),
}

/// What happened while advancing the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikeTransition {
    /// The timer fired and a strike became visible.
    Fired(StrikeCategory),
    /// The flash ended.
    Cleared,
}

/// The strike state machine and its timers.
#[derive(Debug, Clone)]
pub struct StrikeTrigger {
    interval: Duration,
    flash: Duration,
    armed: bool,
    since_fire: Duration,
    flash_left: Duration,
    state: StrikeState,
    label: Option<&'static str>,
    internal_path: InternalPath,
}

impl StrikeTrigger {
    /// Create an idle, disarmed trigger. Zero durations are raised to 1 ms.
    pub fn new(interval: Duration, flash: Duration) -> Self {
        let min = Duration::from_millis(1);
        Self {
            interval: interval.max(min),
            flash: flash.max(min),
            armed: false,
            since_fire: Duration::ZERO,
            flash_left: Duration::ZERO,
            state: StrikeState::Idle,
            label: None,
            internal_path: InternalPath::default(),
        }
    }

    /// React to a phase change.
    ///
    /// Entering the final step arms the timer from zero. Any other step
    /// disarms it, clears the caption, and forces idle.
    pub fn set_phase(&mut self, phase: Phase) {
        if phase.is_final() {
            if !self.armed {
                debug!("strike timer armed");
                self.armed = true;
                self.since_fire = Duration::ZERO;
            }
        } else {
            if self.armed {
                debug!("strike timer cancelled");
            }
            self.armed = false;
            self.since_fire = Duration::ZERO;
            self.flash_left = Duration::ZERO;
            self.state = StrikeState::Idle;
            self.label = None;
        }
    }

    /// Let `elapsed` pass, firing and clearing strikes at their deadlines.
    pub fn advance(&mut self, elapsed: Duration, rng: &mut StdRng) -> Vec<StrikeTransition> {
        let mut transitions = Vec::new();
        let mut remaining = elapsed;

        while !remaining.is_zero() {
            let mut step = remaining;
            if self.is_striking() {
                step = step.min(self.flash_left);
            }
            if self.armed {
                step = step.min(self.interval - self.since_fire);
            }
            if !self.is_striking() && !self.armed {
                break;
            }

            if self.is_striking() {
                self.flash_left -= step;
                if self.flash_left.is_zero() {
                    self.state = StrikeState::Idle;
                    transitions.push(StrikeTransition::Cleared);
                }
            }
            if self.armed {
                self.since_fire += step;
                if self.since_fire >= self.interval {
                    self.since_fire = Duration::ZERO;
                    let category = self.fire(rng).category;
                    transitions.push(StrikeTransition::Fired(category));
                }
            }
            remaining -= step;
        }

        transitions
    }

    /// Fire a strike now, regardless of the timer, and return a copy of it.
    pub fn fire(&mut self, rng: &mut StdRng) -> Strike {
        let category = choose_category(rng);
        let internal_path = if category == StrikeCategory::Internal {
            self.internal_path = InternalPath::random(rng);
            Some(self.internal_path)
        } else {
            None
        };
        let bolt = category.bolt_spec(self.internal_path).generate(rng);
        debug!(%category, "strike fired");

        self.label = Some(category.label());
        self.flash_left = self.flash;
        let strike = Strike {
            category,
            internal_path,
            bolt,
        };
        self.state = StrikeState::Struck(strike.clone());
        strike
    }

    /// Current state.
    pub fn state(&self) -> &StrikeState {
        &self.state
    }

    /// The visible strike, if any.
    pub fn strike(&self) -> Option<&Strike> {
        match &self.state {
            StrikeState::Struck(strike) => Some(strike),
            StrikeState::Idle => None,
        }
    }

    /// Whether a strike is visible right now.
    pub fn is_striking(&self) -> bool {
        matches!(self.state, StrikeState::Struck(_))
    }

    /// Whether the repeating timer is running.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Caption of the most recent strike; kept after the flash until the
    /// final step is left.
    pub fn label(&self) -> Option<&'static str> {
        self.label
    }

    /// The most recently drawn internal path.
    pub fn internal_path(&self) -> InternalPath {
        self.internal_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn trigger() -> StrikeTrigger {
        StrikeTrigger::new(Duration::from_millis(2500), Duration::from_millis(150))
    }

    fn final_phase() -> Phase {
        Phase::FINAL
    }

    #[test]
    fn internal_frequency_is_two_in_five() {
        let mut rng = StdRng::seed_from_u64(42);
        let internal = (0..1000)
            .filter(|_| choose_category(&mut rng) == StrikeCategory::Internal)
            .count();
        // 400 expected, standard deviation about 15.5.
        assert!((340..=460).contains(&internal), "internal = {internal}");
    }

    #[test]
    fn timer_fires_over_1000_ticks_with_expected_mix() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut t = trigger();
        t.set_phase(final_phase());
        let mut counts = std::collections::BTreeMap::new();
        for _ in 0..1000 {
            for tr in t.advance(Duration::from_millis(2500), &mut rng) {
                if let StrikeTransition::Fired(c) = tr {
                    *counts.entry(c).or_insert(0) += 1;
                }
            }
        }
        let total: usize = counts.values().sum();
        assert_eq!(total, 1000);
        let internal = counts[&StrikeCategory::Internal];
        assert!((340..=460).contains(&internal), "internal = {internal}");
        for c in [StrikeCategory::Air, StrikeCategory::GroundTree, StrikeCategory::GroundHouse] {
            assert!((140..=260).contains(&counts[&c]), "{c} = {}", counts[&c]);
        }
    }

    #[test]
    fn non_final_phase_never_strikes() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut t = trigger();
        for i in 0..4 {
            t.set_phase(Phase::new(i).unwrap());
            let transitions = t.advance(Duration::from_secs(60), &mut rng);
            assert!(transitions.is_empty());
            assert!(!t.is_striking());
            assert!(t.label().is_none());
        }
    }

    #[test]
    fn first_strike_after_one_interval() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut t = trigger();
        t.set_phase(final_phase());
        assert!(t.advance(Duration::from_millis(2499), &mut rng).is_empty());
        let transitions = t.advance(Duration::from_millis(1), &mut rng);
        assert!(matches!(transitions.as_slice(), [StrikeTransition::Fired(_)]));
        assert!(t.is_striking());
        assert!(t.label().is_some());
    }

    #[test]
    fn flash_clears_after_150ms_and_label_stays() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut t = trigger();
        t.set_phase(final_phase());
        t.advance(Duration::from_millis(2500), &mut rng);
        assert!(t.is_striking());
        assert!(t.advance(Duration::from_millis(149), &mut rng).is_empty());
        assert!(t.is_striking());
        assert_eq!(
            t.advance(Duration::from_millis(1), &mut rng),
            vec![StrikeTransition::Cleared]
        );
        assert_eq!(t.state(), &StrikeState::Idle);
        assert!(t.label().is_some());
    }

    #[test]
    fn one_long_advance_fires_and_clears_in_order() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut t = trigger();
        t.set_phase(final_phase());
        let transitions = t.advance(Duration::from_millis(5200), &mut rng);
        assert_eq!(transitions.len(), 4);
        assert!(matches!(transitions[0], StrikeTransition::Fired(_)));
        assert_eq!(transitions[1], StrikeTransition::Cleared);
        assert!(matches!(transitions[2], StrikeTransition::Fired(_)));
        assert_eq!(transitions[3], StrikeTransition::Cleared);
    }

    #[test]
    fn leaving_final_step_resets_immediately() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut t = trigger();
        t.set_phase(final_phase());
        t.advance(Duration::from_millis(2500), &mut rng);
        assert!(t.is_striking());
        t.set_phase(Phase::new(3).unwrap());
        assert!(!t.is_striking());
        assert!(!t.is_armed());
        assert!(t.label().is_none());
        assert!(t.advance(Duration::from_secs(10), &mut rng).is_empty());
    }

    #[test]
    fn reentering_final_step_rearms_from_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut t = trigger();
        t.set_phase(final_phase());
        t.advance(Duration::from_millis(2000), &mut rng);
        t.set_phase(Phase::new(3).unwrap());
        t.set_phase(final_phase());
        assert!(t.advance(Duration::from_millis(2000), &mut rng).is_empty());
    }

    #[test]
    fn repeated_final_phase_does_not_reset_timer() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut t = trigger();
        t.set_phase(final_phase());
        t.advance(Duration::from_millis(2000), &mut rng);
        t.set_phase(final_phase());
        assert_eq!(t.advance(Duration::from_millis(500), &mut rng).len(), 1);
    }

    #[test]
    fn strike_bolt_matches_category() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut t = trigger();
        for _ in 0..50 {
            let strike = t.fire(&mut rng);
            match strike.category {
                StrikeCategory::Internal => {
                    let path = strike.internal_path.unwrap();
                    assert_eq!(strike.bolt.len(), 9);
                    assert_eq!(strike.bolt.start(), path.start);
                    assert_eq!(strike.bolt.end(), path.end);
                    assert!(path.start.y >= 230.0 && path.start.y < 280.0);
                    assert!(path.end.y >= 120.0 && path.end.y < 200.0);
                    assert!(path.start.x >= 250.0 && path.start.x < 550.0);
                }
                StrikeCategory::Air => {
                    assert!(strike.internal_path.is_none());
                    assert_eq!(strike.bolt.len(), 9);
                    assert_eq!(strike.bolt.end(), Point::new(750.0, 350.0));
                }
                StrikeCategory::GroundTree => {
                    assert_eq!(strike.bolt.len(), 13);
                    assert_eq!(strike.bolt.end(), Point::new(615.0, 430.0));
                }
                StrikeCategory::GroundHouse => {
                    assert_eq!(strike.bolt.len(), 13);
                    assert_eq!(strike.bolt.start(), Point::new(300.0, 260.0));
                }
            }
        }
    }

    #[test]
    fn category_metadata() {
        assert_eq!(StrikeCategory::GroundTree.to_string(), "ground_tree");
        assert!(StrikeCategory::GroundHouse.hits_ground());
        assert!(!StrikeCategory::Air.hits_ground());
        assert_eq!(StrikeCategory::Internal.flash_opacity(), 0.1);
        let json = serde_json::to_string(&StrikeCategory::GroundHouse).unwrap();
        assert_eq!(json, "\"ground_house\"");
    }
}
