use std::time::Duration;

use blixt_core::Phase;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::clock::FrameClock;
use crate::config::SimConfig;
use crate::error::SimResult;
use crate::event::{EventLog, StormEvent, StormEventKind};
use crate::particle::ParticleField;
use crate::strike::{InternalPath, Strike, StrikeTransition, StrikeTrigger};

/// The top-level storm.
///
/// Owns the particles, the strike trigger, the frame clock, the RNG, and the
/// event log. Particles move once per frame; the strike timer runs on the
/// same elapsed time but is not quantized to frames.
pub struct Storm {
    phase: Phase,
    particles: ParticleField,
    strikes: StrikeTrigger,
    clock: FrameClock,
    rng: StdRng,
    events: EventLog,
}

impl std::fmt::Debug for Storm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storm")
            .field("phase", &self.phase)
            .field("frame", &self.clock.frame())
            .field("particles", &self.particles.len())
            .field("striking", &self.strikes.is_striking())
            .field("events", &self.events.len())
            .finish()
    }
}

impl Storm {
    /// Create a storm on the first step.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        Self::with_phase(config, Phase::FIRST)
    }

    /// Create a storm starting on the given step.
    pub fn with_phase(config: SimConfig, phase: Phase) -> SimResult<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let particles = ParticleField::spawn(config.particle_count, &mut rng);
        let mut strikes = StrikeTrigger::new(config.strike_interval, config.flash_duration);
        strikes.set_phase(phase);
        debug!(seed = config.seed, count = config.particle_count, %phase, "storm created");
        Ok(Self {
            phase,
            particles,
            strikes,
            clock: FrameClock::new(config.frames_per_second),
            rng,
            events: EventLog::new(config.max_events),
        })
    }

    /// Move to another step. Does nothing if the step is unchanged.
    pub fn set_phase(&mut self, phase: Phase) {
        if phase == self.phase {
            return;
        }
        let from = self.phase;
        self.phase = phase;
        self.strikes.set_phase(phase);
        self.emit(
            StormEventKind::PhaseChanged { from, to: phase },
            format!("{from} -> {phase}"),
        );
    }

    /// Let real time pass: run every frame that became due and the strike
    /// timer. Returns the number of frames run.
    pub fn update(&mut self, elapsed: Duration) -> u32 {
        let due = self.clock.advance(elapsed);
        let motion = self.phase.motion();
        for _ in 0..due {
            self.particles.advance(motion);
        }
        self.advance_strikes(elapsed);
        due
    }

    /// Run exactly one frame, advancing the strike timer by one frame duration.
    pub fn step_frame(&mut self) {
        self.clock.count_frame();
        self.particles.advance(self.phase.motion());
        let frame = self.clock.frame_duration();
        self.advance_strikes(frame);
    }

    /// Run `n` frames back to back.
    pub fn run_frames(&mut self, n: u64) {
        for _ in 0..n {
            self.step_frame();
        }
    }

    fn advance_strikes(&mut self, elapsed: Duration) {
        for transition in self.strikes.advance(elapsed, &mut self.rng) {
            match transition {
                StrikeTransition::Fired(category) => self.emit(
                    StormEventKind::StrikeFired { category },
                    category.label().to_string(),
                ),
                StrikeTransition::Cleared => {
                    self.emit(StormEventKind::StrikeCleared, "flash ended")
                }
            }
        }
    }

    fn emit(&mut self, kind: StormEventKind, description: impl Into<String>) {
        self.events
            .push(StormEvent::new(self.clock.frame(), kind, description));
    }

    /// Current step.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The particle set.
    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    /// The visible strike, if any.
    pub fn strike(&self) -> Option<&Strike> {
        self.strikes.strike()
    }

    /// Whether a strike is visible right now.
    pub fn is_striking(&self) -> bool {
        self.strikes.is_striking()
    }

    /// Caption of the most recent strike on the final step.
    pub fn strike_label(&self) -> Option<&'static str> {
        self.strikes.label()
    }

    /// The most recently drawn internal path.
    pub fn internal_path(&self) -> InternalPath {
        self.strikes.internal_path()
    }

    /// Frames run so far.
    pub fn frame(&self) -> u64 {
        self.clock.frame()
    }

    /// Events recorded so far.
    pub fn events(&self) -> &EventLog {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strike::StrikeCategory;

    #[test]
    fn deterministic_rng() {
        let run = |seed| {
            let mut storm =
                Storm::with_phase(SimConfig::default().with_seed(seed), Phase::FINAL).unwrap();
            storm.run_frames(600);
            let positions: Vec<_> = storm
                .particles()
                .particles()
                .iter()
                .map(|p| p.position)
                .collect();
            let strikes = storm.events().strike_counts();
            (positions, strikes)
        };
        assert_eq!(run(123), run(123));
        assert_ne!(run(123).0, run(124).0);
    }

    #[test]
    fn update_runs_due_frames() {
        let mut storm = Storm::new(SimConfig::default().with_frames_per_second(50)).unwrap();
        assert_eq!(storm.update(Duration::from_millis(45)), 2);
        assert_eq!(storm.frame(), 2);
    }

    #[test]
    fn non_final_storm_never_strikes() {
        let mut storm = Storm::with_phase(SimConfig::default(), Phase::new(3).unwrap()).unwrap();
        for _ in 0..600 {
            storm.update(Duration::from_millis(100));
        }
        assert!(storm.events().strike_counts().is_empty());
        assert!(storm.strike_label().is_none());
    }

    #[test]
    fn final_storm_strikes_on_schedule() {
        let mut storm = Storm::with_phase(SimConfig::default(), Phase::FINAL).unwrap();
        for _ in 0..100 {
            storm.update(Duration::from_millis(100));
        }
        // 10 s at one strike per 2.5 s.
        let total: usize = storm.events().strike_counts().values().sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn leaving_final_step_clears_strike() {
        let mut storm = Storm::with_phase(SimConfig::default(), Phase::FINAL).unwrap();
        storm.update(Duration::from_millis(2500));
        assert!(storm.is_striking());
        storm.set_phase(Phase::new(2).unwrap());
        assert!(!storm.is_striking());
        assert!(storm.strike_label().is_none());
        assert!(matches!(
            storm.events().last().unwrap().kind,
            StormEventKind::PhaseChanged { .. }
        ));
    }

    #[test]
    fn phase_change_is_logged_once() {
        let mut storm = Storm::new(SimConfig::default()).unwrap();
        storm.set_phase(Phase::FIRST);
        assert!(storm.events().is_empty());
        storm.set_phase(Phase::FIRST.next());
        assert_eq!(storm.events().len(), 1);
        assert_eq!(storm.events().last().unwrap().description, "Steg 1 av 5 -> Steg 2 av 5");
    }

    #[test]
    fn charges_separate_by_height() {
        let mut storm = Storm::with_phase(SimConfig::default(), Phase::new(3).unwrap()).unwrap();
        storm.run_frames(600);
        let particles = storm.particles();
        let pos = particles.stats(crate::Charge::Positive).unwrap();
        let neg = particles.stats(crate::Charge::Negative).unwrap();
        assert!((pos.mean_y - 140.0).abs() < 5.0, "positive mean {}", pos.mean_y);
        assert!((neg.mean_y - 260.0).abs() < 5.0, "negative mean {}", neg.mean_y);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SimConfig::default().with_frames_per_second(0);
        assert!(Storm::new(config).is_err());
    }

    #[test]
    fn strike_events_carry_labels() {
        let mut storm = Storm::with_phase(SimConfig::default(), Phase::FINAL).unwrap();
        storm.update(Duration::from_millis(2500));
        let event = storm.events().last().unwrap();
        let StormEventKind::StrikeFired { category } = event.kind else {
            panic!("expected a strike, got {:?}", event.kind);
        };
        assert!(StrikeCategory::ALL.contains(&category));
        assert_eq!(event.description, category.label());
        assert_eq!(storm.strike_label(), Some(category.label()));
    }
}
