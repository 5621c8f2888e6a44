//! Charged ice and hail particles and the per-frame motion rule.

use blixt_core::{Bounds, MotionPhase, Point};
use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Box the particles bounce around in before charges separate.
pub const CLOUD_BOX: Bounds = Bounds::new(200.0, 600.0, 100.0, 300.0);

/// Horizontal band that confines particles once charges separate.
pub const SEPARATION_BAND: Bounds = Bounds::new(220.0, 580.0, 100.0, 300.0);

/// Upward velocity added every frame during the updraft.
const UPDRAFT_LIFT: f64 = 0.05;
/// Fraction of the height error turned into vertical velocity each frame.
const SETTLE_GAIN: f64 = 0.01;
/// Velocity retained each frame while charges separate.
const FRICTION: f64 = 0.95;

/// Sign of a particle's charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Charge {
    /// Light ice crystals that end up in the top of the cloud.
    Positive,
    /// Heavy hail that sinks to the bottom of the cloud.
    Negative,
}

impl Charge {
    /// Height the particle settles at once charges separate.
    pub fn rest_height(self) -> f64 {
        match self {
            Self::Positive => 140.0,
            Self::Negative => 260.0,
        }
    }

    /// `'+'` or `'-'`.
    pub fn symbol(self) -> char {
        match self {
            Self::Positive => '+',
            Self::Negative => '-',
        }
    }
}

impl std::fmt::Display for Charge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Negative => write!(f, "negative"),
        }
    }
}

/// What the particle looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleKind {
    /// Small ice crystal.
    Ice,
    /// Larger hailstone.
    Hail,
}

impl ParticleKind {
    /// Drawn radius in scene units.
    pub fn radius(self) -> f64 {
        match self {
            Self::Ice => 6.0,
            Self::Hail => 8.0,
        }
    }
}

/// One charged particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Stable identity; even ids are positive ice, odd ids negative hail.
    pub id: usize,
    /// Current position.
    pub position: Point,
    /// Displacement per frame.
    pub velocity: Point,
    /// Charge sign.
    pub charge: Charge,
    /// Display type.
    pub kind: ParticleKind,
}

impl Particle {
    /// Create a particle whose charge and kind follow from its id.
    pub fn new(id: usize, position: Point, velocity: Point) -> Self {
        let (charge, kind) = if id % 2 == 0 {
            (Charge::Positive, ParticleKind::Ice)
        } else {
            (Charge::Negative, ParticleKind::Hail)
        };
        Self {
            id,
            position,
            velocity,
            charge,
            kind,
        }
    }

    /// Place a particle at random inside the cloud box with a random
    /// velocity in `[-1, 1)` on each axis.
    pub fn spawn(id: usize, rng: &mut StdRng) -> Self {
        let position = Point::new(
            rng.random::<f64>() * CLOUD_BOX.width() + CLOUD_BOX.min_x,
            rng.random::<f64>() * CLOUD_BOX.height() + CLOUD_BOX.min_y,
        );
        let velocity = Point::new(
            (rng.random::<f64>() - 0.5) * 2.0,
            (rng.random::<f64>() - 0.5) * 2.0,
        );
        Self::new(id, position, velocity)
    }

    /// The particle one frame later.
    ///
    /// The bounds checks and the settling force look at the tentative
    /// position (old position plus old velocity), and the committed position
    /// adds the adjusted velocity on top of that tentative position.
    pub fn advanced(&self, motion: MotionPhase) -> Particle {
        let tentative = self.position.offset(self.velocity.x, self.velocity.y);
        let mut v = self.velocity;

        match motion {
            MotionPhase::Drift | MotionPhase::Updraft => {
                if !CLOUD_BOX.contains_x(tentative.x) {
                    v.x = -v.x;
                }
                if !CLOUD_BOX.contains_y(tentative.y) {
                    v.y = -v.y;
                }
                if motion == MotionPhase::Updraft {
                    v.y -= UPDRAFT_LIFT;
                }
            }
            MotionPhase::Separation => {
                v.y += (self.charge.rest_height() - tentative.y) * SETTLE_GAIN;
                v.x *= FRICTION;
                v.y *= FRICTION;
                if !SEPARATION_BAND.contains_x(tentative.x) {
                    v.x = -v.x;
                }
            }
        }

        Particle {
            position: tentative.offset(v.x, v.y),
            velocity: v,
            ..*self
        }
    }
}

/// Advance every particle by one frame, returning the new set.
pub fn advance(particles: &[Particle], motion: MotionPhase) -> Vec<Particle> {
    particles.iter().map(|p| p.advanced(motion)).collect()
}

/// Summary of one charge group, used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChargeStats {
    /// Which group.
    pub charge: Charge,
    /// Number of particles in the group.
    pub count: usize,
    /// Mean height.
    pub mean_y: f64,
    /// Highest point (smallest y).
    pub min_y: f64,
    /// Lowest point (largest y).
    pub max_y: f64,
}

/// The fixed-size particle set owned by a storm.
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Spawn `count` particles from the given RNG.
    pub fn spawn(count: usize, rng: &mut StdRng) -> Self {
        Self {
            particles: (0..count).map(|id| Particle::spawn(id, rng)).collect(),
        }
    }

    /// Wrap an existing set of particles.
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    /// Advance every particle by one frame in place.
    pub fn advance(&mut self, motion: MotionPhase) {
        for p in &mut self.particles {
            *p = p.advanced(motion);
        }
    }

    /// All particles.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Return `true` if the field holds no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Height statistics for one charge group, or `None` if the group is empty.
    pub fn stats(&self, charge: Charge) -> Option<ChargeStats> {
        let ys: Vec<f64> = self
            .particles
            .iter()
            .filter(|p| p.charge == charge)
            .map(|p| p.position.y)
            .collect();
        if ys.is_empty() {
            return None;
        }
        Some(ChargeStats {
            charge,
            count: ys.len(),
            mean_y: ys.iter().sum::<f64>() / ys.len() as f64,
            min_y: ys.iter().copied().fold(f64::INFINITY, f64::min),
            max_y: ys.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
    }
}
