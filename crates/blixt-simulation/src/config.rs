use std::time::Duration;

use crate::error::{SimError, SimResult};

/// Configuration for a storm.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for deterministic placement, bolts, and strikes.
    pub seed: u64,
    /// Number of particles in the cloud.
    pub particle_count: usize,
    /// Animation frames per second of real time.
    pub frames_per_second: u32,
    /// Time between strikes on the final step.
    pub strike_interval: Duration,
    /// How long a strike stays visible.
    pub flash_duration: Duration,
    /// Maximum event log size (oldest events dropped when exceeded). 0 = unlimited.
    pub max_events: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            particle_count: 45,
            frames_per_second: 60,
            strike_interval: Duration::from_millis(2500),
            flash_duration: Duration::from_millis(150),
            max_events: 0,
        }
    }
}

impl SimConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// Set the animation frame rate.
    pub fn with_frames_per_second(mut self, fps: u32) -> Self {
        self.frames_per_second = fps;
        self
    }

    /// Set the time between strikes.
    pub fn with_strike_interval(mut self, interval: Duration) -> Self {
        self.strike_interval = interval;
        self
    }

    /// Set how long a strike stays visible.
    pub fn with_flash_duration(mut self, flash: Duration) -> Self {
        self.flash_duration = flash;
        self
    }

    /// Set the maximum event log size (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }

    /// Reject settings the storm cannot run with.
    pub fn validate(&self) -> SimResult<()> {
        if self.frames_per_second == 0 {
            return Err(SimError::InvalidConfig(
                "frames_per_second must be positive".into(),
            ));
        }
        if self.strike_interval.is_zero() {
            return Err(SimError::InvalidConfig(
                "strike_interval must be positive".into(),
            ));
        }
        if self.flash_duration.is_zero() {
            return Err(SimError::InvalidConfig(
                "flash_duration must be positive".into(),
            ));
        }
        Ok(())
    }
}
