//! Frame-based storm simulation for Blixt.
//!
//! The storm owns a fixed set of charged particles, a strike trigger, a
//! fixed-timestep frame clock, and a seeded RNG. Nothing here knows about
//! rendering: shells call [`Storm::update`] with real elapsed time and read
//! the resulting state back.

/// Randomized lightning polylines.
pub mod bolt;
/// Fixed-timestep frame clock.
pub mod clock;
/// Configuration types for a storm.
pub mod config;
/// Error types for the simulation crate.
pub mod error;
/// Storm event types and the event log.
pub mod event;
/// Charged particles and the per-frame motion rule.
pub mod particle;
/// Top-level storm orchestrator.
pub mod simulation;
/// Timer-driven strike state machine.
pub mod strike;

/// Re-exports of [`bolt::BoltPath`] and [`bolt::BoltSpec`].
pub use bolt::{BoltPath, BoltSpec};
/// Re-export of [`clock::FrameClock`].
pub use clock::FrameClock;
/// Re-export of [`config::SimConfig`].
pub use config::SimConfig;
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of [`event::EventLog`], [`event::StormEvent`], and [`event::StormEventKind`].
pub use event::{EventLog, StormEvent, StormEventKind};
/// Re-exports of the particle types.
pub use particle::{Charge, Particle, ParticleField, ParticleKind};
/// Re-export of [`simulation::Storm`].
pub use simulation::Storm;
/// Re-exports of the strike types.
pub use strike::{InternalPath, Strike, StrikeCategory, StrikeState, StrikeTrigger};
