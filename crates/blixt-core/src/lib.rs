//! Core types for Blixt: the pedagogical steps, the phase that drives the
//! storm, and the scene geometry shared by the simulation and the shells.
//!
//! Everything here is static configuration or small value types. The
//! simulation and narration crates build on these without pulling in any
//! rendering or network dependencies.

/// Error types used throughout the crate.
pub mod error;
/// Points, bounds, and the fixed scene canvas.
pub mod geometry;
/// Validated step index and the motion rules it selects.
pub mod phase;
/// The five pedagogical steps and their text.
pub mod step;

/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export geometry types.
pub use geometry::{Bounds, Point};
/// Re-export phase types.
pub use phase::{MotionPhase, Phase};
/// Re-export step types.
pub use step::{STEPS, Step};
