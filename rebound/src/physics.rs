//! Continuously moving bodies and their collisions with static obstacles.

use crate::math::FreeCoordinate;

mod body;
pub use body::*;
mod collision;
pub use collision::*;
mod environment;
pub use environment::*;

#[cfg(test)]
mod tests;

/// Corrected bodies are placed this far outside the surface they struck, so
/// that the next step's query does not immediately re-detect the same
/// collision.
pub(crate) const POSITION_EPSILON: FreeCoordinate = 0.01;

/// Tolerance for deciding that a trajectory starts flush against a rectangle
/// boundary (“already touching”).
pub(crate) const BOUNDARY_EPSILON: FreeCoordinate = 1e-6;

/// A body's swept probe extends this far beyond `speed + radius`, so that
/// thin obstacles and corners just past the step's reach are still seen.
pub(crate) const PROBE_MARGIN: FreeCoordinate = 0.5;
