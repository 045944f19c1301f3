//! Numeric types used for coordinates and related quantities.

use euclid::{Angle, Point2D, Size2D, Vector2D};

/// Unit-of-measure type for positions and displacements within the arena.
///
/// Arena coordinates follow the screen convention: +x points right and
/// +y points *down*.
#[expect(clippy::exhaustive_enums)]
#[derive(Debug, Eq, PartialEq)]
pub enum Arena {}

/// Continuous coordinates within the arena.
pub type FreeCoordinate = f64;

/// Positions within the arena.
pub type FreePoint = Point2D<FreeCoordinate, Arena>;

/// Displacements within the arena.
///
/// When used as a velocity, the value is the displacement applied per
/// simulation step; there is no separate time unit.
pub type FreeVector = Vector2D<FreeCoordinate, Arena>;

/// Sizes of arena-aligned objects.
pub type ArenaSize = Size2D<FreeCoordinate, Arena>;

/// Constructs a velocity vector from a direction angle and a speed.
///
/// The angle is measured clockwise from “straight up” (the −y direction,
/// since +y points down), so `Angle::degrees(0.0)` with speed `s` yields
/// `(0, -s)` and `Angle::degrees(90.0)` yields `(s, 0)`.
#[inline]
pub fn velocity_from_angle_and_speed(angle: Angle<FreeCoordinate>, speed: FreeCoordinate) -> FreeVector {
    FreeVector::new(speed * angle.radians.sin(), -speed * angle.radians.cos())
}
