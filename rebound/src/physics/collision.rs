//! Algorithms for collision detection between swept trajectories and
//! [`Rect`]-shaped obstacles.

use core::fmt;
use std::rc::Rc;

use arrayvec::ArrayVec;

use crate::math::{FreeCoordinate, FreePoint, FreeVector, LineSegment, NotNan, Rect, Side};
use crate::physics::Body;

/// Something a moving [`Body`] can run into.
///
/// Implemented by game objects outside the physics core; the
/// [`Environment`](crate::physics::Environment) enumerates obstacles but
/// does not own their reaction behavior.
pub trait Collidable: fmt::Debug {
    /// The obstacle's current collision boundary.
    fn rectangle(&self) -> Rect;

    /// Collision response: given the striking body, the point at which it
    /// struck, and its velocity at that moment, returns the body's new
    /// velocity.
    ///
    /// Implementations may have side effects — notifying listeners,
    /// adjusting counters, requesting deferred removal — but must always
    /// return a usable velocity, and must not mutate the environment they
    /// are registered in from within this call.
    fn hit(
        &self,
        body: &Body,
        collision_point: FreePoint,
        incoming_velocity: FreeVector,
    ) -> FreeVector;
}

/// An individual collision found along a trajectory: where, and against what.
///
/// Produced fresh by each
/// [`Environment::closest_collision`](crate::physics::Environment::closest_collision)
/// query; never cached.
#[derive(Clone, Debug)]
pub struct CollisionInfo {
    point: FreePoint,
    obstacle: Rc<dyn Collidable>,
}

impl CollisionInfo {
    pub(crate) fn new(point: FreePoint, obstacle: Rc<dyn Collidable>) -> Self {
        Self { point, obstacle }
    }

    /// The point at which the collision occurs, on the boundary of the
    /// obstacle's rectangle (within floating tolerance).
    #[inline]
    pub fn collision_point(&self) -> FreePoint {
        self.point
    }

    /// The obstacle that is struck.
    #[inline]
    pub fn obstacle(&self) -> &Rc<dyn Collidable> {
        &self.obstacle
    }
}

/// Intersects `trajectory` against all four edges of `rect` and returns the
/// intersection point closest to `trajectory.start`, together with the edge
/// that produced it; [`None`] if the trajectory misses the rectangle.
///
/// Distances are true Euclidean distances, so results are comparable across
/// rectangles of different sizes. An exact corner hit yields equidistant
/// candidates on two edges; the scan keeps the first minimum in
/// [`Side::ALL`] order, so repeated queries resolve such ties identically.
pub fn closest_rect_intersection(
    trajectory: LineSegment,
    rect: Rect,
) -> Option<(Side, FreePoint)> {
    let mut candidates: ArrayVec<(Side, FreePoint, NotNan<FreeCoordinate>), 4> = ArrayVec::new();
    for side in Side::ALL {
        if let Some(point) = trajectory.intersection(rect.edge(side)) {
            // A NaN distance can arise only from non-finite input; such a
            // candidate cannot be ranked and is skipped.
            if let Ok(distance) = NotNan::new((point - trajectory.start).length()) {
                candidates.push((side, point, distance));
            }
        }
    }
    candidates
        .into_iter()
        .min_by_key(|&(_, _, distance)| distance)
        .map(|(side, point, _)| (side, point))
}

/// Classifies which side of `rect` a collision point lies on, by minimum
/// absolute distance between the point and each of the four boundary lines.
///
/// The sides are evaluated in the order LEFT, RIGHT, TOP, BOTTOM and the
/// first minimum wins. This order differs from [`Side::ALL`] for historical
/// reasons; it is kept because changing it would change which way bodies are
/// pushed out on exact corner hits.
pub fn struck_side(point: FreePoint, rect: Rect) -> Side {
    let mut best = Side::Left;
    let mut best_distance = (point.x - rect.side_coordinate(Side::Left)).abs();
    for side in [Side::Right, Side::Top, Side::Bottom] {
        let coordinate = if side.is_vertical() { point.x } else { point.y };
        let distance = (coordinate - rect.side_coordinate(side)).abs();
        if distance < best_distance {
            best = side;
            best_distance = distance;
        }
    }
    best
}
