//! The obstacle registry and closest-collision queries: the
//! [`Environment`] type.

use core::fmt;
use std::rc::Rc;

use crate::math::{FreeCoordinate, LineSegment, NotNan};
use crate::physics::{closest_rect_intersection, Collidable, CollisionInfo, BOUNDARY_EPSILON};

/// The set of obstacles a moving [`Body`](crate::physics::Body) can collide
/// with.
///
/// Obstacles are enumerated in insertion order and all queries resolve
/// equal-distance ties toward the earliest-added obstacle, so the iteration
/// order is part of the determinism contract rather than an accident.
///
/// Mutating the set during a query is statically impossible:
/// [`closest_collision`](Self::closest_collision) borrows `&self`, while
/// [`add`](Self::add) and [`remove`](Self::remove) require `&mut self`.
/// Reactions that want to remove obstacles must therefore defer the removal
/// (see [`game::RemovalQueue`](crate::game::RemovalQueue)).
#[derive(Default)]
pub struct Environment {
    collidables: Vec<Rc<dyn Collidable>>,
}

impl Environment {
    /// Creates a new environment containing no obstacles.
    #[inline]
    pub fn new() -> Self {
        Self {
            collidables: Vec::new(),
        }
    }

    /// Adds an obstacle to the environment.
    #[inline]
    pub fn add(&mut self, collidable: Rc<dyn Collidable>) {
        self.collidables.push(collidable);
    }

    /// Removes an obstacle from the environment, comparing by identity
    /// ([`Rc::ptr_eq`]). Removing an obstacle that is not present is a
    /// no-op, so callers may remove speculatively (e.g. when draining a
    /// queue that might name the same obstacle twice).
    pub fn remove(&mut self, collidable: &Rc<dyn Collidable>) {
        match self
            .collidables
            .iter()
            .position(|c| Rc::ptr_eq(c, collidable))
        {
            Some(index) => {
                self.collidables.remove(index);
            }
            None => log::trace!("remove() of an obstacle that is not present; ignored"),
        }
    }

    /// The number of obstacles currently registered.
    #[inline]
    pub fn len(&self) -> usize {
        self.collidables.len()
    }

    /// Whether no obstacles are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.collidables.is_empty()
    }

    /// Assume an object moving along `trajectory` from start to end. If it
    /// would not collide with any registered obstacle, returns [`None`];
    /// otherwise returns the collision whose point is closest to
    /// `trajectory.start`.
    ///
    /// If the trajectory *starts* flush against an obstacle's boundary
    /// (within a small tolerance) but its forward segment does not re-cross
    /// that boundary, the start point itself counts as the collision.
    /// Without this, a body resting exactly on a surface could slip through
    /// it on its next step.
    pub fn closest_collision(&self, trajectory: LineSegment) -> Option<CollisionInfo> {
        let mut closest: Option<(NotNan<FreeCoordinate>, CollisionInfo)> = None;

        for collidable in &self.collidables {
            let rect = collidable.rectangle();
            let intersection = closest_rect_intersection(trajectory, rect)
                .map(|(_, point)| point)
                .or_else(|| {
                    rect.on_boundary(trajectory.start, BOUNDARY_EPSILON)
                        .then_some(trajectory.start)
                });
            let Some(point) = intersection else {
                continue;
            };
            let Ok(distance) = NotNan::new((point - trajectory.start).length()) else {
                continue;
            };
            // Strict `<`, so the earliest-added obstacle wins ties.
            if closest.as_ref().is_none_or(|&(best, _)| distance < best) {
                closest = Some((distance, CollisionInfo::new(point, Rc::clone(collidable))));
            }
        }

        closest.map(|(_, info)| info)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("collidables", &self.collidables)
            .finish()
    }
}
