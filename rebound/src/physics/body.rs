//! The moving [`Body`] and its per-step movement algorithm.

use core::fmt;

use manyfmt::Refmt as _;

use crate::math::{FreeCoordinate, FreePoint, FreeVector, LineSegment};
use crate::physics::{struck_side, CollisionInfo, Environment, POSITION_EPSILON, PROBE_MARGIN};
use crate::util::ConciseDebug;

/// A circular moving body: a center, a radius, and a velocity.
///
/// A body is mutated only by [`Body::step`]; what it collides with is
/// determined by the [`Environment`] passed to that call.
#[derive(Clone, PartialEq)]
pub struct Body {
    center: FreePoint,
    radius: FreeCoordinate,
    velocity: FreeVector,
}

/// Error from [`Body::new`]: a body's radius must be positive.
#[derive(Clone, Copy, Debug, PartialEq, displaydoc::Display)]
#[displaydoc("body radius must be positive and finite, got {radius}")]
pub struct InvalidRadius {
    radius: FreeCoordinate,
}

impl std::error::Error for InvalidRadius {}

impl fmt::Debug for Body {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Body")
            .field("center", &self.center.refmt(&ConciseDebug))
            .field("radius", &self.radius)
            .field("velocity", &self.velocity.refmt(&ConciseDebug))
            .finish()
    }
}

impl Body {
    /// Constructs a [`Body`] at rest, reporting a non-positive or non-finite
    /// radius as an error.
    pub fn new(center: impl Into<FreePoint>, radius: FreeCoordinate) -> Result<Self, InvalidRadius> {
        // `>` is false for NaN, so this also rejects a NaN radius.
        if radius > 0.0 && radius.is_finite() {
            Ok(Self {
                center: center.into(),
                radius,
                velocity: FreeVector::zero(),
            })
        } else {
            Err(InvalidRadius { radius })
        }
    }

    /// The body's center position.
    #[inline]
    pub fn center(&self) -> FreePoint {
        self.center
    }

    /// The body's radius. Always positive.
    #[inline]
    pub fn radius(&self) -> FreeCoordinate {
        self.radius
    }

    /// The body's velocity, in arena units per step.
    #[inline]
    pub fn velocity(&self) -> FreeVector {
        self.velocity
    }

    /// Sets the body's velocity, in arena units per step.
    #[inline]
    pub fn set_velocity(&mut self, velocity: impl Into<FreeVector>) {
        self.velocity = velocity.into();
    }

    /// Advances the body one simulation step.
    ///
    /// If `environment` is [`None`] the body moves by its velocity,
    /// unobstructed. Otherwise a swept probe is traced from the body's
    /// leading edge — the point of the circle foremost along the direction
    /// of travel — extended past the step's reach by the radius plus a
    /// margin, so that a fast body cannot pass through a thin obstacle that
    /// a center-to-center segment would step over.
    ///
    /// When the probe strikes an obstacle, the body is repositioned just
    /// outside the struck side of that obstacle's rectangle (leaving its
    /// other coordinate unchanged) and its velocity is replaced by whatever
    /// the obstacle's [`hit`](crate::physics::Collidable::hit) reaction
    /// returns. The corrected position *is* the step's result; the raw
    /// displacement is not also applied.
    pub fn step(&mut self, environment: Option<&Environment>) -> BodyStepInfo {
        let speed = self.velocity.length();
        if !speed.is_finite() {
            // Nothing sensible can be computed from a non-finite velocity;
            // reset it rather than panic or poison the position.
            self.velocity = FreeVector::zero();
            return BodyStepInfo {
                quiescent: true,
                delta_position: FreeVector::zero(),
                stopped_by: None,
            };
        }
        if speed == 0.0 {
            return BodyStepInfo {
                quiescent: true,
                delta_position: FreeVector::zero(),
                stopped_by: None,
            };
        }

        let direction = self.velocity / speed;
        let probe_start = self.center + direction * self.radius;
        let probe = LineSegment::new(
            probe_start,
            probe_start + direction * (speed + self.radius + PROBE_MARGIN),
        );

        let collision = environment.and_then(|environment| environment.closest_collision(probe));
        let Some(info) = collision else {
            self.center += self.velocity;
            return BodyStepInfo {
                quiescent: false,
                delta_position: self.velocity,
                stopped_by: None,
            };
        };

        let collision_point = info.collision_point();
        let rect = info.obstacle().rectangle();
        let side = struck_side(collision_point, rect);

        // Reposition just outside the struck side; the other coordinate is
        // left as it was.
        let previous_center = self.center;
        let boundary = rect.side_coordinate(side);
        let offset = self.radius + POSITION_EPSILON;
        let normal = side.normal_vector();
        if side.is_vertical() {
            self.center.x = boundary + normal.x * offset;
        } else {
            self.center.y = boundary + normal.y * offset;
        }

        let new_velocity = info
            .obstacle()
            .hit(&*self, collision_point, self.velocity);
        self.velocity = new_velocity;

        BodyStepInfo {
            quiescent: false,
            delta_position: self.center - previous_center,
            stopped_by: Some(info),
        }
    }
}

/// Diagnostic data returned by [`Body::step`] describing what the step did.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct BodyStepInfo {
    /// Whether movement was skipped because the velocity is zero.
    pub quiescent: bool,
    /// The change in the body's center this step.
    pub delta_position: FreeVector,
    /// The collision that determined the step's outcome, or [`None`] if the
    /// body moved unobstructed.
    pub stopped_by: Option<CollisionInfo>,
}
