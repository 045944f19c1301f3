//! Concrete obstacle kinds: the static [`Block`] and the player-driven
//! [`Paddle`], plus the [`HitEvent`] they report to listeners.

use core::fmt;
use std::cell::Cell;

use euclid::Angle;
use manyfmt::Refmt as _;

use crate::listen::{Listener, Notifier};
use crate::math::{
    velocity_from_angle_and_speed, FreeCoordinate, FreePoint, FreeVector, Rect, Side,
};
use crate::physics::{Body, Collidable, BOUNDARY_EPSILON};
use crate::util::ConciseDebug;

/// Description of a single collision, delivered to the listeners registered
/// on the [`Block`] that was struck.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub struct HitEvent {
    /// Where on the block's boundary the body struck.
    pub collision_point: FreePoint,
    /// The body's velocity at the moment of impact, before reflection.
    pub incoming_velocity: FreeVector,
}

/// A static rectangular obstacle which reflects bodies that strike it and
/// reports each hit to its registered listeners.
///
/// One type serves every static role in an arena — border walls (no
/// listeners), scoring bricks (score and removal listeners), drain regions
/// (ball-accounting listeners) — the differences are entirely in the
/// listener wiring. See [`crate::game`] for ready-made listeners.
pub struct Block {
    rect: Rect,
    hit_notifier: Notifier<HitEvent>,
}

impl Block {
    /// Constructs a [`Block`] occupying the given rectangle, with no
    /// listeners.
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            hit_notifier: Notifier::new(),
        }
    }

    /// Registers a listener to be informed of each hit on this block.
    ///
    /// Listeners are invoked synchronously, after the reflected velocity has
    /// been computed; they must aggregate into their own state rather than
    /// mutate the environment (see [`crate::listen`]).
    pub fn listen(&self, listener: impl Listener<HitEvent> + 'static) {
        self.hit_notifier.listen(listener);
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("rect", &self.rect)
            .field("hit_notifier", &self.hit_notifier)
            .finish()
    }
}

impl Collidable for Block {
    fn rectangle(&self) -> Rect {
        self.rect
    }

    fn hit(
        &self,
        _body: &Body,
        collision_point: FreePoint,
        incoming_velocity: FreeVector,
    ) -> FreeVector {
        let on = |side: Side, coordinate: FreeCoordinate| {
            (coordinate - self.rect.side_coordinate(side)).abs() <= BOUNDARY_EPSILON
        };

        // Reflect the component perpendicular to whichever edge(s) contain
        // the collision point; an exact corner hit reflects both.
        let mut velocity = incoming_velocity;
        if on(Side::Left, collision_point.x) || on(Side::Right, collision_point.x) {
            velocity.x = -velocity.x;
        }
        if on(Side::Top, collision_point.y) || on(Side::Bottom, collision_point.y) {
            velocity.y = -velocity.y;
        }

        self.hit_notifier.notify(HitEvent {
            collision_point,
            incoming_velocity,
        });

        velocity
    }
}

/// Returns a listener which logs each [`HitEvent`] at debug level, tagged
/// with `label`. Useful when diagnosing listener wiring.
pub fn log_hits(label: &'static str) -> impl Listener<HitEvent> {
    struct LogHits {
        label: &'static str,
    }
    impl Listener<HitEvent> for LogHits {
        fn receive(&self, message: HitEvent) {
            log::debug!(
                "{}: hit at {} moving {}",
                self.label,
                message.collision_point.refmt(&ConciseDebug),
                message.incoming_velocity.refmt(&ConciseDebug),
            );
        }
        fn alive(&self) -> bool {
            true
        }
    }
    LogHits { label }
}

/// Rebound directions per paddle zone, in degrees clockwise from straight
/// up. The middle zone instead reflects the incoming velocity vertically.
const ZONE_ANGLES: [FreeCoordinate; 5] = [300.0, 330.0, 0.0, 30.0, 60.0];

/// The player-controlled obstacle.
///
/// Unlike a [`Block`], the paddle's rebound direction depends on *where* the
/// body lands on it: the surface is divided into five equal zones, and outer
/// zones deflect at progressively steeper angles (speed is preserved). This
/// is what makes play steerable. The paddle can also be moved horizontally
/// within a fixed travel range.
pub struct Paddle {
    rect: Cell<Rect>,
    /// Minimum and maximum x allowed for the paddle's upper-left corner.
    travel: (FreeCoordinate, FreeCoordinate),
}

impl Paddle {
    /// Constructs a [`Paddle`] occupying `rect`, whose upper-left corner may
    /// travel between the given minimum and maximum x.
    pub fn new(rect: Rect, travel: (FreeCoordinate, FreeCoordinate)) -> Self {
        Self {
            rect: Cell::new(rect),
            travel,
        }
    }

    /// Moves the paddle horizontally by `dx`, clamped to its travel range.
    ///
    /// Takes `&self` so that a paddle shared with an
    /// [`Environment`](crate::physics::Environment) can still be driven by
    /// the game loop between ticks.
    pub fn shift(&self, dx: FreeCoordinate) {
        let rect = self.rect.get();
        let x = (rect.upper_left().x + dx).clamp(self.travel.0, self.travel.1);
        self.rect
            .set(rect.translate(FreeVector::new(x - rect.upper_left().x, 0.0)));
    }
}

impl fmt::Debug for Paddle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paddle")
            .field("rect", &self.rect.get())
            .field("travel", &self.travel)
            .finish()
    }
}

impl Collidable for Paddle {
    fn rectangle(&self) -> Rect {
        self.rect.get()
    }

    fn hit(
        &self,
        _body: &Body,
        collision_point: FreePoint,
        incoming_velocity: FreeVector,
    ) -> FreeVector {
        let rect = self.rect.get();
        let zone_count = ZONE_ANGLES.len();
        let zone_width = rect.size().width / zone_count as FreeCoordinate;
        // Side hits land outside the top span; clamping folds them into the
        // nearest outer zone.
        let zone = (((collision_point.x - rect.side_coordinate(Side::Left)) / zone_width).floor()
            as isize)
            .clamp(0, zone_count as isize - 1) as usize;

        if zone == zone_count / 2 {
            // Center zone: plain vertical reflection.
            FreeVector::new(incoming_velocity.x, -incoming_velocity.y)
        } else {
            velocity_from_angle_and_speed(
                Angle::degrees(ZONE_ANGLES[zone]),
                incoming_velocity.length(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listen::Sink;
    use euclid::{point2, vec2};
    use pretty_assertions::assert_eq;

    fn test_body() -> Body {
        Body::new([0., 0.], 5.0).unwrap()
    }

    fn block() -> Block {
        Block::new(Rect::new([100., 100.], 50., 20.))
    }

    #[test]
    fn top_hit_reflects_vertically() {
        let block = block();
        let new_velocity = block.hit(&test_body(), point2(130., 100.), vec2(1., 8.));
        assert_eq!(new_velocity, vec2(1., -8.));
    }

    #[test]
    fn side_hit_reflects_horizontally() {
        let block = block();
        let new_velocity = block.hit(&test_body(), point2(100., 110.), vec2(3., 2.));
        assert_eq!(new_velocity, vec2(-3., 2.));
    }

    #[test]
    fn corner_hit_reflects_both() {
        let block = block();
        let new_velocity = block.hit(&test_body(), point2(150., 100.), vec2(-3., 4.));
        assert_eq!(new_velocity, vec2(3., -4.));
    }

    #[test]
    fn log_listener_is_always_alive() {
        let block = block();
        block.listen(log_hits("test block"));
        // No log subscriber is installed here; this just exercises dispatch.
        block.hit(&test_body(), point2(130., 100.), vec2(0., 8.));
        assert_eq!(format!("{:?}", block.hit_notifier), "Notifier(1)");
    }

    #[test]
    fn listeners_receive_the_pre_reflection_velocity() {
        let block = block();
        let sink: Sink<HitEvent> = Sink::new();
        block.listen(sink.listener());

        block.hit(&test_body(), point2(130., 100.), vec2(0., 8.));

        assert_eq!(
            sink.drain(),
            vec![HitEvent {
                collision_point: point2(130., 100.),
                incoming_velocity: vec2(0., 8.),
            }]
        );
    }

    #[test]
    fn paddle_center_zone_reflects() {
        let paddle = Paddle::new(Rect::new([350., 560.], 100., 20.), (20., 680.));
        // Zone boundaries at x = 350, 370, 390, 410, 430, 450.
        let new_velocity = paddle.hit(&test_body(), point2(400., 560.), vec2(2., 6.));
        assert_eq!(new_velocity, vec2(2., -6.));
    }

    #[test]
    fn paddle_outer_zones_deflect_preserving_speed() {
        let paddle = Paddle::new(Rect::new([350., 560.], 100., 20.), (20., 680.));
        let incoming = vec2(0., 6.);

        // Leftmost zone sends the body up and to the left; rightmost up and
        // to the right.
        let left = paddle.hit(&test_body(), point2(355., 560.), incoming);
        assert!(left.x < 0.0 && left.y < 0.0, "{left:?}");
        let right = paddle.hit(&test_body(), point2(445., 560.), incoming);
        assert!(right.x > 0.0 && right.y < 0.0, "{right:?}");

        for velocity in [left, right] {
            assert!((velocity.length() - incoming.length()).abs() < 1e-12);
        }
    }

    #[test]
    fn paddle_side_hit_uses_nearest_zone() {
        let paddle = Paddle::new(Rect::new([350., 560.], 100., 20.), (20., 680.));
        // Collision point on the paddle's left edge, below the top surface.
        let new_velocity = paddle.hit(&test_body(), point2(350., 565.), vec2(4., 3.));
        let expected = velocity_from_angle_and_speed(Angle::degrees(300.0), 5.0);
        assert!((new_velocity - expected).length() < 1e-12);
    }

    #[test]
    fn paddle_shift_clamps_to_travel() {
        let paddle = Paddle::new(Rect::new([350., 560.], 100., 20.), (20., 680.));
        paddle.shift(-400.);
        assert_eq!(paddle.rectangle().upper_left(), point2(20., 560.));
        paddle.shift(10_000.);
        assert_eq!(paddle.rectangle().upper_left(), point2(680., 560.));
        paddle.shift(-30.);
        assert_eq!(paddle.rectangle().upper_left(), point2(650., 560.));
    }
}
