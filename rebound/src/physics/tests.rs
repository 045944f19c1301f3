//! Tests which involve both body and collision code. Unit tests for
//! individual functions live with their modules.

use std::rc::Rc;

use euclid::{point2, vec2};
use pretty_assertions::assert_eq;
use rand::Rng as _;
use rand::SeedableRng as _;

use crate::block::{Block, HitEvent, Paddle};
use crate::game::{Counter, RemovalQueue};
use crate::listen::Sink;
use crate::math::{FreePoint, LineSegment, Rect};
use crate::physics::{Body, Collidable, Environment, POSITION_EPSILON};

fn ball(center: (f64, f64), velocity: (f64, f64)) -> Body {
    let mut body = Body::new([center.0, center.1], 5.0).unwrap();
    body.set_velocity([velocity.0, velocity.1]);
    body
}

#[test]
fn step_without_environment_is_unobstructed() {
    let mut body = ball((0., 0.), (2., 3.));
    body.step(None);
    body.step(None);
    assert_eq!(body.center(), point2(4., 6.));
    assert_eq!(body.velocity(), vec2(2., 3.));
}

#[test]
fn step_in_empty_environment_is_unobstructed() {
    let environment = Environment::new();
    let mut body = ball((0., 0.), (2., 3.));
    let info = body.step(Some(&environment));
    assert!(info.stopped_by.is_none());
    assert_eq!(body.center(), point2(2., 3.));
}

/// The scenario the whole crate is about: a ball falling onto a block is
/// stopped at the block's surface, repositioned flush against it, and
/// reflected, with the collision reported to the block's listeners.
#[test]
fn falling_ball_is_corrected_and_reflected() {
    let brick = Rc::new(Block::new(Rect::new([100., 100.], 50., 20.)));
    let score = Counter::new();
    let hits: Sink<HitEvent> = Sink::new();
    brick.listen(score.adder(5));
    brick.listen(hits.listener());

    let mut environment = Environment::new();
    environment.add(brick.clone() as Rc<dyn Collidable>);

    let mut body = ball((130., 50.), (0., 8.));
    let mut collided = false;
    for _ in 0..20 {
        let info = body.step(Some(&environment));
        if let Some(collision) = info.stopped_by {
            // Struck the top edge; placed radius + ε above it, x unchanged.
            assert_eq!(collision.collision_point(), point2(130., 100.));
            assert_eq!(body.center(), point2(130., 100. - (5. + POSITION_EPSILON)));
            collided = true;
            break;
        }
    }
    assert!(collided, "never collided; ended at {:?}", body.center());

    // The block reflected the vertical velocity…
    assert_eq!(body.velocity(), vec2(0., -8.));
    // …scored…
    assert_eq!(score.value(), 5);
    // …and reported the impact with the pre-reflection velocity.
    assert_eq!(
        hits.drain(),
        vec![HitEvent {
            collision_point: point2(130., 100.),
            incoming_velocity: vec2(0., 8.),
        }]
    );
}

/// A fast body does not tunnel through an obstacle thinner than its own
/// per-step displacement.
#[test]
fn no_tunneling_through_thin_walls() {
    let wall = Rc::new(Block::new(Rect::new([200., 0.], 1., 600.)));
    let mut environment = Environment::new();
    environment.add(wall as Rc<dyn Collidable>);

    let mut body = ball((100., 300.), (250., 0.));
    let info = body.step(Some(&environment));

    let collision = info.stopped_by.expect("wall was skipped over");
    assert_eq!(collision.collision_point(), point2(200., 300.));
    // Placed just to the left of the wall, not inside or beyond it.
    assert_eq!(body.center(), point2(200. - (5. + POSITION_EPSILON), 300.));
    assert_eq!(body.velocity(), vec2(-250., 0.));
}

#[test]
fn nearest_of_several_obstacles_wins() {
    let near = Rc::new(Block::new(Rect::new([300., 280.], 20., 40.)));
    let far = Rc::new(Block::new(Rect::new([500., 280.], 20., 40.)));
    let mut environment = Environment::new();
    // Insertion order deliberately far-then-near.
    environment.add(far.clone() as Rc<dyn Collidable>);
    environment.add(near.clone() as Rc<dyn Collidable>);

    let mut body = ball((100., 300.), (450., 0.));
    let info = body.step(Some(&environment));
    let collision = info.stopped_by.unwrap();
    assert!(Rc::ptr_eq(
        collision.obstacle(),
        &(near as Rc<dyn Collidable>)
    ));
    assert_eq!(body.center(), point2(300. - (5. + POSITION_EPSILON), 300.));
}

/// A brick wired with a removal listener disappears after the tick in which
/// it is struck, and the ball then passes through where it was.
#[test]
fn struck_brick_is_removed_between_ticks() {
    let brick = Rc::new(Block::new(Rect::new([100., 100.], 50., 20.)));
    let obstacle: Rc<dyn Collidable> = brick.clone();

    let removals = RemovalQueue::new();
    let remaining = Counter::new();
    remaining.increase(1);
    brick.listen(removals.remover(&obstacle));
    brick.listen(remaining.adder(-1));

    let mut environment = Environment::new();
    environment.add(Rc::clone(&obstacle));

    let mut body = ball((130., 90.), (0., 8.));
    let info = body.step(Some(&environment));
    assert!(info.stopped_by.is_some());
    assert_eq!(remaining.value(), 0);

    // The removal has been requested but not yet applied: a query mid-tick
    // still sees the brick.
    assert_eq!(environment.len(), 1);
    removals.apply(&mut environment);
    assert!(environment.is_empty());

    // With the brick gone, the same ball now falls freely.
    let before = body.center();
    body.set_velocity([0., 8.]);
    let info = body.step(Some(&environment));
    assert!(info.stopped_by.is_none());
    assert_eq!(body.center(), before + vec2(0., 8.));
}

/// A drain region along the bottom of the arena accounts for lost balls;
/// the game loop reads the counter between ticks to decide what to remove.
#[test]
fn drain_region_accounts_for_lost_balls() {
    let drain = Rc::new(Block::new(Rect::new([0., 600.], 800., 20.)));
    let remaining_balls = Counter::new();
    remaining_balls.increase(1);
    drain.listen(remaining_balls.adder(-1));

    let mut environment = Environment::new();
    environment.add(drain as Rc<dyn Collidable>);

    let mut body = ball((400., 300.), (0., 8.));
    for _ in 0..100 {
        body.step(Some(&environment));
        if remaining_balls.value() == 0 {
            break;
        }
    }
    assert_eq!(remaining_balls.value(), 0);
    // The drain still behaves as a collidable: the ball was stopped at its
    // surface, not swallowed by the geometry.
    assert_eq!(body.center().y, 600.0 - (5.0 + POSITION_EPSILON));
}

/// Identical obstacle set + identical trajectory must give identical
/// results, query after query.
#[test]
fn queries_are_deterministic() {
    let mut rng = rand_xoshiro::Xoshiro256Plus::seed_from_u64(0);
    for _ in 0..100 {
        let mut environment = Environment::new();
        for _ in 0..10 {
            let rect = Rect::new(
                [rng.random_range(-100.0..900.0), rng.random_range(-100.0..700.0)],
                rng.random_range(1.0..120.0),
                rng.random_range(1.0..60.0),
            );
            environment.add(Rc::new(Block::new(rect)) as Rc<dyn Collidable>);
        }
        let trajectory = LineSegment::new(
            [rng.random_range(-100.0..900.0), rng.random_range(-100.0..700.0)],
            [rng.random_range(-100.0..900.0), rng.random_range(-100.0..700.0)],
        );

        let first = environment.closest_collision(trajectory);
        for _ in 0..3 {
            let again = environment.closest_collision(trajectory);
            match (&first, &again) {
                (None, None) => {}
                (Some(a), Some(b)) => {
                    assert_eq!(a.collision_point(), b.collision_point());
                    assert!(Rc::ptr_eq(a.obstacle(), b.obstacle()));
                }
                (a, b) => panic!("inconsistent results {a:?} vs {b:?}"),
            }
        }
    }
}

/// A ball landing on the paddle's outer zone is steered, not merely
/// reflected.
#[test]
fn paddle_steers_the_rebound() {
    let paddle = Rc::new(Paddle::new(Rect::new([350., 560.], 100., 20.), (20., 680.)));
    let mut environment = Environment::new();
    environment.add(paddle.clone() as Rc<dyn Collidable>);

    // Fall onto the leftmost zone of the paddle surface.
    let mut body = ball((360., 540.), (0., 8.));
    let mut collided = false;
    for _ in 0..10 {
        if body.step(Some(&environment)).stopped_by.is_some() {
            collided = true;
            break;
        }
    }
    assert!(collided);
    let velocity = body.velocity();
    assert!(velocity.x < 0.0 && velocity.y < 0.0, "{velocity:?}");
    assert!((velocity.length() - 8.0).abs() < 1e-12);
}

/// The canonical query scenario, end to end through the environment.
#[test]
fn environment_closest_point_scenario() {
    let rect = Rect::new([100., 100.], 50., 20.);
    let mut environment = Environment::new();
    environment.add(Rc::new(Block::new(rect)) as Rc<dyn Collidable>);

    let trajectory = LineSegment::new([90., 110.], [400., 110.]);
    let info = environment.closest_collision(trajectory).unwrap();
    let expected: FreePoint = point2(100., 110.);
    assert_eq!(info.collision_point(), expected);
    assert_eq!((info.collision_point() - trajectory.start).length(), 10.0);
    // The reported point is on the obstacle's boundary, and is nearer than
    // anything strictly inside the rectangle can be.
    assert!(rect.on_boundary(info.collision_point(), 1e-9));
    assert!(rect.contains(info.collision_point()));
}
