//! Rebound is a 2D arena physics library: circular bodies moving among static
//! axis-aligned rectangular obstacles, in the style of block-breaking arcade
//! games. Collision detection is continuous (swept), so a body moving fast
//! relative to its own size never tunnels through a thin wall.
//!
//! ## Capabilities
//!
//! * [`math`] provides the geometry primitives: points and vectors (via
//!   [`euclid`]), [`math::LineSegment`] with segment/segment intersection,
//!   and the validated [`math::Rect`] obstacle shape.
//! * [`physics::Environment`] owns the set of obstacles and answers
//!   closest-collision queries for a swept trajectory, deterministically.
//! * [`physics::Body`] is a moving circle; [`physics::Body::step`] advances
//!   it one simulation step, constructing a swept probe from its leading
//!   edge, querying the environment, and resolving position and velocity
//!   when something is struck.
//! * [`block`] provides ready-made obstacle kinds: the static [`block::Block`]
//!   (border walls, scoring bricks, and drain regions, distinguished only by
//!   listener wiring) and the player-driven [`block::Paddle`].
//! * [`listen`] and [`game`] supply the surrounding bookkeeping: hit-event
//!   fan-out to multiple independent listeners, shared counters for score
//!   and remaining-object accounting, and deferred obstacle removal.
//!
//! ## Coordinate system
//!
//! +x points right and +y points **down**, the screen convention of the games
//! this library models; a rectangle's `Top` edge is the one with the smallest
//! y coordinate. Velocities are displacements per simulation step — the
//! caller owns the decision of tick cadence and drives [`physics::Body::step`]
//! once per tick per body.
//!
//! ## Concurrency
//!
//! Everything here is single-threaded and synchronous. The obstacle registry
//! may be mutated only between queries; this is enforced statically, since
//! queries borrow the [`physics::Environment`] shared and mutation requires
//! an exclusive borrow. Obstacle reactions and listeners which want to
//! remove obstacles must defer that work to a [`game::RemovalQueue`] drained
//! between ticks.
//!
//! ## Dependencies and global state
//!
//! `rebound` has no global state, but it writes log messages using the
//! [`log`] crate and is therefore subject to that global configuration.
//! It depends on and re-exports [`euclid`] as part of its public API.

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]
// Lenience for tests.
#![cfg_attr(test,
    allow(clippy::float_cmp), // deterministic tests
    allow(clippy::redundant_clone), // prefer regularity over efficiency
)]

pub mod block;
pub mod game;
pub mod listen;
pub mod math;
pub mod physics;
pub mod util;

/// Re-export the version of the `euclid` vector math library we're using.
pub use euclid;
