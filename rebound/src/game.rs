//! Bookkeeping for driving a game loop around the physics core: shared
//! counters (score, remaining blocks, remaining balls) and deferred obstacle
//! removal.
//!
//! Everything here follows the listener discipline described in
//! [`crate::listen`]: listeners only aggregate into shared state, and the
//! game loop reads that state — and applies any removals — between ticks.

use core::fmt;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::listen::Listener;
use crate::physics::{Collidable, Environment};

/// A shared integer count.
///
/// Clones observe and modify the same underlying value, so one handle can be
/// given to listeners while another is read by the game loop. Typical uses:
/// the score, the number of blocks remaining, the number of balls remaining.
#[derive(Clone, Default)]
pub struct Counter {
    value: Rc<Cell<i64>>,
}

impl Counter {
    /// Constructs a new [`Counter`] with value zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to the current count.
    #[inline]
    pub fn increase(&self, amount: i64) {
        self.value.set(self.value.get() + amount);
    }

    /// Subtracts `amount` from the current count.
    #[inline]
    pub fn decrease(&self, amount: i64) {
        self.value.set(self.value.get() - amount);
    }

    /// The current count.
    #[inline]
    pub fn value(&self) -> i64 {
        self.value.get()
    }

    /// Returns a listener which adds `delta` to this counter for every
    /// message received, regardless of the message's content.
    ///
    /// Score tracking is `adder(points)` on each scoring block;
    /// remaining-object accounting is `adder(-1)` on the object's block.
    pub fn adder<M>(&self, delta: i64) -> impl Listener<M> + use<M> {
        CounterAdder {
            weak_value: Rc::downgrade(&self.value),
            delta,
        }
    }
}

impl fmt::Debug for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Counter").field(&self.value.get()).finish()
    }
}

struct CounterAdder {
    weak_value: Weak<Cell<i64>>,
    delta: i64,
}

impl<M> Listener<M> for CounterAdder {
    fn receive(&self, _message: M) {
        if let Some(value) = self.weak_value.upgrade() {
            value.set(value.get() + self.delta);
        }
    }
    fn alive(&self) -> bool {
        self.weak_value.strong_count() > 0
    }
}

/// Collects obstacles whose removal has been requested during a tick, so
/// that the [`Environment`] can be updated once all queries have finished.
///
/// Obstacle reactions and listeners must never mutate the environment
/// synchronously; they enqueue here instead, and the game loop calls
/// [`RemovalQueue::apply`] between ticks. Clones share the same queue.
#[derive(Clone, Default)]
pub struct RemovalQueue {
    pending: Rc<RefCell<Vec<Rc<dyn Collidable>>>>,
}

impl RemovalQueue {
    /// Constructs a new empty [`RemovalQueue`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a listener which, on any message, requests the removal of
    /// `target`. It is typically registered on `target` itself, so that
    /// being hit removes it — the way a scoring brick disappears when
    /// struck.
    pub fn remover<M>(&self, target: &Rc<dyn Collidable>) -> impl Listener<M> + use<M> {
        Remover {
            weak_pending: Rc::downgrade(&self.pending),
            weak_target: Rc::downgrade(target),
        }
    }

    /// Whether any removals are waiting to be applied.
    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    /// Removes every queued obstacle from `environment`. Call this between
    /// ticks, after all bodies have been stepped.
    ///
    /// An obstacle queued twice (struck twice in one tick) is removed once;
    /// the second removal is a no-op by [`Environment::remove`]'s rules.
    pub fn apply(&self, environment: &mut Environment) {
        for target in self.pending.borrow_mut().drain(..) {
            log::debug!("removing obstacle {target:?}");
            environment.remove(&target);
        }
    }
}

impl fmt::Debug for RemovalQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RemovalQueue")
            .field(&self.pending.borrow().len())
            .finish()
    }
}

struct Remover {
    weak_pending: Weak<RefCell<Vec<Rc<dyn Collidable>>>>,
    weak_target: Weak<dyn Collidable>,
}

impl<M> Listener<M> for Remover {
    fn receive(&self, _message: M) {
        if let (Some(pending), Some(target)) =
            (self.weak_pending.upgrade(), self.weak_target.upgrade())
        {
            pending.borrow_mut().push(target);
        }
    }
    fn alive(&self) -> bool {
        self.weak_pending.strong_count() > 0 && self.weak_target.strong_count() > 0
    }
}
