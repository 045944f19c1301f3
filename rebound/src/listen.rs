//! Mechanism for receiving notifications of collision events.
//!
//! Objects which wish to send notifications use [`Notifier`]s, which manage
//! a collection of [`Listener`]s. Each listener reports when it is no longer
//! needed and may be discarded.
//!
//! When [`Notifier::notify`] is called to send a message, it is synchronously
//! delivered to all listeners; therefore, listeners are obligated to avoid
//! making further significant state changes. The typical pattern is for a
//! listener to hold a `Weak<Cell<...>>` or similar multiply-owned mutable
//! structure to aggregate incoming messages, which will then be read and
//! cleared by the surrounding game loop between ticks.

use core::fmt;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

/// Delivers messages of type `M` to a set of listeners, each of which
/// usually holds a weak reference so that it can be removed when the actual
/// recipient is gone or uninterested.
pub struct Notifier<M> {
    listeners: RefCell<Vec<Box<dyn Listener<M>>>>,
}

impl<M: Clone> Notifier<M> {
    /// Constructs a new empty [`Notifier`].
    pub fn new() -> Self {
        Self {
            listeners: Default::default(),
        }
    }

    /// Adds a [`Listener`] to this set of listeners.
    pub fn listen<L: Listener<M> + 'static>(&self, listener: L) {
        if !listener.alive() {
            return;
        }
        let mut listeners = self
            .listeners
            .try_borrow_mut()
            .expect("adding listeners while a notification is being sent is not supported");
        Self::cleanup(&mut listeners);
        listeners.push(Box::new(listener));
    }

    /// Delivers a message to all [`Listener`]s.
    pub fn notify(&self, message: M) {
        for listener in self.listeners.borrow().iter() {
            listener.receive(message.clone());
        }
    }

    /// Discards all dead listeners in `listeners`.
    fn cleanup(listeners: &mut Vec<Box<dyn Listener<M>>>) {
        let mut i = 0;
        while i < listeners.len() {
            if listeners[i].alive() {
                i += 1;
            } else {
                listeners.swap_remove(i);
            }
        }
    }
}

impl<M: Clone> Default for Notifier<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> fmt::Debug for Notifier<M> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Ok(listeners) = self.listeners.try_borrow() {
            fmt.debug_tuple("Notifier").field(&listeners.len()).finish()
        } else {
            fmt.debug_tuple("Notifier").field(&"?").finish()
        }
    }
}

/// A receiver of messages which can indicate when it is no longer interested
/// in them (typically because the associated recipient has been dropped).
///
/// As a `Listener` may be called from various contexts, [`receive`]
/// implementations should avoid triggering further side effects beyond
/// setting dirty flags or inserting into message queues — definitely not
/// mutating the obstacle registry whose scan produced the notification.
///
/// [`receive`]: Self::receive
pub trait Listener<M> {
    /// Process and store a message.
    fn receive(&self, message: M);

    /// Returns [`false`] if the [`Listener`] should not receive any further
    /// messages because its destination is no longer interested in them.
    fn alive(&self) -> bool;
}

/// A [`Listener`] which discards all messages; suitable for filling listener
/// parameters when no listener is needed.
#[expect(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug)]
pub struct NullListener;

impl<M> Listener<M> for NullListener {
    fn receive(&self, _message: M) {}
    fn alive(&self) -> bool {
        false
    }
}

/// A [`Listener`] destination which stores all the messages it receives, in
/// order, until they are taken with [`Sink::drain`].
pub struct Sink<M> {
    messages: Rc<RefCell<VecDeque<M>>>,
}

struct SinkListener<M> {
    weak_messages: Weak<RefCell<VecDeque<M>>>,
}

impl<M: Clone> Sink<M> {
    /// Constructs a new empty [`Sink`].
    pub fn new() -> Self {
        Self {
            messages: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// Returns a [`Listener`] which records the messages it receives in this
    /// sink.
    pub fn listener(&self) -> impl Listener<M> + use<M> {
        SinkListener {
            weak_messages: Rc::downgrade(&self.messages),
        }
    }

    /// Removes and returns all messages received so far, oldest first.
    pub fn drain(&self) -> Vec<M> {
        self.messages.borrow_mut().drain(..).collect()
    }
}

impl<M: Clone> Default for Sink<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: fmt::Debug> fmt::Debug for Sink<M> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_tuple("Sink").field(&self.messages.borrow()).finish()
    }
}

impl<M: Clone> Listener<M> for SinkListener<M> {
    fn receive(&self, message: M) {
        if let Some(messages) = self.weak_messages.upgrade() {
            messages.borrow_mut().push_back(message);
        }
    }
    fn alive(&self) -> bool {
        self.weak_messages.strong_count() > 0
    }
}

/// A [`Listener`] destination which only stores a single flag indicating
/// whether any messages were received.
pub struct DirtyFlag {
    flag: Rc<Cell<bool>>,
}

struct DirtyFlagListener {
    weak_flag: Weak<Cell<bool>>,
}

impl DirtyFlag {
    /// Constructs a new [`DirtyFlag`] with the given initial value.
    pub fn new(value: bool) -> Self {
        Self {
            flag: Rc::new(Cell::new(value)),
        }
    }

    /// Returns a [`Listener`] which will set this flag to [`true`] when it
    /// receives any message.
    pub fn listener<M>(&self) -> impl Listener<M> + use<M> {
        DirtyFlagListener {
            weak_flag: Rc::downgrade(&self.flag),
        }
    }

    /// Returns the flag value, setting it to [`false`] at the same time.
    pub fn get_and_clear(&self) -> bool {
        self.flag.replace(false)
    }
}

impl fmt::Debug for DirtyFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DirtyFlag").field(&self.flag.get()).finish()
    }
}

impl<M> Listener<M> for DirtyFlagListener {
    fn receive(&self, _message: M) {
        if let Some(flag) = self.weak_flag.upgrade() {
            flag.set(true);
        }
    }
    fn alive(&self) -> bool {
        self.weak_flag.strong_count() > 0
    }
}
