//! Synchronous observer registry with RAII subscriptions.
//!
//! # Design
//!
//! The registry holds subscribers as `Weak<dyn Fn(&T)>`; the matching strong
//! `Rc` lives inside the [`Subscription`] handed back to the caller. Dropping
//! the subscription makes the weak reference dead, and dead entries are pruned
//! on the next [`Observers::notify`].
//!
//! # Invariants
//!
//! 1. Subscribers are notified in registration order.
//! 2. A dropped [`Subscription`] is never called again.
//! 3. Callbacks run with no internal borrow held, so a callback may register
//!    new subscribers; those see the *next* notification, not the current one.

use std::any::Any;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

/// Registry of callbacks for events of type `T`.
pub struct Observers<T> {
    subscribers: RefCell<Vec<CallbackWeak<T>>>,
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self {
            subscribers: RefCell::new(Vec::new()),
        }
    }
}

impl<T> std::fmt::Debug for Observers<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("subscriber_count", &self.subscribers.borrow().len())
            .finish()
    }
}

impl<T: 'static> Observers<T> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback`. It stays attached until the returned guard drops.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        self.subscribers.borrow_mut().push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Call every live subscriber with `event`. Returns how many were called.
    pub fn notify(&self, event: &T) -> usize {
        let callbacks: Vec<CallbackRc<T>> = {
            let mut subscribers = self.subscribers.borrow_mut();
            subscribers.retain(|weak| weak.strong_count() > 0);
            subscribers.iter().filter_map(Weak::upgrade).collect()
        };
        for callback in &callbacks {
            callback(event);
        }
        callbacks.len()
    }

    /// Number of registered subscribers, including dead ones not yet pruned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Whether no live subscriber remains.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers
            .borrow()
            .iter()
            .all(|weak| weak.strong_count() == 0)
    }
}

/// RAII guard for a registered callback.
///
/// Dropping it (or calling [`cancel`](Self::cancel)) detaches the callback.
#[must_use = "dropping a Subscription immediately detaches the callback"]
pub struct Subscription {
    _guard: Box<dyn Any>,
}

impl Subscription {
    /// Detach the callback now.
    pub fn cancel(self) {
        drop(self);
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
