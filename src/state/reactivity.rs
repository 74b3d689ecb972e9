// ============================================================================
// REACTIVITY - subscriber registry and observable values
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Callback = Rc<dyn Fn()>;

/// Callbacks notified on change. Registration hands back a [`Subscription`]
/// that unregisters on drop.
#[derive(Default)]
pub struct Subscribers {
    next_id: Cell<u64>,
    callbacks: RefCell<Vec<(u64, Callback)>>,
}

impl Subscribers {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn subscribe<F>(self: &Rc<Self>, callback: F) -> Subscription
    where
        F: Fn() + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.callbacks.borrow_mut().push((id, Rc::new(callback)));
        Subscription {
            registry: Rc::downgrade(self),
            id,
        }
    }

    /// Callbacks may subscribe, unsubscribe or read state; the registry is
    /// not borrowed while they run.
    pub fn notify(&self) {
        let callbacks: Vec<Callback> = self
            .callbacks
            .borrow()
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();
        for callback in callbacks {
            callback();
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.borrow().is_empty()
    }

    fn unsubscribe(&self, id: u64) {
        let removed = {
            let mut callbacks = self.callbacks.borrow_mut();
            callbacks
                .iter()
                .position(|(existing, _)| *existing == id)
                .map(|index| callbacks.remove(index))
        };
        drop(removed);
    }
}

#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    registry: Weak<Subscribers>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.unsubscribe(self.id);
        }
    }
}

/// Value plus the subscribers interested in it. Clones share both.
pub struct ReactiveState<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<Subscribers>,
}

impl<T> ReactiveState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Subscribers::new(),
        }
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.value.borrow().clone()
    }

    pub fn with<R>(&self, read: impl FnOnce(&T) -> R) -> R {
        read(&self.value.borrow())
    }

    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.subscribers.notify();
    }

    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        updater(&mut self.value.borrow_mut());
        self.subscribers.notify();
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + 'static,
    {
        self.subscribers.subscribe(callback)
    }
}

impl<T> Clone for ReactiveState<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}
