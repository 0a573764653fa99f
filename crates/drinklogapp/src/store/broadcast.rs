//! Snapshot publish/subscribe.
//!
//! A [`Broadcast`] owns the latest snapshot of a collection and the list of
//! observers interested in it. Snapshots are `Rc<Vec<T>>`: publishing swaps in a
//! whole new vector, so an observer holding an older snapshot keeps a consistent
//! view of the past instead of seeing a half-applied change.
//!
//! Observers are plain closures. They cannot reach the store while being called;
//! follow-up mutations go through [`super::MutationQueue`].

use std::cell::Cell;
use std::rc::Rc;

type Observer<T> = Box<dyn FnMut(&Rc<Vec<T>>)>;

struct Slot<T> {
    active: Rc<Cell<bool>>,
    observer: Observer<T>,
}

/// Handle returned by `subscribe`. Dropping it does NOT unsubscribe.
#[derive(Debug, Clone)]
pub struct Subscription {
    active: Rc<Cell<bool>>,
}

impl Subscription {
    /// Stop delivery. Safe to call any number of times, including from inside an observer.
    pub fn unsubscribe(&self) {
        self.active.set(false);
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

pub struct Broadcast<T> {
    current: Rc<Vec<T>>,
    slots: Vec<Slot<T>>,
}

impl<T> Broadcast<T> {
    pub fn new(initial: Vec<T>) -> Self {
        Self {
            current: Rc::new(initial),
            slots: Vec::new(),
        }
    }

    pub fn current(&self) -> Rc<Vec<T>> {
        Rc::clone(&self.current)
    }

    /// Register `observer` and hand it the current snapshot right away.
    pub fn subscribe<F>(&mut self, mut observer: F) -> Subscription
    where
        F: FnMut(&Rc<Vec<T>>) + 'static,
    {
        observer(&self.current);
        let active = Rc::new(Cell::new(true));
        self.slots.push(Slot {
            active: Rc::clone(&active),
            observer: Box::new(observer),
        });
        Subscription { active }
    }

    /// Install `snapshot` as current and deliver it to every live observer, in
    /// subscription order.
    pub fn publish(&mut self, snapshot: Vec<T>) {
        self.current = Rc::new(snapshot);
        for slot in self.slots.iter_mut() {
            if slot.active.get() {
                (slot.observer)(&self.current);
            }
        }
        self.slots.retain(|slot| slot.active.get());
    }

    pub fn subscriber_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.active.get()).count()
    }
}
