//! # Storage Layer
//!
//! [`DrinkLogStore`] is the single owner of the drink log. It holds two
//! collections, drinks and favorites, each behind a [`Broadcast`] channel, and
//! mirrors every change into a [`StorageBackend`].
//!
//! ## Snapshots
//!
//! Readers never see the live vector. [`DrinkLogStore::current`] and
//! [`DrinkLogStore::favorites`] hand out `Rc<Vec<_>>` snapshots, and every
//! mutation publishes a brand new one. A subscriber receives the current
//! snapshot when it subscribes and then one snapshot per successful mutation.
//!
//! ## Write Ordering
//!
//! Each mutation follows the same sequence:
//!
//! 1. Build the next snapshot from the current one.
//! 2. Persist it through the backend.
//! 3. Install it and broadcast.
//!
//! If step 2 fails the mutation is rejected: the current snapshot is unchanged,
//! nobody is notified and the error is returned. Memory never runs ahead of disk.
//!
//! Mutations that change nothing (deleting an unknown id, saving a duplicate
//! favorite) skip both the write and the broadcast.
//!
//! ## Reentrancy
//!
//! Observers run while the store is mutably borrowed, so they cannot call back
//! into it. An observer that wants to react with another mutation pushes it onto
//! the [`MutationQueue`] obtained from [`DrinkLogStore::queue`]. The store drains
//! the queue once the current broadcast has finished, in FIFO order.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── drinks.json       # [{ id, name, volume, abv, date }]
//! └── favorites.json    # [{ name, volume, abv }]
//! ```
//!
//! A missing file is an empty collection. A file that exists but does not parse
//! is an error at open time.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production store over [`fs_backend::FsBackend`].
//! - [`memory::InMemoryStore`]: for testing logic without filesystem I/O.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::{BTreeSet, VecDeque};
use std::rc::Rc;
use tracing::debug;

use crate::error::Result;
use crate::model::{DrinkRecord, FavoriteDrink};

pub mod backend;
pub mod broadcast;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;

pub use backend::{StorageBackend, StorageKey};
pub use broadcast::{Broadcast, Subscription};

/// A change to the log, as queued by observers.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Add(DrinkRecord),
    Delete(i64),
    ReplaceAll(Vec<DrinkRecord>),
    AddFavorite(FavoriteDrink),
}

/// Shared FIFO of mutations waiting for the current broadcast to finish.
#[derive(Debug, Clone, Default)]
pub struct MutationQueue {
    pending: Rc<RefCell<VecDeque<Mutation>>>,
}

impl MutationQueue {
    pub fn push(&self, mutation: Mutation) {
        self.pending.borrow_mut().push_back(mutation);
    }

    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    fn pop(&self) -> Option<Mutation> {
        self.pending.borrow_mut().pop_front()
    }
}

pub struct DrinkLogStore<B: StorageBackend> {
    backend: B,
    drinks: Broadcast<DrinkRecord>,
    favorites: Broadcast<FavoriteDrink>,
    queue: MutationQueue,
}

fn load<B: StorageBackend, T: DeserializeOwned>(backend: &B, key: StorageKey) -> Result<Vec<T>> {
    match backend.read(key)? {
        Some(content) => Ok(serde_json::from_str(&content)?),
        None => Ok(Vec::new()),
    }
}

impl<B: StorageBackend> DrinkLogStore<B> {
    /// Load both collections from `backend`.
    pub fn open(backend: B) -> Result<Self> {
        let drinks: Vec<DrinkRecord> = load(&backend, StorageKey::Drinks)?;
        let favorites: Vec<FavoriteDrink> = load(&backend, StorageKey::Favorites)?;
        debug!(
            drinks = drinks.len(),
            favorites = favorites.len(),
            location = %backend.location(StorageKey::Drinks).display(),
            "opened drink log"
        );
        Ok(Self::from_parts(backend, drinks, favorites))
    }

    pub(crate) fn from_parts(
        backend: B,
        drinks: Vec<DrinkRecord>,
        favorites: Vec<FavoriteDrink>,
    ) -> Self {
        Self {
            backend,
            drinks: Broadcast::new(drinks),
            favorites: Broadcast::new(favorites),
            queue: MutationQueue::default(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn current(&self) -> Rc<Vec<DrinkRecord>> {
        self.drinks.current()
    }

    pub fn favorites(&self) -> Rc<Vec<FavoriteDrink>> {
        self.favorites.current()
    }

    pub fn subscribe<F>(&mut self, observer: F) -> Subscription
    where
        F: FnMut(&Rc<Vec<DrinkRecord>>) + 'static,
    {
        self.drinks.subscribe(observer)
    }

    pub fn subscribe_favorites<F>(&mut self, observer: F) -> Subscription
    where
        F: FnMut(&Rc<Vec<FavoriteDrink>>) + 'static,
    {
        self.favorites.subscribe(observer)
    }

    /// Handle for observers to schedule follow-up mutations.
    pub fn queue(&self) -> MutationQueue {
        self.queue.clone()
    }

    pub fn add(&mut self, record: DrinkRecord) -> Result<()> {
        self.apply(Mutation::Add(record)).map(|_| ())
    }

    /// Returns false when no record has `id`; nothing is written in that case.
    pub fn delete(&mut self, id: i64) -> Result<bool> {
        self.apply(Mutation::Delete(id))
    }

    pub fn replace_all(&mut self, records: Vec<DrinkRecord>) -> Result<()> {
        self.apply(Mutation::ReplaceAll(records)).map(|_| ())
    }

    /// Returns false when an identical favorite is already saved.
    pub fn add_favorite(&mut self, favorite: FavoriteDrink) -> Result<bool> {
        self.apply(Mutation::AddFavorite(favorite))
    }

    /// Apply `mutation`, then everything observers queued in reaction to it.
    ///
    /// The returned flag is about `mutation` itself. The first failing queued
    /// mutation stops the drain and its error is returned; later ones stay queued.
    pub fn apply(&mut self, mutation: Mutation) -> Result<bool> {
        let changed = self.apply_one(mutation)?;
        self.flush()?;
        Ok(changed)
    }

    /// Drain mutations queued outside of a store call.
    pub fn flush(&mut self) -> Result<()> {
        while let Some(next) = self.queue.pop() {
            self.apply_one(next)?;
        }
        Ok(())
    }

    fn apply_one(&mut self, mutation: Mutation) -> Result<bool> {
        match mutation {
            Mutation::Add(record) => {
                let mut next = self.drinks.current().as_ref().clone();
                next.push(record);
                self.commit_drinks(next)?;
                Ok(true)
            }
            Mutation::Delete(id) => {
                let current = self.drinks.current();
                let Some(pos) = current.iter().position(|r| r.id == id) else {
                    debug!(id, "delete of unknown id ignored");
                    return Ok(false);
                };
                let mut next = current.as_ref().clone();
                next.remove(pos);
                self.commit_drinks(next)?;
                Ok(true)
            }
            Mutation::ReplaceAll(records) => {
                self.commit_drinks(records)?;
                Ok(true)
            }
            Mutation::AddFavorite(favorite) => {
                let current = self.favorites.current();
                if current.contains(&favorite) {
                    debug!(name = %favorite.name, "favorite already saved");
                    return Ok(false);
                }
                let mut next = current.as_ref().clone();
                next.push(favorite);
                persist(&self.backend, StorageKey::Favorites, &next)?;
                self.favorites.publish(next);
                Ok(true)
            }
        }
    }

    fn commit_drinks(&mut self, next: Vec<DrinkRecord>) -> Result<()> {
        persist(&self.backend, StorageKey::Drinks, &next)?;
        self.drinks.publish(next);
        Ok(())
    }

    /// An id for a record created at `now`: its millisecond timestamp, bumped
    /// past every id already in the log.
    ///
    /// When the log already holds `i64::MAX` (only possible through an import),
    /// the smallest unused positive id is returned instead.
    pub fn next_id(&self, now: DateTime<Utc>) -> i64 {
        let drinks = self.drinks.current();
        let candidate = now.timestamp_millis();
        match drinks.iter().map(|r| r.id).max() {
            Some(max) if max >= candidate => match max.checked_add(1) {
                Some(id) => id,
                None => {
                    let used: BTreeSet<i64> = drinks.iter().map(|r| r.id).collect();
                    let id = (1..).find(|id| !used.contains(id)).unwrap_or(candidate);
                    debug!(id, "id space exhausted above the log, reusing a gap");
                    id
                }
            },
            _ => candidate,
        }
    }
}

fn persist<B: StorageBackend, T: Serialize>(backend: &B, key: StorageKey, items: &[T]) -> Result<()> {
    let content = serde_json::to_string_pretty(items)?;
    backend.write(key, &content)?;
    debug!(key = %key, count = items.len(), "persisted");
    Ok(())
}
