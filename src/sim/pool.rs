//! Fixed-capacity entity pools
//!
//! Slots are allocated once and never added or removed. Spawning means
//! reviving a dead slot, dying means flagging the slot dead. Acquisition
//! scans for the first dead slot so the choice is stable across runs.

use serde::{Deserialize, Serialize};

/// Anything that can live in a [`Pool`]
pub trait Poolable {
    fn is_alive(&self) -> bool;
}

/// Index-addressable arena of reusable entities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool<T> {
    slots: Vec<T>,
}

impl<T: Poolable> Pool<T> {
    /// Build a pool of `capacity` slots, each made by `make(slot_index)`
    pub fn new(capacity: usize, make: impl FnMut(usize) -> T) -> Self {
        Self {
            slots: (0..capacity).map(make).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, slot: usize) -> Option<&T> {
        self.slots.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut T> {
        self.slots.get_mut(slot)
    }

    /// All slots, alive or dead, in slot order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut()
    }

    /// Alive members with their slot index
    pub fn iter_alive(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots.iter().enumerate().filter(|(_, e)| e.is_alive())
    }

    pub fn iter_alive_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, e)| e.is_alive())
    }

    pub fn alive_count(&self) -> usize {
        self.slots.iter().filter(|e| e.is_alive()).count()
    }

    /// Index of the first dead slot, if the pool is not exhausted
    pub fn first_dead(&self) -> Option<usize> {
        self.slots.iter().position(|e| !e.is_alive())
    }

    /// The first dead slot, ready to be revived by the caller
    pub fn acquire(&mut self) -> Option<(usize, &mut T)> {
        let slot = self.first_dead()?;
        Some((slot, &mut self.slots[slot]))
    }
}
