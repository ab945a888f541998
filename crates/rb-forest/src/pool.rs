//! Slab arena with stable `u32` handles.
//!
//! Handles never move while their slot is occupied, which is what keeps
//! cursors valid across unrelated insertions and erasures. Freed slots are
//! threaded onto an intrusive free list and reused LIFO.

use std::collections::TryReserveError;
use std::ops::{Index, IndexMut};

#[derive(Clone, Debug)]
enum Slot<T> {
    Occupied(T),
    Vacant { next_free: Option<u32> },
}

/// Why a slot could not be handed out.
#[derive(Debug)]
pub enum PoolFull {
    Reserve(TryReserveError),
    HandleSpace,
}

#[derive(Clone, Debug)]
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
    free: Option<u32>,
    live: usize,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Pool<T> {
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: None,
            live: 0,
        }
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Occupied plus vacant slots.
    pub fn capacity_used(&self) -> usize {
        self.slots.len()
    }

    /// Stores `item`, reusing a vacant slot when one exists. On failure the
    /// item is handed back untouched.
    pub fn try_insert(&mut self, item: T) -> Result<u32, (T, PoolFull)> {
        if let Some(idx) = self.free {
            let slot = &mut self.slots[idx as usize];
            let next_free = match slot {
                Slot::Vacant { next_free } => *next_free,
                Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
            };
            *slot = Slot::Occupied(item);
            self.free = next_free;
            self.live += 1;
            return Ok(idx);
        }

        let Ok(idx) = u32::try_from(self.slots.len()) else {
            return Err((item, PoolFull::HandleSpace));
        };
        if let Err(err) = self.slots.try_reserve(1) {
            return Err((item, PoolFull::Reserve(err)));
        }
        self.slots.push(Slot::Occupied(item));
        self.live += 1;
        Ok(idx)
    }

    /// Frees the slot and returns its content.
    ///
    /// Panics when `idx` is vacant or out of bounds.
    pub fn remove(&mut self, idx: u32) -> T {
        let slot = &mut self.slots[idx as usize];
        let old = std::mem::replace(
            slot,
            Slot::Vacant {
                next_free: self.free,
            },
        );
        match old {
            Slot::Occupied(item) => {
                self.free = Some(idx);
                self.live -= 1;
                item
            }
            vacant @ Slot::Vacant { .. } => {
                *slot = vacant;
                panic!("pool slot {idx} is vacant");
            }
        }
    }

    pub fn get(&self, idx: u32) -> Option<&T> {
        match self.slots.get(idx as usize) {
            Some(Slot::Occupied(item)) => Some(item),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, idx: u32) -> Option<&mut T> {
        match self.slots.get_mut(idx as usize) {
            Some(Slot::Occupied(item)) => Some(item),
            _ => None,
        }
    }

    pub fn contains(&self, idx: u32) -> bool {
        self.get(idx).is_some()
    }

    /// Drops every item and forgets all slots.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.live = 0;
    }

    /// One mutable borrow per slot, indexed by handle. Used to hand out
    /// disjoint `&mut T` in an order other than slot order.
    pub(crate) fn slots_mut(&mut self) -> Vec<Option<&mut T>> {
        self.slots
            .iter_mut()
            .map(|slot| match slot {
                Slot::Occupied(item) => Some(item),
                Slot::Vacant { .. } => None,
            })
            .collect()
    }
}

impl<T> Index<u32> for Pool<T> {
    type Output = T;

    fn index(&self, idx: u32) -> &T {
        match self.get(idx) {
            Some(item) => item,
            None => panic!("pool slot {idx} is vacant"),
        }
    }
}

impl<T> IndexMut<u32> for Pool<T> {
    fn index_mut(&mut self, idx: u32) -> &mut T {
        match self.get_mut(idx) {
            Some(item) => item,
            None => panic!("pool slot {idx} is vacant"),
        }
    }
}
