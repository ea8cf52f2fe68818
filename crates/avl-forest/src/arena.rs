//! Slot arena shared by every tree of a [`Forest`](crate::Forest).
//!
//! Nodes are addressed by `u32` indices which stay stable for as long as
//! the node is alive. Freed slots are chained into an intrusive free list
//! and handed out again by [`Arena::alloc`].

use std::ops::{Index, IndexMut};

use crate::avl::types::AvlNode;

#[derive(Clone, Debug)]
enum Slot<V> {
    Occupied(AvlNode<V>),
    /// Next vacant slot in the free list.
    Vacant(Option<u32>),
}

#[derive(Clone, Debug)]
pub struct Arena<V> {
    slots: Vec<Slot<V>>,
    free: Option<u32>,
    len: usize,
}

impl<V> Arena<V> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: None,
            len: 0,
        }
    }

    /// Stores `node` and returns its index, reusing a vacant slot if any.
    pub fn alloc(&mut self, node: AvlNode<V>) -> u32 {
        self.len += 1;
        match self.free {
            Some(idx) => {
                let slot = &mut self.slots[idx as usize];
                if let Slot::Vacant(next) = *slot {
                    self.free = next;
                }
                *slot = Slot::Occupied(node);
                idx
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                (self.slots.len() - 1) as u32
            }
        }
    }

    /// Releases slot `idx` and returns the node it held.
    ///
    /// Panics if the slot is already vacant.
    pub fn free(&mut self, idx: u32) -> AvlNode<V> {
        if let Slot::Vacant(_) = self.slots[idx as usize] {
            panic!("arena slot {idx} freed twice");
        }
        let slot = std::mem::replace(&mut self.slots[idx as usize], Slot::Vacant(self.free));
        self.free = Some(idx);
        self.len -= 1;
        match slot {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => unreachable!("slot {idx} checked as occupied"),
        }
    }

    pub fn get(&self, idx: u32) -> Option<&AvlNode<V>> {
        match self.slots.get(idx as usize)? {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant(_) => None,
        }
    }

    /// Mutable access to two distinct nodes at once.
    pub fn pair_mut(&mut self, a: u32, b: u32) -> (&mut AvlNode<V>, &mut AvlNode<V>) {
        assert_ne!(a, b, "pair_mut needs two distinct slots");
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.slots.split_at_mut(hi as usize);
        let (x, y) = match (&mut head[lo as usize], &mut tail[0]) {
            (Slot::Occupied(x), Slot::Occupied(y)) => (x, y),
            _ => panic!("pair_mut on a vacant slot ({a}, {b})"),
        };
        if a < b {
            (x, y)
        } else {
            (y, x)
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots, live or vacant.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.len = 0;
    }
}

impl<V> Default for Arena<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Index<u32> for Arena<V> {
    type Output = AvlNode<V>;

    fn index(&self, idx: u32) -> &AvlNode<V> {
        match &self.slots[idx as usize] {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => panic!("arena slot {idx} is vacant"),
        }
    }
}

impl<V> IndexMut<u32> for Arena<V> {
    fn index_mut(&mut self, idx: u32) -> &mut AvlNode<V> {
        match &mut self.slots[idx as usize] {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => panic!("arena slot {idx} is vacant"),
        }
    }
}
