//! Indexed binary heap over integer identities.
//!
//! Purpose
//! - Priority queue whose entries are stable ids in `[0, capacity)`, with an
//!   inverse position index so any id can be updated or removed in O(log n).
//! - The heap never stores priorities. Every call that needs an ordering takes a
//!   `KeyOrder` and reads the caller's *current* keys through it, so the owner
//!   is free to mutate its keys between calls and then signal `update(id)`.
//!
//! Invariants (checked by `is_heap`)
//! - Heap order: for every slot `i` with child `c < len`, `heap[c]` does not
//!   strictly precede `heap[i]` under the heap's `HeapKind`.
//! - Inverse index: `position[heap[i]] == i` for every active slot, and every id
//!   with a recorded position sits at that slot.
//!
//! Removal direction
//! - After swapping the last entry into a vacated slot `s`, one comparison
//!   against `parent(s)` picks the repair direction. If the moved id precedes the
//!   parent, the parent preceded (or tied) every former descendant of `s`, so by
//!   transitivity the moved id also precedes them and only a sift-up is needed.
//!   Otherwise the edge to the parent is already valid and a sift-down restores
//!   the subtree. Both cases rely only on the heap being valid before removal.

use std::cmp::Ordering;

/// Stable identity of an element in a fixed universe `[0, len)`.
pub type ElementId = usize;

const ABSENT: usize = usize::MAX;

/// Which extreme sits at the root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HeapKind {
    /// Smallest key first.
    #[default]
    Min,
    /// Largest key first.
    Max,
}

/// Live ordering over element ids.
///
/// Implementations must read current state on every call; caching results
/// across calls breaks `IndexedHeap::update`.
pub trait KeyOrder {
    fn key_cmp(&self, a: ElementId, b: ElementId) -> Ordering;
}

/// Keys stored densely by id; NaN-safe via IEEE total order.
impl KeyOrder for [f64] {
    #[inline]
    fn key_cmp(&self, a: ElementId, b: ElementId) -> Ordering {
        self[a].total_cmp(&self[b])
    }
}

impl<F> KeyOrder for F
where
    F: Fn(ElementId, ElementId) -> Ordering,
{
    #[inline]
    fn key_cmp(&self, a: ElementId, b: ElementId) -> Ordering {
        self(a, b)
    }
}

/// Binary heap of ids with O(log n) `update`/`remove` via an inverse index.
#[derive(Clone, Debug)]
pub struct IndexedHeap {
    heap: Vec<ElementId>,
    position: Vec<usize>,
    kind: HeapKind,
}

impl IndexedHeap {
    /// Empty heap able to hold every id in `[0, capacity)`.
    pub fn new(capacity: usize, kind: HeapKind) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            position: vec![ABSENT; capacity],
            kind,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.position.len()
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
    #[inline]
    pub fn kind(&self) -> HeapKind {
        self.kind
    }

    /// Active slots in array-tree order (root first).
    #[inline]
    pub fn as_slice(&self) -> &[ElementId] {
        &self.heap
    }

    #[inline]
    pub fn contains(&self, id: ElementId) -> bool {
        self.check_id(id);
        self.position[id] != ABSENT
    }

    /// Insert `id`; returns `false` without effect if it is already present.
    pub fn add<K: KeyOrder + ?Sized>(&mut self, id: ElementId, keys: &K) -> bool {
        if self.contains(id) {
            return false;
        }
        let slot = self.heap.len();
        self.heap.push(id);
        self.position[id] = slot;
        self.sift_up(slot, keys);
        true
    }

    /// Root id without removing it.
    #[inline]
    pub fn peek(&self) -> Option<ElementId> {
        self.heap.first().copied()
    }

    /// Remove and return the root id.
    pub fn poll<K: KeyOrder + ?Sized>(&mut self, keys: &K) -> Option<ElementId> {
        if self.heap.is_empty() {
            return None;
        }
        let root = self.heap[0];
        self.remove_at(0, keys);
        Some(root)
    }

    /// Remove `id`; returns `false` if it was not present.
    pub fn remove<K: KeyOrder + ?Sized>(&mut self, id: ElementId, keys: &K) -> bool {
        if !self.contains(id) {
            return false;
        }
        let slot = self.position[id];
        self.remove_at(slot, keys);
        true
    }

    /// Re-establish order after the key of `id` changed. Returns `false` if absent.
    pub fn update<K: KeyOrder + ?Sized>(&mut self, id: ElementId, keys: &K) -> bool {
        if !self.contains(id) {
            return false;
        }
        let slot = self.position[id];
        self.fix(slot, keys);
        true
    }

    /// Full O(n) bottom-up rebuild after bulk key changes.
    pub fn update_all<K: KeyOrder + ?Sized>(&mut self, keys: &K) {
        for slot in (0..self.heap.len() / 2).rev() {
            self.sift_down(slot, keys);
        }
    }

    /// Reset to contain every id in `[0, capacity)`.
    pub fn set_all<K: KeyOrder + ?Sized>(&mut self, keys: &K) {
        self.heap.clear();
        self.heap.extend(0..self.capacity());
        for (slot, p) in self.position.iter_mut().enumerate() {
            *p = slot;
        }
        self.update_all(keys);
    }

    /// Reset to contain exactly `ids` (duplicates ignored).
    pub fn set<K: KeyOrder + ?Sized>(&mut self, ids: &[ElementId], keys: &K) {
        self.clear();
        for &id in ids {
            if !self.contains(id) {
                self.position[id] = self.heap.len();
                self.heap.push(id);
            }
        }
        self.update_all(keys);
    }

    /// Empty the heap without releasing storage.
    pub fn clear(&mut self) {
        for id in self.heap.drain(..) {
            self.position[id] = ABSENT;
        }
    }

    /// The least preferred id (e.g. the maximum of a min-heap).
    ///
    /// Such an id is always a leaf, so only slots `len/2..len` are scanned.
    pub fn peek_last<K: KeyOrder + ?Sized>(&self, keys: &K) -> Option<ElementId> {
        self.last_slot(keys).map(|slot| self.heap[slot])
    }

    /// Remove and return the least preferred id.
    pub fn poll_last<K: KeyOrder + ?Sized>(&mut self, keys: &K) -> Option<ElementId> {
        let slot = self.last_slot(keys)?;
        let id = self.heap[slot];
        self.remove_at(slot, keys);
        Some(id)
    }

    /// True when both the order and inverse-index invariants hold.
    pub fn is_heap<K: KeyOrder + ?Sized>(&self, keys: &K) -> bool {
        for (slot, &id) in self.heap.iter().enumerate() {
            if self.position[id] != slot {
                return false;
            }
            if slot > 0 && self.precedes(id, self.heap[parent(slot)], keys) {
                return false;
            }
        }
        let tracked = self.position.iter().filter(|&&p| p != ABSENT).count();
        tracked == self.heap.len()
    }

    fn last_slot<K: KeyOrder + ?Sized>(&self, keys: &K) -> Option<usize> {
        let n = self.heap.len();
        if n == 0 {
            return None;
        }
        let mut best = n / 2;
        for slot in best + 1..n {
            if self.precedes(self.heap[best], self.heap[slot], keys) {
                best = slot;
            }
        }
        Some(best)
    }

    fn remove_at<K: KeyOrder + ?Sized>(&mut self, slot: usize, keys: &K) {
        let removed = self.heap[slot];
        self.position[removed] = ABSENT;
        let Some(moved) = self.heap.pop() else {
            return;
        };
        if slot == self.heap.len() {
            return;
        }
        self.heap[slot] = moved;
        self.position[moved] = slot;
        self.fix(slot, keys);
    }

    /// Choose the repair direction with a single parent comparison.
    fn fix<K: KeyOrder + ?Sized>(&mut self, slot: usize, keys: &K) {
        if slot > 0 && self.precedes(self.heap[slot], self.heap[parent(slot)], keys) {
            self.sift_up(slot, keys);
        } else {
            self.sift_down(slot, keys);
        }
    }

    fn sift_up<K: KeyOrder + ?Sized>(&mut self, mut slot: usize, keys: &K) {
        while slot > 0 {
            let up = parent(slot);
            if !self.precedes(self.heap[slot], self.heap[up], keys) {
                break;
            }
            self.swap(slot, up);
            slot = up;
        }
    }

    fn sift_down<K: KeyOrder + ?Sized>(&mut self, mut slot: usize, keys: &K) {
        let n = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            if left >= n {
                break;
            }
            let right = left + 1;
            let mut child = left;
            if right < n && self.precedes(self.heap[right], self.heap[left], keys) {
                child = right;
            }
            if !self.precedes(self.heap[child], self.heap[slot], keys) {
                break;
            }
            self.swap(slot, child);
            slot = child;
        }
    }

    /// Strict preference of `a` over `b` under this heap's kind.
    #[inline]
    fn precedes<K: KeyOrder + ?Sized>(&self, a: ElementId, b: ElementId, keys: &K) -> bool {
        let ord = keys.key_cmp(a, b);
        match self.kind {
            HeapKind::Min => ord == Ordering::Less,
            HeapKind::Max => ord == Ordering::Greater,
        }
    }

    #[inline]
    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.position[self.heap[i]] = i;
        self.position[self.heap[j]] = j;
    }

    #[inline]
    fn check_id(&self, id: ElementId) {
        assert!(
            id < self.position.len(),
            "element id {id} out of range for heap capacity {}",
            self.position.len()
        );
    }
}

#[inline]
fn parent(slot: usize) -> usize {
    (slot - 1) / 2
}

#[cfg(test)]
mod tests;
