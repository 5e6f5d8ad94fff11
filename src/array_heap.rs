//! Array-backed binary min-heap with extrinsic priorities
//!
//! Items live in a flat buffer that encodes a complete binary tree. The
//! buffer is 1-indexed: position 0 is a permanently empty sentinel, so for a
//! node at position `i` the children sit at `2i` and `2i + 1` and the parent
//! at `i / 2`. Positions `1..=size` hold the live items and every position
//! past `size` is empty.
//!
//! Unlike [`std::collections::BinaryHeap`], the ordering key is not the item
//! itself. Each item carries a separate priority, and
//! [`change_priority`](ExtrinsicPq::change_priority) finds items by equality
//! to move them after insertion.
//!
//! # Time Complexity
//!
//! | Operation         | Complexity |
//! |-------------------|------------|
//! | `insert`          | O(log n)*  |
//! | `peek`            | O(1)       |
//! | `remove_min`      | O(log n)   |
//! | `change_priority` | O(k · n)** |
//! | `merge`           | O(m log n) |
//!
//! *Amortized; the buffer doubles when full and never shrinks.
//!
//! **For k items equal to the one being changed.
//!
//! # Example
//!
//! ```rust
//! use extrinsic_heap::{ArrayHeap, ExtrinsicPq, OrderedFloat};
//!
//! let mut heap: ArrayHeap<&str> = ArrayHeap::new();
//! heap.insert("c", OrderedFloat(3.0));
//! heap.insert("a", OrderedFloat(1.0));
//! heap.insert("b", OrderedFloat(2.0));
//!
//! heap.change_priority(&"c", OrderedFloat(0.5));
//! assert_eq!(heap.remove_min(), Some("c"));
//! assert_eq!(heap.remove_min(), Some("a"));
//! assert_eq!(heap.remove_min(), Some("b"));
//! assert_eq!(heap.remove_min(), None);
//! ```

use crate::traits::{ExtrinsicPq, HeapError};
use log::{debug, trace};
use ordered_float::OrderedFloat;

/// Number of buffer slots a new heap starts with, including the sentinel
pub const DEFAULT_CAPACITY: usize = 16;

const ROOT: usize = 1;

#[inline]
pub(crate) const fn left_child(index: usize) -> usize {
    index * 2
}

#[inline]
pub(crate) const fn right_child(index: usize) -> usize {
    index * 2 + 1
}

#[inline]
pub(crate) const fn parent(index: usize) -> usize {
    index / 2
}

#[derive(Debug, Clone)]
struct Slot<T, P> {
    item: T,
    priority: P,
}

/// A binary min-heap storing items with separately supplied priorities
///
/// The priority type defaults to [`OrderedFloat<f64>`], a totally ordered
/// 64-bit float. Any `Ord` type works.
///
/// Items are compared with `PartialEq` only by
/// [`change_priority`](ExtrinsicPq::change_priority); duplicates are allowed.
#[derive(Debug, Clone)]
pub struct ArrayHeap<T, P = OrderedFloat<f64>> {
    /// Buffer slots; index 0 is never occupied
    slots: Vec<Option<Slot<T, P>>>,
    size: usize,
}

impl<T, P: Ord> ArrayHeap<T, P> {
    /// Creates an empty heap with room for `capacity` items before it grows
    pub fn with_capacity(capacity: usize) -> Self {
        let len = capacity.saturating_add(1).max(2);
        let mut slots = Vec::with_capacity(len);
        slots.resize_with(len, || None);
        Self { slots, size: 0 }
    }

    /// Returns the number of buffer slots, including the unused sentinel
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the item with the smallest priority along with that priority
    pub fn peek_with_priority(&self) -> Option<(&T, &P)> {
        self.slot(ROOT).map(|slot| (&slot.item, &slot.priority))
    }

    /// Removes the item with the smallest priority, returning it with its priority
    pub fn remove_min_with_priority(&mut self) -> Option<(T, P)> {
        self.pop_slot().map(|slot| (slot.item, slot.priority))
    }

    /// Inserts an item, reporting allocation failure instead of panicking
    ///
    /// The buffer is grown before any slot is written, so on error the heap is
    /// unchanged and `item` is dropped.
    pub fn try_insert(&mut self, item: T, priority: P) -> Result<(), HeapError> {
        self.reserve_for_insert()?;
        self.size += 1;
        let index = self.size;
        self.slots[index] = Some(Slot { item, priority });
        self.swim(index);
        Ok(())
    }

    /// Iterates over live items and their priorities in buffer order
    ///
    /// Buffer order is heap order, not sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, &P)> + '_ {
        self.slots[ROOT..=self.size]
            .iter()
            .filter_map(|slot| slot.as_ref().map(|s| (&s.item, &s.priority)))
    }

    /// Removes every item; the buffer keeps its capacity
    pub fn clear(&mut self) {
        for slot in &mut self.slots[ROOT..=self.size] {
            *slot = None;
        }
        self.size = 0;
    }

    /// Drains the heap into `(item, priority)` pairs ordered by ascending priority
    pub fn into_sorted_vec(mut self) -> Vec<(T, P)> {
        let mut sorted = Vec::with_capacity(self.size);
        while let Some(slot) = self.pop_slot() {
            sorted.push((slot.item, slot.priority));
        }
        sorted
    }

    /// Moves every item of `other` into this heap
    pub fn merge(&mut self, other: Self) {
        let ArrayHeap { slots, size } = other;
        for slot in slots.into_iter().skip(ROOT).take(size).flatten() {
            self.push_slot(slot);
        }
    }

    /// Verifies the buffer layout and the min-heap ordering
    ///
    /// Returns the first problem found, scanning positions in increasing order.
    pub fn check_invariant(&self) -> Result<(), HeapError> {
        if self.slots[0].is_some() {
            return Err(HeapError::OccupiedBeyondSize {
                index: 0,
                size: self.size,
            });
        }
        for index in ROOT..=self.size {
            let slot = self.slot(index).ok_or(HeapError::EmptyPosition { index })?;
            if index > ROOT {
                let up = parent(index);
                let parent_slot = self
                    .slot(up)
                    .ok_or(HeapError::EmptyPosition { index: up })?;
                if slot.priority < parent_slot.priority {
                    return Err(HeapError::InvariantViolated { index, parent: up });
                }
            }
        }
        match (self.size + 1..self.slots.len()).find(|&i| self.slots[i].is_some()) {
            Some(index) => Err(HeapError::OccupiedBeyondSize {
                index,
                size: self.size,
            }),
            None => Ok(()),
        }
    }

    fn push_slot(&mut self, slot: Slot<T, P>) {
        let Slot { item, priority } = slot;
        if let Err(err) = self.try_insert(item, priority) {
            panic!("{err}");
        }
    }

    fn pop_slot(&mut self) -> Option<Slot<T, P>> {
        if self.size == 0 {
            return None;
        }

        let last = self.size;
        self.swap(ROOT, last);
        let removed = self.slots[last].take();
        self.size -= 1;

        if self.size > 0 {
            self.sink(ROOT);
        }

        removed
    }

    /// Doubles the buffer when the next insert would fill its last slot
    fn reserve_for_insert(&mut self) -> Result<(), HeapError> {
        let old_capacity = self.slots.len();
        if self.size + 1 < old_capacity {
            return Ok(());
        }

        let new_capacity = old_capacity
            .checked_mul(2)
            .ok_or(HeapError::CapacityOverflow {
                requested: usize::MAX,
            })?;
        self.slots
            .try_reserve_exact(new_capacity - old_capacity)
            .map_err(|_| HeapError::CapacityOverflow {
                requested: new_capacity,
            })?;
        self.slots.resize_with(new_capacity, || None);

        debug!("grew heap buffer from {old_capacity} to {new_capacity} slots");
        Ok(())
    }

    fn in_bounds(&self, index: usize) -> bool {
        index >= ROOT && index <= self.size
    }

    fn slot(&self, index: usize) -> Option<&Slot<T, P>> {
        if !self.in_bounds(index) {
            return None;
        }
        self.slots[index].as_ref()
    }

    fn priority(&self, index: usize) -> &P {
        match self.slot(index) {
            Some(slot) => &slot.priority,
            None => panic!("{}", HeapError::EmptyPosition { index }),
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        debug_assert!(self.in_bounds(a) && self.in_bounds(b));
        self.slots.swap(a, b);
    }

    /// Returns whichever position holds the smaller priority
    ///
    /// An out-of-bounds or empty position never wins. Ties go to `b`.
    fn smaller_of(&self, a: usize, b: usize) -> usize {
        match (self.slot(a), self.slot(b)) {
            (Some(x), Some(y)) => {
                if x.priority < y.priority {
                    a
                } else {
                    b
                }
            }
            (Some(_), None) => a,
            (None, Some(_)) => b,
            (None, None) => panic!("neither position {a} nor {b} holds an item"),
        }
    }

    fn validate_position(&self, index: usize) -> Result<(), HeapError> {
        if !self.in_bounds(index) {
            return Err(HeapError::PositionOutOfBounds {
                index,
                size: self.size,
            });
        }
        if self.slots[index].is_none() {
            return Err(HeapError::EmptyPosition { index });
        }
        Ok(())
    }

    fn assert_sink_swim_arg(&self, index: usize) {
        if let Err(err) = self.validate_position(index) {
            panic!("cannot sink or swim: {err}");
        }
    }

    /// Moves the item at `index` toward the root until its parent is no larger
    ///
    /// # Panics
    /// If `index` is not a live position.
    fn swim(&mut self, mut index: usize) {
        self.assert_sink_swim_arg(index);

        while index > ROOT {
            let up = parent(index);
            if self.smaller_of(index, up) != index {
                break;
            }
            self.swap(index, up);
            index = up;
        }
    }

    /// Moves the item at `index` toward the leaves until no child is smaller
    ///
    /// # Panics
    /// If `index` is not a live position.
    fn sink(&mut self, mut index: usize) {
        self.assert_sink_swim_arg(index);

        loop {
            let left = left_child(index);
            let right = right_child(index);
            // The tree is complete, so a missing left child means no children.
            if !self.in_bounds(left) {
                break;
            }

            let child = self.smaller_of(left, right);
            if self.priority(child) >= self.priority(index) {
                break;
            }
            self.swap(index, child);
            index = child;
        }
    }

    /// Restores heap order at `index` after its priority changed from `old`
    fn resettle(&mut self, index: usize, old: &P) {
        if self.priority(index) > old {
            self.sink(index);
        } else {
            self.swim(index);
        }
    }
}

impl<T: PartialEq, P: Ord> ArrayHeap<T, P> {
    /// Returns true if some live item equals `item`
    pub fn contains(&self, item: &T) -> bool {
        self.iter().any(|(candidate, _)| candidate == item)
    }

    /// Returns the priority of some live item equal to `item`
    ///
    /// With duplicates, which match is reported is unspecified.
    pub fn priority_of(&self, item: &T) -> Option<&P> {
        self.iter()
            .find(|(candidate, _)| *candidate == item)
            .map(|(_, priority)| priority)
    }

    /// Finds a live item equal to `item` whose priority is not yet `priority`
    fn find_stale(&self, item: &T, priority: &P) -> Option<usize> {
        (ROOT..=self.size).find(|&index| {
            matches!(self.slot(index), Some(slot) if slot.item == *item && slot.priority != *priority)
        })
    }
}

impl<T: PartialEq, P: Ord + Clone> ExtrinsicPq<T, P> for ArrayHeap<T, P> {
    fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY - 1)
    }

    fn size(&self) -> usize {
        self.size
    }

    fn insert(&mut self, item: T, priority: P) {
        self.push_slot(Slot { item, priority });
    }

    fn peek(&self) -> Option<&T> {
        self.slot(ROOT).map(|slot| &slot.item)
    }

    fn remove_min(&mut self) -> Option<T> {
        self.pop_slot().map(|slot| slot.item)
    }

    fn change_priority(&mut self, item: &T, priority: P) -> usize {
        // Resettling moves other slots, including matches not yet visited, so
        // rescan from the root after every fix. A slot already holding the new
        // priority never needs a fix, which bounds the loop by the match count.
        while let Some(index) = self.find_stale(item, &priority) {
            let Some(slot) = self.slots[index].as_mut() else {
                break;
            };
            let old = std::mem::replace(&mut slot.priority, priority.clone());
            self.resettle(index, &old);
            trace!("changed priority at position {index}");
        }

        self.iter().filter(|(candidate, _)| *candidate == item).count()
    }
}

impl<T, P: Ord> Default for ArrayHeap<T, P> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY - 1)
    }
}

impl<T, P: Ord> Extend<(T, P)> for ArrayHeap<T, P> {
    fn extend<I: IntoIterator<Item = (T, P)>>(&mut self, iter: I) {
        for (item, priority) in iter {
            self.push_slot(Slot { item, priority });
        }
    }
}

impl<T, P: Ord> FromIterator<(T, P)> for ArrayHeap<T, P> {
    fn from_iter<I: IntoIterator<Item = (T, P)>>(iter: I) -> Self {
        let mut heap = Self::default();
        heap.extend(iter);
        heap
    }
}
