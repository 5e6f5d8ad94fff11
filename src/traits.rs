//! Common traits and error types for extrinsic priority queues
//!
//! An extrinsic priority queue orders its items by a priority that is supplied
//! alongside each item rather than derived from the item itself. Priorities can
//! be changed after insertion by naming the item again; items are located by
//! equality, so two equal items are indistinguishable to the queue.
//!
//! - [`ExtrinsicPq`]: the capability contract every queue in this crate implements
//! - [`HeapError`]: errors reported by fallible and diagnostic operations

use std::fmt;

/// Error type for heap operations
///
/// Most heap operations cannot fail: an empty queue is reported through
/// `Option`, not through this type. `HeapError` covers allocation failure
/// during growth and the structural checks behind
/// [`ArrayHeap::check_invariant`](crate::array_heap::ArrayHeap::check_invariant).
/// The internal sink and swim walks panic with the `Display` of the
/// position variants, since reaching them means the buffer is corrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The position is 0 or greater than the number of live items
    PositionOutOfBounds { index: usize, size: usize },
    /// The position is inside the live region but holds no item
    EmptyPosition { index: usize },
    /// A position past the live region still holds an item
    OccupiedBeyondSize { index: usize, size: usize },
    /// A child has a smaller priority than its parent
    InvariantViolated { index: usize, parent: usize },
    /// The buffer could not grow to the requested number of slots
    CapacityOverflow { requested: usize },
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::PositionOutOfBounds { index, size } => {
                write!(f, "position {index} is outside the live region 1..={size}")
            }
            HeapError::EmptyPosition { index } => {
                write!(f, "position {index} holds no item")
            }
            HeapError::OccupiedBeyondSize { index, size } => {
                write!(f, "position {index} holds an item but the heap size is {size}")
            }
            HeapError::InvariantViolated { index, parent } => {
                write!(
                    f,
                    "priority at position {index} is smaller than at its parent {parent}"
                )
            }
            HeapError::CapacityOverflow { requested } => {
                write!(f, "cannot grow heap buffer to {requested} slots")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// Capability contract for extrinsic min-priority queues
///
/// Items of type `T` are stored with a priority of type `P`. The item with the
/// smallest priority is returned first; among equal priorities the order is
/// unspecified.
///
/// # Example
///
/// ```rust
/// use extrinsic_heap::{ArrayHeap, ExtrinsicPq};
///
/// let mut pq: ArrayHeap<&str, i32> = ArrayHeap::new();
/// pq.insert("write tests", 3);
/// pq.insert("fix bug", 1);
/// pq.insert("review", 2);
///
/// pq.change_priority(&"write tests", 0);
/// assert_eq!(pq.remove_min(), Some("write tests"));
/// assert_eq!(pq.peek(), Some(&"fix bug"));
/// assert_eq!(pq.size(), 2);
/// ```
pub trait ExtrinsicPq<T, P: Ord> {
    /// Creates a new empty queue
    fn new() -> Self;

    /// Returns the number of items in the queue
    fn size(&self) -> usize;

    /// Returns true if the queue holds no items
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Inserts an item with the given priority
    ///
    /// Neither items nor priorities need to be unique.
    ///
    /// # Time Complexity
    /// O(log n), plus an O(n) copy when the buffer grows.
    fn insert(&mut self, item: T, priority: P);

    /// Returns the item with the smallest priority without removing it
    ///
    /// # Time Complexity
    /// O(1)
    fn peek(&self) -> Option<&T>;

    /// Removes and returns the item with the smallest priority
    ///
    /// # Time Complexity
    /// O(log n)
    fn remove_min(&mut self) -> Option<T>;

    /// Sets the priority of every item equal to `item`
    ///
    /// Returns the number of matching items. When nothing matches, the
    /// queue is left untouched and 0 is returned.
    ///
    /// # Time Complexity
    /// O(k · n) for k matching items in the array heap.
    fn change_priority(&mut self, item: &T, priority: P) -> usize;
}
