//! Extrinsic Priority Queues for Rust
//!
//! This crate provides a binary min-heap whose ordering key is supplied
//! separately from the stored item. Priorities can be changed after insertion
//! by naming the item again, which makes the queue usable for algorithms that
//! revise their frontier, such as Dijkstra's shortest path or event schedulers.
//!
//! # Features
//!
//! - **Array Heap**: O(log n) insert and remove-min, O(1) peek, and
//!   change-priority by item equality with support for duplicate items
//! - **Growable buffer**: capacity doubles on demand and never shrinks
//! - **Float priorities**: defaults to [`OrderedFloat<f64>`], a totally ordered float
//!
//! # Example
//!
//! ```rust
//! use extrinsic_heap::{ArrayHeap, ExtrinsicPq};
//!
//! let mut heap: ArrayHeap<char, u32> = ArrayHeap::new();
//! heap.insert('b', 2);
//! heap.insert('a', 5);
//! heap.change_priority(&'a', 1);
//! assert_eq!(heap.peek(), Some(&'a'));
//! assert_eq!(heap.remove_min(), Some('a'));
//! assert_eq!(heap.size(), 1);
//! ```

pub mod array_heap;
pub mod traits;

// Re-export the main types for convenience
pub use array_heap::{ArrayHeap, DEFAULT_CAPACITY};
pub use ordered_float::OrderedFloat;
pub use traits::{ExtrinsicPq, HeapError};
