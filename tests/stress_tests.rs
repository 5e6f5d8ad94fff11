//! Stress tests that push the heap through growth and heavy churn
//!
//! These tests perform large numbers of operations in various patterns
//! to catch edge cases and verify correctness under load.

use extrinsic_heap::{ArrayHeap, ExtrinsicPq};

/// Test massive numbers of inserts and removals
fn test_massive_operations<H: ExtrinsicPq<i32, i32>>() {
    let mut heap = H::new();

    for i in (0..5000).rev() {
        heap.insert(i, i);
    }
    assert_eq!(heap.size(), 5000);

    for i in 0..5000 {
        assert_eq!(heap.remove_min(), Some(i));
    }
    assert!(heap.is_empty());
}

/// Test many priority changes on unique items
fn test_many_priority_changes<H: ExtrinsicPq<i32, i32>>() {
    let mut heap = H::new();

    for i in 0..500 {
        heap.insert(i, 10000 + i);
    }

    // Reverse the order entirely
    for i in 0..500 {
        assert_eq!(heap.change_priority(&i, 500 - i), 1);
    }

    for i in (0..500).rev() {
        assert_eq!(heap.remove_min(), Some(i));
    }
}

/// Test alternating insert and remove
fn test_alternating_ops<H: ExtrinsicPq<i32, i32>>() {
    let mut heap = H::new();

    for i in 0..200 {
        heap.insert(i, i * 2);
        heap.insert(i + 1000, i * 2 + 1);
        assert!(heap.remove_min().is_some());
    }
    assert_eq!(heap.size(), 200);

    let mut drained = 0;
    while heap.remove_min().is_some() {
        drained += 1;
    }
    assert_eq!(drained, 200);
}

/// Test many duplicate items being moved at once
fn test_duplicate_item_churn<H: ExtrinsicPq<i32, i32>>() {
    let mut heap = H::new();

    // Items 0..10, each inserted 30 times with scattered priorities
    for round in 0..30 {
        for item in 0..10 {
            heap.insert(item, (round * 37 + item * 11) % 97);
        }
    }

    // Send item 0 to the back and item 9 to the front
    assert_eq!(heap.change_priority(&0, 1000), 30);
    assert_eq!(heap.change_priority(&9, -1000), 30);

    for _ in 0..30 {
        assert_eq!(heap.remove_min(), Some(9));
    }
    for _ in 0..240 {
        assert!(matches!(heap.remove_min(), Some(1..=8)));
    }
    for _ in 0..30 {
        assert_eq!(heap.remove_min(), Some(0));
    }
    assert!(heap.is_empty());
}

#[test]
fn test_array_heap_massive_operations() {
    test_massive_operations::<ArrayHeap<i32, i32>>();
}

#[test]
fn test_array_heap_many_priority_changes() {
    test_many_priority_changes::<ArrayHeap<i32, i32>>();
}

#[test]
fn test_array_heap_alternating_ops() {
    test_alternating_ops::<ArrayHeap<i32, i32>>();
}

#[test]
fn test_array_heap_duplicate_item_churn() {
    test_duplicate_item_churn::<ArrayHeap<i32, i32>>();
}

#[test]
fn test_array_heap_invariant_under_churn() {
    let mut heap: ArrayHeap<u32, u32> = ArrayHeap::new();
    let mut state = 0x2545_f491_u32;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state
    };

    for _ in 0..3000 {
        match next() % 4 {
            0 | 1 => heap.insert(next() % 64, next() % 1000),
            2 => {
                heap.remove_min();
            }
            _ => {
                heap.change_priority(&(next() % 64), next() % 1000);
            }
        }
        assert_eq!(heap.check_invariant(), Ok(()));
    }
}
