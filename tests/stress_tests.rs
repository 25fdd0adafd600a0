//! Extreme stress tests that really push the heap to its limits
//!
//! These tests perform large numbers of operations in various patterns
//! and compare against `std::collections::BinaryHeap` as a reference.

use binomial_heap::sort::heap_sort;
use binomial_heap::{BinomialHandle, BinomialHeap, HeapError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Test massive numbers of inserts and pops
#[test]
fn test_massive_operations() {
    let mut heap = BinomialHeap::new();

    for i in 0..10_000 {
        heap.insert(i);
    }
    assert_eq!(heap.len(), 10_000);
    assert_eq!(heap.check_invariants(), Ok(()));

    for i in 0..10_000 {
        assert_eq!(heap.extract_min(), Ok(i));
    }
    assert!(heap.is_empty());
}

/// Test many decrease_key operations
#[test]
fn test_many_decrease_keys() {
    let mut heap = BinomialHeap::new();
    let handles = heap.multi_insert((0..2000).map(|i| 100_000 + i));

    for (i, handle) in handles.iter().enumerate() {
        assert!(heap.decrease_key(handle, i as i32).is_ok());
    }
    assert_eq!(heap.check_invariants(), Ok(()));

    for i in 0..2000 {
        assert_eq!(heap.extract_min(), Ok(i));
    }
}

/// Random mixed workload checked against BinaryHeap
#[test]
fn test_random_ops_against_binary_heap() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut heap = BinomialHeap::new();
    let mut reference = BinaryHeap::new();

    for step in 0..20_000 {
        if rng.gen_bool(0.6) {
            let key: i32 = rng.gen_range(-1000..1000);
            heap.insert(key);
            reference.push(Reverse(key));
        } else {
            let expected = reference.pop().map(|Reverse(k)| k);
            assert_eq!(heap.pop(), expected);
        }

        assert_eq!(heap.len(), reference.len());
        assert_eq!(
            heap.peek().map(|k| *k),
            reference.peek().map(|Reverse(k)| *k)
        );
        if step % 1000 == 0 {
            assert_eq!(heap.check_invariants(), Ok(()));
        }
    }
}

/// Random decrease_key and remove against a plain vector model
#[test]
fn test_random_handle_ops() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut heap = BinomialHeap::new();
    let mut live: Vec<(BinomialHandle<i64>, i64)> = Vec::new();

    for _ in 0..5000 {
        match rng.gen_range(0..4) {
            0 | 1 => {
                let key = rng.gen_range(0..1_000_000);
                live.push((heap.insert(key), key));
            }
            2 if !live.is_empty() => {
                let idx = rng.gen_range(0..live.len());
                let new_key = live[idx].1 - rng.gen_range(1..1000);
                heap.decrease_key(&live[idx].0, new_key).unwrap();
                live[idx].1 = new_key;
            }
            3 if !live.is_empty() => {
                let idx = rng.gen_range(0..live.len());
                let (handle, key) = live.swap_remove(idx);
                assert_eq!(heap.remove(handle), Ok(key));
            }
            _ => {}
        }
        assert_eq!(heap.len(), live.len());
        let expected_min = live.iter().map(|(_, k)| *k).min();
        assert_eq!(heap.peek().map(|k| *k), expected_min);
    }

    assert_eq!(heap.check_invariants(), Ok(()));
    let mut expected: Vec<i64> = live.iter().map(|(_, k)| *k).collect();
    expected.sort();
    assert_eq!(heap.into_sorted_vec(), expected);
}

/// Test merge with large heaps
#[test]
fn test_large_merge() {
    let mut heap1 = BinomialHeap::new();
    let mut heap2 = BinomialHeap::new();

    for i in 0..5000 {
        heap1.insert(i * 2);
        heap2.insert(i * 2 + 1);
    }

    heap1.merge(heap2);
    assert_eq!(heap1.len(), 10_000);
    assert_eq!(heap1.check_invariants(), Ok(()));

    for i in 0..10_000 {
        assert_eq!(heap1.extract_min(), Ok(i));
    }
}

/// Test repeated merging of many small heaps
#[test]
fn test_many_small_merges() {
    let mut total = BinomialHeap::new();
    for chunk in 0..500 {
        let small: BinomialHeap<i32> = (0..7).map(|i| chunk * 7 + i).collect();
        total.merge(small);
    }
    assert_eq!(total.len(), 3500);
    assert_eq!(total.check_invariants(), Ok(()));
    assert_eq!(total.into_sorted_vec(), (0..3500).collect::<Vec<_>>());
}

/// Test alternating insert and pop
#[test]
fn test_alternating_ops() {
    let mut heap = BinomialHeap::new();

    for i in 0..2000 {
        heap.insert(i * 2);
        heap.insert(i * 2 + 1);
        assert!(heap.extract_min().is_ok());
    }
    assert_eq!(heap.len(), 2000);

    while heap.extract_min().is_ok() {}
    assert_eq!(heap.extract_min(), Err(HeapError::EmptyHeap));
}

/// Heap sort of a large random input matches the standard library sort
#[test]
fn test_heap_sort_random() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut values: Vec<u32> = (0..50_000).map(|_| rng.gen_range(0..50_000)).collect();
    let mut expected = values.clone();
    expected.sort_unstable();
    heap_sort(&mut values);
    assert_eq!(values, expected);
}
