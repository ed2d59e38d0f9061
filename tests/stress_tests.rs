//! Stress tests that push the heap through large operation counts
//!
//! These tests perform large numbers of operations in various patterns
//! to catch edge cases and verify correctness under load.

use keyed_fibonacci_heap::{FibonacciHeap, KeyedHeap};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;

/// Test massive numbers of inserts and extractions
fn test_massive_operations<H: KeyedHeap<i32, i32>>() {
    let mut heap = H::new();

    for i in 0..1000 {
        heap.insert(i, i).unwrap();
    }
    assert_eq!(heap.len(), 1000);

    for i in 0..1000 {
        assert_eq!(heap.extract_minimum(), Some((i, i)));
    }
    assert!(heap.is_empty());
}

/// Test many decrease_priority operations
fn test_many_decreases<H: KeyedHeap<i32, i32>>() {
    let mut heap = H::new();

    for i in 0..500 {
        heap.insert(i, 10000 + i).unwrap();
    }
    // Force real trees before cutting.
    heap.insert(-1, -1).unwrap();
    assert_eq!(heap.extract_minimum(), Some((-1, -1)));

    for i in (0..500).rev() {
        assert!(heap.decrease_priority(&i, i).is_ok());
    }

    for i in 0..500 {
        assert_eq!(heap.extract_minimum(), Some((i, i)));
    }
}

/// Test alternating insert and extract
fn test_alternating_ops<H: KeyedHeap<i32, i32>>() {
    let mut heap = H::new();

    for i in 0..200 {
        heap.insert(i * 2, i).unwrap();
        heap.insert(i * 2 + 1, i + 1000).unwrap();
        assert_eq!(heap.extract_minimum(), Some((i * 2, i)));
    }
    assert_eq!(heap.len(), 200);

    let mut previous = i32::MIN;
    while let Some((_, p)) = heap.extract_minimum() {
        assert!(p >= previous);
        previous = p;
    }
}

/// Test deleting elements in random order
fn test_random_deletes<H: KeyedHeap<i32, i32>>(seed: u64) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut heap = H::new();
    let mut elements: Vec<i32> = (0..800).collect();

    for &e in &elements {
        heap.insert(e, rng.gen_range(-5000..5000)).unwrap();
    }
    if let Some((e, _)) = heap.extract_minimum() {
        elements.retain(|&x| x != e);
    }

    elements.shuffle(&mut rng);
    let (deleted, kept) = elements.split_at(elements.len() / 2);
    for e in deleted {
        assert!(heap.delete(e).is_some());
        assert!(!heap.contains(e));
    }
    assert_eq!(heap.len(), kept.len());

    let mut remaining = BTreeSet::new();
    while let Some((e, _)) = heap.extract_minimum() {
        remaining.insert(e);
    }
    let expected: BTreeSet<i32> = kept.iter().copied().collect();
    assert_eq!(remaining, expected);
}

/// Interleaves every operation with random arguments and checks the
/// structure as it goes
fn test_random_mix(seed: u64) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut heap: FibonacciHeap<u32, i64> = FibonacciHeap::new();

    for step in 0..5000 {
        let element = rng.gen_range(0..300);
        match rng.gen_range(0..10) {
            0..=3 => {
                let _ = heap.insert(element, rng.gen_range(-10_000..10_000));
            }
            4..=5 => {
                if let Some(current) = heap.priority(&element).copied() {
                    let lowered = current - rng.gen_range(1..500);
                    heap.decrease_priority(&element, lowered).unwrap();
                }
            }
            6..=7 => {
                let before = heap.minimum_priority().copied();
                let extracted = heap.extract_minimum().map(|(_, p)| p);
                assert_eq!(extracted, before);
            }
            8 => {
                heap.delete(&element);
            }
            _ => {
                let mut other = FibonacciHeap::new();
                for offset in 0..rng.gen_range(0..20) {
                    let _ = other.insert(1000 + step * 20 + offset, rng.gen_range(-100..100));
                }
                heap.append(&mut other).unwrap();
                assert!(other.is_empty());
            }
        }
        if step % 50 == 0 {
            assert!(heap.verify_structure(), "broken structure at step {step}");
        }
    }
    assert!(heap.verify_structure());
}

#[test]
fn test_fibonacci_massive() {
    test_massive_operations::<FibonacciHeap<i32, i32>>();
}

#[test]
fn test_fibonacci_many_decreases() {
    test_many_decreases::<FibonacciHeap<i32, i32>>();
}

#[test]
fn test_fibonacci_alternating() {
    test_alternating_ops::<FibonacciHeap<i32, i32>>();
}

#[test]
fn test_fibonacci_random_deletes() {
    for seed in 0..5 {
        test_random_deletes::<FibonacciHeap<i32, i32>>(seed);
    }
}

#[test]
fn test_fibonacci_random_mix() {
    for seed in [1, 7, 42, 1234] {
        test_random_mix(seed);
    }
}

#[test]
fn test_fibonacci_sorted_sequence_deep_trees() {
    // One extraction over 4097 roots leaves a few high-rank trees, so the
    // decreases below cut deep nodes and trigger cascading cuts.
    let mut heap = FibonacciHeap::new();
    for i in 0..4096u32 {
        heap.insert(i, i64::from(i)).unwrap();
    }
    heap.insert(u32::MAX, -1).unwrap();
    heap.extract_minimum();
    assert!(heap.verify_structure());

    for i in (1..4096u32).rev().step_by(3) {
        heap.decrease_priority(&i, -i64::from(i)).unwrap();
    }
    assert!(heap.verify_structure());

    let sorted = heap.into_sorted_vec();
    assert_eq!(sorted.len(), 4096);
    assert!(sorted.windows(2).all(|w| w[0].1 <= w[1].1));
}
