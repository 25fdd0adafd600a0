//! Heap sort on top of [`BinomialHeap`]
//!
//! The slice is loaded into a heap and overwritten in place by repeated
//! extraction, smallest (under the comparator) first.
//!
//! # Example
//!
//! ```rust
//! use binomial_heap::sort::{heap_sort, heap_sort_by};
//!
//! let mut values = [5, 1, 4, 2, 3];
//! heap_sort(&mut values);
//! assert_eq!(values, [1, 2, 3, 4, 5]);
//!
//! heap_sort_by(&mut values, |a: &i32, b: &i32| b.cmp(a));
//! assert_eq!(values, [5, 4, 3, 2, 1]);
//! ```

use crate::binomial::BinomialHeap;
use crate::compare::{Compare, Natural};
use log::debug;

/// Sorts a slice in ascending order
pub fn heap_sort<T: Ord + Clone>(values: &mut [T]) {
    heap_sort_by(values, Natural);
}

/// Sorts a slice by the given comparator
///
/// Not stable: keys that compare equal may change relative order.
pub fn heap_sort_by<T: Clone, C: Compare<T>>(values: &mut [T], compare: C) {
    let mut heap = BinomialHeap::from_iter_with(values.iter().cloned(), compare);
    debug!("heap_sort: sorting {} keys", heap.len());
    for (slot, key) in values.iter_mut().zip(std::iter::from_fn(|| heap.pop())) {
        *slot = key;
    }
}
