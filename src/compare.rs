//! Comparators
//!
//! A heap orders its keys with a [`Compare`] value captured at construction.
//! The smallest key under the comparator is extracted first.
//!
//! - [`Natural`]: ascending order through `Ord` (the default)
//! - [`Reversed`]: descending order through `Ord`, turning the heap into a max-heap
//! - any `Fn(&T, &T) -> Ordering` closure
//!
//! # Example
//!
//! ```rust
//! use binomial_heap::BinomialHeap;
//!
//! // Order strings by length
//! let mut heap = BinomialHeap::with_comparator(|a: &&str, b: &&str| a.len().cmp(&b.len()));
//! heap.insert("three");
//! heap.insert("a");
//! heap.insert("to");
//! assert_eq!(heap.extract_min(), Ok("a"));
//! ```

use std::cmp::Ordering;

/// A total order over `T`
pub trait Compare<T: ?Sized> {
    /// Compares two keys
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// Returns true if `a` orders strictly before `b`
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}

/// Ascending order given by `T: Ord`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Descending order given by `T: Ord`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reversed;

impl<T: Ord + ?Sized> Compare<T> for Reversed {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        b.cmp(a)
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
