//! Binomial Heap for Rust
//!
//! This crate provides a binomial heap: a mergeable priority queue built from
//! a forest of binomial trees, at most one per degree.
//!
//! # Features
//!
//! - O(1) amortized insert, O(1) find-min
//! - O(log n) extract-min and merge
//! - Handle-based `decrease_key` and `remove` that keep every handle valid
//! - Custom orderings through the [`Compare`] trait (closures included)
//! - A [`heap_sort`](sort::heap_sort) routine built on the heap
//!
//! # Example
//!
//! ```rust
//! use binomial_heap::{BinomialHeap, HeapError};
//!
//! let mut heap = BinomialHeap::new();
//! let handle1 = heap.insert(5);
//! heap.insert(3);
//! heap.decrease_key(&handle1, 1).unwrap();
//! assert_eq!(*heap.find_min().unwrap(), 1);
//!
//! let mut other: BinomialHeap<i32> = [4, 2].into_iter().collect();
//! heap.merge_from(&mut other);
//! assert!(other.is_empty());
//!
//! assert_eq!(heap.into_sorted_vec(), vec![1, 2, 3, 4]);
//! assert_eq!(BinomialHeap::<i32>::new().extract_min(), Err(HeapError::EmptyHeap));
//! ```
//!
//! # Threading
//!
//! Heaps and handles are built on `Rc`/`RefCell` and are neither `Send` nor
//! `Sync`; a heap and all of its handles stay on the thread that created them.

pub mod binomial;
pub mod compare;
pub mod error;
mod node;
pub mod sort;

pub use binomial::{BinomialHandle, BinomialHeap};
pub use compare::{Compare, Natural, Reversed};
pub use error::{HeapError, InvariantError};
