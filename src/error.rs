//! Error types for heap operations
//!
//! - [`HeapError`]: returned by fallible heap operations. A failed operation
//!   never modifies the heap.
//! - [`InvariantError`]: returned by [`BinomialHeap::check_invariants`] when the
//!   forest is structurally inconsistent.
//!
//! [`BinomialHeap::check_invariants`]: crate::binomial::BinomialHeap::check_invariants

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The heap holds no keys (`find_min` / `extract_min`)
    EmptyHeap,
    /// No key in the heap compares equal to the searched key
    KeyNotFound,
    /// The new key passed to `decrease_key` is not strictly less than the current key
    KeyNotDecreased,
    /// The handle is no longer valid (element was removed) or belongs to another heap
    InvalidHandle,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::EmptyHeap => write!(f, "heap is empty"),
            HeapError::KeyNotFound => write!(f, "key not found in heap"),
            HeapError::KeyNotDecreased => {
                write!(f, "new key is not less than current key")
            }
            HeapError::InvalidHandle => {
                write!(f, "handle is no longer valid or belongs to another heap")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// Error returned when the heap's structural invariants are violated.
///
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heap_error_display() {
        assert_eq!(HeapError::EmptyHeap.to_string(), "heap is empty");
        assert_eq!(HeapError::KeyNotFound.to_string(), "key not found in heap");
        assert!(HeapError::KeyNotDecreased.to_string().contains("not less"));
        assert!(HeapError::InvalidHandle.to_string().contains("handle"));
    }

    #[test]
    fn test_invariant_error_message() {
        let err = InvariantError::new("slot 3 holds a tree of degree 2");
        assert_eq!(err.message(), "slot 3 holds a tree of degree 2");
        assert_eq!(err.to_string(), err.message());
    }

    #[test]
    fn test_errors_are_std_errors() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&HeapError::EmptyHeap);
        assert_error(&InvariantError::new("x"));
    }
}
