//! # conslist
//!
//! A persistent (immutable) singly-linked cons list with structural sharing,
//! designed as the sequence backbone for a language evaluator.
//!
//! ## Overview
//!
//! The crate provides a single data structure, [`List`], together with the
//! standard operation set over it:
//!
//! - **Construction & conversion**: `cons`, `from_slice`, `range`, `to_vec`,
//!   packed text construction via `from_text`
//! - **Traversal**: `head`, `tail`, `last`, `len`, `contains`
//! - **Higher-order transforms**: `map`, `filter`, folds, scans, `all`, `any`
//! - **Combinators**: `append`, `concat`, `zip`, `zip_with`, `join`, `split`
//! - **Ordering**: `sort`, `sort_by` (stable, comparator-driven)
//! - **Windowing**: `take`, `drop_first`, `reverse`
//!
//! All operations return new lists without modifying the original; suffixes
//! are shared node-for-node, so `cons` and `tail` are O(1). Traversals are
//! iterative throughout; list length never bounds call-stack depth.
//!
//! Operations whose contract requires a non-empty list (`head`, `tail`,
//! `last`, `fold_left1`, `fold_right1`, `scan_left1`) return
//! [`EmptyListError`] naming the offending operation; everything else is
//! total, including over the empty list.
//!
//! ## Example
//!
//! ```rust
//! use conslist::List;
//!
//! let list = List::range(1, 5);
//! let doubled = list.map(|x| x * 2);
//! assert_eq!(doubled.to_vec(), vec![2, 4, 6, 8, 10]);
//!
//! // Structural sharing: the original list is preserved
//! let extended = list.cons(0);
//! assert_eq!(list.len(), 5);
//! assert_eq!(extended.len(), 6);
//! ```
//!
//! ## Feature Flags
//!
//! - `arc`: use `Arc` instead of `Rc` for node ownership, making lists
//!   shareable across threads

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

pub mod error;
pub mod list;

pub use error::EmptyListError;
pub use list::List;
pub use list::ListIntoIterator;
pub use list::ListIterator;

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types.
///
/// # Usage
///
/// ```rust
/// use conslist::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::EmptyListError;
    pub use crate::list::List;
    pub use crate::list::ListIntoIterator;
    pub use crate::list::ListIterator;
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod reference_counter_tests {
    use super::ReferenceCounter;
    use rstest::rstest;

    #[rstest]
    fn test_reference_counter_clone() {
        let reference_counter: ReferenceCounter<i32> = ReferenceCounter::new(42);
        let reference_counter_clone = reference_counter.clone();
        assert_eq!(*reference_counter, *reference_counter_clone);
    }

    #[rstest]
    fn test_reference_counter_strong_count() {
        let reference_counter: ReferenceCounter<i32> = ReferenceCounter::new(42);
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 1);
        let reference_counter_clone = reference_counter.clone();
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 2);
        drop(reference_counter_clone);
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 1);
    }
}
