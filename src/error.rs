//! Error type for operations that require a non-empty list.
//!
//! A single error kind covers the whole crate: [`EmptyListError`], returned
//! by any operation whose contract requires at least one element (`head`,
//! `tail`, `last`, `fold_left1`, `fold_right1`, `scan_left1`). The error
//! carries the name of the offending operation for diagnostics and is never
//! recovered internally; it always propagates to the caller.

use thiserror::Error;

/// Error returned when an operation requiring a non-empty list is applied
/// to the empty list.
///
/// # Examples
///
/// ```rust
/// use conslist::List;
///
/// let empty: List<i32> = List::new();
/// let error = empty.head().unwrap_err();
/// assert_eq!(error.operation(), "head");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("`{operation}` expects a non-empty list")]
pub struct EmptyListError {
    /// Name of the operation whose non-empty contract was violated.
    operation: &'static str,
}

impl EmptyListError {
    /// Creates an error naming the violated operation.
    #[inline]
    #[must_use]
    pub(crate) const fn new(operation: &'static str) -> Self {
        Self { operation }
    }

    /// Returns the name of the operation that was applied to an empty list.
    #[inline]
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        self.operation
    }
}

// =============================================================================
// Tests
// =============================================================================
