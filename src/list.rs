//! Persistent (immutable) singly-linked cons list.
//!
//! This module provides [`List`], an immutable singly-linked list that uses
//! structural sharing for efficient operations.
//!
//! # Overview
//!
//! `List` is a cons-list in the Lisp/ML tradition. It provides:
//!
//! - O(1) prepend (`cons`)
//! - O(1) head and tail access
//! - O(n) append that shares the right operand verbatim as its tail
//! - Eager, stack-safe transforms (`map`, `filter`, folds, scans)
//! - Separator-based `split` and `join` over nested lists
//!
//! All operations return new lists without modifying the original, and
//! structural sharing ensures memory efficiency. Every traversal is
//! iterative (or staged through a contiguous `Vec`), so list length never
//! bounds call-stack depth.
//!
//! # Examples
//!
//! ```rust
//! use conslist::List;
//!
//! let list = List::new().cons(3).cons(2).cons(1);
//! assert_eq!(list.head().unwrap(), &1);
//! assert_eq!(list.len(), 3);
//!
//! // Structural sharing: the original list is preserved
//! let extended = list.cons(0);
//! assert_eq!(list.len(), 3);     // Original unchanged
//! assert_eq!(extended.len(), 4); // New list with prepended element
//!
//! // Build from an iterator
//! let list: List<i32> = (1..=5).collect();
//! assert_eq!(list.iter().sum::<i32>(), 15);
//! ```
//!
//! # Structural Sharing
//!
//! When you create a new list by prepending an element with `cons`, the new
//! list shares all nodes with the original list:
//!
//! ```text
//! list1: 1 -> 2 -> 3 -> nil
//! list2 = list1.cons(0): 0 -> [1 -> 2 -> 3 -> nil]  // shares [1, 2, 3] with list1
//! ```
//!
//! Suffix sharing is a contract, not an optimization: `append(xs, ys)`
//! rebuilds only the nodes of `xs` and links the last rebuilt node directly
//! to `ys`, and callers may rely on this for O(1) prefixing.
//!
//! # Packed Runs
//!
//! A list whose elements were bulk-constructed from contiguous storage (in
//! particular, [`from_text`](List::from_text)) is represented as a single shared
//! slice rather than a chain of nodes. `append` detects two packed operands
//! and concatenates the slices natively instead of splicing node-by-node.
//! The representation is an internal detail: packed and node-based lists with
//! the same elements compare equal and behave identically.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;

use crate::ReferenceCounter;
use crate::error::EmptyListError;

/// Internal node structure for the list.
///
/// Each node contains an element and the remainder of the list. A node's
/// `rest` link is never reassigned after construction; `ReferenceCounter`
/// enables suffix sharing between lists. The structure is acyclic by
/// construction, so plain reference counting reclaims it without leaks.
struct Node<T> {
    /// The element stored in this node.
    element: T,
    /// The remainder of the list after this node.
    rest: List<T>,
}

/// Internal representation of a list.
enum Repr<T> {
    /// The canonical empty list. A unit variant, so every empty list is the
    /// same case with no allocation behind it.
    Nil,
    /// A cons cell.
    Node(ReferenceCounter<Node<T>>),
    /// A contiguous run of elements shared as a slice. Always non-empty
    /// (`start < elements.len()`) and always terminal: a packed run is the
    /// entire remainder of the list.
    Packed {
        /// The shared backing slice.
        elements: ReferenceCounter<[T]>,
        /// Index of the first live element within `elements`.
        start: usize,
    },
}

impl<T> Clone for Repr<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Nil => Self::Nil,
            Self::Node(node) => Self::Node(node.clone()),
            Self::Packed { elements, start } => Self::Packed {
                elements: elements.clone(),
                start: *start,
            },
        }
    }
}

/// A persistent (immutable) singly-linked list.
///
/// `List` is an immutable data structure that uses structural sharing to
/// efficiently support functional programming patterns. It is intended as
/// the sequence representation for a language evaluator, but works over any
/// element type.
///
/// # Time Complexity
///
/// | Operation    | Complexity |
/// |--------------|------------|
/// | `new`        | O(1)       |
/// | `cons`       | O(1)       |
/// | `head`       | O(1)       |
/// | `tail`       | O(1)       |
/// | `len`        | O(1)       |
/// | `last`       | O(n)       |
/// | `append`     | O(n) in the left operand |
/// | `sort_by`    | O(n log n) |
///
/// # Examples
///
/// ```rust
/// use conslist::List;
///
/// let list = List::singleton(42);
/// assert_eq!(list.head().unwrap(), &42);
/// ```
pub struct List<T> {
    /// The list representation.
    repr: Repr<T>,
    /// Cached length for O(1) access.
    length: usize,
}

impl<T> Clone for List<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            repr: self.repr.clone(),
            length: self.length,
        }
    }
}

/// Dropping a long node chain naively would recurse once per node. This
/// unlinks nodes iteratively instead, stopping at the first shared suffix
/// (which stays alive for its other owners).
impl<T> Drop for List<T> {
    fn drop(&mut self) {
        let mut repr = mem::replace(&mut self.repr, Repr::Nil);
        while let Repr::Node(node) = repr {
            match ReferenceCounter::try_unwrap(node) {
                Ok(mut inner) => {
                    repr = mem::replace(&mut inner.rest.repr, Repr::Nil);
                }
                Err(_) => break,
            }
        }
    }
}

// =============================================================================
// Construction & Traversal
// =============================================================================

impl<T> List<T> {
    /// Creates a new empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let list: List<i32> = List::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            repr: Repr::Nil,
            length: 0,
        }
    }

    /// Creates a list containing a single element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let list = List::singleton(42);
    /// assert_eq!(list.len(), 1);
    /// ```
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self::new().cons(element)
    }

    /// Builds a list from a `Vec`, consuming it.
    ///
    /// Uses `Vec::pop()` to consume elements from the end, building the list
    /// right-to-left with entirely new nodes, so the result shares nothing
    /// with the input storage.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let list = List::from_vec(vec![1, 2, 3]);
    /// assert_eq!(list.head().unwrap(), &1);
    /// assert_eq!(list.len(), 3);
    /// ```
    #[must_use]
    pub fn from_vec(mut elements: Vec<T>) -> Self {
        let mut list = Self::new();
        while let Some(element) = elements.pop() {
            let length = list.length + 1;
            list = Self {
                repr: Repr::Node(ReferenceCounter::new(Node {
                    element,
                    rest: list,
                })),
                length,
            };
        }
        list
    }

    /// Prepends an element to the front of the list.
    ///
    /// This operation creates a new list with the element at the front,
    /// sharing the entire structure of the original list.
    ///
    /// # Complexity
    ///
    /// O(1) time and space
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let list = List::new().cons(3).cons(2).cons(1);
    /// assert_eq!(list.head().unwrap(), &1);
    /// assert_eq!(list.len(), 3);
    /// ```
    #[inline]
    #[must_use]
    pub fn cons(&self, element: T) -> Self {
        Self {
            repr: Repr::Node(ReferenceCounter::new(Node {
                element,
                rest: self.clone(),
            })),
            length: self.length + 1,
        }
    }

    /// Returns a reference to the first element of the list.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyListError`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let list = List::new().cons(2).cons(1);
    /// assert_eq!(list.head().unwrap(), &1);
    ///
    /// let empty: List<i32> = List::new();
    /// assert_eq!(empty.head().unwrap_err().operation(), "head");
    /// ```
    #[inline]
    pub fn head(&self) -> Result<&T, EmptyListError> {
        match &self.repr {
            Repr::Nil => Err(EmptyListError::new("head")),
            Repr::Node(node) => Ok(&node.element),
            Repr::Packed { elements, start } => Ok(&elements[*start]),
        }
    }

    /// Returns the list without its first element.
    ///
    /// The result shares structure with the original list.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyListError`] if the list is empty.
    ///
    /// # Complexity
    ///
    /// O(1) time and space
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let list = List::new().cons(3).cons(2).cons(1);
    /// let tail = list.tail().unwrap();
    /// assert_eq!(tail.head().unwrap(), &2);
    /// assert_eq!(tail.len(), 2);
    /// ```
    pub fn tail(&self) -> Result<Self, EmptyListError> {
        match self.uncons() {
            Some((_, rest)) => Ok(rest),
            None => Err(EmptyListError::new("tail")),
        }
    }

    /// Returns a reference to the final element of the list.
    ///
    /// Performs a single linear scan.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyListError`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let list: List<i32> = (1..=5).collect();
    /// assert_eq!(list.last().unwrap(), &5);
    /// ```
    pub fn last(&self) -> Result<&T, EmptyListError> {
        self.iter()
            .last()
            .ok_or_else(|| EmptyListError::new("last"))
    }

    /// Decomposes the list into its head and tail.
    ///
    /// Returns `None` if the list is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let list = List::new().cons(2).cons(1);
    /// let (head, tail) = list.uncons().unwrap();
    /// assert_eq!(*head, 1);
    /// assert_eq!(tail.head().unwrap(), &2);
    /// ```
    #[must_use]
    pub fn uncons(&self) -> Option<(&T, Self)> {
        match &self.repr {
            Repr::Nil => None,
            Repr::Node(node) => Some((&node.element, node.rest.clone())),
            Repr::Packed { elements, start } => {
                let start = *start;
                let rest = if start + 1 < elements.len() {
                    Self {
                        repr: Repr::Packed {
                            elements: elements.clone(),
                            start: start + 1,
                        },
                        length: self.length - 1,
                    }
                } else {
                    Self::new()
                };
                Some((&elements[start], rest))
            }
        }
    }

    /// Returns a reference to the element at the given index.
    ///
    /// Returns `None` if the index is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(n) where n = index
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let list = List::new().cons(3).cons(2).cons(1);
    /// assert_eq!(list.get(0), Some(&1));
    /// assert_eq!(list.get(2), Some(&3));
    /// assert_eq!(list.get(10), None);
    /// ```
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.iter().nth(index)
    }

    /// Returns the number of elements in the list.
    ///
    /// # Complexity
    ///
    /// O(1) - the length is cached
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the list contains no elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let empty: List<i32> = List::new();
    /// assert!(empty.is_empty());
    /// assert!(!empty.cons(1).is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self.repr, Repr::Nil)
    }

    /// Returns `true` if this list is stored as a contiguous packed run.
    ///
    /// Packed lists are produced by bulk construction such as
    /// [`from_text`](List::from_text); `append` routes two packed operands to
    /// native slice concatenation.
    #[inline]
    #[must_use]
    pub const fn is_packed(&self) -> bool {
        matches!(self.repr, Repr::Packed { .. })
    }

    /// Returns `true` when both lists view the same physical structure.
    ///
    /// This observes structural sharing, not value equality: two lists with
    /// equal elements in distinct nodes are *not* pointer-equal. The empty
    /// list is canonical, so two empty lists always are.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let list: List<i32> = (1..=3).collect();
    /// assert!(list.ptr_eq(&list.clone()));
    /// assert!(!list.ptr_eq(&((1..=3).collect())));
    /// ```
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::Nil, Repr::Nil) => true,
            (Repr::Node(left), Repr::Node(right)) => ReferenceCounter::ptr_eq(left, right),
            (
                Repr::Packed {
                    elements: left,
                    start: left_start,
                },
                Repr::Packed {
                    elements: right,
                    start: right_start,
                },
            ) => left_start == right_start && ReferenceCounter::ptr_eq(left, right),
            _ => false,
        }
    }

    /// Returns an iterator over references to the elements.
    ///
    /// The iterator yields elements from front to back.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let list = List::new().cons(3).cons(2).cons(1);
    /// let collected: Vec<&i32> = list.iter().collect();
    /// assert_eq!(collected, vec![&1, &2, &3]);
    /// ```
    #[inline]
    #[must_use]
    pub const fn iter(&self) -> ListIterator<'_, T> {
        ListIterator {
            repr: &self.repr,
            offset: 0,
            remaining: self.length,
        }
    }
}

// =============================================================================
// Higher-Order Transforms
// =============================================================================

impl<T> List<T> {
    /// Applies a function to each element, producing a new list.
    ///
    /// Eager and order-preserving. Staged through a contiguous `Vec`, so the
    /// recursion depth is constant regardless of list length.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let list: List<i32> = (1..=3).collect();
    /// let doubled = list.map(|x| x * 2);
    /// assert_eq!(doubled.to_vec(), vec![2, 4, 6]);
    /// ```
    #[must_use]
    pub fn map<B, F>(&self, function: F) -> List<B>
    where
        F: FnMut(&T) -> B,
    {
        let staged: Vec<B> = self.iter().map(function).collect();
        List::from_vec(staged)
    }

    /// Folds the list left-to-right.
    ///
    /// A single pass with O(1) additional space beyond the accumulator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let list: List<i32> = (1..=5).collect();
    /// let sum = list.fold_left(0, |accumulator, x| accumulator + x);
    /// assert_eq!(sum, 15);
    /// ```
    pub fn fold_left<B, F>(&self, initial: B, function: F) -> B
    where
        F: FnMut(B, &T) -> B,
    {
        self.iter().fold(initial, function)
    }

    /// Folds the list right-to-left.
    ///
    /// The list is first materialized to contiguous storage and folded
    /// backward over it. A recursive right-fold would have stack depth
    /// proportional to the list length; this implementation is stack-safe
    /// for arbitrarily long lists.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let list: List<i32> = (1..=4).collect();
    /// let result = list.fold_right(0, |x, accumulator| x - accumulator);
    /// // 1 - (2 - (3 - (4 - 0)))
    /// assert_eq!(result, -2);
    /// ```
    pub fn fold_right<B, F>(&self, initial: B, mut function: F) -> B
    where
        F: FnMut(&T, B) -> B,
    {
        let staged: Vec<&T> = self.iter().collect();
        staged
            .into_iter()
            .rev()
            .fold(initial, |accumulator, element| {
                function(element, accumulator)
            })
    }

    /// Tests whether every element satisfies the predicate.
    ///
    /// Short-circuits on the first failure. Vacuously `true` for the empty
    /// list.
    pub fn all<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().all(predicate)
    }

    /// Tests whether any element satisfies the predicate.
    ///
    /// Short-circuits on the first success. `false` for the empty list.
    pub fn any<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().any(predicate)
    }
}

impl<T: PartialEq> List<T> {
    /// Tests whether the list contains an element structurally equal to the
    /// given one.
    ///
    /// Performs a linear scan and short-circuits on the first match.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let list: List<i32> = (1..=5).collect();
    /// assert!(list.contains(&3));
    /// assert!(!list.contains(&7));
    /// ```
    #[must_use]
    pub fn contains(&self, element: &T) -> bool {
        self.iter().any(|candidate| candidate == element)
    }
}

impl<T: Clone> List<T> {
    /// Creates a list from a slice.
    ///
    /// The first element of the slice becomes the first element of the list.
    /// The elements are cloned into entirely new nodes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let list = List::from_slice(&[1, 2, 3]);
    /// assert_eq!(list.head().unwrap(), &1);
    /// assert_eq!(list.len(), 3);
    /// ```
    #[must_use]
    pub fn from_slice(slice: &[T]) -> Self {
        let mut list = Self::new();
        for element in slice.iter().rev() {
            list = list.cons(element.clone());
        }
        list
    }

    /// Materializes the list into a `Vec` in list order.
    ///
    /// Iterative, O(n) time and auxiliary space.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let list = List::new().cons(3).cons(2).cons(1);
    /// assert_eq!(list.to_vec(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    /// Keeps the elements satisfying the predicate, preserving order.
    ///
    /// Eager, staged through a contiguous `Vec` like [`map`](Self::map).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let list: List<i32> = (1..=4).collect();
    /// let evens = list.filter(|x| x % 2 == 0);
    /// assert_eq!(evens.to_vec(), vec![2, 4]);
    /// ```
    #[must_use]
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        let staged: Vec<T> = self
            .iter()
            .filter(|element| predicate(element))
            .cloned()
            .collect();
        Self::from_vec(staged)
    }

    /// Folds the list left-to-right using the first element as the initial
    /// accumulator.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyListError`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let list: List<i32> = (1..=5).collect();
    /// assert_eq!(list.fold_left1(|accumulator, x| accumulator + x), Ok(15));
    /// ```
    pub fn fold_left1<F>(&self, mut function: F) -> Result<T, EmptyListError>
    where
        F: FnMut(T, T) -> T,
    {
        let mut iter = self.iter();
        let first = iter
            .next()
            .ok_or_else(|| EmptyListError::new("fold_left1"))?
            .clone();
        Ok(iter.fold(first, |accumulator, element| {
            function(accumulator, element.clone())
        }))
    }

    /// Folds the list right-to-left using the last element as the initial
    /// accumulator.
    ///
    /// Materializes the list first, like [`fold_right`](Self::fold_right).
    ///
    /// # Errors
    ///
    /// Returns [`EmptyListError`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let list: List<i32> = (1..=4).collect();
    /// // 1 - (2 - (3 - 4))
    /// assert_eq!(list.fold_right1(|x, accumulator| x - accumulator), Ok(-2));
    /// ```
    pub fn fold_right1<F>(&self, mut function: F) -> Result<T, EmptyListError>
    where
        F: FnMut(T, T) -> T,
    {
        let mut staged: Vec<T> = self.iter().cloned().collect();
        let last = staged
            .pop()
            .ok_or_else(|| EmptyListError::new("fold_right1"))?;
        Ok(staged.into_iter().rev().fold(last, |accumulator, element| {
            function(element, accumulator)
        }))
    }

    /// Returns the list of intermediate accumulator values of a left fold.
    ///
    /// The result starts with the initial value and has length `len() + 1`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let list: List<i32> = (1..=4).collect();
    /// let scanned = list.scan_left(0, |accumulator, x| accumulator + x);
    /// assert_eq!(scanned.to_vec(), vec![0, 1, 3, 6, 10]);
    ///
    /// let empty: List<i32> = List::new();
    /// assert_eq!(empty.scan_left(0, |accumulator, x| accumulator + x).len(), 1);
    /// ```
    #[must_use]
    pub fn scan_left<B, F>(&self, initial: B, mut function: F) -> List<B>
    where
        B: Clone,
        F: FnMut(B, &T) -> B,
    {
        let mut staged = Vec::with_capacity(self.len() + 1);
        let mut accumulator = initial;
        staged.push(accumulator.clone());
        for element in self.iter() {
            accumulator = function(accumulator, element);
            staged.push(accumulator.clone());
        }
        List::from_vec(staged)
    }

    /// Returns the intermediate accumulations of a left fold seeded with the
    /// first element.
    ///
    /// The result has the same length as the input.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyListError`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let list: List<i32> = (1..=4).collect();
    /// let scanned = list.scan_left1(|accumulator, x| accumulator + x).unwrap();
    /// assert_eq!(scanned.to_vec(), vec![1, 3, 6, 10]);
    /// ```
    pub fn scan_left1<F>(&self, function: F) -> Result<Self, EmptyListError>
    where
        F: FnMut(T, &T) -> T,
    {
        let (first, rest) = self
            .uncons()
            .ok_or_else(|| EmptyListError::new("scan_left1"))?;
        Ok(rest.scan_left(first.clone(), function))
    }
}

// =============================================================================
// Multi-List Combinators
// =============================================================================

impl<T: Clone> List<T> {
    /// Appends another list to this list.
    ///
    /// Only this list's spine is rebuilt: the last rebuilt node links
    /// directly to `other`, which is shared verbatim rather than copied.
    /// Callers may rely on that sharing.
    ///
    /// When both operands are packed runs (for example, text built with
    /// [`from_text`](List::from_text)), the slices are concatenated natively
    /// instead of being spliced node-by-node.
    ///
    /// # Complexity
    ///
    /// O(n) where n = `self.len()`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let left: List<i32> = (1..=2).collect();
    /// let right: List<i32> = (3..=4).collect();
    /// let combined = left.append(&right);
    /// assert_eq!(combined.to_vec(), vec![1, 2, 3, 4]);
    ///
    /// // The right operand is shared as the tail of the result
    /// assert!(combined.drop_first(2).ptr_eq(&right));
    /// ```
    #[must_use]
    pub fn append(&self, other: &Self) -> Self {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }

        if let (
            Repr::Packed {
                elements: left,
                start: left_start,
            },
            Repr::Packed {
                elements: right,
                start: right_start,
            },
        ) = (&self.repr, &other.repr)
        {
            // Packed fast path: one contiguous copy, no node allocation.
            let mut joined: Vec<T> = Vec::with_capacity(self.length + other.length);
            joined.extend_from_slice(&left[*left_start..]);
            joined.extend_from_slice(&right[*right_start..]);
            let length = joined.len();
            return Self {
                repr: Repr::Packed {
                    elements: joined.into(),
                    start: 0,
                },
                length,
            };
        }

        // Rebuild self's spine backward onto other, leaving other intact.
        let mut spine: Vec<T> = self.iter().cloned().collect();
        let mut result = other.clone();
        while let Some(element) = spine.pop() {
            let length = result.length + 1;
            result = Self {
                repr: Repr::Node(ReferenceCounter::new(Node {
                    element,
                    rest: result,
                })),
                length,
            };
        }
        result
    }

    /// Zips this list with another list into a list of pairs.
    ///
    /// Truncates to the shorter input; mismatched lengths are not an error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let numbers: List<i32> = (1..=3).collect();
    /// let letters: List<char> = vec!['a', 'b'].into_iter().collect();
    /// let zipped = numbers.zip(&letters);
    /// assert_eq!(zipped.to_vec(), vec![(1, 'a'), (2, 'b')]);
    /// ```
    #[must_use]
    pub fn zip<U: Clone>(&self, other: &List<U>) -> List<(T, U)> {
        self.iter()
            .zip(other.iter())
            .map(|(left, right)| (left.clone(), right.clone()))
            .collect()
    }

    /// Combines this list with another list positionally using a function.
    ///
    /// Truncates to the shorter input, like [`zip`](Self::zip).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let left: List<i32> = (1..=3).collect();
    /// let right: List<i32> = (10..=30).step_by(10).collect();
    /// let sums = left.zip_with(&right, |x, y| x + y);
    /// assert_eq!(sums.to_vec(), vec![11, 22, 33]);
    /// ```
    #[must_use]
    pub fn zip_with<U, B, F>(&self, other: &List<U>, mut function: F) -> List<B>
    where
        F: FnMut(&T, &U) -> B,
    {
        self.iter()
            .zip(other.iter())
            .map(|(left, right)| function(left, right))
            .collect()
    }

    /// Sorts the list by the given total-order comparator.
    ///
    /// Stages the elements into contiguous storage, applies a stable
    /// comparison sort, and rebuilds the list, so equal elements retain
    /// their relative order. The comparator must implement a genuine total
    /// order for the result to be meaningful.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let list = List::from_slice(&[3, 1, 2]);
    /// let sorted = list.sort_by(|a, b| a.cmp(b));
    /// assert_eq!(sorted.to_vec(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn sort_by<F>(&self, mut comparator: F) -> Self
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut staged: Vec<T> = self.iter().cloned().collect();
        staged.sort_by(|left, right| comparator(left, right));
        Self::from_vec(staged)
    }

    /// Sorts the list by the element type's natural total order.
    ///
    /// Equivalent to `sort_by(T::cmp)`; stable.
    #[must_use]
    pub fn sort(&self) -> Self
    where
        T: Ord,
    {
        self.sort_by(T::cmp)
    }

    /// Returns a new list containing the first `count` elements.
    ///
    /// `count` is clamped to the list's length; `take(0)` is the empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let list: List<i32> = (1..=5).collect();
    /// assert_eq!(list.take(3).to_vec(), vec![1, 2, 3]);
    /// assert!(list.take(0).is_empty());
    /// assert_eq!(list.take(10).len(), 5);
    /// ```
    #[must_use]
    pub fn take(&self, count: usize) -> Self {
        let actual_count = count.min(self.length);
        self.iter().take(actual_count).cloned().collect()
    }

    /// Returns the list with the first `count` elements removed.
    ///
    /// `count` is clamped to the list's length. The result shares structure
    /// with the original list rather than copying it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let list: List<i32> = (1..=5).collect();
    /// assert_eq!(list.drop_first(2).to_vec(), vec![3, 4, 5]);
    /// assert!(list.drop_first(10).is_empty());
    /// ```
    #[must_use]
    pub fn drop_first(&self, count: usize) -> Self {
        let skipped = count.min(self.length);

        // A packed run can skip in one step.
        if let Repr::Packed { elements, start } = &self.repr {
            let new_start = start + skipped;
            return if new_start >= elements.len() {
                Self::new()
            } else {
                Self {
                    repr: Repr::Packed {
                        elements: elements.clone(),
                        start: new_start,
                    },
                    length: self.length - skipped,
                }
            };
        }

        let mut current = self.clone();
        for _ in 0..skipped {
            let rest = match current.uncons() {
                Some((_, rest)) => rest,
                None => break,
            };
            current = rest;
        }
        current
    }

    /// Returns a new list with elements in reverse order.
    ///
    /// Built iteratively by rebuilding onto a fresh list; O(n).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let list: List<i32> = (1..=3).collect();
    /// assert_eq!(list.reverse().to_vec(), vec![3, 2, 1]);
    /// ```
    #[must_use]
    pub fn reverse(&self) -> Self {
        let mut result = Self::new();
        for element in self.iter() {
            result = result.cons(element.clone());
        }
        result
    }
}

impl<T: Clone + PartialEq> List<T> {
    /// Partitions the list into sublists around occurrences of a separator.
    ///
    /// Matches are leftmost, greedy, and non-overlapping. A match at the very
    /// start or end of the list contributes an empty sublist at that
    /// position, and two adjacent matches contribute an empty sublist between
    /// them, so [`join`](List::join) with the same separator
    /// reconstructs the original list exactly.
    ///
    /// An empty separator splits between every element, producing one
    /// singleton sublist per element (and nothing for the empty list). A
    /// non-empty separator never matches inside input shorter than itself; in
    /// particular, splitting the empty list yields a single empty sublist.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let list = List::from_text("a,b,,c");
    /// let pieces = list.split(&List::from_text(","));
    /// assert_eq!(pieces.len(), 4);
    /// assert_eq!(pieces.get(0), Some(&List::from_text("a")));
    /// assert_eq!(pieces.get(2), Some(&List::new()));
    /// ```
    #[must_use]
    pub fn split(&self, separator: &Self) -> List<Self> {
        let elements: Vec<&T> = self.iter().collect();
        let pattern: Vec<&T> = separator.iter().collect();

        if pattern.is_empty() {
            return elements
                .into_iter()
                .map(|element| Self::singleton(element.clone()))
                .collect();
        }

        let mut pieces: Vec<Self> = Vec::new();
        let mut current: Vec<T> = Vec::new();
        let mut index = 0;
        while index < elements.len() {
            let window_end = index + pattern.len();
            let matched = window_end <= elements.len()
                && elements[index..window_end]
                    .iter()
                    .zip(&pattern)
                    .all(|(candidate, expected)| candidate == expected);
            if matched {
                pieces.push(Self::from_vec(mem::take(&mut current)));
                index = window_end;
            } else {
                current.push(elements[index].clone());
                index += 1;
            }
        }
        pieces.push(Self::from_vec(current));
        pieces.into_iter().collect()
    }
}

// =============================================================================
// Specialized Methods for Nested Lists
// =============================================================================

impl<T: Clone> List<List<T>> {
    /// Flattens a list of lists into a single list.
    ///
    /// Folds [`append`](List::append) right-to-left, so the rightmost inner
    /// list is shared verbatim as the final tail of the result rather than
    /// copied. An empty outer list yields the empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let nested: List<List<i32>> = vec![
    ///     List::from_slice(&[1, 2]),
    ///     List::new(),
    ///     List::from_slice(&[3]),
    /// ]
    /// .into_iter()
    /// .collect();
    /// assert_eq!(nested.concat().to_vec(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn concat(&self) -> List<T> {
        let mut inner: Vec<List<T>> = self.iter().cloned().collect();
        let mut result = match inner.pop() {
            None => return List::new(),
            Some(last) => last,
        };
        while let Some(list) = inner.pop() {
            result = list.append(&result);
        }
        result
    }

    /// Concatenates the inner lists, inserting the separator between each
    /// consecutive pair.
    ///
    /// An empty outer list yields the empty list; a single inner list is
    /// returned unchanged with no separator inserted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let pieces: List<List<char>> = vec![
    ///     List::from_text("a"),
    ///     List::from_text("b"),
    ///     List::new(),
    /// ]
    /// .into_iter()
    /// .collect();
    /// let joined = pieces.join(&List::from_text(","));
    /// assert_eq!(joined, List::from_text("a,b,"));
    /// ```
    #[must_use]
    pub fn join(&self, separator: &List<T>) -> List<T> {
        let mut inner: Vec<List<T>> = self.iter().cloned().collect();
        let mut result = match inner.pop() {
            None => return List::new(),
            Some(last) => last,
        };
        while let Some(list) = inner.pop() {
            result = list.append(&separator.append(&result));
        }
        result
    }
}

// =============================================================================
// Integer Ranges
// =============================================================================

impl List<i64> {
    /// Builds the list of integers from `low` to `high`, inclusive on both
    /// ends.
    ///
    /// Returns the empty list when `low > high`. Built iteratively from
    /// `high` down to `low`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// assert_eq!(List::range(1, 5).to_vec(), vec![1, 2, 3, 4, 5]);
    /// assert!(List::range(5, 1).is_empty());
    /// assert_eq!(List::range(3, 3).to_vec(), vec![3]);
    /// ```
    #[must_use]
    pub fn range(low: i64, high: i64) -> Self {
        if low > high {
            return Self::new();
        }
        let mut list = Self::new();
        let mut value = high;
        loop {
            list = list.cons(value);
            if value == low {
                break;
            }
            value -= 1;
        }
        list
    }
}

// =============================================================================
// Packed Text
// =============================================================================

impl List<char> {
    /// Builds a character list from a string slice as a single packed run.
    ///
    /// The characters are stored contiguously rather than as individual cons
    /// cells; `append` of two such lists concatenates natively. The empty
    /// string produces the canonical empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let text = List::from_text("abc");
    /// assert_eq!(text.len(), 3);
    /// assert!(text.is_packed());
    /// assert_eq!(text.head().unwrap(), &'a');
    /// ```
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let elements: ReferenceCounter<[char]> = text.chars().collect();
        let length = elements.len();
        if length == 0 {
            return Self::new();
        }
        Self {
            repr: Repr::Packed { elements, start: 0 },
            length,
        }
    }

    /// Renders the list back into a `String` if it is stored packed.
    ///
    /// Returns `None` for a node-based list; use `iter().collect()` to
    /// stringify those. The empty list counts as the packed empty text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use conslist::List;
    ///
    /// let text = List::from_text("abc");
    /// assert_eq!(text.as_text(), Some("abc".to_string()));
    ///
    /// let spliced = List::new().cons('a');
    /// assert_eq!(spliced.as_text(), None);
    /// ```
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match &self.repr {
            Repr::Nil => Some(String::new()),
            Repr::Packed { elements, start } => {
                Some(elements[*start..].iter().copied().collect())
            }
            Repr::Node(_) => None,
        }
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over references to elements of a [`List`].
pub struct ListIterator<'a, T> {
    /// Current position in the list.
    repr: &'a Repr<T>,
    /// Position within a packed run.
    offset: usize,
    /// Elements left to yield.
    remaining: usize,
}

impl<'a, T> Iterator for ListIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let repr = self.repr;
        match repr {
            Repr::Nil => None,
            Repr::Node(node) => {
                self.repr = &node.rest.repr;
                self.remaining -= 1;
                Some(&node.element)
            }
            Repr::Packed { elements, start } => {
                let index = *start + self.offset;
                if index < elements.len() {
                    self.offset += 1;
                    self.remaining -= 1;
                    Some(&elements[index])
                } else {
                    None
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for ListIterator<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

/// An owning iterator over elements of a [`List`].
pub struct ListIntoIterator<T> {
    /// The remainder of the list still to be yielded.
    list: List<T>,
}

impl<T: Clone> Iterator for ListIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let (element, rest) = match self.list.uncons() {
            Some((head, rest)) => (head.clone(), rest),
            None => return None,
        };
        self.list = rest;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.length, Some(self.list.length))
    }
}

impl<T: Clone> ExactSizeIterator for ListIntoIterator<T> {
    fn len(&self) -> usize {
        self.list.length
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for List<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let staged: Vec<T> = iter.into_iter().collect();
        Self::from_vec(staged)
    }
}

impl<T: Clone> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = ListIntoIterator<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        ListIntoIterator { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = ListIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    /// Element-wise structural equality. Packed and node-based lists with
    /// the same elements compare equal.
    fn eq(&self, other: &Self) -> bool {
        if self.length != other.length {
            return false;
        }
        self.iter().zip(other.iter()).all(|(left, right)| left == right)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Hash the length first to distinguish lists of different lengths
        self.length.hash(state);
        for element in self.iter() {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for List<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        let mut first = true;
        for element in self.iter() {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Tests
// =============================================================================
