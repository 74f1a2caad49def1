//! Errors reported when checking the structure of an [`OrderedTree`][crate::OrderedTree].
//!
//! Normal operations never fail: a missing key or an empty tree is reported with `None`. The only
//! fallible operation is [`OrderedTree::validate`][crate::OrderedTree::validate], which exists for
//! callers who suspect their key type's `Ord` implementation is inconsistent.

use thiserror::Error;

/// Shorthand for results carrying an [`InvariantError`].
pub type Result<T> = std::result::Result<T, InvariantError>;

/// A violation of the binary search tree invariant.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantError {
    /// A node's key does not sort strictly between the bounds imposed by its ancestors. This
    /// covers keys on the wrong side of an ancestor as well as duplicate keys.
    #[error("node at depth {depth} is out of order with respect to its ancestors")]
    OutOfOrder {
        /// Distance from the root to the offending node. The root has depth 0.
        depth: usize,
    },
}
