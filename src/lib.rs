//! An ordered key-value container backed by a plain (unbalanced) Binary Search Tree.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, search, and remove stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key, the value
//! associated with that key, and up to two child `Node`s. The most important
//! invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for a key takes `O(height)` where `height` is the number of `Node`s on
//! the longest path from the root to a leaf. [`OrderedTree`] never rebalances, so the
//! height depends entirely on insertion order: inserting keys in ascending order
//! produces a tree shaped like a linked list. BSTs also naturally support sorted
//! iteration by visiting the left subtree, then the subtree root, then the right
//! subtree.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::OrderedTree;
//!
//! let mut tree = OrderedTree::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert(key, key * 10);
//! }
//!
//! assert_eq!(tree.search(&4), Some((&4, &40)));
//! assert_eq!(tree.minimum(), Some((&1, &10)));
//! assert_eq!(tree.maximum(), Some((&9, &90)));
//! assert_eq!(tree.size(), 7);
//! assert_eq!(tree.height(), 3);
//!
//! let mut keys = Vec::new();
//! tree.in_order_traversal(|key, _| keys.push(*key));
//! assert_eq!(keys, [1, 3, 4, 5, 7, 8, 9]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod traversal;
pub mod tree;

#[cfg(feature = "serde")]
mod serde_impl;


pub use error::{InvariantError, Result};
pub use traversal::{Iter, Order};
pub use tree::OrderedTree;
