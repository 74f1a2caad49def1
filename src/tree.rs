//! The ordered container itself.
//!
//! Every node is exclusively owned by its parent (or, for the root, by the [`OrderedTree`]).
//! Insertion and removal walk down to the slot holding the node they care about and then
//! restructure only that slot. Nothing is ever shared, so the structure can't contain cycles.
//!
//! The tree is never rebalanced. Inserting keys in sorted order produces a tree that is as tall
//! as it is large, so every walk is a loop rather than a recursion.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::OrderedTree;
//!
//! let mut tree = OrderedTree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.search(&1), None);
//!
//! tree.insert(1, 2);
//! assert_eq!(tree.search(&1), Some((&1, &2)));
//!
//! // Inserting a new value for the same key overwrites the value.
//! tree.insert(1, 3);
//! assert_eq!(tree.search(&1), Some((&1, &3)));
//!
//! // Removing a node hands back its value.
//! assert_eq!(tree.remove(&1), Some(3));
//! assert_eq!(tree.search(&1), None);
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::mem;

use tracing::{debug, trace, warn};

use crate::error::{InvariantError, Result};
use crate::traversal::{self, Iter, Order};

/// An owned, possibly empty, subtree.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// A `Node` has a key that is used for searching/sorting and a value that is associated with
/// that key. Either child may be empty.
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }
}

/// An ordered key-value container backed by an unbalanced Binary Search Tree.
///
/// Keys are ordered by their [`Ord`] implementation. Each key appears at most once; inserting an
/// existing key replaces its value.
pub struct OrderedTree<K, V> {
    pub(crate) root: Link<K, V>,
}

impl<K, V> Default for OrderedTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for OrderedTree<K, V> {
    fn drop(&mut self) {
        dismantle(self.root.take());
    }
}

impl<K, V> Clone for OrderedTree<K, V>
where
    K: Clone,
    V: Clone,
{
    /// Copies the tree node by node, keeping its exact shape.
    fn clone(&self) -> Self {
        let mut root = None;
        {
            // Each source node is paired with the empty slot its copy goes into.
            let mut stack: Vec<(&Node<K, V>, &mut Link<K, V>)> = Vec::new();
            if let Some(node) = self.root.as_deref() {
                stack.push((node, &mut root));
            }

            while let Some((source, slot)) = stack.pop() {
                let copy = slot.insert(Box::new(Node::leaf(
                    source.key.clone(),
                    source.value.clone(),
                )));
                let Node { left, right, .. } = &mut **copy;
                if let Some(source_left) = source.left.as_deref() {
                    stack.push((source_left, left));
                }
                if let Some(source_right) = source.right.as_deref() {
                    stack.push((source_right, right));
                }
            }
        }

        Self { root }
    }
}

impl<K, V> fmt::Debug for OrderedTree<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Two trees are equal when they hold the same entries, whatever their shapes.
impl<K, V> PartialEq for OrderedTree<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for OrderedTree<K, V> {}

impl<K, V> OrderedTree<K, V> {
    /// Generates a new, empty `OrderedTree`.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Returns `true` if the tree holds no entries. Unlike [`size`][Self::size] this doesn't
    /// walk the tree.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Inserts the given value into the tree stored at the given key. Inserting a new value for an
    /// existing key overwrites its value and leaves the structure of the tree untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    ///
    /// tree.insert(1, 2);
    /// assert_eq!(tree.search(&1), Some((&1, &2)));
    ///
    /// tree.insert(1, 3);
    /// assert_eq!(tree.search(&1), Some((&1, &3)));
    /// assert_eq!(tree.size(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V)
    where
        K: Ord,
    {
        let mut slot = &mut self.root;
        loop {
            match slot {
                None => {
                    trace!("attaching new leaf");
                    *slot = Some(Box::new(Node::leaf(key, value)));
                    return;
                }
                Some(node) => match key.cmp(&node.key) {
                    Ordering::Less => slot = &mut node.left,
                    Ordering::Equal => {
                        trace!("overwriting value in place");
                        node.value = value;
                        return;
                    }
                    Ordering::Greater => slot = &mut node.right,
                },
            }
        }
    }

    /// Removes the node containing the given key from the tree and returns its value. If the tree
    /// does not contain a node with the key, nothing happens.
    ///
    /// A node with two children is replaced by its in-order successor (the smallest key in its
    /// right subtree).
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.remove(&1), Some(2));
    /// assert_eq!(tree.remove(&1), None);
    /// assert_eq!(tree.search(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut slot = &mut self.root;
        loop {
            // Compare through a shared borrow so that only the descent borrows `slot` mutably.
            let ordering = key.cmp(slot.as_ref()?.key.borrow());
            slot = match ordering {
                Ordering::Less => &mut slot.as_mut()?.left,
                Ordering::Equal => break,
                Ordering::Greater => &mut slot.as_mut()?.right,
            };
        }

        let (replacement, removed) = unlink(slot.take()?);
        *slot = replacement;
        Some(removed)
    }

    /// Potentially finds the entry stored under the given key. If no node has the corresponding
    /// key, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(String::from("one"), 1);
    ///
    /// assert_eq!(tree.search("one"), Some((&String::from("one"), &1)));
    /// assert_eq!(tree.search("two"), None);
    /// ```
    pub fn search<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Equal => return Some((&node.key, &node.value)),
                Ordering::Greater => node.right.as_deref(),
            };
        }

        None
    }

    /// Returns `true` if the tree has an entry for the given key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).is_some()
    }

    /// Returns a mutable reference to the value stored under the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(1, 2);
    ///
    /// if let Some(value) = tree.get_mut(&1) {
    ///     *value += 40;
    /// }
    /// assert_eq!(tree.search(&1), Some((&1, &42)));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
                Ordering::Greater => node.right.as_deref_mut(),
            };
        }

        None
    }

    /// Returns the entry with the smallest key, or `None` if the tree is empty.
    pub fn minimum(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }

        Some((&node.key, &node.value))
    }

    /// Returns the entry with the largest key, or `None` if the tree is empty.
    pub fn maximum(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }

        Some((&node.key, &node.value))
    }

    /// Gets the number of nodes on the longest path from the root to a leaf. An empty tree has a
    /// height of 0 and a lone root has a height of 1.
    ///
    /// The height isn't cached so this visits every node.
    pub fn height(&self) -> usize {
        link_height(&self.root)
    }

    /// Gets the number of entries in the tree. The size isn't cached so this visits every node.
    pub fn size(&self) -> usize {
        self.iter().count()
    }

    /// Removes every entry from the tree.
    pub fn clear(&mut self) {
        let released = dismantle(self.root.take());
        debug!(released, "cleared tree");
    }

    /// Visits every entry in the given [`Order`]. The visitor may change values but can't touch
    /// keys, so the ordering of the tree is preserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{Order, OrderedTree};
    ///
    /// let mut tree: OrderedTree<_, _> = [(2, 0), (1, 0), (3, 0)].into_iter().collect();
    ///
    /// let mut keys = Vec::new();
    /// tree.traverse(Order::LevelOrder, |key, value| {
    ///     keys.push(*key);
    ///     *value = key * 10;
    /// });
    ///
    /// assert_eq!(keys, [2, 1, 3]);
    /// assert_eq!(tree.search(&3), Some((&3, &30)));
    /// ```
    pub fn traverse<F>(&mut self, order: Order, visit: F)
    where
        F: FnMut(&K, &mut V),
    {
        traversal::walk(&mut self.root, order, visit);
    }

    /// Visits each node before its left subtree and then its right subtree.
    pub fn pre_order_traversal<F>(&mut self, visit: F)
    where
        F: FnMut(&K, &mut V),
    {
        self.traverse(Order::PreOrder, visit);
    }

    /// Visits every entry in ascending key order.
    pub fn in_order_traversal<F>(&mut self, visit: F)
    where
        F: FnMut(&K, &mut V),
    {
        self.traverse(Order::InOrder, visit);
    }

    /// Visits each node after both of its subtrees.
    pub fn post_order_traversal<F>(&mut self, visit: F)
    where
        F: FnMut(&K, &mut V),
    {
        self.traverse(Order::PostOrder, visit);
    }

    /// Visits the tree one level at a time, starting from the root, left to right within a level.
    pub fn level_order_traversal<F>(&mut self, visit: F)
    where
        F: FnMut(&K, &mut V),
    {
        self.traverse(Order::LevelOrder, visit);
    }

    /// Returns an iterator over the entries of the tree in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root)
    }

    /// Checks that every key sorts strictly between the keys of the ancestors it descended from.
    ///
    /// This can only fail if `K`'s [`Ord`] implementation is inconsistent (or changed while keys
    /// were in the tree).
    pub fn validate(&self) -> Result<()>
    where
        K: Ord,
    {
        let mut stack: Vec<(&Node<K, V>, Option<&K>, Option<&K>, usize)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, None, None, 0));
        }

        while let Some((node, lower, upper, depth)) = stack.pop() {
            let above_lower = lower.map_or(true, |lower| *lower < node.key);
            let below_upper = upper.map_or(true, |upper| node.key < *upper);
            if !(above_lower && below_upper) {
                warn!(depth, "binary search tree ordering violated");
                return Err(InvariantError::OutOfOrder { depth });
            }

            if let Some(left) = node.left.as_deref() {
                stack.push((left, lower, Some(&node.key), depth + 1));
            }
            if let Some(right) = node.right.as_deref() {
                stack.push((right, Some(&node.key), upper, depth + 1));
            }
        }

        Ok(())
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord, V> Extend<(K, V)> for OrderedTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

/// Counts the nodes on the longest path down from `link`.
fn link_height<K, V>(link: &Link<K, V>) -> usize {
    let mut height = 0;
    let mut stack: Vec<(&Node<K, V>, usize)> = Vec::new();
    if let Some(root) = link.as_deref() {
        stack.push((root, 1));
    }

    while let Some((node, depth)) = stack.pop() {
        height = height.max(depth);
        stack.extend(node.left.as_deref().map(|left| (left, depth + 1)));
        stack.extend(node.right.as_deref().map(|right| (right, depth + 1)));
    }

    height
}

/// Takes `node` out of the structure. Returns what should fill the slot it occupied along with
/// the removed value.
fn unlink<K, V>(mut node: Box<Node<K, V>>) -> (Link<K, V>, V) {
    if node.left.is_some() {
        // Two children: promote the in-order successor, the leftmost node of the right subtree.
        if let Some(successor) = take_minimum(&mut node.right) {
            trace!("promoting in-order successor into removed node");
            let Node {
                key: successor_key,
                value: successor_value,
                ..
            } = *successor;

            node.key = successor_key;
            let removed = mem::replace(&mut node.value, successor_value);
            return (Some(node), removed);
        }
    }

    let child = node.left.take().or_else(|| node.right.take());
    trace!(has_child = child.is_some(), "splicing out removed node");
    (child, node.value)
}

/// Detaches the leftmost node of the subtree in `slot`, splicing its right child into its place.
/// The detached node has no children. Returns `None` for an empty subtree.
fn take_minimum<K, V>(mut slot: &mut Link<K, V>) -> Option<Box<Node<K, V>>> {
    while slot.as_ref()?.left.is_some() {
        slot = &mut slot.as_mut()?.left;
    }

    let mut minimum = slot.take()?;
    *slot = minimum.right.take();
    Some(minimum)
}

/// Frees every node under `root` one at a time and returns how many there were. Letting `Box`
/// drop the tree would recurse once per level.
fn dismantle<K, V>(root: Link<K, V>) -> usize {
    let mut released = 0;
    let mut stack: Vec<Box<Node<K, V>>> = root.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
        released += 1;
    }

    released
}
