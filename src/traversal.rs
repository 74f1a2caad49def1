//! Walking an [`OrderedTree`][crate::OrderedTree] node by node.
//!
//! All walks use an explicit work stack (or queue) instead of native recursion so that a
//! degenerate tree, which is as tall as it is large, can be visited without running out of
//! call stack.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::tree::{Link, Node};

/// The order in which a traversal visits the nodes of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// A node, then its left subtree, then its right subtree.
    PreOrder,
    /// The left subtree, then the node, then the right subtree. This visits keys in ascending
    /// order.
    InOrder,
    /// The left subtree, then the right subtree, then the node.
    PostOrder,
    /// Breadth first: the root, then every node one level down from left to right, and so on.
    LevelOrder,
}

/// The orders a depth first walk can produce.
#[derive(Clone, Copy)]
enum DepthFirst {
    Pre,
    In,
    Post,
}

/// A unit of pending work for a depth first walk.
enum Step<'a, K, V> {
    /// Schedule a node and its children according to the walk's order.
    Expand(&'a mut Node<K, V>),
    /// Hand a node's entry to the visitor.
    Visit(&'a K, &'a mut V),
}

/// Applies `visit` to every entry reachable from `root` in the given `order`.
pub(crate) fn walk<K, V, F>(root: &mut Link<K, V>, order: Order, mut visit: F)
where
    F: FnMut(&K, &mut V),
{
    match order {
        Order::PreOrder => depth_first(root, DepthFirst::Pre, &mut visit),
        Order::InOrder => depth_first(root, DepthFirst::In, &mut visit),
        Order::PostOrder => depth_first(root, DepthFirst::Post, &mut visit),
        Order::LevelOrder => breadth_first(root, &mut visit),
    }
}

fn depth_first<K, V, F>(root: &mut Link<K, V>, order: DepthFirst, visit: &mut F)
where
    F: FnMut(&K, &mut V),
{
    let mut stack = Vec::new();
    push_child(&mut stack, root);

    while let Some(step) = stack.pop() {
        match step {
            Step::Visit(key, value) => visit(key, value),
            Step::Expand(node) => {
                let Node {
                    key,
                    value,
                    left,
                    right,
                } = node;

                // Pushed back to front, so they pop in visiting order.
                match order {
                    DepthFirst::Pre => {
                        push_child(&mut stack, right);
                        push_child(&mut stack, left);
                        stack.push(Step::Visit(key, value));
                    }
                    DepthFirst::In => {
                        push_child(&mut stack, right);
                        stack.push(Step::Visit(key, value));
                        push_child(&mut stack, left);
                    }
                    DepthFirst::Post => {
                        stack.push(Step::Visit(key, value));
                        push_child(&mut stack, right);
                        push_child(&mut stack, left);
                    }
                }
            }
        }
    }
}

fn push_child<'a, K, V>(stack: &mut Vec<Step<'a, K, V>>, child: &'a mut Link<K, V>) {
    if let Some(node) = child.as_deref_mut() {
        stack.push(Step::Expand(node));
    }
}

fn breadth_first<K, V, F>(root: &mut Link<K, V>, visit: &mut F)
where
    F: FnMut(&K, &mut V),
{
    let mut queue: VecDeque<&mut Node<K, V>> = root.as_deref_mut().into_iter().collect();

    while let Some(node) = queue.pop_front() {
        let Node {
            key,
            value,
            left,
            right,
        } = node;
        visit(key, value);
        queue.extend(left.as_deref_mut());
        queue.extend(right.as_deref_mut());
    }
}

/// An iterator over the entries of an [`OrderedTree`][crate::OrderedTree] in ascending key
/// order.
///
/// Created by [`OrderedTree::iter`][crate::OrderedTree::iter].
///
/// # Examples
///
/// ```
/// use ordered_tree::OrderedTree;
///
/// let tree: OrderedTree<_, _> = [(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();
/// let entries: Vec<_> = tree.iter().collect();
///
/// assert_eq!(entries, [(&1, &'a'), (&2, &'b'), (&3, &'c')]);
/// ```
pub struct Iter<'a, K, V> {
    /// Nodes whose left subtree has been scheduled but which have not been yielded yet. The
    /// smallest pending node is on top.
    stack: Vec<&'a Node<K, V>>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(root: &'a Link<K, V>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root.as_deref());
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), None)
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}
