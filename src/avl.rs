use std::{cmp::Ordering, fmt::Display};

use crate::{
    dot::print_dot, iter::Iter, layout::LayoutNode, node::NodeRef, search::SearchPath,
    DuplicatePolicy, Tree,
};

/// The subtree of a node a key was placed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Node<K> {
    /// Child nodes pointers.
    left: Option<Box<Node<K>>>,
    right: Option<Box<Node<K>>>,

    /// The node's AVL height.
    ///
    /// A leaf has a height of 1, and an absent child is treated as height 0.
    ///
    /// A u8 holds a maximum value of 255, far taller than any balanced tree
    /// that fits in memory.
    height: u8,

    key: K,
}

impl<K> Node<K> {
    pub(crate) fn new(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
            height: 1,
        }
    }

    /// Insert `key` into the subtree rooted at `self`, rebalancing on the way
    /// back up.
    ///
    /// Returns the side of `self` the key was placed into, or [`None`] if the
    /// key was discarded as a duplicate (in which case no node on the path is
    /// modified).
    fn insert(self: &mut Box<Self>, key: K, duplicates: DuplicatePolicy) -> Option<Side>
    where
        K: Ord,
    {
        let side = match key.cmp(&self.key) {
            Ordering::Less => Side::Left,
            Ordering::Equal if duplicates == DuplicatePolicy::Ignore => return None,
            Ordering::Equal | Ordering::Greater => Side::Right,
        };

        let child = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };

        // The side the key took within the child, if it was not placed as the
        // child itself.
        let below = match child {
            Some(v) => Some(v.insert(key, duplicates)?),
            None => {
                *child = Some(Box::new(Self::new(key)));
                None
            }
        };

        update_height(self);

        // Determine the balance factor of the subtree rooted at self and
        // correct it if the absolute difference in height between branches is
        // > 1.
        //
        // The path the new key took through the heavy child selects between a
        // single and a double rotation.
        match (balance(self), below) {
            // Left-left
            (2, Some(Side::Left)) => rotate_right(self),
            // Right-right
            (-2, Some(Side::Right)) => rotate_left(self),
            // Left-right
            (2, Some(Side::Right)) => {
                if let Some(l) = self.left.as_mut() {
                    rotate_left(l);
                }
                rotate_right(self);
            }
            // Right-left
            (-2, Some(Side::Left)) => {
                if let Some(r) = self.right.as_mut() {
                    rotate_right(r);
                }
                rotate_left(self);
            }
            (-1..=1, _) => { /* The tree is well balanced */ }
            // A single insert changes a child height by at most 1, and a
            // freshly created leaf child cannot tip its parent out of balance.
            _ => unreachable!(),
        }

        // Invariant: the absolute difference between tree heights ("balance
        // factor") cannot exceed 1.
        debug_assert!(balance(self).abs() <= 1);

        Some(side)
    }
}

impl<'a, K> NodeRef<'a, K> for &'a Node<K> {
    fn key(self) -> &'a K {
        &self.key
    }

    fn left(self) -> Option<Self> {
        self.left.as_deref()
    }

    fn right(self) -> Option<Self> {
        self.right.as_deref()
    }
}

fn height<K>(n: Option<&Node<K>>) -> u8 {
    n.map(|v| v.height).unwrap_or_default()
}

fn update_height<K>(n: &mut Node<K>) {
    n.height = 1 + height(n.left.as_deref()).max(height(n.right.as_deref()));
}

/// Compute the "balance factor" of the subtree rooted at `n`.
///
/// Returns the subtree height skew / magnitude, which is a positive number when
/// left heavy, and a negative number when right heavy.
fn balance<K>(n: &Node<K>) -> i8 {
    // Correctness: the height is a u8, the maximal value of which fits in an
    // i16 without truncation or sign inversion.
    (height(n.left.as_deref()) as i16 - height(n.right.as_deref()) as i16) as i8
}

/// Left rotate the given subtree rooted at `x` around the pivot point `P`.
///
/// ```text
///
///      x
///     / \                               P
///    1   P         Rotate Left        /   \
///       / \      --------------->    x     y
///      2   y                        / \   / \
///         / \                      1   2 3   4
///        3   4
/// ```
///
/// # Panics
///
/// Panics if `x` has no right pointer (cannot be rotated).
fn rotate_left<K>(x: &mut Box<Node<K>>) {
    let mut p = x
        .right
        .take()
        .expect("left rotation requires a right child");
    std::mem::swap(x, &mut p);

    p.right = x.left.take();
    update_height(&mut p);

    x.left = Some(p);
    update_height(x);

    log::trace!("avl rotate left");
}

/// Right rotate the given subtree rooted at `y` around the pivot point `P`.
///
/// ```text
///          y
///         / \                           P
///        P   4     Rotate Right       /   \
///       / \      --------------->    x     y
///      x   3                        / \   / \
///     / \                          1   2 3   4
///    1   2
/// ```
///
/// # Panics
///
/// Panics if `y` has no left pointer (cannot be rotated).
fn rotate_right<K>(y: &mut Box<Node<K>>) {
    let mut p = y
        .left
        .take()
        .expect("right rotation requires a left child");
    std::mem::swap(y, &mut p);

    p.left = y.right.take();
    update_height(&mut p);

    y.right = Some(p);
    update_height(y);

    log::trace!("avl rotate right");
}

/// A height-balanced (AVL) binary search tree.
///
/// After every insertion the heights of the two subtrees of any node differ by
/// at most one. By default inserting a key already present is a no-op.
#[derive(Debug, Clone)]
pub struct AvlTree<K> {
    root: Option<Box<Node<K>>>,
    len: usize,
    duplicates: DuplicatePolicy,
}

impl<K> Default for AvlTree<K> {
    fn default() -> Self {
        Self::with_duplicates(DuplicatePolicy::Ignore)
    }
}

impl<K> AvlTree<K> {
    /// Construct an empty tree that handles equal keys according to
    /// `duplicates`.
    pub fn with_duplicates(duplicates: DuplicatePolicy) -> Self {
        Self {
            root: None,
            len: 0,
            duplicates,
        }
    }

    fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }
}

impl<K> Tree<K> for AvlTree<K>
where
    K: Ord,
{
    fn insert(&mut self, key: K) -> bool {
        let inserted = match self.root {
            Some(ref mut v) => v.insert(key, self.duplicates).is_some(),
            None => {
                self.root = Some(Box::new(Node::new(key)));
                true
            }
        };

        if inserted {
            self.len += 1;
            log::debug!(
                "inserted key into avl tree (len={}, height={})",
                self.len,
                height(self.root())
            );
        } else {
            log::debug!("ignoring duplicate key");
        }

        inserted
    }

    fn len(&self) -> usize {
        self.len
    }

    fn height(&self) -> usize {
        height(self.root()) as usize
    }

    fn contains(&self, key: &K) -> bool {
        crate::search::find(self.root(), key).is_some()
    }

    fn iter(&self) -> Iter<'_, K> {
        Iter::new(self.root())
    }

    fn layout(&self) -> Option<LayoutNode>
    where
        K: Display,
    {
        self.root().map(LayoutNode::build)
    }

    fn to_dot(&self) -> String
    where
        K: Display,
    {
        print_dot(self.root())
    }

    fn search_path(&self, key: &K) -> SearchPath<K>
    where
        K: Clone,
    {
        SearchPath::new(self.root(), key)
    }
}
