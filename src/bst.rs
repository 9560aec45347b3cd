use std::{
    cmp::Ordering,
    fmt::{Debug, Display},
};

use crate::{
    dot::print_dot, iter::Iter, layout::LayoutNode, node::NodeRef, search::SearchPath,
    DuplicatePolicy, Tree,
};

#[derive(Debug)]
pub(crate) struct Node<K> {
    key: K,
    left: Option<Box<Node<K>>>,
    right: Option<Box<Node<K>>>,
}

impl<K> Node<K> {
    fn new(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
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

/// An unbalanced binary search tree.
///
/// Keys are placed at the first empty slot found by a standard descent and
/// never moved afterwards, so inserting sorted input produces a chain.
pub struct BinaryTree<K> {
    root: Option<Box<Node<K>>>,
    len: usize,
    duplicates: DuplicatePolicy,
}

impl<K> Debug for BinaryTree<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinaryTree")
            .field("len", &self.len)
            .field("duplicates", &self.duplicates)
            .finish_non_exhaustive()
    }
}

impl<K> Drop for BinaryTree<K> {
    fn drop(&mut self) {
        // Unlink the nodes one at a time. The default drop glue recurses once
        // per level, which a chain of sorted keys turns into once per key.
        let mut stack = Vec::from_iter(self.root.take());
        while let Some(mut n) = stack.pop() {
            stack.extend(n.left.take());
            stack.extend(n.right.take());
        }
    }
}

impl<K> Default for BinaryTree<K> {
    fn default() -> Self {
        Self::with_duplicates(DuplicatePolicy::InsertRight)
    }
}

impl<K> BinaryTree<K> {
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

impl<K> Tree<K> for BinaryTree<K>
where
    K: Ord,
{
    fn insert(&mut self, key: K) -> bool {
        // Walk the child slots down to the first empty one. Iterating rather
        // than recursing keeps degenerate (chain) trees off the call stack.
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Equal if self.duplicates == DuplicatePolicy::Ignore => {
                    log::debug!("ignoring duplicate key");
                    return false;
                }
                Ordering::Equal | Ordering::Greater => &mut node.right,
            };
        }

        *slot = Some(Box::new(Node::new(key)));
        self.len += 1;

        log::debug!("inserted key into unbalanced tree (len={})", self.len);
        true
    }

    fn len(&self) -> usize {
        self.len
    }

    fn height(&self) -> usize {
        crate::node::height(self.root())
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
