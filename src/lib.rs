//! Binary search trees that can be inspected one insertion and one search
//! step at a time.
//!
//! Three variants share the [`Tree`] interface:
//!
//! * [`BinaryTree`]: plain, unbalanced insertion.
//! * [`RedBlackTree`]: red-black insertion with recolouring / rotation fixup.
//! * [`AvlTree`]: height-balanced insertion.
//!
//! None of the trees draw anything. Instead each can be converted into a
//! renderer-neutral [`LayoutNode`] description (or Graphviz DOT text), and a
//! [`SearchPath`] materialises the nodes visited by a lookup so a front end
//! can step through it.
//!
//! ```
//! use bstviz::{RedBlackTree, Tree, Color};
//!
//! let mut t = RedBlackTree::default();
//! for v in [10, 20, 30] {
//!     t.insert(v);
//! }
//!
//! let root = t.layout().unwrap();
//! assert_eq!(root.label, "20");
//! assert_eq!(root.color, Some(Color::Black));
//!
//! let mut path = t.search_path(&30);
//! assert_eq!(path.steps(), &[20, 30]);
//! assert_eq!(path.next(), Some(&30));
//! ```

mod avl;
mod bst;
mod dot;
mod error;
mod iter;
mod layout;
mod node;
mod rbtree;
mod search;
mod session;

#[cfg(test)]
mod test_utils;

use std::fmt::Display;

pub use avl::AvlTree;
pub use bst::BinaryTree;
pub use error::InputError;
pub use iter::Iter;
pub use layout::LayoutNode;
pub use node::Color;
pub use rbtree::RedBlackTree;
pub use search::SearchPath;
pub use session::Session;

/// How a tree handles inserting a key that compares equal to an existing
/// key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DuplicatePolicy {
    /// The insert is a no-op.
    Ignore,

    /// The key is placed in the right subtree of the equal node, as if it
    /// were greater.
    InsertRight,
}

/// The tree variants a [`Session`] can construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum TreeKind {
    Unbalanced,
    RedBlack,
    Avl,
}

impl Display for TreeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unbalanced => f.write_str("unbalanced"),
            Self::RedBlack => f.write_str("red-black"),
            Self::Avl => f.write_str("avl"),
        }
    }
}

/// Operations common to every tree variant.
pub trait Tree<K>
where
    K: Ord,
{
    /// Insert `key`, returning true if a new node was added.
    ///
    /// A false return means the tree's [`DuplicatePolicy`] discarded the
    /// key, leaving the tree unchanged.
    fn insert(&mut self, key: K) -> bool;

    /// The number of nodes in the tree.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of nodes on the longest root-to-leaf path.
    fn height(&self) -> usize;

    fn contains(&self, key: &K) -> bool;

    /// Iterate over the keys in the tree in ascending order.
    fn iter(&self) -> Iter<'_, K>;

    /// Describe the current tree shape for a renderer, or [`None`] if the
    /// tree is empty.
    fn layout(&self) -> Option<LayoutNode>
    where
        K: Display;

    /// Render the tree as a Graphviz digraph.
    fn to_dot(&self) -> String
    where
        K: Display;

    /// Materialise the nodes visited by a lookup of `key`, whether or not
    /// the lookup succeeds.
    fn search_path(&self, key: &K) -> SearchPath<K>
    where
        K: Clone;

    /// Return the keys visited on the way to `key`, or an empty [`Vec`] if
    /// `key` is not in the tree.
    fn search(&self, key: &K) -> Vec<K>
    where
        K: Clone,
    {
        let path = self.search_path(key);
        if path.is_found() {
            path.into_steps()
        } else {
            Vec::new()
        }
    }
}
