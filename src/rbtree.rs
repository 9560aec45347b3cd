use std::{cmp::Ordering, fmt::Display};

use crate::{
    dot::print_dot,
    iter::Iter,
    layout::LayoutNode,
    node::{Color, NodeRef},
    search::SearchPath,
    DuplicatePolicy, Tree,
};

/// The index of a node within the [`RedBlackTree`] node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// A red-black tree vertex.
///
/// An absent child ([`None`]) plays the role of the black leaf sentinel.
#[derive(Debug, Clone)]
struct Node<K> {
    key: K,
    color: Color,

    /// The structural parent, or [`None`] for the root.
    parent: Option<NodeId>,

    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// A red-black binary search tree.
///
/// Nodes live in an append-only arena and link to each other (and back to
/// their parent) by index, giving the insertion fixup O(1) upwards
/// navigation. After every insertion:
///
/// * the root is black,
/// * no red node has a red parent,
/// * every root-to-leaf path passes through the same number of black nodes.
///
/// By default a key equal to an existing key is placed in its right subtree.
#[derive(Debug, Clone)]
pub struct RedBlackTree<K> {
    nodes: Vec<Node<K>>,
    root: Option<NodeId>,
    duplicates: DuplicatePolicy,
}

impl<K> Default for RedBlackTree<K> {
    fn default() -> Self {
        Self::with_duplicates(DuplicatePolicy::InsertRight)
    }
}

impl<K> RedBlackTree<K> {
    /// Construct an empty tree that handles equal keys according to
    /// `duplicates`.
    pub fn with_duplicates(duplicates: DuplicatePolicy) -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            duplicates,
        }
    }

    fn node(&self, id: NodeId) -> &Node<K> {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<K> {
        &mut self.nodes[id.0]
    }

    fn root(&self) -> Option<RbRef<'_, K>> {
        self.root.map(|id| RbRef { tree: self, id })
    }

    /// The colour of `id`, where an absent node is the black sentinel.
    fn color(&self, id: Option<NodeId>) -> Color {
        id.map(|v| self.node(v).color).unwrap_or(Color::Black)
    }

    fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        let n = self.node(id);
        match side {
            Side::Left => n.left,
            Side::Right => n.right,
        }
    }

    fn set_child(&mut self, id: NodeId, side: Side, child: Option<NodeId>) {
        let n = self.node_mut(id);
        match side {
            Side::Left => n.left = child,
            Side::Right => n.right = child,
        }
    }

    /// Rotate the subtree rooted at `x` in direction `dir`, lifting the child
    /// on the opposite side of `x` into its place.
    ///
    /// ```text
    ///
    ///      x
    ///     / \                               y
    ///    1   y         Rotate Left        /   \
    ///       / \      --------------->    x     3
    ///      2   3                        / \
    ///                                  1   2
    /// ```
    ///
    /// Parent, child and root links are updated; colours are left untouched.
    ///
    /// # Panics
    ///
    /// Panics if `x` has no child on the opposite side of `dir`.
    fn rotate(&mut self, x: NodeId, dir: Side) {
        let up = dir.opposite();
        let y = self
            .child(x, up)
            .expect("rotation requires a child to lift");

        // Move the inner subtree of "y" across to "x".
        let inner = self.child(y, dir);
        self.set_child(x, up, inner);
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(x);
        }

        // Link "y" into the position previously held by "x".
        let parent = self.node(x).parent;
        self.node_mut(y).parent = parent;
        match parent {
            None => self.root = Some(y),
            Some(p) if self.node(p).left == Some(x) => self.node_mut(p).left = Some(y),
            Some(p) => self.node_mut(p).right = Some(y),
        }

        self.set_child(y, dir, Some(x));
        self.node_mut(x).parent = Some(y);

        log::trace!("red-black rotate {dir:?}");
    }

    /// Restore the red-black colouring invariants after inserting the red
    /// node `k`.
    fn fix_insert(&mut self, mut k: NodeId) {
        while let Some(p) = self
            .node(k)
            .parent
            .filter(|&p| self.node(p).color == Color::Red)
        {
            // The root is black, so a red parent always has a parent of its
            // own.
            let Some(g) = self.node(p).parent else {
                break;
            };

            // The side of the grandparent the parent hangs from.
            let side = if self.node(g).left == Some(p) {
                Side::Left
            } else {
                Side::Right
            };

            let uncle = self.child(g, side.opposite());
            match (uncle, self.color(uncle)) {
                (Some(u), Color::Red) => {
                    // Red uncle: push the blackness of the grandparent down to
                    // both its children and continue the fix from there.
                    log::trace!("red-black fixup: recolour");
                    self.node_mut(p).color = Color::Black;
                    self.node_mut(u).color = Color::Black;
                    self.node_mut(g).color = Color::Red;
                    k = g;
                }
                _ => {
                    // Black uncle: if "k" is an inner grandchild, rotate it to
                    // the outside first so the parent / child pair lines up
                    // with the grandparent.
                    let p = if self.child(p, side.opposite()) == Some(k) {
                        log::trace!("red-black fixup: inner grandchild");
                        self.rotate(p, side);
                        let lifted = k;
                        k = p;
                        lifted
                    } else {
                        p
                    };

                    log::trace!("red-black fixup: rotate grandparent");
                    self.node_mut(p).color = Color::Black;
                    self.node_mut(g).color = Color::Red;
                    self.rotate(g, side.opposite());
                }
            }

            if Some(k) == self.root {
                break;
            }
        }

        if let Some(root) = self.root {
            self.node_mut(root).color = Color::Black;
        }
    }
}

impl<K> Tree<K> for RedBlackTree<K>
where
    K: Ord,
{
    fn insert(&mut self, key: K) -> bool {
        // Descend to the sentinel, tracking the last real node as the parent
        // of the new node.
        let mut parent = None;
        let mut cursor = self.root;
        while let Some(x) = cursor {
            parent = Some(x);
            cursor = match key.cmp(&self.node(x).key) {
                Ordering::Less => self.node(x).left,
                Ordering::Equal if self.duplicates == DuplicatePolicy::Ignore => {
                    log::debug!("ignoring duplicate key");
                    return false;
                }
                Ordering::Equal | Ordering::Greater => self.node(x).right,
            };
        }

        let side = match parent {
            Some(p) if key < self.node(p).key => Side::Left,
            _ => Side::Right,
        };

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            key,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        });

        log::debug!("inserted key into red-black tree (len={})", self.len());

        match parent {
            None => {
                // The tree was empty.
                self.root = Some(id);
                self.node_mut(id).color = Color::Black;
            }
            Some(p) => {
                self.set_child(p, side, Some(id));

                // A red child of the (black) root cannot violate any
                // invariant.
                if self.node(p).parent.is_some() {
                    self.fix_insert(id);
                }
            }
        }

        true
    }

    fn len(&self) -> usize {
        self.nodes.len()
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

/// A view of a single node in a [`RedBlackTree`].
#[derive(Debug)]
pub(crate) struct RbRef<'a, K> {
    tree: &'a RedBlackTree<K>,
    id: NodeId,
}

impl<K> Clone for RbRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for RbRef<'_, K> {}

impl<'a, K> RbRef<'a, K> {
    fn at(self, id: Option<NodeId>) -> Option<Self> {
        id.map(|id| Self {
            tree: self.tree,
            id,
        })
    }
}

impl<'a, K> NodeRef<'a, K> for RbRef<'a, K> {
    fn key(self) -> &'a K {
        &self.tree.node(self.id).key
    }

    fn left(self) -> Option<Self> {
        self.at(self.tree.node(self.id).left)
    }

    fn right(self) -> Option<Self> {
        self.at(self.tree.node(self.id).right)
    }

    fn color(self) -> Option<Color> {
        Some(self.tree.node(self.id).color)
    }
}
