use serde::Serialize;

/// The colour tag of a red-black tree node.
///
/// Absent children of a red-black node are [`Color::Black`] by definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Color {
    Red,
    Black,
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Red => f.write_str("RED"),
            Self::Black => f.write_str("BLACK"),
        }
    }
}

/// A read-only, cheaply copied view of a single tree vertex.
///
/// Each tree variant stores its nodes differently (boxed children for the
/// unbalanced and AVL trees, an index arena for the red-black tree); this
/// view lets traversal, search, layout and DOT rendering be written once.
pub(crate) trait NodeRef<'a, K: 'a>: Copy {
    fn key(self) -> &'a K;

    fn left(self) -> Option<Self>;

    fn right(self) -> Option<Self>;

    /// The colour of this node, if the variant tracks one.
    fn color(self) -> Option<Color> {
        None
    }
}

/// Return the number of nodes on the longest path from `n` to a leaf.
///
/// An absent subtree has a height of 0, a single node a height of 1.
pub(crate) fn height<'a, K, N>(n: Option<N>) -> usize
where
    K: 'a,
    N: NodeRef<'a, K>,
{
    // Walk level by level to avoid recursing on degenerate (chain) trees.
    let mut level: Vec<N> = n.into_iter().collect();
    let mut h = 0;
    while !level.is_empty() {
        h += 1;
        level = level
            .into_iter()
            .flat_map(|v| v.left().into_iter().chain(v.right()))
            .collect();
    }
    h
}
