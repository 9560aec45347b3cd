use std::marker::PhantomData;

use crate::node::NodeRef;

/// An in-order (ascending) iterator over the keys of a [`Tree`].
///
/// [`Tree`]: crate::Tree
pub struct Iter<'a, K: 'a>(Box<dyn Iterator<Item = &'a K> + 'a>);

impl<'a, K: 'a> Iter<'a, K> {
    pub(crate) fn new<N>(root: Option<N>) -> Self
    where
        N: NodeRef<'a, K> + 'a,
    {
        Self(Box::new(InOrder::new(root).map(|v| v.key())))
    }
}

impl<K> std::fmt::Debug for Iter<'_, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Iter").finish_non_exhaustive()
    }
}

impl<'a, K: 'a> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

/// Yields the nodes of a subtree in order using an explicit stack.
#[derive(Debug)]
pub(crate) struct InOrder<'a, K: 'a, N> {
    stack: Vec<N>,
    _key: PhantomData<&'a K>,
}

impl<'a, K, N> InOrder<'a, K, N>
where
    K: 'a,
    N: NodeRef<'a, K>,
{
    pub(crate) fn new(root: Option<N>) -> Self {
        let mut this = Self {
            stack: vec![],
            _key: PhantomData,
        };

        // Descend down the left side of the tree.
        this.push_subtree(root);

        this
    }

    fn push_subtree(&mut self, subtree_root: Option<N>) {
        let mut ptr = subtree_root;

        while let Some(v) = ptr {
            self.stack.push(v);
            ptr = v.left();
        }
    }
}

impl<'a, K, N> Iterator for InOrder<'a, K, N>
where
    K: 'a,
    N: NodeRef<'a, K>,
{
    type Item = N;

    fn next(&mut self) -> Option<Self::Item> {
        let v = self.stack.pop()?;

        // Descend down the left side of the right hand child of this node, if
        // any.
        self.push_subtree(v.right());

        Some(v)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{test_utils::arbitrary_keys, AvlTree, BinaryTree, RedBlackTree, Tree};

    #[test]
    fn test_iter_chain() {
        let mut t = BinaryTree::default();
        for v in [1, 2, 3, 4, 5] {
            t.insert(v);
        }

        assert_eq!(t.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_iter_duplicates_kept() {
        let mut t = RedBlackTree::default();
        for v in [3, 1, 3, 2, 3] {
            t.insert(v);
        }

        assert_eq!(t.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 3, 3]);
    }

    proptest! {
        /// All three variants yield the same sorted sequence for the same
        /// input once duplicates are removed.
        #[test]
        fn prop_iter_matches_sorted_input(
            keys in arbitrary_keys(),
        ) {
            let mut want = keys.clone();
            want.sort_unstable();

            let mut bst = BinaryTree::default();
            let mut rb = RedBlackTree::default();
            let mut avl = AvlTree::default();
            for &k in &keys {
                bst.insert(k);
                rb.insert(k);
                avl.insert(k);
            }

            assert_eq!(bst.iter().copied().collect::<Vec<_>>(), want);
            assert_eq!(rb.iter().copied().collect::<Vec<_>>(), want);

            want.dedup();
            assert_eq!(avl.iter().copied().collect::<Vec<_>>(), want);
        }
    }
}
