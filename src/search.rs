use std::{cmp::Ordering, marker::PhantomData};

use crate::node::NodeRef;

/// Visits the nodes a standard BST descent for `key` passes through, starting
/// at the root and ending at either the matching node or the last node before
/// an absent child.
#[derive(Debug)]
pub(crate) struct Descend<'a, 'k, K: 'a, N> {
    next: Option<N>,
    key: &'k K,
    _node: PhantomData<&'a K>,
}

impl<'a, 'k, K, N> Descend<'a, 'k, K, N>
where
    K: Ord + 'a,
    N: NodeRef<'a, K>,
{
    pub(crate) fn new(root: Option<N>, key: &'k K) -> Self {
        Self {
            next: root,
            key,
            _node: PhantomData,
        }
    }
}

impl<'a, K, N> Iterator for Descend<'a, '_, K, N>
where
    K: Ord + 'a,
    N: NodeRef<'a, K>,
{
    type Item = N;

    fn next(&mut self) -> Option<Self::Item> {
        let v = self.next.take()?;
        self.next = match v.key().cmp(self.key) {
            Ordering::Greater => v.left(),
            Ordering::Less => v.right(),
            Ordering::Equal => None,
        };
        Some(v)
    }
}

/// Return the first node on the descent path holding `key`, if any.
pub(crate) fn find<'a, K, N>(root: Option<N>, key: &K) -> Option<N>
where
    K: Ord + 'a,
    N: NodeRef<'a, K>,
{
    Descend::new(root, key).last().filter(|&v| v.key() == key)
}

/// A fully materialised lookup, replayable one step at a time.
///
/// The path holds the key of every node visited by a lookup, from the root
/// to either the matching node or the node at which the lookup failed. A
/// cursor tracks the step currently shown; moving it never recomputes the
/// path, and moving past either end is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath<K> {
    steps: Vec<K>,
    cursor: usize,
    found: bool,
}

impl<K> SearchPath<K> {
    pub(crate) fn new<'a, N>(root: Option<N>, target: &K) -> Self
    where
        K: Ord + Clone + 'a,
        N: NodeRef<'a, K>,
    {
        let steps = Descend::new(root, target)
            .map(|v| v.key().clone())
            .collect::<Vec<_>>();
        let found = steps.last() == Some(target);

        log::debug!(
            "materialised search path with {} steps (found={})",
            steps.len(),
            found
        );

        Self {
            steps,
            cursor: 0,
            found,
        }
    }

    /// True if the last step holds the search target.
    pub fn is_found(&self) -> bool {
        self.found
    }

    /// Returns true if the lookup visited no nodes (the tree was empty).
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The number of nodes visited.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// All visited keys, root first.
    pub fn steps(&self) -> &[K] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<K> {
        self.steps
    }

    /// The index of the current step.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// The key at the current step, or [`None`] if the path is empty.
    pub fn current(&self) -> Option<&K> {
        self.steps.get(self.cursor)
    }

    /// Returns true when the cursor is on the final step.
    pub fn is_finished(&self) -> bool {
        self.cursor + 1 >= self.steps.len()
    }

    /// Advance one step towards the end of the path, returning the new
    /// current key.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&K> {
        if !self.is_finished() {
            self.cursor += 1;
        }
        self.current()
    }

    /// Move one step back towards the root, returning the new current key.
    pub fn prev(&mut self) -> Option<&K> {
        self.cursor = self.cursor.saturating_sub(1);
        self.current()
    }

    /// Jump to the final step.
    pub fn skip(&mut self) -> Option<&K> {
        self.cursor = self.steps.len().saturating_sub(1);
        self.current()
    }
}
