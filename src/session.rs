use std::fmt::Debug;

use crate::{
    error::parse_key, AvlTree, BinaryTree, DuplicatePolicy, InputError, LayoutNode,
    RedBlackTree, SearchPath, Tree, TreeKind,
};

type Observer = Box<dyn FnMut(Option<&LayoutNode>)>;

/// The state behind an interactive tree front end.
///
/// A session holds at most one tree, of the currently selected
/// [`TreeKind`], created lazily on the first insert. Every change to the tree
/// (an insert or a reset) is reported synchronously to the registered
/// observer with the new [`LayoutNode`], after the tree is consistent. Any
/// animation or pacing of the redraw is left to the observer.
///
/// ```
/// use bstviz::{Session, TreeKind};
///
/// let mut s = Session::new(TreeKind::Avl);
/// for v in ["5", "4", "3", "2", "1"] {
///     s.insert_input(v).unwrap();
/// }
///
/// assert_eq!(s.search(3).unwrap().steps(), &[4, 2, 3]);
/// assert_eq!(s.step_forward(), Ok(2));
/// assert_eq!(s.skip_search(), Ok(3));
///
/// assert!(s.insert_input("three").is_err());
/// ```
pub struct Session {
    kind: TreeKind,
    duplicates: Option<DuplicatePolicy>,
    tree: Option<Box<dyn Tree<i64>>>,
    search: Option<SearchPath<i64>>,
    observer: Option<Observer>,
}

impl Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("kind", &self.kind)
            .field("duplicates", &self.duplicates)
            .field("len", &self.tree.as_ref().map(|v| v.len()))
            .field("search", &self.search)
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(kind: TreeKind) -> Self {
        Self {
            kind,
            duplicates: None,
            tree: None,
            search: None,
            observer: None,
        }
    }

    /// Override the duplicate key handling of trees created by this session.
    ///
    /// By default each [`TreeKind`] uses its own policy.
    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = Some(duplicates);
        self
    }

    /// Register `f` to be called with the new layout after every change to
    /// the tree, replacing any previous observer.
    pub fn on_change<F>(&mut self, f: F)
    where
        F: FnMut(Option<&LayoutNode>) + 'static,
    {
        self.observer = Some(Box::new(f));
    }

    pub fn kind(&self) -> TreeKind {
        self.kind
    }

    /// The current tree, if anything has been inserted since the last reset.
    pub fn tree(&self) -> Option<&dyn Tree<i64>> {
        self.tree.as_deref()
    }

    pub fn layout(&self) -> Option<LayoutNode> {
        self.tree.as_ref().and_then(|v| v.layout())
    }

    /// Select the tree variant used for subsequent inserts.
    ///
    /// Selecting a different variant discards the current tree; the next
    /// insert starts a new, empty tree of the selected kind.
    pub fn select(&mut self, kind: TreeKind) {
        if kind == self.kind {
            return;
        }

        log::debug!("switching tree kind from {} to {}", self.kind, kind);
        self.kind = kind;
        self.tree = None;
        self.search = None;
    }

    /// Insert `key` into the current tree (creating it if needed) and notify
    /// the observer.
    ///
    /// Returns false if the key was discarded as a duplicate, in which case
    /// the observer is not called and any active search is kept.
    pub fn insert(&mut self, key: i64) -> bool {
        let (kind, duplicates) = (self.kind, self.duplicates);
        let tree = self.tree.get_or_insert_with(|| {
            log::debug!("creating {kind} tree");
            new_tree(kind, duplicates)
        });

        if !tree.insert(key) {
            return false;
        }

        // Any materialised search path describes the old tree shape.
        self.search = None;
        self.notify();

        true
    }

    /// Validate `input` as an integer key and insert it.
    ///
    /// Invalid input leaves the session untouched.
    pub fn insert_input(&mut self, input: &str) -> Result<bool, InputError> {
        let key = parse_key(input)?;
        Ok(self.insert(key))
    }

    /// Discard the tree and any search in progress, and notify the observer.
    pub fn reset(&mut self) {
        log::debug!("resetting {} tree", self.kind);
        self.tree = None;
        self.search = None;
        self.notify();
    }

    /// Materialise the search path for `key`, making it the active search
    /// positioned at the root.
    ///
    /// A lookup in an empty tree visits nothing and is reported as
    /// [`InputError::NotFound`]. A lookup that fails part way down the tree
    /// still yields the path to the point of failure (see
    /// [`SearchPath::is_found()`]).
    pub fn search(&mut self, key: i64) -> Result<&SearchPath<i64>, InputError> {
        let path = self
            .tree
            .as_ref()
            .map(|v| v.search_path(&key))
            .filter(|v| !v.is_empty())
            .ok_or(InputError::NotFound)?;

        Ok(self.search.insert(path))
    }

    /// Validate `input` as an integer key and search for it.
    pub fn search_input(&mut self, input: &str) -> Result<&SearchPath<i64>, InputError> {
        let key = parse_key(input)?;
        self.search(key)
    }

    /// The search in progress, if any.
    pub fn active_search(&self) -> Option<&SearchPath<i64>> {
        self.search.as_ref()
    }

    /// Advance the active search one step, returning the key now highlighted.
    pub fn step_forward(&mut self) -> Result<i64, InputError> {
        self.step(SearchPath::next)
    }

    /// Move the active search one step back towards the root.
    pub fn step_back(&mut self) -> Result<i64, InputError> {
        self.step(SearchPath::prev)
    }

    /// Jump the active search to its final step.
    pub fn skip_search(&mut self) -> Result<i64, InputError> {
        self.step(SearchPath::skip)
    }

    fn step<F>(&mut self, f: F) -> Result<i64, InputError>
    where
        F: for<'a> FnOnce(&'a mut SearchPath<i64>) -> Option<&'a i64>,
    {
        let path = self.search.as_mut().ok_or(InputError::NoActiveSearch)?;

        // An active search always holds at least one step.
        f(path).copied().ok_or(InputError::NotFound)
    }

    fn notify(&mut self) {
        let Some(f) = self.observer.as_mut() else {
            return;
        };

        let layout = self.tree.as_ref().and_then(|v| v.layout());
        f(layout.as_ref());
    }
}

fn new_tree(kind: TreeKind, duplicates: Option<DuplicatePolicy>) -> Box<dyn Tree<i64>> {
    match (kind, duplicates) {
        (TreeKind::Unbalanced, None) => Box::<BinaryTree<i64>>::default(),
        (TreeKind::Unbalanced, Some(d)) => Box::new(BinaryTree::with_duplicates(d)),
        (TreeKind::RedBlack, None) => Box::<RedBlackTree<i64>>::default(),
        (TreeKind::RedBlack, Some(d)) => Box::new(RedBlackTree::with_duplicates(d)),
        (TreeKind::Avl, None) => Box::<AvlTree<i64>>::default(),
        (TreeKind::Avl, Some(d)) => Box::new(AvlTree::with_duplicates(d)),
    }
}
