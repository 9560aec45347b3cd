use proptest::prelude::*;

use crate::Tree;

/// The upper bound (exclusive) of generated keys.
///
/// A small key domain encourages duplicate inserts.
const KEY_MAX: i64 = 50;

/// The maximum number of keys inserted by a single test case.
const N_VALUES: usize = 100;

/// Generate a sequence of keys in [0..[`KEY_MAX`]) to insert, in order.
pub(crate) fn arbitrary_keys() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0..KEY_MAX, 0..N_VALUES)
}

/// Assert the in-order walk of `t` yields non-decreasing keys, and that it
/// yields exactly [`Tree::len()`] of them.
pub(crate) fn validate_bst_order<T>(t: &T)
where
    T: Tree<i64>,
{
    let keys = t.iter().copied().collect::<Vec<_>>();
    assert_eq!(keys.len(), t.len());

    for window in keys.windows(2) {
        assert!(
            window[0] <= window[1],
            "out of order keys {} and {} in {keys:?}",
            window[0],
            window[1],
        );
    }
}
