use std::collections::{BTreeMap, BTreeSet};

use avl_forest::{Forest, Tree};
use proptest::prelude::*;

pub(super) fn value_of(key: i64) -> String {
    format!("v{key}")
}

/// Builds a tree by inserting `keys` in the given order.
pub(super) fn build(forest: &mut Forest<String>, keys: impl IntoIterator<Item = i64>) -> Tree {
    let mut tree = Tree::new();
    for k in keys {
        forest.insert(&mut tree, k, value_of(k)).unwrap();
    }
    forest.assert_valid(&tree).unwrap();
    tree
}

pub(super) fn entries(forest: &Forest<String>, tree: &Tree) -> Vec<(i64, String)> {
    forest.iter(tree).map(|(k, v)| (k, v.clone())).collect()
}

#[allow(dead_code)]
pub(super) fn model_entries(model: &BTreeMap<i64, String>) -> Vec<(i64, String)> {
    model.iter().map(|(k, v)| (*k, v.clone())).collect()
}

/// Join cost as defined for the trees: an empty tree counts as rank `0`.
#[allow(dead_code)]
pub(super) fn expected_join_cost(forest: &Forest<String>, a: &Tree, b: &Tree) -> usize {
    let ra = forest.height(a).max(0);
    let rb = forest.height(b).max(0);
    (ra - rb).unsigned_abs() as usize + 1
}

#[allow(dead_code)]
pub(super) fn key_sets(max_len: usize) -> impl Strategy<Value = BTreeSet<i64>> {
    prop::collection::btree_set(-1000i64..1000, 0..max_len)
}

#[allow(dead_code)]
pub(super) fn key_ops() -> impl Strategy<Value = Vec<(bool, i64)>> {
    prop::collection::vec((any::<bool>(), 0i64..128), 0..384)
}
