mod common;

use std::collections::{BTreeMap, BTreeSet};

use avl_forest::{Forest, SplitParts, Tree, TreeError};
use common::{build, entries, expected_join_cost, key_ops, key_sets, model_entries, value_of};
use proptest::prelude::*;

fn check_ops(ops: Vec<(bool, i64)>) {
    let mut forest = Forest::new();
    let mut tree = Tree::new();
    let mut model = BTreeMap::new();

    for (is_insert, k) in ops {
        if is_insert {
            let res = forest.insert(&mut tree, k, value_of(k));
            if model.insert(k, value_of(k)).is_some() {
                assert_eq!(res, Err(TreeError::DuplicateKey(k)));
            } else {
                assert!(res.is_ok());
            }
        } else {
            let res = forest.remove(&mut tree, k);
            match model.remove(&k) {
                Some(v) => assert_eq!(res, Ok(v)),
                None => assert_eq!(res, Err(TreeError::NotFound(k))),
            }
        }

        forest.assert_valid(&tree).unwrap();
        assert_eq!(entries(&forest, &tree), model_entries(&model));
        assert_eq!(forest.len(), model.len());
        assert_eq!(forest.min_key(&tree), model.keys().next().copied());
        assert_eq!(forest.max_key(&tree), model.keys().next_back().copied());
    }

    for k in 0..128 {
        assert_eq!(forest.search(&tree, k), model.get(&k));
    }
}

fn check_split(keys: BTreeSet<i64>, pick: usize) {
    if keys.is_empty() {
        return;
    }
    let pivot = *keys.iter().nth(pick % keys.len()).unwrap();
    let mut forest = Forest::new();
    let mut tree = build(&mut forest, keys.iter().rev().copied());

    let parts = forest.split(&mut tree, pivot).unwrap();
    forest.assert_valid(&parts.low).unwrap();
    forest.assert_valid(&parts.high).unwrap();

    let low: Vec<i64> = keys.range(..pivot).copied().collect();
    let high: Vec<i64> = keys.range(pivot + 1..).copied().collect();
    assert_eq!(forest.keys(&parts.low), low);
    assert_eq!(forest.keys(&parts.high), high);
    assert_eq!(parts.value, value_of(pivot));
}

fn check_join(low_keys: BTreeSet<i64>, high_keys: BTreeSet<i64>, receiver_is_low: bool) {
    // Shift the second set above the first with a free key in between.
    let offset = low_keys.iter().next_back().map_or(0, |m| m + 2) + 1000;
    let high_keys: BTreeSet<i64> = high_keys.iter().map(|k| k + offset).collect();
    let x = offset - 1001;
    assert!(low_keys.iter().all(|&k| k < x));

    let mut forest = Forest::new();
    let mut low = build(&mut forest, low_keys.iter().copied());
    let mut high = build(&mut forest, high_keys.iter().copied());
    let cost = expected_join_cost(&forest, &low, &high);

    let joined = if receiver_is_low {
        assert_eq!(forest.join(&mut low, x, value_of(x), &mut high), Ok(cost));
        assert!(high.is_empty());
        low
    } else {
        assert_eq!(forest.join(&mut high, x, value_of(x), &mut low), Ok(cost));
        assert!(low.is_empty());
        high
    };

    forest.assert_valid(&joined).unwrap();
    let expected: Vec<i64> = low_keys
        .iter()
        .copied()
        .chain([x])
        .chain(high_keys.iter().copied())
        .collect();
    assert_eq!(forest.keys(&joined), expected);
    assert_eq!(forest.len(), expected.len());
}

fn check_round_trip(keys: BTreeSet<i64>, pick: usize) {
    if keys.is_empty() {
        return;
    }
    let pivot = *keys.iter().nth(pick % keys.len()).unwrap();
    let mut forest = Forest::new();
    let mut tree = build(&mut forest, keys.iter().copied());
    let before = entries(&forest, &tree);

    let SplitParts {
        mut low,
        key,
        value,
        mut high,
    } = forest.split(&mut tree, pivot).unwrap();
    forest.join(&mut low, key, value, &mut high).unwrap();

    forest.assert_valid(&low).unwrap();
    assert_eq!(entries(&forest, &low), before);
}

proptest! {
    #[test]
    fn test_insert_remove(ops in key_ops()) {
        check_ops(ops);
    }

    #[test]
    fn test_split(keys in key_sets(256), pick in any::<usize>()) {
        check_split(keys, pick);
    }

    #[test]
    fn test_join(
        low in key_sets(256),
        high in key_sets(32),
        receiver_is_low in any::<bool>())
    {
        check_join(low, high, receiver_is_low);
    }

    #[test]
    fn test_join_small_receiver(
        low in key_sets(8),
        high in key_sets(512),
        receiver_is_low in any::<bool>())
    {
        check_join(low, high, receiver_is_low);
    }

    #[test]
    fn test_split_join_round_trip(keys in key_sets(256), pick in any::<usize>()) {
        check_round_trip(keys, pick);
    }
}
