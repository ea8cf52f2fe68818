mod common;

use std::collections::BTreeMap;

use avl_forest::{Forest, SplitParts, Tree};
use common::{entries, model_entries, value_of};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

const SEEDS: [u64; 4] = [1, 0x5eed, 0xdead_beef, 20_240_601];

#[test]
fn fuzz_insert_delete_split_join_matrix() {
    for seed in SEEDS {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let mut forest = Forest::new();
        let mut tree = Tree::new();
        let mut model = BTreeMap::new();

        for step in 0..3000 {
            let k = rng.gen_range(0..500i64);
            match rng.gen_range(0..10) {
                0..=5 => {
                    let res = forest.insert(&mut tree, k, value_of(k));
                    assert_eq!(res.is_ok(), model.insert(k, value_of(k)).is_none());
                }
                6..=8 => {
                    let res = forest.delete(&mut tree, k);
                    assert_eq!(res.is_ok(), model.remove(&k).is_some());
                }
                _ => {
                    let Some(&pivot) = model.keys().nth(k as usize % model.len().max(1)) else {
                        continue;
                    };
                    let SplitParts {
                        mut low,
                        key,
                        value,
                        mut high,
                    } = forest.split(&mut tree, pivot).unwrap();
                    forest.assert_valid(&low).unwrap();
                    forest.assert_valid(&high).unwrap();
                    forest.join(&mut high, key, value, &mut low).unwrap();
                    tree = high;
                }
            }

            forest.assert_valid(&tree).unwrap_or_else(|e| {
                panic!("seed {seed} step {step}: {e}\n{}", forest.print(&tree))
            });
            assert_eq!(forest.len(), model.len());
        }
        assert_eq!(entries(&forest, &tree), model_entries(&model));
    }
}

/// Cuts one tree into many pieces, then glues adjacent pieces back in a
/// random order, so joins see all kinds of rank gaps.
#[test]
fn fuzz_shatter_and_reassemble_matrix() {
    for seed in SEEDS {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let mut forest = Forest::new();
        let mut tree = Tree::new();
        for _ in 0..2000 {
            let k = rng.gen_range(-5000..5000i64);
            let _ = forest.insert(&mut tree, k, value_of(k));
        }
        let before = entries(&forest, &tree);

        // pieces[i] < pivots[i] < pieces[i + 1]
        let mut pieces = vec![tree];
        let mut pivots: Vec<(i64, String)> = Vec::new();
        for _ in 0..200 {
            let i = rng.gen_range(0..pieces.len());
            let keys = forest.keys(&pieces[i]);
            if keys.is_empty() {
                continue;
            }
            let pivot = keys[rng.gen_range(0..keys.len())];
            let parts = forest.split(&mut pieces[i], pivot).unwrap();
            forest.assert_valid(&parts.low).unwrap();
            forest.assert_valid(&parts.high).unwrap();
            pieces[i] = parts.low;
            pieces.insert(i + 1, parts.high);
            pivots.insert(i, (parts.key, parts.value));
        }
        let total: usize = pieces.iter().map(|t| forest.size(t)).sum();
        assert_eq!(total + pivots.len(), before.len());

        while !pivots.is_empty() {
            let i = rng.gen_range(0..pivots.len());
            let (key, value) = pivots.remove(i);
            let mut right = pieces.remove(i + 1);
            let expected = {
                let ra = forest.height(&pieces[i]).max(0);
                let rb = forest.height(&right).max(0);
                (ra - rb).unsigned_abs() as usize + 1
            };
            let cost = if rng.gen_bool(0.5) {
                forest.join(&mut pieces[i], key, value, &mut right).unwrap()
            } else {
                let cost = forest.join(&mut right, key, value, &mut pieces[i]).unwrap();
                pieces[i] = right;
                cost
            };
            assert_eq!(cost, expected);
            forest.assert_valid(&pieces[i]).unwrap();
        }

        assert_eq!(pieces.len(), 1);
        assert_eq!(entries(&forest, &pieces[0]), before);
        assert_eq!(forest.len(), before.len());
    }
}
