use tracing::{debug, instrument};

use crate::arena::Arena;
use crate::avl::types::AvlNode;
use crate::avl::util::{height, retrace, set_l, set_r};
use crate::error::TreeError;
use crate::forest::Forest;
use crate::tree::Tree;

impl<V> Forest<V> {
    /// Merges `tree`, the entry `(key, value)` and `other` into `tree`.
    ///
    /// All keys of one tree must be smaller than `key` and all keys of the
    /// other larger; either tree may be empty. On success `other` is left
    /// empty and the returned cost is `|rank(tree) - rank(other)| + 1`,
    /// an empty tree counting as rank `0`.
    #[instrument(level = "debug", skip_all, fields(key = key))]
    pub fn join(
        &mut self,
        tree: &mut Tree,
        key: i64,
        value: V,
        other: &mut Tree,
    ) -> Result<usize, TreeError> {
        self.check_separated(tree, key, other)?;
        let node = self.arena.alloc(AvlNode::new(key, value));
        Ok(self.join_node(tree, node, std::mem::take(other)))
    }

    fn check_separated(&self, tree: &Tree, key: i64, other: &Tree) -> Result<(), TreeError> {
        let below = |t: &Tree| t.max.map_or(true, |i| self.arena[i].k < key);
        let above = |t: &Tree| t.min.map_or(true, |i| self.arena[i].k > key);
        if (below(tree) && above(other)) || (below(other) && above(tree)) {
            Ok(())
        } else {
            Err(TreeError::PreconditionViolated {
                key,
                reason: "join key does not separate the two trees",
            })
        }
    }

    fn rank(&self, tree: &Tree) -> i32 {
        tree.root.map_or(0, |r| self.arena[r].h)
    }

    /// Joins with the detached node `x` as the connecting entry. Ranges must
    /// already be known to be separated by `x`'s key.
    pub(crate) fn join_node(&mut self, tree: &mut Tree, x: u32, mut other: Tree) -> usize {
        let this_rank = self.rank(tree);
        let other_rank = self.rank(&other);
        let cost = this_rank.abs_diff(other_rank) as usize + 1;

        let (Some(troot), Some(oroot)) = (tree.root, other.root) else {
            if tree.is_empty() {
                std::mem::swap(tree, &mut other);
            }
            self.insert_node(tree, x);
            debug!(this_rank, other_rank, cost, "join into single tree");
            return cost;
        };

        let arena = &mut self.arena;
        let key = arena[x].k;
        let tree_is_left = tree.max.is_some_and(|i| arena[i].k < key);
        let (left, right, lroot, rroot) = if tree_is_left {
            (std::mem::take(tree), other, troot, oroot)
        } else {
            (other, std::mem::take(tree), oroot, troot)
        };
        let (lh, rh) = (arena[lroot].h, arena[rroot].h);

        let root = if lh == rh {
            let n = &mut arena[x];
            n.p = None;
            n.h = lh + 1;
            set_l(arena, x, Some(lroot));
            set_r(arena, x, Some(rroot));
            debug!(rank = lh, cost, "join of equal ranks");
            x
        } else if lh > rh {
            splice(arena, lroot, x, rroot, true)
        } else {
            splice(arena, rroot, x, lroot, false)
        };

        *tree = Tree {
            root: Some(root),
            min: left.min,
            max: right.max,
        };
        cost
    }
}

/// Descends the spine of the taller tree `hi` facing the shorter tree `lo`
/// (the right spine when `lo` holds the larger keys) down to the first slot
/// no taller than `lo`, hangs `x` there with the cut-off subtree and `lo` as
/// children, and rebalances upwards. Returns the new root.
fn splice<V>(arena: &mut Arena<V>, hi: u32, x: u32, lo: u32, lo_is_right: bool) -> u32 {
    let rank = arena[lo].h;
    let mut parent = hi;
    let mut curr = spine(arena, hi, lo_is_right);
    let mut depth = 1;
    while let Some(c) = curr.filter(|&c| arena[c].h > rank) {
        parent = c;
        curr = spine(arena, c, lo_is_right);
        depth += 1;
    }

    arena[x].h = rank + 1;
    if lo_is_right {
        set_l(arena, x, curr);
        set_r(arena, x, Some(lo));
        set_r(arena, parent, Some(x));
    } else {
        set_r(arena, x, curr);
        set_l(arena, x, Some(lo));
        set_l(arena, parent, Some(x));
    }

    let (root, ops) = retrace(arena, hi, parent);
    debug!(
        rank,
        depth,
        cut = height(arena, curr),
        ops,
        "join spliced into taller spine"
    );
    root
}

#[inline]
fn spine<V>(arena: &Arena<V>, node: u32, right: bool) -> Option<u32> {
    if right {
        arena[node].r
    } else {
        arena[node].l
    }
}
