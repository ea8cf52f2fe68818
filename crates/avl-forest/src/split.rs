use tracing::{debug, instrument};

use crate::error::TreeError;
use crate::forest::Forest;
use crate::tree::Tree;

/// Result of [`Forest::split`]: everything below the pivot, the pivot entry
/// itself, and everything above it.
#[derive(Debug)]
pub struct SplitParts<V> {
    pub low: Tree,
    pub key: i64,
    pub value: V,
    pub high: Tree,
}

impl<V> Forest<V> {
    /// Splits `tree` around `key`, which must be present.
    ///
    /// On success `tree` is left empty and its nodes are redistributed over
    /// `low` (keys `< key`) and `high` (keys `> key`); the pivot entry is
    /// handed back so that joining the parts with it restores the content.
    #[instrument(level = "debug", skip_all, fields(key = key))]
    pub fn split(&mut self, tree: &mut Tree, key: i64) -> Result<SplitParts<V>, TreeError> {
        let pivot = self
            .find(tree, key)
            .ok_or(TreeError::PreconditionViolated {
                key,
                reason: "split key is not in the tree",
            })?;
        *tree = Tree::new();

        let (l, r, mut parent) = {
            let n = &self.arena[pivot];
            (n.l, n.r, n.p)
        };
        let mut low = Tree::from_subtree(&mut self.arena, l);
        let mut high = Tree::from_subtree(&mut self.arena, r);

        // Climb the spine. Each ancestor becomes the connecting entry of a
        // join with its subtree on the far side of the pivot.
        let mut child = pivot;
        let mut joins = 0;
        let mut cost = 0;
        while let Some(p) = parent {
            let (pl, pr, pp) = {
                let n = &self.arena[p];
                (n.l, n.r, n.p)
            };
            if pl == Some(child) {
                let side = Tree::from_subtree(&mut self.arena, pr);
                cost += self.join_node(&mut high, p, side);
            } else {
                let side = Tree::from_subtree(&mut self.arena, pl);
                cost += self.join_node(&mut low, p, side);
            }
            joins += 1;
            child = p;
            parent = pp;
        }

        let pivot = self.arena.free(pivot);
        debug!(joins, cost, "split done");
        Ok(SplitParts {
            low,
            key: pivot.k,
            value: pivot.v,
            high,
        })
    }
}
