use std::fmt::Debug;

use tracing::trace;

use crate::arena::Arena;
use crate::avl::types::AvlNode;
use crate::avl::util::{assert_avl_tree, print, retrace, set_l, set_r, swap_entries};
use crate::error::TreeError;
use crate::tree::Tree;
use crate::util::{find, first, last, next, prev, size};

/// Owner of the node arena shared by a family of AVL trees.
///
/// Every tree operation goes through the forest and takes the [`Tree`]
/// handle it works on. Split and join only relink nodes inside the shared
/// arena, which is what keeps them logarithmic.
///
/// ```
/// use avl_forest::{Forest, Tree};
///
/// let mut forest = Forest::new();
/// let mut tree = Tree::new();
/// for k in [5, 3, 8, 1, 4, 7, 9] {
///     forest.insert(&mut tree, k, k.to_string()).unwrap();
/// }
/// forest.delete(&mut tree, 5).unwrap();
///
/// let parts = forest.split(&mut tree, 7).unwrap();
/// assert_eq!(forest.keys(&parts.low), vec![1, 3, 4]);
/// assert_eq!(forest.keys(&parts.high), vec![8, 9]);
/// assert!(tree.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct Forest<V> {
    pub(crate) arena: Arena<V>,
}

impl<V> Forest<V> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
        }
    }

    pub fn arena(&self) -> &Arena<V> {
        &self.arena
    }

    /// Live nodes across all trees of the forest.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn node(&self, idx: u32) -> &AvlNode<V> {
        &self.arena[idx]
    }

    pub fn key(&self, idx: u32) -> i64 {
        self.arena[idx].k
    }

    pub fn value(&self, idx: u32) -> &V {
        &self.arena[idx].v
    }

    pub fn value_mut(&mut self, idx: u32) -> &mut V {
        &mut self.arena[idx].v
    }

    pub fn find(&self, tree: &Tree, key: i64) -> Option<u32> {
        find(&self.arena, tree.root, key)
    }

    pub fn search(&self, tree: &Tree, key: i64) -> Option<&V> {
        self.find(tree, key).map(|i| &self.arena[i].v)
    }

    pub fn search_mut(&mut self, tree: &Tree, key: i64) -> Option<&mut V> {
        let idx = self.find(tree, key)?;
        Some(&mut self.arena[idx].v)
    }

    pub fn contains(&self, tree: &Tree, key: i64) -> bool {
        self.find(tree, key).is_some()
    }

    /// Inserts `key` with `value` and returns the number of rebalancing
    /// operations (promotions plus rotations, a double rotation being two).
    pub fn insert(&mut self, tree: &mut Tree, key: i64, value: V) -> Result<usize, TreeError> {
        if self.contains(tree, key) {
            return Err(TreeError::DuplicateKey(key));
        }
        let node = self.arena.alloc(AvlNode::new(key, value));
        Ok(self.insert_node(tree, node))
    }

    /// Hangs the detached node `node` into `tree` as a new leaf. The key must
    /// not be present yet.
    pub(crate) fn insert_node(&mut self, tree: &mut Tree, node: u32) -> usize {
        let arena = &mut self.arena;
        {
            let n = &mut arena[node];
            n.p = None;
            n.l = None;
            n.r = None;
            n.h = 0;
        }

        let (Some(root), Some(min), Some(max)) = (tree.root, tree.min, tree.max) else {
            *tree = Tree {
                root: Some(node),
                min: Some(node),
                max: Some(node),
            };
            return 0;
        };

        let key = arena[node].k;
        let parent = if key > arena[max].k {
            tree.max = Some(node);
            max
        } else if key < arena[min].k {
            tree.min = Some(node);
            min
        } else {
            let mut curr = root;
            loop {
                let child = if key < arena[curr].k {
                    arena[curr].l
                } else {
                    arena[curr].r
                };
                match child {
                    Some(c) => curr = c,
                    None => break curr,
                }
            }
        };

        if key < arena[parent].k {
            set_l(arena, parent, Some(node));
        } else {
            set_r(arena, parent, Some(node));
        }

        let (root, ops) = retrace(arena, root, parent);
        tree.root = Some(root);
        trace!(key, ops, "insert rebalanced");
        ops
    }

    /// Deletes `key` and returns the number of rebalancing operations
    /// (demotions plus rotations).
    pub fn delete(&mut self, tree: &mut Tree, key: i64) -> Result<usize, TreeError> {
        self.delete_entry(tree, key).map(|(_, ops)| ops)
    }

    /// Deletes `key` and hands back its value.
    pub fn remove(&mut self, tree: &mut Tree, key: i64) -> Result<V, TreeError> {
        self.delete_entry(tree, key).map(|(node, _)| node.v)
    }

    fn delete_entry(&mut self, tree: &mut Tree, key: i64) -> Result<(AvlNode<V>, usize), TreeError> {
        let mut node = self.find(tree, key).ok_or(TreeError::NotFound(key))?;
        let arena = &mut self.arena;

        // Push the doomed entry down until it sits in a childless node: past
        // the in-order successor when there are two children, into the only
        // child otherwise.
        loop {
            let n = &arena[node];
            let target = match (n.l, n.r) {
                (Some(_), Some(r)) => first(arena, Some(r)).unwrap_or(r),
                (Some(c), None) | (None, Some(c)) => c,
                (None, None) => break,
            };
            swap_entries(arena, node, target);
            node = target;
        }

        let parent = arena[node].p;
        if let Some(p) = parent {
            if arena[p].l == Some(node) {
                arena[p].l = None;
            } else {
                arena[p].r = None;
            }
        }
        let removed = arena.free(node);

        let ops = match (parent, tree.root) {
            (Some(p), Some(root)) => {
                let (root, ops) = retrace(arena, root, p);
                tree.root = Some(root);
                ops
            }
            _ => {
                tree.root = None;
                0
            }
        };
        tree.refresh_extremes(arena);
        trace!(key, ops, "delete rebalanced");
        Ok((removed, ops))
    }

    /// Value stored under the smallest key.
    pub fn min(&self, tree: &Tree) -> Option<&V> {
        tree.min.map(|i| &self.arena[i].v)
    }

    /// Value stored under the largest key.
    pub fn max(&self, tree: &Tree) -> Option<&V> {
        tree.max.map(|i| &self.arena[i].v)
    }

    pub fn min_key(&self, tree: &Tree) -> Option<i64> {
        tree.min.map(|i| self.arena[i].k)
    }

    pub fn max_key(&self, tree: &Tree) -> Option<i64> {
        tree.max.map(|i| self.arena[i].k)
    }

    /// Number of entries in `tree`, counted by traversal.
    pub fn size(&self, tree: &Tree) -> usize {
        size(&self.arena, tree.root)
    }

    /// Height (rank) of `tree`; `-1` when empty.
    pub fn height(&self, tree: &Tree) -> i32 {
        tree.root.map_or(-1, |r| self.arena[r].h)
    }

    pub fn first(&self, tree: &Tree) -> Option<u32> {
        tree.min
    }

    pub fn last(&self, tree: &Tree) -> Option<u32> {
        tree.max
    }

    pub fn next(&self, curr: u32) -> Option<u32> {
        next(&self.arena, curr)
    }

    pub fn prev(&self, curr: u32) -> Option<u32> {
        prev(&self.arena, curr)
    }

    /// Entries of `tree` in ascending key order.
    pub fn iter<'a>(&'a self, tree: &Tree) -> Iter<'a, V> {
        Iter {
            arena: &self.arena,
            curr: tree.min,
        }
    }

    /// Sorted keys of `tree`.
    pub fn keys(&self, tree: &Tree) -> Vec<i64> {
        self.iter(tree).map(|(k, _)| k).collect()
    }

    /// Values of `tree` ordered by key.
    pub fn values(&self, tree: &Tree) -> Vec<V>
    where
        V: Clone,
    {
        self.iter(tree).map(|(_, v)| v.clone()).collect()
    }

    /// Frees every node of `tree` and leaves the handle empty.
    pub fn clear(&mut self, tree: &mut Tree) {
        let mut stack: Vec<u32> = tree.root.into_iter().collect();
        while let Some(i) = stack.pop() {
            let node = self.arena.free(i);
            stack.extend(node.l);
            stack.extend(node.r);
        }
        *tree = Tree::new();
    }

    /// Checks the AVL invariants of `tree` and its cached extremes.
    pub fn assert_valid(&self, tree: &Tree) -> Result<(), String> {
        assert_avl_tree(&self.arena, tree.root)?;
        if tree.min != first(&self.arena, tree.root) {
            return Err("Cached min is stale".to_string());
        }
        if tree.max != last(&self.arena, tree.root) {
            return Err("Cached max is stale".to_string());
        }
        Ok(())
    }

    pub fn print(&self, tree: &Tree) -> String
    where
        V: Debug,
    {
        print(&self.arena, tree.root, "")
    }
}

impl<V> Default for Forest<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// In-order iterator over the entries of one tree.
pub struct Iter<'a, V> {
    arena: &'a Arena<V>,
    curr: Option<u32>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (i64, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.curr?;
        self.curr = next(self.arena, i);
        let n = &self.arena[i];
        Some((n.k, &n.v))
    }
}
