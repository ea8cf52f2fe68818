use crate::arena::Arena;
use crate::util::{first, last};

/// Handle to one AVL tree whose nodes live in a [`Forest`](crate::Forest).
///
/// Besides the root the handle caches the nodes holding the smallest and
/// the largest key, so join can compare key ranges in O(1). A handle owns
/// its nodes exclusively and therefore is neither `Clone` nor `Copy`.
#[derive(Debug, Default)]
pub struct Tree {
    pub(crate) root: Option<u32>,
    pub(crate) min: Option<u32>,
    pub(crate) max: Option<u32>,
}

impl Tree {
    pub const fn new() -> Self {
        Self {
            root: None,
            min: None,
            max: None,
        }
    }

    /// Detaches the subtree at `root` from its parent and wraps it.
    ///
    /// The extremes are found by descending to the leftmost and rightmost
    /// nodes; the subtree root is never used as a stand-in for them.
    pub(crate) fn from_subtree<V>(arena: &mut Arena<V>, root: Option<u32>) -> Self {
        if let Some(r) = root {
            arena[r].p = None;
        }
        Self {
            root,
            min: first(arena, root),
            max: last(arena, root),
        }
    }

    pub(crate) fn refresh_extremes<V>(&mut self, arena: &Arena<V>) {
        self.min = first(arena, self.root);
        self.max = last(arena, self.root);
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root_index(&self) -> Option<u32> {
        self.root
    }

    pub fn min_index(&self) -> Option<u32> {
        self.min
    }

    pub fn max_index(&self) -> Option<u32> {
        self.max
    }
}
