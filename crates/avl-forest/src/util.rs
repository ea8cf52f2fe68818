//! Index-based traversal helpers over an [`Arena`].
//!
//! All helpers follow `p` / `l` / `r` links only and never look at heights,
//! so they also work on a subtree that is in the middle of being relinked.

use crate::arena::Arena;

/// Leftmost node under `root`.
pub fn first<V>(arena: &Arena<V>, root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = arena[curr].l {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node under `root`.
pub fn last<V>(arena: &Arena<V>, root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(r) = arena[curr].r {
        curr = r;
    }
    Some(curr)
}

/// In-order successor.
pub fn next<V>(arena: &Arena<V>, mut curr: u32) -> Option<u32> {
    if let Some(r) = arena[curr].r {
        return first(arena, Some(r));
    }
    let mut p = arena[curr].p;
    while let Some(pi) = p {
        if arena[pi].r == Some(curr) {
            curr = pi;
            p = arena[pi].p;
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor.
pub fn prev<V>(arena: &Arena<V>, mut curr: u32) -> Option<u32> {
    if let Some(l) = arena[curr].l {
        return last(arena, Some(l));
    }
    let mut p = arena[curr].p;
    while let Some(pi) = p {
        if arena[pi].l == Some(curr) {
            curr = pi;
            p = arena[pi].p;
        } else {
            return Some(pi);
        }
    }
    None
}

/// Finds the node holding `key`.
pub fn find<V>(arena: &Arena<V>, root: Option<u32>, key: i64) -> Option<u32> {
    let mut curr = root;
    while let Some(i) = curr {
        let k = arena[i].k;
        if key == k {
            return Some(i);
        }
        curr = if key < k { arena[i].l } else { arena[i].r };
    }
    None
}

fn size_inner<V>(arena: &Arena<V>, root: u32) -> usize {
    let n = &arena[root];
    1 + n.l.map_or(0, |l| size_inner(arena, l)) + n.r.map_or(0, |r| size_inner(arena, r))
}

/// Number of nodes under `root`.
pub fn size<V>(arena: &Arena<V>, root: Option<u32>) -> usize {
    root.map_or(0, |r| size_inner(arena, r))
}
