use std::fmt::Debug;

use tracing::trace;

use crate::arena::Arena;
use crate::util::{first, next};

/// Height of an optional subtree. The empty slot has height `-1`.
#[inline]
pub fn height<V>(arena: &Arena<V>, node: Option<u32>) -> i32 {
    node.map_or(-1, |i| arena[i].h)
}

/// `height(left) - height(right)`; positive means left-heavy.
#[inline]
pub fn balance<V>(arena: &Arena<V>, node: u32) -> i32 {
    let n = &arena[node];
    height(arena, n.l) - height(arena, n.r)
}

#[inline]
fn computed_height<V>(arena: &Arena<V>, node: u32) -> i32 {
    let n = &arena[node];
    1 + height(arena, n.l).max(height(arena, n.r))
}

#[inline]
pub(crate) fn update_height<V>(arena: &mut Arena<V>, node: u32) {
    let h = computed_height(arena, node);
    arena[node].h = h;
}

#[inline]
pub(crate) fn set_l<V>(arena: &mut Arena<V>, node: u32, child: Option<u32>) {
    arena[node].l = child;
    if let Some(c) = child {
        arena[c].p = Some(node);
    }
}

#[inline]
pub(crate) fn set_r<V>(arena: &mut Arena<V>, node: u32, child: Option<u32>) {
    arena[node].r = child;
    if let Some(c) = child {
        arena[c].p = Some(node);
    }
}

/// Puts `new` into the slot of `parent` that holds `old`, or makes it a
/// root when there is no parent.
fn replace_child<V>(arena: &mut Arena<V>, parent: Option<u32>, old: u32, new: u32) {
    arena[new].p = parent;
    if let Some(p) = parent {
        if arena[p].l == Some(old) {
            arena[p].l = Some(new);
        } else {
            arena[p].r = Some(new);
        }
    }
}

/// Exchanges the key/value entries of two nodes, leaving links alone.
pub(crate) fn swap_entries<V>(arena: &mut Arena<V>, a: u32, b: u32) {
    let (x, y) = arena.pair_mut(a, b);
    std::mem::swap(&mut x.k, &mut y.k);
    std::mem::swap(&mut x.v, &mut y.v);
}

/// Rotates `p` with its right child and returns that child, now on top.
///
/// Only links change; the caller refreshes the heights of both nodes.
pub fn rotate_left<V>(arena: &mut Arena<V>, p: u32) -> u32 {
    let c = arena[p].r.expect("rotate_left needs a right child");
    let parent = arena[p].p;
    let cl = arena[c].l;
    set_r(arena, p, cl);
    replace_child(arena, parent, p, c);
    set_l(arena, c, Some(p));
    trace!(pivot = arena[p].k, top = arena[c].k, "rotate left");
    c
}

/// Mirror of [`rotate_left`].
pub fn rotate_right<V>(arena: &mut Arena<V>, p: u32) -> u32 {
    let c = arena[p].l.expect("rotate_right needs a left child");
    let parent = arena[p].p;
    let cr = arena[c].r;
    set_l(arena, p, cr);
    replace_child(arena, parent, p, c);
    set_r(arena, c, Some(p));
    trace!(pivot = arena[p].k, top = arena[c].k, "rotate right");
    c
}

/// Fixes a node whose balance factor is `bf = ±2` with a single or a
/// double rotation. Returns the new subtree root and the rotation count.
fn rotate_heavy<V>(arena: &mut Arena<V>, n: u32, bf: i32) -> (u32, usize) {
    let mut rotations = 0;
    let top = if bf > 0 {
        let l = arena[n].l.expect("left-heavy node has a left child");
        if balance(arena, l) < 0 {
            let lr = rotate_left(arena, l);
            update_height(arena, l);
            update_height(arena, lr);
            rotations += 1;
        }
        rotate_right(arena, n)
    } else {
        let r = arena[n].r.expect("right-heavy node has a right child");
        if balance(arena, r) > 0 {
            let rl = rotate_right(arena, r);
            update_height(arena, r);
            update_height(arena, rl);
            rotations += 1;
        }
        rotate_left(arena, n)
    };
    update_height(arena, n);
    update_height(arena, top);
    (top, rotations + 1)
}

/// Walks from `start` up to the root restoring cached heights and the AVL
/// balance, and returns the (possibly new) root with the operation count.
///
/// Every height change (promotion or demotion) counts as one operation and
/// so does every rotation, a double rotation counting two. The walk stops
/// at the first balanced node whose height did not change.
///
/// After an insertion the walk always stops right above the first
/// rotation. After a deletion, or when a join spliced a taller subtree
/// into the spine, a rotation can shrink or grow its subtree and the walk
/// carries on.
pub fn retrace<V>(arena: &mut Arena<V>, mut root: u32, start: u32) -> (u32, usize) {
    let mut ops = 0;
    let mut curr = Some(start);
    while let Some(n) = curr {
        let bf = balance(arena, n);
        if (-1..=1).contains(&bf) {
            let h = computed_height(arena, n);
            if h == arena[n].h {
                break;
            }
            arena[n].h = h;
            ops += 1;
            curr = arena[n].p;
        } else {
            let (top, rotations) = rotate_heavy(arena, n, bf);
            ops += rotations;
            curr = arena[top].p;
            if curr.is_none() {
                root = top;
            }
        }
    }
    (root, ops)
}

/// Checks links, cached heights, balance factors and key order under
/// `root`.
pub fn assert_avl_tree<V>(arena: &Arena<V>, root: Option<u32>) -> Result<(), String> {
    let Some(root) = root else {
        return Ok(());
    };

    if arena[root].p.is_some() {
        return Err("Root has parent".to_string());
    }

    fn validate_links_and_heights<V>(arena: &Arena<V>, node: u32) -> Result<i32, String> {
        let n = &arena[node];
        let mut lh = -1;
        let mut rh = -1;
        if let Some(l) = n.l {
            if arena[l].p != Some(node) {
                return Err(format!("Broken parent link on left child of {}", n.k));
            }
            lh = validate_links_and_heights(arena, l)?;
        }
        if let Some(r) = n.r {
            if arena[r].p != Some(node) {
                return Err(format!("Broken parent link on right child of {}", n.k));
            }
            rh = validate_links_and_heights(arena, r)?;
        }

        let expected = 1 + lh.max(rh);
        if n.h != expected {
            return Err(format!(
                "Height mismatch at {}: expected {expected}, got {}",
                n.k, n.h
            ));
        }
        if (lh - rh).abs() > 1 {
            return Err(format!("AVL balance violated at {}", n.k));
        }
        Ok(expected)
    }

    validate_links_and_heights(arena, root)?;

    let mut curr = first(arena, Some(root));
    let mut prev: Option<i64> = None;
    while let Some(i) = curr {
        let k = arena[i].k;
        if prev.is_some_and(|p| p >= k) {
            return Err(format!("Node order violated at {k}"));
        }
        prev = Some(k);
        curr = next(arena, i);
    }

    Ok(())
}

/// Debug printer for AVL trees.
pub fn print<V: Debug>(arena: &Arena<V>, node: Option<u32>, tab: &str) -> String {
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i];
            let left = print(arena, n.l, &format!("{tab}  "));
            let right = print(arena, n.r, &format!("{tab}  "));
            format!(
                "Node[{i}] [h={}] {{ {} = {:?} }}\n{tab}L={left}\n{tab}R={right}",
                n.h, n.k, n.v
            )
        }
    }
}
