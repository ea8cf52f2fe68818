/// AVL tree node stored in an [`Arena`](crate::arena::Arena).
///
/// A missing child (`None`) plays the role of the sentinel: it has no
/// payload and counts as height `-1` in every balance computation.
#[derive(Clone, Debug)]
pub struct AvlNode<V> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: i64,
    pub v: V,
    /// Height of the subtree rooted here, `0` for a leaf.
    pub h: i32,
}

impl<V> AvlNode<V> {
    pub fn new(k: i64, v: V) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
            v,
            h: 0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.l.is_none() && self.r.is_none()
    }
}
