//! AVL node model, rotation primitives and rebalancing walks.

pub mod types;
pub mod util;

pub use types::AvlNode;
pub use util::{assert_avl_tree, balance, height, print, retrace, rotate_left, rotate_right};
