//! Arena-based AVL trees over distinct `i64` keys.
//!
//! Besides logarithmic search, insert and delete, the trees support two
//! whole-structure operations:
//!
//! - **join** merges two trees and a separating entry in time proportional
//!   to the difference of their ranks (heights);
//! - **split** cuts a tree around a present key into two valid AVL trees,
//!   joining the side subtrees met on the way from the pivot to the root.
//!
//! All nodes live in one [`Arena`] owned by a [`Forest`]; a [`Tree`] is a
//! handle holding a root index and the cached extremes. Child slots are
//! `Option<u32>` indices and `None` acts as the sentinel of height `-1`.
//! Parent links are plain indices back into the same arena.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`arena`] | Slot arena with free list |
//! [`avl`] | [`AvlNode`], rotations, rebalance walk, validation, printing |
//! [`util`] | `first`, `last`, `next`, `prev`, `find`, `size` over the arena |
//! [`forest`] | [`Forest`]: search, insert, delete, queries, iteration |
//! `join` / `split` | [`Forest::join`] and [`Forest::split`] |

pub mod arena;
pub mod avl;
pub mod error;
pub mod forest;
mod join;
mod split;
pub mod tree;
pub mod util;

pub use arena::Arena;
pub use avl::AvlNode;
pub use error::TreeError;
pub use forest::{Forest, Iter};
pub use split::SplitParts;
pub use tree::Tree;
