//! AVL tree engine and the [`AvlMap`] built on it.

pub mod avl_map;
#[cfg(feature = "serde")]
mod serde_impl;
pub mod types;
pub mod util;

pub use avl_map::{AvlMap, Iter};
pub use types::{AvlNode, AvlNodeLike};
pub use util::{
    assert_avl_tree, attach, insert_left, insert_right, node_swap, remove, rotate_left,
    rotate_right,
};
