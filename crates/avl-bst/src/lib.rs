//! Arena-based AVL tree.
//!
//! An ordered key/value map that keeps every node's balance factor
//! (`height(left) - height(right)`) within `-1..=1`, giving O(log n)
//! insert, remove and lookup.
//!
//! Nodes are stored in a `Vec` and linked by `Option<u32>` indices, so the
//! parent back-reference needed for the upward rebalancing walk is a plain
//! index rather than a pointer.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] / [`KvNode`] link traits, [`Side`] |
//! [`util`] | BST descent, in-order walk, structural [`swap`](util::swap) |
//! [`avl`] | rotations, insert/remove rebalancing, validation, [`AvlMap`] |
//! [`equal_paths`] | leaf-depth uniformity check |
//! [`error`] | [`AvlError`], [`InvariantViolation`] |
//!
//! ```
//! use avl_bst::{AvlError, AvlMap};
//!
//! let mut map = AvlMap::new();
//! for k in 1..=5 {
//!     map.insert(k, k * 10);
//! }
//! assert_eq!(map.find(&3), Some(&30));
//! assert_eq!(map.remove(&3), Ok(30));
//! assert_eq!(map.remove(&3), Err(AvlError::KeyNotFound));
//! assert!(map.height() <= 3);
//! ```

pub mod avl;
pub mod equal_paths;
pub mod error;
pub mod types;
pub mod util;

pub use avl::{AvlMap, AvlNode, AvlNodeLike};
pub use equal_paths::equal_paths;
pub use error::{AvlError, InvariantViolation};
pub use types::{KvNode, Node, Side};
