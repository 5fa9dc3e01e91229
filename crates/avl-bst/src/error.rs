use thiserror::Error;

/// Errors returned by the public map operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AvlError {
    #[error("key not found")]
    KeyNotFound,
}

/// A broken structural invariant reported by
/// [`assert_avl_tree`](crate::avl::assert_avl_tree).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("root node {0} has a parent")]
    RootHasParent(u32),
    #[error("node {child} does not point back at parent {parent}")]
    BrokenParentLink { parent: u32, child: u32 },
    #[error("node {node}: balance factor {actual}, measured {expected}")]
    BalanceMismatch { node: u32, expected: i32, actual: i32 },
    #[error("node {node}: balance factor {bf} outside -1..=1")]
    Unbalanced { node: u32, bf: i32 },
    #[error("keys out of order at node {0}")]
    OrderViolated(u32),
    #[error("cached min/max does not match the tree")]
    StaleBounds,
    #[error("arena holds {arena} slots for {len} entries")]
    LeakedSlots { arena: usize, len: usize },
}
