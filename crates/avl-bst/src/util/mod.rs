//! Plain binary-search-tree helpers over an index arena.
//!
//! Nothing here knows about balance factors; the AVL engine in
//! [`crate::avl::util`] builds on these for descent, in-order walks and the
//! structural [`swap`] primitive.

pub mod swap;

use crate::types::{Node, Side};

pub use swap::swap;

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn set_l<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

/// Side of `parent` that `child` hangs from.
#[inline]
pub(crate) fn side_of<N: Node>(arena: &[N], parent: u32, child: u32) -> Side {
    if get_l(arena, parent) == Some(child) {
        Side::Left
    } else {
        Side::Right
    }
}

/// Points whatever referenced `old` from above (the parent slot) at `new`.
///
/// Does nothing when `parent` is `None`; the caller owns the root reference.
#[inline]
pub(crate) fn replace_child<N: Node>(
    arena: &mut [N],
    parent: Option<u32>,
    old: u32,
    new: Option<u32>,
) {
    if let Some(p) = parent {
        let side = side_of(arena, p, old);
        arena[p as usize].set_child(side, new);
    }
}

/// Follows `side` links from `root` as far as they go.
fn extreme<N: Node>(arena: &[N], root: Option<u32>, side: Side) -> Option<u32> {
    let mut idx = root?;
    while let Some(child) = arena[idx as usize].child(side) {
        idx = child;
    }
    Some(idx)
}

/// Leftmost node in the tree.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    extreme(arena, root, Side::Left)
}

/// Rightmost node in the tree.
pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    extreme(arena, root, Side::Right)
}

/// In-order successor.
pub fn next<N: Node>(arena: &[N], node: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, node) {
        return first(arena, Some(r));
    }
    let mut curr = node;
    let mut p = get_p(arena, node);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor.
pub fn prev<N: Node>(arena: &[N], node: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, node) {
        return last(arena, Some(l));
    }
    let mut curr = node;
    let mut p = get_p(arena, node);
    while let Some(pi) = p {
        if get_l(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// Number of nodes reachable from `root`.
pub fn size<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    match root {
        None => 0,
        Some(i) => 1 + size(arena, get_l(arena, i)) + size(arena, get_r(arena, i)),
    }
}

/// Number of levels under `root`; an empty tree has height 0, a lone node 1.
pub fn height<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    match root {
        None => 0,
        Some(i) => 1 + height(arena, get_l(arena, i)).max(height(arena, get_r(arena, i))),
    }
}

fn balanced_height<N: Node>(arena: &[N], root: Option<u32>) -> Option<usize> {
    let Some(i) = root else {
        return Some(0);
    };
    let lh = balanced_height(arena, get_l(arena, i))?;
    let rh = balanced_height(arena, get_r(arena, i))?;
    (lh.abs_diff(rh) <= 1).then(|| 1 + lh.max(rh))
}

/// Whether the two subtrees of every node differ in height by at most one.
pub fn is_balanced<N: Node>(arena: &[N], root: Option<u32>) -> bool {
    balanced_height(arena, root).is_some()
}

/// Finds a node by key.
pub fn find<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    key_of: F,
    comparator: C,
) -> Option<u32>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    match search(arena, root, key, key_of, comparator) {
        Search::Found(i) => Some(i),
        _ => None,
    }
}

/// Finds node by key, or the next lower node if the exact key does not exist.
pub fn find_or_next_lower<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    key_of: F,
    comparator: C,
) -> Option<u32>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    let mut curr = root;
    let mut result: Option<u32> = None;
    while let Some(i) = curr {
        let cmp = comparator(key_of(&arena[i as usize]), key);
        if cmp == 0 {
            return Some(i);
        }
        if cmp > 0 {
            curr = get_l(arena, i);
        } else {
            result = Some(i);
            curr = get_r(arena, i);
        }
    }
    result
}

/// Outcome of an ordered descent looking for `key`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Search {
    /// A node with an equal key exists.
    Found(u32),
    /// No equal key; a new node belongs in `side` of `parent`.
    Vacant { parent: u32, side: Side },
    /// The tree has no nodes.
    Empty,
}

/// Ordered descent from `root` that stops at a matching key or the empty
/// child slot where `key` would be attached.
pub fn search<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    key_of: F,
    comparator: C,
) -> Search
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    let Some(mut curr) = root else {
        return Search::Empty;
    };
    loop {
        let cmp = comparator(key, key_of(&arena[curr as usize]));
        if cmp == 0 {
            return Search::Found(curr);
        }
        let side = if cmp < 0 { Side::Left } else { Side::Right };
        match arena[curr as usize].child(side) {
            Some(next) => curr = next,
            None => return Search::Vacant { parent: curr, side },
        }
    }
}
