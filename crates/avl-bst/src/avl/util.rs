//! AVL engine: rotations, insert/remove rebalancing and validation.
//!
//! Every function works on a caller-owned arena and takes/returns the root
//! index explicitly. A rotation re-links the pivot's former parent inside the
//! arena, but only the caller can update its own root reference, so any
//! function that may replace the root returns the new one.

use tracing::trace;

use crate::error::InvariantViolation;
use crate::types::Side;
use crate::util::{first, get_l, get_p, get_r, next, replace_child, set_l, set_p, set_r, side_of};

use super::types::AvlNodeLike;

#[inline]
fn bf<K, V, N>(arena: &[N], i: u32) -> i32
where
    N: AvlNodeLike<K, V>,
{
    arena[i as usize].bf()
}

#[inline]
fn set_bf<K, V, N>(arena: &mut [N], i: u32, v: i32)
where
    N: AvlNodeLike<K, V>,
{
    arena[i as usize].set_bf(v);
}

/// Rotates `pivot` down to the right; its left child takes its place.
///
/// Returns the node now occupying the pivot's position, or `pivot` itself
/// when it has no left child. The former parent's child slot is re-linked;
/// if the returned node has no parent the caller must adopt it as root.
pub fn rotate_right<K, V, N>(arena: &mut [N], pivot: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    let Some(l) = get_l(arena, pivot) else {
        return pivot;
    };
    let p = get_p(arena, pivot);
    let lr = get_r(arena, l);

    set_l(arena, pivot, lr);
    if let Some(lr) = lr {
        set_p(arena, lr, Some(pivot));
    }
    replace_child(arena, p, pivot, Some(l));
    set_p(arena, l, p);
    set_r(arena, l, Some(pivot));
    set_p(arena, pivot, Some(l));

    let pbf = bf(arena, pivot) - 1 - bf(arena, l).max(0);
    let lbf = bf(arena, l) - 1 + pbf.min(0);
    set_bf(arena, pivot, pbf);
    set_bf(arena, l, lbf);
    trace!(pivot, replacement = l, pbf, lbf, "rotate right");
    l
}

/// Mirror of [`rotate_right`]: the right child takes the pivot's place.
pub fn rotate_left<K, V, N>(arena: &mut [N], pivot: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    let Some(r) = get_r(arena, pivot) else {
        return pivot;
    };
    let p = get_p(arena, pivot);
    let rl = get_l(arena, r);

    set_r(arena, pivot, rl);
    if let Some(rl) = rl {
        set_p(arena, rl, Some(pivot));
    }
    replace_child(arena, p, pivot, Some(r));
    set_p(arena, r, p);
    set_l(arena, r, Some(pivot));
    set_p(arena, pivot, Some(r));

    let pbf = bf(arena, pivot) + 1 - bf(arena, r).min(0);
    let rbf = bf(arena, r) + 1 + pbf.max(0);
    set_bf(arena, pivot, pbf);
    set_bf(arena, r, rbf);
    trace!(pivot, replacement = r, pbf, rbf, "rotate left");
    r
}

/// Restores balance at `n` whose balance factor is ±2 using the single or
/// double rotation its heavy child calls for. Returns the new subtree root.
fn rebalance<K, V, N>(arena: &mut [N], n: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    if bf(arena, n) > 1 {
        if let Some(l) = get_l(arena, n) {
            if bf(arena, l) < 0 {
                rotate_left(arena, l);
            }
        }
        rotate_right(arena, n)
    } else {
        if let Some(r) = get_r(arena, n) {
            if bf(arena, r) > 0 {
                rotate_right(arena, r);
            }
        }
        rotate_left(arena, n)
    }
}

#[inline]
fn adopt_root<K, V, N>(arena: &[N], root: u32, subtree: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    if get_p(arena, subtree).is_none() {
        subtree
    } else {
        root
    }
}

/// Walks up from the freshly attached `child`, growing ancestors until one
/// absorbs the extra level or a single rebalance fixes it.
fn rebalance_after_insert<K, V, N>(arena: &mut [N], root: u32, mut child: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    while let Some(p) = get_p(arena, child) {
        let pbf = bf(arena, p) + side_of(arena, p, child).grow_delta();
        set_bf(arena, p, pbf);
        match pbf {
            0 => return root,
            1 | -1 => child = p,
            _ => {
                let subtree = rebalance(arena, p);
                return adopt_root(arena, root, subtree);
            }
        }
    }
    root
}

/// Links the detached node `n` into the empty `side` slot of `parent` and
/// rebalances. Returns the new root.
pub fn attach<K, V, N>(arena: &mut [N], root: u32, n: u32, parent: u32, side: Side) -> u32
where
    N: AvlNodeLike<K, V>,
{
    arena[parent as usize].set_child(side, Some(n));
    set_p(arena, n, Some(parent));
    set_bf(arena, n, 0);
    rebalance_after_insert(arena, root, n)
}

pub fn insert_left<K, V, N>(arena: &mut [N], root: u32, n: u32, parent: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    attach(arena, root, n, parent, Side::Left)
}

pub fn insert_right<K, V, N>(arena: &mut [N], root: u32, n: u32, parent: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    attach(arena, root, n, parent, Side::Right)
}

/// Exchanges the positions of `x` and `y` together with their balance
/// factors, so each position keeps the balance it had. Payloads stay put.
pub fn node_swap<K, V, N>(arena: &mut [N], root: u32, x: u32, y: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    let root = crate::util::swap(arena, root, x, y);
    let (xbf, ybf) = (bf(arena, x), bf(arena, y));
    set_bf(arena, x, ybf);
    set_bf(arena, y, xbf);
    root
}

/// Unlinks `n` from the tree rooted at `root` and rebalances.
///
/// On return `n` is fully detached (no links, balance 0) but still occupies
/// its arena slot; releasing the slot is up to the caller. Returns the new
/// root, `None` when `n` was the only node.
pub fn remove<K, V, N>(arena: &mut [N], root: u32, n: u32) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    let mut root = root;
    if let (Some(l), Some(_)) = (get_l(arena, n), get_r(arena, n)) {
        let pred = crate::util::last(arena, Some(l)).unwrap_or(l);
        root = node_swap(arena, root, n, pred);
    }

    let p = get_p(arena, n);
    let child = get_l(arena, n).or(get_r(arena, n));
    if let Some(c) = child {
        set_p(arena, c, p);
    }
    set_p(arena, n, None);
    set_l(arena, n, None);
    set_r(arena, n, None);
    set_bf(arena, n, 0);

    let Some(p) = p else {
        return child;
    };
    let side = if get_l(arena, p) == Some(n) {
        Side::Left
    } else {
        Side::Right
    };
    arena[p as usize].set_child(side, child);

    Some(rebalance_after_remove(arena, root, p, side))
}

/// Walks up from `node`, whose `side` subtree just lost a level.
///
/// A ±1 balance means the subtree kept its height and the walk stops. A 0
/// means it shrank, so the parent is adjusted next. After a rotation the
/// walk resumes at the parent of the rotated subtree's new root, and that
/// root's balance decides whether the shrink propagates.
fn rebalance_after_remove<K, V, N>(arena: &mut [N], mut root: u32, node: u32, side: Side) -> u32
where
    N: AvlNodeLike<K, V>,
{
    let mut node = node;
    let mut side = side;
    loop {
        let nbf = bf(arena, node) + side.shrink_delta();
        set_bf(arena, node, nbf);

        let mut subtree = node;
        if !(-1..=1).contains(&nbf) {
            subtree = rebalance(arena, node);
            root = adopt_root(arena, root, subtree);
        }
        if bf(arena, subtree) != 0 {
            return root;
        }
        let Some(p) = get_p(arena, subtree) else {
            return root;
        };
        side = side_of(arena, p, subtree);
        node = p;
    }
}

/// Checks links, balance factors and key order of the tree under `root`.
pub fn assert_avl_tree<K, V, N, C>(
    arena: &[N],
    root: Option<u32>,
    comparator: &C,
) -> Result<(), InvariantViolation>
where
    N: AvlNodeLike<K, V>,
    C: Fn(&K, &K) -> i32,
{
    let Some(root) = root else {
        return Ok(());
    };
    if get_p(arena, root).is_some() {
        return Err(InvariantViolation::RootHasParent(root));
    }

    fn checked_height<K, V, N>(arena: &[N], node: u32) -> Result<i32, InvariantViolation>
    where
        N: AvlNodeLike<K, V>,
    {
        let mut heights = [0i32; 2];
        for (slot, child) in [get_l(arena, node), get_r(arena, node)].into_iter().enumerate() {
            if let Some(c) = child {
                if get_p(arena, c) != Some(node) {
                    return Err(InvariantViolation::BrokenParentLink {
                        parent: node,
                        child: c,
                    });
                }
                heights[slot] = checked_height(arena, c)?;
            }
        }

        let expected = heights[0] - heights[1];
        let actual = arena[node as usize].bf();
        if actual != expected {
            return Err(InvariantViolation::BalanceMismatch {
                node,
                expected,
                actual,
            });
        }
        if !(-1..=1).contains(&actual) {
            return Err(InvariantViolation::Unbalanced { node, bf: actual });
        }
        Ok(1 + heights[0].max(heights[1]))
    }

    checked_height(arena, root)?;

    let mut prev: Option<u32> = None;
    let mut curr = first(arena, Some(root));
    while let Some(i) = curr {
        if let Some(prev) = prev {
            if comparator(arena[prev as usize].key(), arena[i as usize].key()) >= 0 {
                return Err(InvariantViolation::OrderViolated(i));
            }
        }
        prev = Some(i);
        curr = next(arena, i);
    }
    Ok(())
}
