use crate::types::Node;

use super::{get_l, get_p, get_r, set_l, set_p, set_r, side_of};

/// Exchanges the tree positions of `x` and `y`, leaving their payloads where
/// they are. Works for any pair of nodes, including a parent and its child.
///
/// Returns the root after the exchange.
pub fn swap<N: Node>(arena: &mut [N], mut root: u32, x: u32, y: u32) -> u32 {
    if x == y {
        return root;
    }

    let (xp, xl, xr) = (get_p(arena, x), get_l(arena, x), get_r(arena, x));
    let (yp, yl, yr) = (get_p(arena, y), get_l(arena, y), get_r(arena, y));

    // A link that pointed at one of the pair must point at the other after
    // the exchange; this also covers the parent/child case.
    let swap_ref = |link: Option<u32>| match link {
        Some(i) if i == x => Some(y),
        Some(i) if i == y => Some(x),
        other => other,
    };

    match (xp, yp) {
        (Some(p), Some(q)) if p == q => {
            let (pl, pr) = (get_l(arena, p), get_r(arena, p));
            set_l(arena, p, pr);
            set_r(arena, p, pl);
        }
        _ => {
            if let Some(p) = xp.filter(|&p| p != y) {
                let side = side_of(arena, p, x);
                arena[p as usize].set_child(side, Some(y));
            }
            if let Some(p) = yp.filter(|&p| p != x) {
                let side = side_of(arena, p, y);
                arena[p as usize].set_child(side, Some(x));
            }
        }
    }

    set_p(arena, x, swap_ref(yp));
    set_l(arena, x, swap_ref(yl));
    set_r(arena, x, swap_ref(yr));
    set_p(arena, y, swap_ref(xp));
    set_l(arena, y, swap_ref(xl));
    set_r(arena, y, swap_ref(xr));

    for node in [x, y] {
        for child in [get_l(arena, node), get_r(arena, node)].into_iter().flatten() {
            set_p(arena, child, Some(node));
        }
    }

    if xp.is_none() {
        root = y;
    } else if yp.is_none() {
        root = x;
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avl::AvlNode;

    fn link(arena: &mut [AvlNode<i32, ()>], parent: u32, l: Option<u32>, r: Option<u32>) {
        set_l(arena, parent, l);
        set_r(arena, parent, r);
        for c in [l, r].into_iter().flatten() {
            set_p(arena, c, Some(parent));
        }
    }

    // 0 -> (1 -> (3, 4), 2)
    fn sample() -> Vec<AvlNode<i32, ()>> {
        let mut arena: Vec<_> = (0..5).map(|k| AvlNode::new(k, ())).collect();
        link(&mut arena, 0, Some(1), Some(2));
        link(&mut arena, 1, Some(3), Some(4));
        arena
    }

    #[test]
    fn swaps_parent_with_child() {
        let mut arena = sample();
        let root = swap(&mut arena, 0, 0, 1);
        assert_eq!(root, 1);
        assert_eq!(get_p(&arena, 1), None);
        assert_eq!(get_l(&arena, 1), Some(0));
        assert_eq!(get_r(&arena, 1), Some(2));
        assert_eq!(get_p(&arena, 0), Some(1));
        assert_eq!(get_l(&arena, 0), Some(3));
        assert_eq!(get_r(&arena, 0), Some(4));
        assert_eq!(get_p(&arena, 3), Some(0));
        assert_eq!(get_p(&arena, 2), Some(1));
    }

    #[test]
    fn swaps_siblings() {
        let mut arena = sample();
        let root = swap(&mut arena, 0, 1, 2);
        assert_eq!(root, 0);
        assert_eq!(get_l(&arena, 0), Some(2));
        assert_eq!(get_r(&arena, 0), Some(1));
        assert_eq!(get_l(&arena, 2), Some(3));
        assert_eq!(get_p(&arena, 4), Some(2));
        assert_eq!(get_l(&arena, 1), None);
    }

    #[test]
    fn swaps_distant_nodes() {
        let mut arena = sample();
        let root = swap(&mut arena, 0, 0, 4);
        assert_eq!(root, 4);
        assert_eq!(get_l(&arena, 4), Some(1));
        assert_eq!(get_r(&arena, 4), Some(2));
        assert_eq!(get_r(&arena, 1), Some(0));
        assert_eq!(get_p(&arena, 0), Some(1));
        assert_eq!(get_l(&arena, 0), None);
        assert_eq!(get_p(&arena, 2), Some(4));
    }
}
