//! Leaf-depth uniformity check for arbitrary binary trees.

use crate::types::Node;

/// Returns `true` when every leaf under `root` sits at the same depth.
///
/// An empty tree and a lone node both qualify.
pub fn equal_paths<N: Node>(arena: &[N], root: Option<u32>) -> bool {
    let Some(root) = root else {
        return true;
    };
    let depth = probe_depth(arena, root);
    leaves_at(arena, Some(root), depth, 0)
}

/// Depth of the first leaf reached by preferring the left child.
fn probe_depth<N: Node>(arena: &[N], node: u32) -> usize {
    let n = &arena[node as usize];
    match n.l().or(n.r()) {
        Some(child) => 1 + probe_depth(arena, child),
        None => 0,
    }
}

fn leaves_at<N: Node>(arena: &[N], node: Option<u32>, depth: usize, at: usize) -> bool {
    let Some(i) = node else {
        return true;
    };
    let n = &arena[i as usize];
    if n.l().is_none() && n.r().is_none() {
        return at == depth;
    }
    leaves_at(arena, n.l(), depth, at + 1) && leaves_at(arena, n.r(), depth, at + 1)
}
