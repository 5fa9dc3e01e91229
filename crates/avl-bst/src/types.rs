//! Node trait definitions.
//!
//! Nodes live in a [`Vec`]-backed arena owned by the map. Each link is an
//! `Option<u32>` index into that arena, so the parent back-reference is a
//! plain index instead of a borrowed pointer. All tree-manipulation functions
//! take the arena as a slice and work with indices.

/// Tree links (`p`, `l`, `r`).
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);

    #[inline]
    fn child(&self, side: Side) -> Option<u32> {
        match side {
            Side::Left => self.l(),
            Side::Right => self.r(),
        }
    }

    #[inline]
    fn set_child(&mut self, side: Side, v: Option<u32>) {
        match side {
            Side::Left => self.set_l(v),
            Side::Right => self.set_r(v),
        }
    }
}

/// Key/value node interface used by map-like structures.
pub trait KvNode<K, V>: Node {
    fn key(&self) -> &K;
    fn value(&self) -> &V;
    fn value_mut(&mut self) -> &mut V;
}

/// Which child slot of its parent a node occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Balance-factor delta applied to the parent when this side grows by
    /// one level.
    #[inline]
    pub fn grow_delta(self) -> i32 {
        match self {
            Side::Left => 1,
            Side::Right => -1,
        }
    }

    /// Balance-factor delta applied to the parent when this side shrinks by
    /// one level.
    #[inline]
    pub fn shrink_delta(self) -> i32 {
        -self.grow_delta()
    }
}
