use std::fmt;
use std::iter::FusedIterator;
use std::mem;

use tracing::debug;

use crate::equal_paths::equal_paths;
use crate::error::{AvlError, InvariantViolation};
use crate::types::{KvNode, Node, Side};
use crate::util::{
    find, find_or_next_lower, first, height, is_balanced, last, next, prev, replace_child,
    search, set_p, Search,
};

use super::types::AvlNode;
use super::util;

pub(crate) fn default_comparator<K: Ord>(a: &K, b: &K) -> i32 {
    a.cmp(b) as i32
}

/// Ordered map backed by an AVL tree.
///
/// Nodes live in a dense arena and are addressed by `u32` indices. Index
/// accessors (`first`, `next`, `key`, ...) are valid until the next
/// [`remove`](AvlMap::remove), which may move one node into the freed slot.
pub struct AvlMap<K, V, C = fn(&K, &K) -> i32>
where
    C: Fn(&K, &K) -> i32,
{
    arena: Vec<AvlNode<K, V>>,
    root: Option<u32>,
    min: Option<u32>,
    max: Option<u32>,
    comparator: C,
}

impl<K: Ord, V> AvlMap<K, V, fn(&K, &K) -> i32> {
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, default_comparator::<K>)
    }
}

impl<K: Ord, V> Default for AvlMap<K, V, fn(&K, &K) -> i32> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    /// Uses `comparator` to order keys: negative when `a < b`, zero when
    /// equal, positive when `a > b`. It must be a total order.
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_capacity_and_comparator(0, comparator)
    }

    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        Self {
            arena: Vec::with_capacity(capacity),
            root: None,
            min: None,
            max: None,
            comparator,
        }
    }

    fn push_node(&mut self, key: K, value: V) -> u32 {
        self.arena.push(AvlNode::new(key, value));
        (self.arena.len() - 1) as u32
    }

    fn insert_root(&mut self, key: K, value: V) {
        let idx = self.push_node(key, value);
        self.root = Some(idx);
        self.min = Some(idx);
        self.max = Some(idx);
    }

    fn link_new(&mut self, root: u32, key: K, value: V, parent: u32, side: Side) -> u32 {
        let idx = self.push_node(key, value);
        self.root = Some(util::attach(&mut self.arena, root, idx, parent, side));
        idx
    }

    /// Inserts `value` under `key`. An existing key keeps its node and only
    /// has its value replaced; the previous value is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let Some(root) = self.root else {
            self.insert_root(key, value);
            return None;
        };

        // Appends and prepends skip the descent.
        if let Some(max) = self.max {
            let cmp = (self.comparator)(&key, &self.arena[max as usize].k);
            if cmp == 0 {
                return Some(mem::replace(&mut self.arena[max as usize].v, value));
            }
            if cmp > 0 {
                self.max = Some(self.link_new(root, key, value, max, Side::Right));
                return None;
            }
        }
        if let Some(min) = self.min {
            let cmp = (self.comparator)(&key, &self.arena[min as usize].k);
            if cmp == 0 {
                return Some(mem::replace(&mut self.arena[min as usize].v, value));
            }
            if cmp < 0 {
                self.min = Some(self.link_new(root, key, value, min, Side::Left));
                return None;
            }
        }

        let found = search(&self.arena, Some(root), &key, |n| &n.k, &self.comparator);
        match found {
            Search::Found(idx) => Some(mem::replace(&mut self.arena[idx as usize].v, value)),
            Search::Vacant { parent, side } => {
                self.link_new(root, key, value, parent, side);
                None
            }
            Search::Empty => {
                self.insert_root(key, value);
                None
            }
        }
    }

    /// Removes `key` and returns its value.
    ///
    /// # Errors
    ///
    /// [`AvlError::KeyNotFound`] when the key is absent; the tree is left
    /// untouched.
    pub fn remove(&mut self, key: &K) -> Result<V, AvlError> {
        let (Some(root), Some(idx)) = (self.root, self.find_index(key)) else {
            debug!(len = self.len(), "remove: key not found");
            return Err(AvlError::KeyNotFound);
        };

        if self.min == Some(idx) {
            self.min = next(&self.arena, idx);
        }
        if self.max == Some(idx) {
            self.max = prev(&self.arena, idx);
        }
        self.root = util::remove(&mut self.arena, root, idx);
        Ok(self.release(idx))
    }

    /// Drops the detached node at `idx` from the arena. The last node moves
    /// into the freed slot and every reference to it is re-pointed.
    fn release(&mut self, idx: u32) -> V {
        let moved = (self.arena.len() - 1) as u32;
        let (_, value) = self.arena.swap_remove(idx as usize).into_entry();
        if moved == idx {
            return value;
        }

        let node = &self.arena[idx as usize];
        let (p, l, r) = (node.p(), node.l(), node.r());
        replace_child(&mut self.arena, p, moved, Some(idx));
        for child in [l, r].into_iter().flatten() {
            set_p(&mut self.arena, child, Some(idx));
        }
        for slot in [&mut self.root, &mut self.min, &mut self.max] {
            if *slot == Some(moved) {
                *slot = Some(idx);
            }
        }
        value
    }

    pub fn find(&self, key: &K) -> Option<&V> {
        self.find_index(key).map(|i| &self.arena[i as usize].v)
    }

    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.find_index(key)?;
        Some(&mut self.arena[idx as usize].v)
    }

    pub fn find_index(&self, key: &K) -> Option<u32> {
        find(&self.arena, self.root, key, |n| &n.k, &self.comparator)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find_index(key).is_some()
    }

    /// Index of `key`, or of the greatest key below it.
    pub fn find_or_next_lower(&self, key: &K) -> Option<u32> {
        find_or_next_lower(&self.arena, self.root, key, |n| &n.k, &self.comparator)
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.min = None;
        self.max = None;
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of levels; 0 for an empty map.
    pub fn height(&self) -> usize {
        height(&self.arena, self.root)
    }

    /// Whether sibling subtree heights differ by at most one everywhere,
    /// measured rather than read from the stored balance factors.
    pub fn is_balanced(&self) -> bool {
        is_balanced(&self.arena, self.root)
    }

    /// Whether every leaf sits at the same depth.
    pub fn has_equal_paths(&self) -> bool {
        equal_paths(&self.arena, self.root)
    }

    pub fn root_index(&self) -> Option<u32> {
        self.root
    }

    pub fn first(&self) -> Option<u32> {
        self.min
    }

    pub fn last(&self) -> Option<u32> {
        self.max
    }

    pub fn next(&self, curr: u32) -> Option<u32> {
        next(&self.arena, curr)
    }

    pub fn prev(&self, curr: u32) -> Option<u32> {
        prev(&self.arena, curr)
    }

    pub fn node(&self, idx: u32) -> &AvlNode<K, V> {
        &self.arena[idx as usize]
    }

    pub fn key(&self, idx: u32) -> &K {
        self.node(idx).key()
    }

    pub fn value(&self, idx: u32) -> &V {
        self.node(idx).value()
    }

    pub fn value_mut_by_index(&mut self, idx: u32) -> &mut V {
        self.arena[idx as usize].value_mut()
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// In-order iterator over `(key, value)` pairs.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            arena: &self.arena,
            front: self.min,
            back: self.max,
            remaining: self.arena.len(),
        }
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Checks every structural invariant, including that no released arena
    /// slot is still reachable.
    pub fn assert_valid(&self) -> Result<(), InvariantViolation> {
        let reachable = crate::util::size(&self.arena, self.root);
        if reachable != self.arena.len() {
            return Err(InvariantViolation::LeakedSlots {
                arena: self.arena.len(),
                len: reachable,
            });
        }
        if self.min != first(&self.arena, self.root) || self.max != last(&self.arena, self.root)
        {
            return Err(InvariantViolation::StaleBounds);
        }
        util::assert_avl_tree(&self.arena, self.root, &self.comparator)
    }
}

/// In-order iterator returned by [`AvlMap::iter`].
pub struct Iter<'a, K, V> {
    arena: &'a [AvlNode<K, V>],
    front: Option<u32>,
    back: Option<u32>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let i = self.front?;
        self.front = next(self.arena, i);
        self.remaining -= 1;
        let n = &self.arena[i as usize];
        Some((&n.k, &n.v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let i = self.back?;
        self.back = prev(self.arena, i);
        self.remaining -= 1;
        let n = &self.arena[i as usize];
        Some((&n.k, &n.v))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<'a, K, V, C> IntoIterator for &'a AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C> Extend<(K, V)> for AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlMap<K, V, fn(&K, &K) -> i32> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, C> fmt::Debug for AvlMap<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Fn(&K, &K) -> i32,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
