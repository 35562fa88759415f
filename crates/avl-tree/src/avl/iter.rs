use std::iter::FusedIterator;

use crate::util::next;

use super::types::AvlNode;

/// Lazy in-order iterator over `(&K, &V)`, walking parent links between
/// entries.
pub struct Iter<'a, K, V> {
    arena: &'a [AvlNode<K, V>],
    curr: Option<u32>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(arena: &'a [AvlNode<K, V>], first: Option<u32>, len: usize) -> Self {
        Self {
            arena,
            curr: first,
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.curr?;
        self.curr = next(self.arena, i);
        self.remaining = self.remaining.saturating_sub(1);
        let n = &self.arena[i as usize];
        Some((&n.k, &n.v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Ascending keys, collected once when the iterator is created.
///
/// Iterating again takes a fresh `Keys` from the tree.
pub struct Keys<'a, K> {
    inner: std::vec::IntoIter<&'a K>,
}

impl<'a, K> Keys<'a, K> {
    pub(crate) fn new<V>(arena: &'a [AvlNode<K, V>], root: Option<u32>) -> Self {
        let mut keys = Vec::with_capacity(arena.len());
        in_order(arena, root, &mut keys);
        Self {
            inner: keys.into_iter(),
        }
    }
}

fn in_order<'a, K, V>(arena: &'a [AvlNode<K, V>], node: Option<u32>, out: &mut Vec<&'a K>) {
    if let Some(i) = node {
        let n = &arena[i as usize];
        in_order(arena, n.l, out);
        out.push(&n.k);
        in_order(arena, n.r, out);
    }
}

impl<'a, K> Iterator for Keys<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> DoubleEndedIterator for Keys<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K> ExactSizeIterator for Keys<'_, K> {}

impl<K> FusedIterator for Keys<'_, K> {}
