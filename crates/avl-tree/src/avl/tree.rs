use std::fmt;
use std::io;

use log::trace;

use crate::error::TreeError;
use crate::types::{default_comparator, KvNode};
use crate::util::{find, first, last, size};

use super::iter::{Iter, Keys};
use super::types::AvlNode;
use super::util::{assert_avl_tree, insert, print};

/// Ordered key-value map backed by an AVL tree.
///
/// Nodes are stored in an arena and never removed, so arena indices stay
/// stable for the lifetime of the tree. Keys are unique under the comparator:
/// inserting an equal key is rejected and leaves the stored entry untouched.
///
/// ```
/// use avl_tree::AvlTree;
///
/// let mut tree = AvlTree::new();
/// for k in [10, 20, 30] {
///     tree.insert(k, k * 2).unwrap();
/// }
/// assert_eq!(tree.height(), 1);
/// assert_eq!(tree.get(&20), Some(&40));
/// assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![10, 20, 30]);
/// ```
pub struct AvlTree<K, V, C = fn(&K, &K) -> i32>
where
    C: Fn(&K, &K) -> i32,
{
    arena: Vec<AvlNode<K, V>>,
    root: Option<u32>,
    len: usize,
    comparator: C,
}

impl<K, V> AvlTree<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K, V> Default for AvlTree<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> AvlTree<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    /// Creates an empty tree ordered by `comparator`, which returns a negative,
    /// zero or positive number like [`Ord::cmp`] would.
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            arena: Vec::new(),
            root: None,
            len: 0,
            comparator,
        }
    }

    /// Inserts a new entry and restores the height balance on the way up.
    ///
    /// Fails with [`TreeError::UnorderedKey`] when `key` does not compare equal
    /// to itself or does not order consistently against the stored keys, and
    /// with [`TreeError::DuplicateKey`] when an equal key is already stored.
    /// The tree is unchanged in both cases.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), TreeError> {
        let idx = u32::try_from(self.arena.len()).expect("arena index fits in u32");
        self.arena.push(AvlNode::new(key, value));
        let inserted =
            insert::<K, V, AvlNode<K, V>, C>(&mut self.arena, self.root, idx, &self.comparator);
        match inserted {
            Ok(root) => {
                trace!("inserted node {idx}, root is node {root}");
                self.root = Some(root);
                self.len += 1;
                Ok(())
            }
            Err(err) => {
                self.arena.pop();
                Err(err)
            }
        }
    }

    fn find_index(&self, key: &K) -> Option<u32> {
        find(&self.arena, self.root, key, |n| n.key(), &self.comparator)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find_index(key).is_some()
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find_index(key).map(|i| &self.arena[i as usize].v)
    }

    pub fn size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Edges on the longest root-to-leaf path; `0` for a lone root and for an
    /// empty tree.
    pub fn height(&self) -> usize {
        self.root.map_or(0, |r| self.arena[r as usize].h as usize - 1)
    }

    /// Entry with the smallest key.
    pub fn first(&self) -> Option<(&K, &V)> {
        first(&self.arena, self.root).map(|i| self.entry(i))
    }

    /// Entry with the largest key.
    pub fn last(&self) -> Option<(&K, &V)> {
        last(&self.arena, self.root).map(|i| self.entry(i))
    }

    fn entry(&self, idx: u32) -> (&K, &V) {
        let n = &self.arena[idx as usize];
        (&n.k, &n.v)
    }

    /// Snapshot of all keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K> {
        Keys::new(&self.arena, self.root)
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.arena, first(&self.arena, self.root), self.len)
    }

    /// Verifies every structural invariant of the tree.
    pub fn assert_valid(&self) -> Result<(), String> {
        let reachable = size(&self.arena, self.root);
        if reachable != self.len {
            return Err(format!(
                "Size mismatch: counted {} but {reachable} nodes are reachable",
                self.len
            ));
        }
        if self.arena.len() != self.len {
            return Err(format!(
                "Arena holds {} nodes but the tree counts {}",
                self.arena.len(),
                self.len
            ));
        }
        assert_avl_tree::<K, V, AvlNode<K, V>, C>(&self.arena, self.root, &self.comparator)
    }

    /// Writes the in-order listing produced by the [`Display`](fmt::Display)
    /// impl to `out`.
    pub fn print<W: io::Write>(&self, out: &mut W) -> io::Result<()>
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        write!(out, "{self}")
    }

    fn fmt_in_order(
        &self,
        f: &mut fmt::Formatter<'_>,
        node: Option<u32>,
        depth: usize,
    ) -> fmt::Result
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        let Some(i) = node else {
            return Ok(());
        };
        let n = &self.arena[i as usize];
        self.fmt_in_order(f, n.l, depth + 1)?;
        if depth == 0 {
            writeln!(f, "Key: {} Value: {} (root)", n.k, n.v)?;
        } else {
            writeln!(f, "{}Key: {} Value: {}", ".".repeat(depth), n.k, n.v)?;
        }
        self.fmt_in_order(f, n.r, depth + 1)
    }
}

/// One line per entry in key order, prefixed by a dot per level below the
/// root. The root line is marked with `(root)`.
impl<K, V, C> fmt::Display for AvlTree<K, V, C>
where
    K: fmt::Display,
    V: fmt::Display,
    C: Fn(&K, &K) -> i32,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_in_order(f, self.root, 0)
    }
}

impl<K, V, C> fmt::Debug for AvlTree<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Fn(&K, &K) -> i32,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&print::<K, V, AvlNode<K, V>>(&self.arena, self.root, ""))
    }
}

impl<'a, K, V, C> IntoIterator for &'a AvlTree<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
