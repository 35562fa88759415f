use std::cmp::Ordering;
use std::fmt::Debug;

use log::{debug, trace};

use crate::error::TreeError;
use crate::print::print_children;
use crate::util::{first, get_l, get_p, get_r, next, set_l, set_p, set_r};

use super::types::AvlNodeLike;

/// Where a key belongs relative to the existing nodes of a tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    /// The tree is empty; the key becomes the root.
    Root,
    /// Free left child slot of the given node.
    Left(u32),
    /// Free right child slot of the given node.
    Right(u32),
    /// A node with an equal key already exists.
    Occupied(u32),
    /// The key and the given node do not order consistently in both
    /// directions, so the key has no place in the tree.
    Unordered(u32),
}

/// Cached height of `node`, `0` for an absent subtree.
#[inline]
pub fn height_of<K, V, N>(arena: &[N], node: Option<u32>) -> u32
where
    N: AvlNodeLike<K, V>,
{
    node.map_or(0, |i| arena[i as usize].height())
}

/// `height(right) - height(left)` from cached heights.
#[inline]
pub fn balance_factor<K, V, N>(arena: &[N], n: u32) -> i32
where
    N: AvlNodeLike<K, V>,
{
    let lh = height_of::<K, V, N>(arena, get_l(arena, n)) as i32;
    let rh = height_of::<K, V, N>(arena, get_r(arena, n)) as i32;
    rh - lh
}

fn refresh_height<K, V, N>(arena: &mut [N], n: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    let lh = height_of::<K, V, N>(arena, get_l(arena, n));
    let rh = height_of::<K, V, N>(arena, get_r(arena, n));
    let h = 1 + lh.max(rh);
    arena[n as usize].set_height(h);
    h
}

fn replace_child<N>(arena: &mut [N], p: Option<u32>, old: u32, new: u32)
where
    N: crate::types::Node,
{
    set_p(arena, new, p);
    if let Some(p) = p {
        if get_l(arena, p) == Some(old) {
            set_l(arena, p, Some(new));
        } else {
            set_r(arena, p, Some(new));
        }
    }
}

/// Rotates the subtree at `n` to the left and returns its new root, the former
/// right child of `n`.
///
/// Heights of `n` and the promoted node are refreshed; the caller is
/// responsible for ancestors and for the tree root when the promoted node ends
/// up without a parent.
pub fn rotate_left<K, V, N>(arena: &mut [N], n: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    let nr = get_r(arena, n).expect("left rotation needs a right child");
    let p = get_p(arena, n);
    let nrl = get_l(arena, nr);

    set_r(arena, n, nrl);
    if let Some(nrl) = nrl {
        set_p(arena, nrl, Some(n));
    }
    replace_child(arena, p, n, nr);
    set_l(arena, nr, Some(n));
    set_p(arena, n, Some(nr));

    refresh_height::<K, V, N>(arena, n);
    refresh_height::<K, V, N>(arena, nr);
    trace!("rotate left at node {n}, promoted node {nr}");
    nr
}

/// Mirror image of [`rotate_left`]: promotes the left child of `n`.
pub fn rotate_right<K, V, N>(arena: &mut [N], n: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    let nl = get_l(arena, n).expect("right rotation needs a left child");
    let p = get_p(arena, n);
    let nlr = get_r(arena, nl);

    set_l(arena, n, nlr);
    if let Some(nlr) = nlr {
        set_p(arena, nlr, Some(n));
    }
    replace_child(arena, p, n, nl);
    set_r(arena, nl, Some(n));
    set_p(arena, n, Some(nl));

    refresh_height::<K, V, N>(arena, n);
    refresh_height::<K, V, N>(arena, nl);
    trace!("rotate right at node {n}, promoted node {nl}");
    nl
}

/// Restores balance at `n` alone, assuming its children are balanced and its
/// cached height is current. Returns the root of the resulting subtree.
fn rebalance_node<K, V, N>(arena: &mut [N], n: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    let bf = balance_factor::<K, V, N>(arena, n);
    if bf < -1 {
        let l = get_l(arena, n).expect("left-heavy node has a left child");
        if balance_factor::<K, V, N>(arena, l) > 0 {
            trace!("left-right case at node {n}");
            rotate_left::<K, V, N>(arena, l);
        }
        rotate_right::<K, V, N>(arena, n)
    } else if bf > 1 {
        let r = get_r(arena, n).expect("right-heavy node has a right child");
        if balance_factor::<K, V, N>(arena, r) < 0 {
            trace!("right-left case at node {n}");
            rotate_right::<K, V, N>(arena, r);
        }
        rotate_left::<K, V, N>(arena, n)
    } else {
        n
    }
}

/// Walks from `start` to the root refreshing heights and rotating where a node
/// leans by more than one level. Returns the (possibly new) tree root.
///
/// The walk ends early at the first balanced node whose height did not change,
/// since nothing above it can have changed either.
pub fn rebalance<K, V, N>(arena: &mut [N], mut root: u32, start: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    let mut curr = Some(start);
    while let Some(n) = curr {
        let before = arena[n as usize].height();
        let after = refresh_height::<K, V, N>(arena, n);
        let top = rebalance_node::<K, V, N>(arena, n);
        let p = get_p(arena, top);
        if p.is_none() {
            root = top;
        }
        if top == n && before == after {
            break;
        }
        curr = p;
    }
    root
}

/// Attaches `n` as the right child of `p` and rebalances. Returns the new root.
pub fn insert_right<K, V, N>(arena: &mut [N], root: u32, n: u32, p: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    set_r(arena, p, Some(n));
    set_p(arena, n, Some(p));
    rebalance::<K, V, N>(arena, root, p)
}

/// Attaches `n` as the left child of `p` and rebalances. Returns the new root.
pub fn insert_left<K, V, N>(arena: &mut [N], root: u32, n: u32, p: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    set_l(arena, p, Some(n));
    set_p(arena, n, Some(p));
    rebalance::<K, V, N>(arena, root, p)
}

/// Descends from `root` to the slot where `key` belongs.
///
/// Every step compares in both directions and stops with [`Slot::Unordered`]
/// unless the two results have opposite signs or are both zero. Under a
/// transitive order, a key that orders against every node on its path orders
/// against the whole tree.
pub fn find_slot<K, V, N, C>(arena: &[N], root: Option<u32>, key: &K, comparator: &C) -> Slot
where
    N: AvlNodeLike<K, V>,
    C: Fn(&K, &K) -> i32,
{
    let Some(mut curr) = root else {
        return Slot::Root;
    };

    loop {
        let node_key = arena[curr as usize].key();
        let cmp = comparator(key, node_key);
        if cmp.signum() != -comparator(node_key, key).signum() {
            return Slot::Unordered(curr);
        }
        curr = match cmp.cmp(&0) {
            Ordering::Equal => return Slot::Occupied(curr),
            Ordering::Less => match get_l(arena, curr) {
                Some(l) => l,
                None => return Slot::Left(curr),
            },
            Ordering::Greater => match get_r(arena, curr) {
                Some(r) => r,
                None => return Slot::Right(curr),
            },
        };
    }
}

/// Links the detached node `n` into the tree rooted at `root` and returns the
/// new root.
///
/// A key that is not equal to itself, or that does not order consistently
/// against a node on its path, fails with [`TreeError::UnorderedKey`]; an
/// equal key fails with [`TreeError::DuplicateKey`]. Nothing is linked on
/// failure.
pub fn insert<K, V, N, C>(
    arena: &mut [N],
    root: Option<u32>,
    n: u32,
    comparator: &C,
) -> Result<u32, TreeError>
where
    N: AvlNodeLike<K, V>,
    C: Fn(&K, &K) -> i32,
{
    let key = arena[n as usize].key();
    if comparator(key, key) != 0 {
        debug!("rejected node {n}: key is not equal to itself");
        return Err(TreeError::UnorderedKey);
    }

    match (root, find_slot::<K, V, N, C>(arena, root, key, comparator)) {
        (_, Slot::Occupied(existing)) => {
            debug!("rejected node {n}: duplicate of node {existing}");
            Err(TreeError::DuplicateKey)
        }
        (_, Slot::Unordered(other)) => {
            debug!("rejected node {n}: key does not order against node {other}");
            Err(TreeError::UnorderedKey)
        }
        (Some(root), Slot::Left(p)) => Ok(insert_left::<K, V, N>(arena, root, n, p)),
        (Some(root), Slot::Right(p)) => Ok(insert_right::<K, V, N>(arena, root, n, p)),
        _ => Ok(n),
    }
}

/// Checks links, cached heights, balance and strict key order.
pub fn assert_avl_tree<K, V, N, C>(
    arena: &[N],
    root: Option<u32>,
    comparator: &C,
) -> Result<(), String>
where
    N: AvlNodeLike<K, V>,
    C: Fn(&K, &K) -> i32,
{
    let Some(root) = root else {
        return Ok(());
    };

    if get_p(arena, root).is_some() {
        return Err("Root has parent".to_string());
    }

    fn validate_links_and_heights<K, V, N>(arena: &[N], node: u32) -> Result<u32, String>
    where
        N: AvlNodeLike<K, V>,
    {
        let mut lh = 0;
        let mut rh = 0;
        if let Some(l) = get_l(arena, node) {
            if get_p(arena, l) != Some(node) {
                return Err(format!("Broken parent link on left child of node {node}"));
            }
            lh = validate_links_and_heights::<K, V, N>(arena, l)?;
        }
        if let Some(r) = get_r(arena, node) {
            if get_p(arena, r) != Some(node) {
                return Err(format!("Broken parent link on right child of node {node}"));
            }
            rh = validate_links_and_heights::<K, V, N>(arena, r)?;
        }

        let expected = 1 + lh.max(rh);
        let actual = arena[node as usize].height();
        if actual != expected {
            return Err(format!(
                "Height mismatch at node {node}: expected {expected}, got {actual}"
            ));
        }
        if lh.abs_diff(rh) > 1 {
            return Err(format!("AVL balance violated at node {node}"));
        }

        Ok(expected)
    }

    validate_links_and_heights::<K, V, N>(arena, root)?;

    let mut curr = first(arena, Some(root));
    let mut prev_node: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev_node {
            if comparator(arena[prev as usize].key(), arena[i as usize].key()) >= 0 {
                return Err(format!("Node order violated between {prev} and {i}"));
            }
        }
        prev_node = Some(i);
        curr = next(arena, i);
    }

    Ok(())
}

/// Debug printer for AVL trees.
pub fn print<K, V, N>(arena: &[N], node: Option<u32>, tab: &str) -> String
where
    K: Debug,
    V: Debug,
    N: AvlNodeLike<K, V>,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let head = format!(
                "Node[{i}] [h={}] {{ {:?} = {:?} }}",
                n.height(),
                n.key(),
                n.value()
            );
            if n.l().is_none() && n.r().is_none() {
                return head;
            }
            let left = |tab: &str| print::<K, V, N>(arena, n.l(), tab);
            let right = |tab: &str| print::<K, V, N>(arena, n.r(), tab);
            head + &print_children(tab, &left, &right)
        }
    }
}
