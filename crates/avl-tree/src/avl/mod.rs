//! Height-balanced binary search tree.
//!
//! [`util`] holds the arena-level algorithms (placement, rotations,
//! rebalancing, validation); [`AvlTree`] wraps them into an owned ordered map.

pub mod iter;
pub mod tree;
pub mod types;
pub mod util;

pub use iter::{Iter, Keys};
pub use tree::AvlTree;
pub use types::{AvlNode, AvlNodeLike};
pub use util::{
    assert_avl_tree, find_slot, insert, insert_left, insert_right, print, rebalance, rotate_left,
    rotate_right, Slot,
};
