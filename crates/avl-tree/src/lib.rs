//! Arena-based AVL tree.
//!
//! [`AvlTree`] is an ordered key-value map whose height never exceeds
//! roughly `1.44 * log2(n)`, whatever the insertion order. Lookups and
//! insertions are `O(log n)`.
//!
//! Nodes live in a `Vec` owned by the tree and refer to each other through
//! `Option<u32>` indices, so parent back-links need neither `unsafe` nor
//! reference counting.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] and [`KvNode`] traits, default comparator |
//! [`util`] | `first`, `last`, `next`, `size`, `find` over any [`Node`] arena |
//! [`avl`] | AVL node, rotations, rebalancing and the [`AvlTree`] map |
//! [`print`] | box-drawing helper for debug dumps |
//! [`error`] | [`TreeError`] |

pub mod avl;
pub mod error;
pub mod print;
pub mod types;
pub mod util;

pub use avl::{AvlNode, AvlTree, Iter, Keys};
pub use error::TreeError;
pub use types::{default_comparator, KvNode, Node};
