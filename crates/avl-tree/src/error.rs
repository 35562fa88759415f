use thiserror::Error;

/// Errors reported by [`AvlTree::insert`](crate::AvlTree::insert).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("key already present in tree")]
    DuplicateKey,
    #[error("key has no total order under the comparator")]
    UnorderedKey,
}
