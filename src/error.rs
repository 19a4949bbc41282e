use thiserror::Error;

/// Errors reported by [`AvlTree`](crate::AvlTree) operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A rank was not smaller than the number of elements.
    #[error("rank {index} is out of range for a tree of {len} elements")]
    OutOfRange { index: usize, len: usize },

    /// A position was the end position, belonged to another tree, or referred to an element that
    /// has since been erased.
    #[error("position does not refer to an element of this tree")]
    InvalidPosition,
}
