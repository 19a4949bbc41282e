use core::sync::atomic::{AtomicU64, Ordering};

use crate::arena::NodeId;

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of one tree value, used to reject positions from other trees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct TreeId(u64);

impl TreeId {
    pub(crate) fn next() -> TreeId {
        TreeId(NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A stable handle to one element of an [`AvlTree`](crate::AvlTree), or to its end.
///
/// A position stays valid across insertions and erasures of *other* elements, since it names a
/// node rather than a rank. Erasing the element it names invalidates it; using it afterwards is
/// reported as [`Error::InvalidPosition`](crate::Error::InvalidPosition).
///
/// The end position is one past the last element and one before the first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) tree: TreeId,
    pub(crate) node: NodeId,
    pub(crate) generation: u32,
}

impl Position {
    /// Returns `true` if this is an end position.
    pub fn is_end(&self) -> bool {
        self.node.is_sentinel()
    }
}
