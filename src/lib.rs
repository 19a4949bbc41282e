//! A rank-indexed AVL tree: a sorted multiset with O(log n) positional access.
//!
//! Every node carries two pieces of bookkeeping next to its links:
//! - `h(x)`, the height of the subtree rooted at `x` (absent subtrees have height 0);
//! - `c(x)`, the number of elements in the subtree rooted at `x` (absent subtrees count 0).
//!
//! The invariants maintained after every public operation are:
//! 1. `h(x) = 1 + max(h(left(x)), h(right(x)))` and `|h(left(x)) - h(right(x))| <= 1`.
//! 2. `c(x) = 1 + c(left(x)) + c(right(x))`.
//! 3. The in-order sequence is non-decreasing. Equal values are inserted to the left of the
//!    values already present.
//! 4. Every child's parent link names the node holding it.
//!
//! Nodes live in an arena and refer to each other by handle. Slot 0 of the arena is a permanent
//! sentinel with no value: its left child is the root, its count is the number of elements, and
//! it doubles as the "end" position that sits between the last and the first element.
//!
//! ```
//! use ranked_avl::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! for value in [5, 3, 8, 3] {
//!     tree.insert(value);
//! }
//!
//! assert_eq!(tree.len(), 4);
//! assert_eq!(tree.at(1), Ok(&3));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [3, 3, 5, 8]);
//!
//! assert_eq!(tree.remove(&3), 2);
//! assert_eq!(tree[0], 5);
//! ```

use core::{borrow::Borrow, cmp::Ordering, fmt, ops::Index};

mod arena;
mod cursor;
mod error;
mod iter;
mod position;

#[cfg(any(test, feature = "model"))]
pub mod model;


use arena::{Arena, Dir, NodeId};
use position::TreeId;

pub use cursor::{Cursor, CursorMut};
pub use error::Error;
pub use iter::{IntoIter, Iter};
pub use position::Position;

/// A self-balancing binary search tree holding a sorted multiset of `T`.
///
/// Besides the usual search, insertion and removal, the tree supports retrieving the element at
/// a given rank ([`at`](AvlTree::at)), computing the rank of an element
/// ([`rank_of`](AvlTree::rank_of)), and bidirectional traversal through stable
/// [`Position`]s and [cursors](Cursor). All of these complete in _O(log(n))_ time.
pub struct AvlTree<T> {
    nodes: Arena<T>,
    id: TreeId,
}

impl<T> AvlTree<T> {
    /// Returns a new empty tree.
    pub fn new() -> AvlTree<T> {
        AvlTree {
            nodes: Arena::new(),
            id: TreeId::next(),
        }
    }

    /// Returns the number of elements in the tree.
    pub fn len(&self) -> usize {
        self.nodes.links(NodeId::SENTINEL).count()
    }

    /// Returns `true` if the tree contains no elements.
    pub fn is_empty(&self) -> bool {
        let empty = self.len() == 0;

        if cfg!(debug_assertions) {
            assert_eq!(empty, self.root().is_none());
        }

        empty
    }

    /// Returns the height of the tree; 0 if it is empty.
    pub fn height(&self) -> usize {
        usize::from(self.height_of(self.root()))
    }

    /// Clears the tree, removing all elements.
    ///
    /// Every outstanding [`Position`] other than [`end`](AvlTree::end) is invalidated.
    pub fn clear(&mut self) {
        self.nodes.clear();

        debug_assert!(self.root().is_none());
        debug_assert_eq!(self.len(), 0);
    }

    /// Returns the minimum element of the tree.
    pub fn first(&self) -> Option<&T> {
        self.root()
            .map(|root| self.nodes.value(self.extreme(root, Dir::Left)))
    }

    /// Returns the maximum element of the tree.
    pub fn last(&self) -> Option<&T> {
        self.root()
            .map(|root| self.nodes.value(self.extreme(root, Dir::Right)))
    }

    /// Removes and returns the minimum element of the tree.
    pub fn pop_first(&mut self) -> Option<T> {
        let first = self.extreme(self.root()?, Dir::Left);
        Some(self.remove_at(first))
    }

    /// Removes and returns the maximum element of the tree.
    pub fn pop_last(&mut self) -> Option<T> {
        let last = self.extreme(self.root()?, Dir::Right);
        Some(self.remove_at(last))
    }

    /// Returns the position of the minimum element, or [`end`](AvlTree::end) if the tree is
    /// empty.
    pub fn begin(&self) -> Position {
        self.position(self.step(NodeId::SENTINEL, Dir::Right))
    }

    /// Returns the end position.
    ///
    /// The end position follows the last element and precedes the first one.
    pub fn end(&self) -> Position {
        self.position(NodeId::SENTINEL)
    }

    /// Returns a reference to the element at `position`.
    ///
    /// Returns [`Error::InvalidPosition`] for the end position and for positions which are not
    /// live elements of this tree.
    pub fn get(&self, position: Position) -> Result<&T, Error> {
        let node = self.resolve(position)?;
        Ok(self.nodes.value(node))
    }

    /// Returns the position following `position` in sorted order.
    ///
    /// The last element is followed by the end position, which is followed by the first element.
    pub fn next_position(&self, position: Position) -> Result<Position, Error> {
        let node = self.resolve_or_end(position)?;
        Ok(self.position(self.step(node, Dir::Right)))
    }

    /// Returns the position preceding `position` in sorted order.
    ///
    /// The first element is preceded by the end position, which is preceded by the last element.
    pub fn prev_position(&self, position: Position) -> Result<Position, Error> {
        let node = self.resolve_or_end(position)?;
        Ok(self.position(self.step(node, Dir::Left)))
    }

    /// Returns a reference to the element with rank `index`, i.e. the `index + 1`-th smallest.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn at(&self, index: usize) -> Result<&T, Error> {
        let node = self.at_raw(index)?;
        Ok(self.nodes.value(node))
    }

    /// Returns the position of the element with rank `index`.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn position_at(&self, index: usize) -> Result<Position, Error> {
        let node = self.at_raw(index)?;
        Ok(self.position(node))
    }

    /// Returns the rank of the element at `position`.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn rank_of(&self, position: Position) -> Result<usize, Error> {
        let node = self.resolve(position)?;
        Ok(self.rank_raw(node))
    }

    /// Removes the element at `position` and returns the position of its successor.
    ///
    /// Positions naming other elements remain valid. Returns [`Error::InvalidPosition`], leaving
    /// the tree untouched, if `position` is the end position or not a live element of this tree.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn erase(&mut self, position: Position) -> Result<Position, Error> {
        let node = self.resolve(position)?;
        let next = self.step(node, Dir::Right);

        drop(self.remove_at(node));

        Ok(self.position(next))
    }

    /// Returns an iterator over the elements in sorted order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Returns a cursor pointing at the minimum element.
    ///
    /// If the tree is empty, the cursor points at the "ghost" non-element.
    pub fn cursor_first(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.step(NodeId::SENTINEL, Dir::Right))
    }

    /// Returns a cursor pointing at the maximum element.
    ///
    /// If the tree is empty, the cursor points at the "ghost" non-element.
    pub fn cursor_last(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.step(NodeId::SENTINEL, Dir::Left))
    }

    /// Returns a cursor pointing at `position`. The end position maps to the "ghost" non-element.
    pub fn cursor_at(&self, position: Position) -> Result<Cursor<'_, T>, Error> {
        let node = self.resolve_or_end(position)?;
        Ok(Cursor::new(self, node))
    }

    /// Returns an editing cursor pointing at the minimum element.
    pub fn cursor_first_mut(&mut self) -> CursorMut<'_, T> {
        let node = self.step(NodeId::SENTINEL, Dir::Right);
        CursorMut::new(self, node)
    }

    /// Returns an editing cursor pointing at the maximum element.
    pub fn cursor_last_mut(&mut self) -> CursorMut<'_, T> {
        let node = self.step(NodeId::SENTINEL, Dir::Left);
        CursorMut::new(self, node)
    }

    /// Returns an editing cursor pointing at `position`.
    pub fn cursor_at_mut(&mut self, position: Position) -> Result<CursorMut<'_, T>, Error> {
        let node = self.resolve_or_end(position)?;
        Ok(CursorMut::new(self, node))
    }

    // Support methods ========================================================

    #[inline]
    fn root(&self) -> Option<NodeId> {
        self.nodes.links(NodeId::SENTINEL).left()
    }

    #[inline]
    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.links(node).parent()
    }

    #[inline]
    fn height_of(&self, node: Option<NodeId>) -> u8 {
        node.map(|n| self.nodes.links(n).height()).unwrap_or(0)
    }

    #[inline]
    fn count_of(&self, node: Option<NodeId>) -> usize {
        node.map(|n| self.nodes.links(n).count()).unwrap_or(0)
    }

    fn position(&self, node: NodeId) -> Position {
        Position {
            tree: self.id,
            node,
            generation: self.nodes.links(node).generation(),
        }
    }

    // Maps a position to a live element node of this tree.
    fn resolve(&self, position: Position) -> Result<NodeId, Error> {
        if position.tree != self.id
            || position.node.is_sentinel()
            || !self.nodes.is_live(position.node, position.generation)
        {
            return Err(Error::InvalidPosition);
        }

        Ok(position.node)
    }

    // Like `resolve`, but also accepts this tree's end position.
    fn resolve_or_end(&self, position: Position) -> Result<NodeId, Error> {
        if position.tree == self.id && position.node.is_sentinel() {
            return Ok(NodeId::SENTINEL);
        }

        self.resolve(position)
    }

    // Descends from `node` in direction `dir` as far as possible.
    fn extreme(&self, mut node: NodeId, dir: Dir) -> NodeId {
        while let Some(child) = self.nodes.links(node).child(dir) {
            node = child;
        }

        node
    }

    // Returns the in-order neighbour of `node`: the successor for `Dir::Right`, the predecessor
    // for `Dir::Left`. The sentinel sits between the last and the first element.
    pub(crate) fn step(&self, node: NodeId, dir: Dir) -> NodeId {
        if node.is_sentinel() {
            return self
                .root()
                .map_or(NodeId::SENTINEL, |root| self.extreme(root, !dir));
        }

        if let Some(child) = self.nodes.links(node).child(dir) {
            return self.extreme(child, !dir);
        }

        // Ascend until arriving from the `!dir` side.
        let mut cur = node;
        while let Some(parent) = self.parent(cur) {
            if parent.is_sentinel() || self.nodes.links(parent).child(!dir) == Some(cur) {
                return parent;
            }

            cur = parent;
        }

        NodeId::SENTINEL
    }

    fn at_raw(&self, index: usize) -> Result<NodeId, Error> {
        let len = self.len();
        if index >= len {
            return Err(Error::OutOfRange { index, len });
        }

        let mut rank = index;
        let mut opt_cur = self.root();

        while let Some(cur) = opt_cur {
            let links = self.nodes.links(cur);
            let left_count = self.count_of(links.left());

            match rank.cmp(&left_count) {
                Ordering::Less => opt_cur = links.left(),
                Ordering::Equal => return Ok(cur),
                Ordering::Greater => {
                    rank -= left_count + 1;
                    opt_cur = links.right();
                }
            }
        }

        unreachable!("subtree counts disagree with the tree shape")
    }

    pub(crate) fn rank_raw(&self, node: NodeId) -> usize {
        let mut rank = self.count_of(self.nodes.links(node).left());
        let mut cur = node;

        while let Some(parent) = self.parent(cur).filter(|p| !p.is_sentinel()) {
            let links = self.nodes.links(parent);
            if links.right() == Some(cur) {
                rank += self.count_of(links.left()) + 1;
            }

            cur = parent;
        }

        rank
    }

    pub(crate) fn value(&self, node: NodeId) -> &T {
        self.nodes.value(node)
    }

    // Recomputes the height and count of `node` from its children.
    //
    // Returns `true` if the height changed.
    fn refresh(&mut self, node: NodeId) -> bool {
        debug_assert!(!node.is_sentinel(), "the sentinel has no height");

        let links = self.nodes.links(node);
        let (left, right) = (links.left(), links.right());
        let height = 1 + self.height_of(left).max(self.height_of(right));
        let count = 1 + self.count_of(left) + self.count_of(right);

        let links = self.nodes.links_mut(node);
        let changed = links.height() != height;
        links.set_height(height);
        links.set_count(count);

        changed
    }

    // Replaces the child link of `parent` pointing at `old_child` with `new_child`.
    //
    // `new_child`'s parent link is not updated.
    fn replace_child(&mut self, parent: NodeId, old_child: NodeId, new_child: Option<NodeId>) {
        let links = self.nodes.links_mut(parent);

        if links.left() == Some(old_child) {
            links.set_child(Dir::Left, new_child);
        } else {
            debug_assert_eq!(
                links.right(),
                Some(old_child),
                "`old_child` must be a child of `parent`"
            );
            links.set_child(Dir::Right, new_child);
        }
    }

    // Performs a rotation, moving `up` up and its parent `down` down.
    //
    // Heights and counts of `down` and `up` are recomputed, and heights are propagated to the
    // ancestors until one of them is unchanged.
    fn rotate_at(&mut self, down: NodeId, up: NodeId) {
        // - `down` becomes the `dir` child of `up`.
        // - `across` goes from the `dir` child of `up` to the `!dir` child of `down`.
        let dir = if self.nodes.links(down).right() == Some(up) {
            Dir::Left
        } else {
            Dir::Right
        };

        debug_assert_eq!(self.parent(up), Some(down));
        debug_assert!(!down.is_sentinel(), "cannot rotate the sentinel");

        let across = self.nodes.links(up).child(dir);
        self.nodes.links_mut(down).set_child(!dir, across);
        if let Some(across) = across {
            self.nodes.links_mut(across).set_parent(Some(down));
        }

        self.nodes.links_mut(up).set_child(dir, Some(down));
        let parent = self
            .nodes
            .links_mut(down)
            .set_parent(Some(up))
            .unwrap_or(NodeId::SENTINEL);
        self.nodes.links_mut(up).set_parent(Some(parent));
        self.replace_child(parent, down, Some(up));

        self.refresh(down);
        self.refresh(up);

        let mut cur = parent;
        while !cur.is_sentinel() && self.refresh(cur) {
            cur = self.parent(cur).unwrap_or(NodeId::SENTINEL);
        }
    }

    // Restores the balance condition at `node` with a single or double rotation.
    //
    // `node`'s own height must be up to date. Returns `true` if a rotation was performed.
    fn rebalance_at(&mut self, node: NodeId) -> bool {
        let links = self.nodes.links(node);
        let left = self.height_of(links.left());
        let right = self.height_of(links.right());

        let heavy = match left.abs_diff(right) {
            0 | 1 => return false,
            _ if left > right => Dir::Left,
            _ => Dir::Right,
        };

        let Some(child) = links.child(heavy) else {
            return false;
        };

        let child_links = self.nodes.links(child);
        if self.height_of(child_links.child(!heavy)) > self.height_of(child_links.child(heavy)) {
            // The inner grandchild is the taller one; lift it first.
            if let Some(inner) = child_links.child(!heavy) {
                self.rotate_at(child, inner);
            }
        }

        if let Some(child) = self.nodes.links(node).child(heavy) {
            self.rotate_at(node, child);
        }

        true
    }

    // Walks from `from` up to the sentinel adding one to every count.
    fn grow_counts(&mut self, from: NodeId) {
        let mut opt_cur = Some(from);
        while let Some(cur) = opt_cur {
            let links = self.nodes.links_mut(cur);
            links.set_count(links.count() + 1);
            opt_cur = links.parent();
        }
    }

    // Walks from `from` up to the sentinel subtracting one from every count.
    fn shrink_counts(&mut self, from: NodeId) {
        let mut opt_cur = Some(from);
        while let Some(cur) = opt_cur {
            let links = self.nodes.links_mut(cur);
            links.set_count(links.count() - 1);
            opt_cur = links.parent();
        }
    }

    // Performs a bottom-up rebalance after a leaf was attached below `parent`.
    //
    // At most one (single or double) rotation is needed; after it, the subtree is back at its
    // height before the insertion.
    fn rebalance_inserted(&mut self, parent: NodeId) {
        let mut cur = parent;

        while !cur.is_sentinel() {
            let changed = self.refresh(cur);

            if self.rebalance_at(cur) || !changed {
                return;
            }

            cur = self.parent(cur).unwrap_or(NodeId::SENTINEL);
        }
    }

    // Performs a bottom-up rebalance after a node was spliced out below `from`.
    //
    // Unlike insertion, removal may need a rotation at every ancestor, so the walk always runs to
    // the sentinel.
    fn rebalance_removed(&mut self, from: NodeId) {
        let mut cur = from;

        while !cur.is_sentinel() {
            let parent = self.parent(cur).unwrap_or(NodeId::SENTINEL);

            self.refresh(cur);
            self.rebalance_at(cur);

            cur = parent;
        }
    }

    /// Removes an element node from the tree and returns its value.
    ///
    /// `node` must be a live element of `self`.
    pub(crate) fn remove_at(&mut self, node: NodeId) -> T {
        // There are two cases:
        //
        // 1. `node` has at most one child.
        //
        //    `node` is spliced out directly and its child (if any) takes its place.
        //
        // 2. `node` has two children.
        //
        //    `node`'s successor, the least node of its right subtree, has no left child. It is
        //    spliced out of its own place as in case 1, then relinked into `node`'s place,
        //    inheriting its links, height and count. The successor keeps its identity, so
        //    positions naming it stay valid.
        //
        // Either way, the tree physically lost a node below the spliced node's parent, which is
        // where count maintenance and rebalancing start.
        debug_assert!(!node.is_sentinel(), "cannot remove the sentinel");

        let links = *self.nodes.links(node);
        let spliced = match (links.left(), links.right()) {
            (Some(_), Some(right)) => self.extreme(right, Dir::Left),
            _ => node,
        };

        let spliced_links = *self.nodes.links(spliced);
        let orphan = spliced_links.left().or(spliced_links.right());
        let spliced_parent = spliced_links.parent().unwrap_or(NodeId::SENTINEL);

        self.replace_child(spliced_parent, spliced, orphan);
        if let Some(orphan) = orphan {
            self.nodes.links_mut(orphan).set_parent(Some(spliced_parent));
        }

        let mut start = spliced_parent;

        if spliced != node {
            // Re-read: splicing may have rewritten `node`'s right link.
            let links = *self.nodes.links(node);
            let parent = links.parent().unwrap_or(NodeId::SENTINEL);

            self.replace_child(parent, node, Some(spliced));

            let successor = self.nodes.links_mut(spliced);
            successor.set_parent(Some(parent));
            successor.set_child(Dir::Left, links.left());
            successor.set_child(Dir::Right, links.right());
            successor.set_height(links.height());
            successor.set_count(links.count());

            for child in [links.left(), links.right()].into_iter().flatten() {
                self.nodes.links_mut(child).set_parent(Some(spliced));
            }

            if start == node {
                start = spliced;
            }
        }

        self.shrink_counts(start);
        self.rebalance_removed(start);

        self.nodes.free(node)
    }
}

impl<T: Ord> AvlTree<T> {
    /// Returns `true` if the tree contains an element equal to `value`.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut opt_cur = self.root();

        while let Some(cur) = opt_cur {
            let links = self.nodes.links(cur);
            match value.cmp(self.nodes.value(cur).borrow()) {
                Ordering::Less => opt_cur = links.left(),
                Ordering::Equal => return true,
                Ordering::Greater => opt_cur = links.right(),
            }
        }

        false
    }

    /// Returns the position of the first (lowest-rank) element equal to `value`.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn find<Q>(&self, value: &Q) -> Option<Position>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_raw(value).map(|node| self.position(node))
    }

    fn find_raw<Q>(&self, value: &Q) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut found = None;
        let mut opt_cur = self.root();

        while let Some(cur) = opt_cur {
            let links = self.nodes.links(cur);
            match value.cmp(self.nodes.value(cur).borrow()) {
                Ordering::Less => opt_cur = links.left(),
                Ordering::Equal => {
                    // Keep looking for an earlier duplicate.
                    found = Some(cur);
                    opt_cur = links.left();
                }
                Ordering::Greater => opt_cur = links.right(),
            }
        }

        found
    }

    /// Inserts `value` into the tree and returns its position.
    ///
    /// Values equal to elements already present are always accepted; the new element is placed
    /// before the existing equal ones.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn insert(&mut self, value: T) -> Position {
        let mut parent = NodeId::SENTINEL;
        let mut dir = Dir::Left;

        // Descend the tree, looking for a free slot.
        while let Some(child) = self.nodes.links(parent).child(dir) {
            parent = child;
            dir = if value <= *self.nodes.value(parent) {
                Dir::Left
            } else {
                Dir::Right
            };
        }

        // Nothing has been modified yet, so a failed allocation leaves the tree intact.
        let node = self.nodes.alloc(value);

        self.nodes.links_mut(node).set_parent(Some(parent));
        self.nodes.links_mut(parent).set_child(dir, Some(node));
        self.grow_counts(parent);

        self.rebalance_inserted(parent);

        self.position(node)
    }

    /// Removes every element equal to `value` and returns how many were removed.
    ///
    /// This operation completes in _O(k log(n))_ time, where `k` is the number of removed
    /// elements.
    pub fn remove<Q>(&mut self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Some(mut cur) = self.find_raw(value) else {
            return 0;
        };

        let mut removed = 0;

        loop {
            let next = self.step(cur, Dir::Right);
            drop(self.remove_at(cur));
            removed += 1;

            if next.is_sentinel() || value.cmp(self.nodes.value(next).borrow()) != Ordering::Equal
            {
                return removed;
            }

            cur = next;
        }
    }

    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        let sentinel = self.nodes.links(NodeId::SENTINEL);
        assert!(sentinel.parent().is_none(), "the sentinel must not have a parent");
        assert!(sentinel.right().is_none(), "the sentinel must not have a right child");
        assert_eq!(sentinel.count(), self.nodes.len(), "sentinel count mismatch");

        let mut reachable = 0;
        let mut stack: Vec<NodeId> = self.root().into_iter().collect();

        if let Some(root) = self.root() {
            assert_eq!(self.parent(root), Some(NodeId::SENTINEL), "root parent link");
        }

        while let Some(node) = stack.pop() {
            reachable += 1;
            assert!(reachable <= self.len(), "more reachable nodes than elements");

            let links = self.nodes.links(node);

            for child in [links.left(), links.right()].into_iter().flatten() {
                assert_eq!(self.parent(child), Some(node), "child parent link");
                stack.push(child);
            }

            let left_height = self.height_of(links.left());
            let right_height = self.height_of(links.right());
            assert_eq!(links.height(), 1 + left_height.max(right_height), "height");
            assert!(left_height.abs_diff(right_height) <= 1, "balance");

            let count = 1 + self.count_of(links.left()) + self.count_of(links.right());
            assert_eq!(links.count(), count, "count");
        }

        assert_eq!(reachable, self.len(), "reachable nodes");

        // Walk the in-order sequence through parent links alone.
        let mut seen = 0;
        let mut prev: Option<&T> = None;
        let mut cur = self.step(NodeId::SENTINEL, Dir::Right);

        while !cur.is_sentinel() {
            let value = self.nodes.value(cur);
            if let Some(prev) = prev {
                assert!(prev <= value, "in-order sequence must be non-decreasing");
            }

            prev = Some(value);
            seen += 1;
            assert!(seen <= self.len(), "in-order walk does not terminate");

            cur = self.step(cur, Dir::Right);
        }

        assert_eq!(seen, self.len(), "in-order walk length");
    }
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for AvlTree<T> {
    /// Returns a structural copy of the tree.
    ///
    /// The copy has its own identity: positions obtained from `self` are not valid for it.
    fn clone(&self) -> Self {
        AvlTree {
            nodes: self.nodes.clone(),
            id: TreeId::next(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for AvlTree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for AvlTree<T> {}

/// Indexes into the tree by rank.
///
/// # Panics
///
/// Panics if `index` is out of bounds.
impl<T> Index<usize> for AvlTree<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match self.at(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T: Ord> Extend<T> for AvlTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for AvlTree<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<'tree, T> IntoIterator for &'tree AvlTree<T> {
    type Item = &'tree T;
    type IntoIter = Iter<'tree, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for AvlTree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let mut order = Vec::with_capacity(self.len());
        let mut cur = self.step(NodeId::SENTINEL, Dir::Right);

        while !cur.is_sentinel() {
            order.push(cur);
            cur = self.step(cur, Dir::Right);
        }

        let values: Vec<T> = order.into_iter().map(|node| self.nodes.free(node)).collect();
        IntoIter::new(values)
    }
}
