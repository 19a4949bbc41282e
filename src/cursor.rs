use crate::arena::{Dir, NodeId};
use crate::{AvlTree, Position};

/// A cursor over an [`AvlTree`].
///
/// A cursor points either to an element of the tree or to a "ghost" non-element that connects the
/// last element to the first. The ghost is the tree's end position.
pub struct Cursor<'tree, T> {
    tree: &'tree AvlTree<T>,
    node: NodeId,
}

impl<'tree, T> Cursor<'tree, T> {
    pub(crate) fn new(tree: &'tree AvlTree<T>, node: NodeId) -> Cursor<'tree, T> {
        Cursor { tree, node }
    }

    /// Moves the cursor to the next element of the `AvlTree`.
    ///
    /// If the cursor is pointing to the "ghost" non-element, this method moves it to the first
    /// element. If it is pointing to the last element, this method moves it to the "ghost"
    /// non-element.
    pub fn move_next(&mut self) {
        self.node = self.tree.step(self.node, Dir::Right);
    }

    /// Moves the cursor to the previous element of the `AvlTree`.
    ///
    /// If the cursor is pointing to the "ghost" non-element, this method moves it to the last
    /// element. If it is pointing to the first element, this method moves it to the "ghost"
    /// non-element.
    pub fn move_prev(&mut self) {
        self.node = self.tree.step(self.node, Dir::Left);
    }

    /// Returns a reference to the element pointed to by the cursor.
    ///
    /// This returns `None` if the cursor is currently pointing to the "ghost" non-element.
    pub fn get(&self) -> Option<&'tree T> {
        element(self.tree, self.node)
    }

    /// Returns a reference to the next element.
    ///
    /// If the cursor is pointing to the "ghost" non-element, this method returns the first element.
    /// If it is pointing to the last element, this method returns `None`.
    pub fn peek_next(&self) -> Option<&'tree T> {
        element(self.tree, self.tree.step(self.node, Dir::Right))
    }

    /// Returns a reference to the previous element.
    ///
    /// If the cursor is pointing to the "ghost" non-element, this method returns the last element.
    /// If it is pointing to the first element, this method returns `None`.
    pub fn peek_prev(&self) -> Option<&'tree T> {
        element(self.tree, self.tree.step(self.node, Dir::Left))
    }

    /// Returns the rank of the current element, or `None` at the "ghost" non-element.
    pub fn index(&self) -> Option<usize> {
        index(self.tree, self.node)
    }

    /// Returns the position of the current element. The "ghost" non-element is the end position.
    pub fn position(&self) -> Position {
        self.tree.position(self.node)
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        Cursor {
            tree: self.tree,
            node: self.node,
        }
    }
}

/// A cursor over an [`AvlTree`] which supports removal.
///
/// A cursor points either to an element of the tree or to a "ghost" non-element that connects the
/// last element to the first.
pub struct CursorMut<'tree, T> {
    tree: &'tree mut AvlTree<T>,
    node: NodeId,
}

impl<'tree, T> CursorMut<'tree, T> {
    pub(crate) fn new(tree: &'tree mut AvlTree<T>, node: NodeId) -> CursorMut<'tree, T> {
        CursorMut { tree, node }
    }

    /// Returns a read-only cursor pointing to the current element.
    ///
    /// The `CursorMut` remains immutably borrowed for the lifetime of the returned `Cursor`.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.tree, self.node)
    }

    /// Moves the cursor to the next element of the `AvlTree`.
    ///
    /// If the cursor is pointing to the "ghost" non-element, this method will move it to the first
    /// element. If it is pointing to the last element, this method will move it to the "ghost"
    /// non-element.
    pub fn move_next(&mut self) {
        self.node = self.tree.step(self.node, Dir::Right);
    }

    /// Moves the cursor to the previous element of the `AvlTree`.
    ///
    /// If the cursor is pointing to the "ghost" non-element, this method will move it to the last
    /// element. If it is pointing to the first element, this method will move it to the "ghost"
    /// non-element.
    pub fn move_prev(&mut self) {
        self.node = self.tree.step(self.node, Dir::Left);
    }

    /// Returns a reference to the element pointed to by the cursor.
    ///
    /// This returns `None` if the cursor is currently pointing to the "ghost" non-element.
    pub fn get(&self) -> Option<&T> {
        element(self.tree, self.node)
    }

    /// Returns a reference to the next element.
    ///
    /// If the cursor is pointing to the "ghost" non-element, this method returns the first element.
    /// If it is pointing to the last element, this method returns `None`.
    pub fn peek_next(&self) -> Option<&T> {
        element(self.tree, self.tree.step(self.node, Dir::Right))
    }

    /// Returns a reference to the previous element.
    ///
    /// If the cursor is pointing to the "ghost" non-element, this method returns the last element.
    /// If it is pointing to the first element, this method returns `None`.
    pub fn peek_prev(&self) -> Option<&T> {
        element(self.tree, self.tree.step(self.node, Dir::Left))
    }

    /// Returns the rank of the current element, or `None` at the "ghost" non-element.
    pub fn index(&self) -> Option<usize> {
        index(self.tree, self.node)
    }

    /// Returns the position of the current element. The "ghost" non-element is the end position.
    pub fn position(&self) -> Position {
        self.tree.position(self.node)
    }

    /// Removes the current element from the tree.
    ///
    /// This returns the removed element and moves the cursor to the next element. If the cursor is
    /// pointing to the "ghost" non-element, this method returns `None`, and neither the tree nor
    /// the cursor is modified.
    pub fn remove_current(&mut self) -> Option<T> {
        if self.node.is_sentinel() {
            return None;
        }

        let remove = self.node;
        self.move_next();

        Some(self.tree.remove_at(remove))
    }

    /// Removes the current element from the tree.
    ///
    /// This returns the removed element and moves the cursor to the previous element. If the cursor
    /// is pointing to the "ghost" non-element, this method returns `None`, and neither the tree nor
    /// the cursor is modified.
    pub fn remove_current_and_move_prev(&mut self) -> Option<T> {
        if self.node.is_sentinel() {
            return None;
        }

        let remove = self.node;
        self.move_prev();

        Some(self.tree.remove_at(remove))
    }
}

fn element<T>(tree: &AvlTree<T>, node: NodeId) -> Option<&T> {
    (!node.is_sentinel()).then(|| tree.value(node))
}

fn index<T>(tree: &AvlTree<T>, node: NodeId) -> Option<usize> {
    (!node.is_sentinel()).then(|| tree.rank_raw(node))
}

#[cfg(test)]
mod tests {
    use crate::AvlTree;

    #[test]
    fn ghost_links_last_to_first() {
        let tree = AvlTree::from([2, 1, 3]);
        let mut curs = tree.cursor_last();

        assert_eq!(curs.get(), Some(&3));
        assert_eq!(curs.peek_next(), None);

        curs.move_next();
        assert_eq!(curs.get(), None);
        assert_eq!(curs.index(), None);
        assert!(curs.position().is_end());
        assert_eq!(curs.peek_next(), Some(&1));
        assert_eq!(curs.peek_prev(), Some(&3));

        curs.move_next();
        assert_eq!(curs.get(), Some(&1));
        assert_eq!(curs.index(), Some(0));
    }

    #[test]
    fn empty_tree_cursor_is_ghost() {
        let mut tree: AvlTree<u8> = AvlTree::new();

        let mut curs = tree.cursor_first();
        assert_eq!(curs.get(), None);
        curs.move_prev();
        assert_eq!(curs.get(), None);

        let mut curs = tree.cursor_first_mut();
        assert_eq!(curs.remove_current(), None);
        assert_eq!(curs.remove_current_and_move_prev(), None);
    }

    #[test]
    fn remove_current_moves_to_successor() {
        let mut tree: AvlTree<u32> = (0..10).collect();
        let at = tree.position_at(4).unwrap();

        let mut curs = tree.cursor_at_mut(at).unwrap();
        assert_eq!(curs.remove_current(), Some(4));
        assert_eq!(curs.get(), Some(&5));
        assert_eq!(curs.index(), Some(4));

        assert_eq!(curs.remove_current_and_move_prev(), Some(5));
        assert_eq!(curs.get(), Some(&3));
        assert_eq!(curs.as_cursor().peek_next(), Some(&6));

        tree.assert_invariants();
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [0, 1, 2, 3, 6, 7, 8, 9]);
    }

    #[test]
    fn drain_with_cursor() {
        let mut tree: AvlTree<u32> = (0..64).rev().collect();
        let mut curs = tree.cursor_first_mut();

        let mut drained = Vec::new();
        while let Some(value) = curs.remove_current() {
            drained.push(value);
        }

        assert_eq!(drained, (0..64).collect::<Vec<_>>());
        assert!(tree.is_empty());
        tree.assert_invariants();
    }
}
