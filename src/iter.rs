use core::iter::FusedIterator;

use crate::arena::{Dir, NodeId};
use crate::AvlTree;

/// An iterator over the elements of an [`AvlTree`] in sorted order.
///
/// Both ends advance through parent links, without an auxiliary stack.
pub struct Iter<'tree, T> {
    tree: &'tree AvlTree<T>,

    front: NodeId,
    back: NodeId,

    len: usize,
}

impl<'tree, T> Iter<'tree, T> {
    pub(crate) fn new(tree: &'tree AvlTree<T>) -> Self {
        Iter {
            tree,

            front: tree.step(NodeId::SENTINEL, Dir::Right),
            back: tree.step(NodeId::SENTINEL, Dir::Left),

            len: tree.len(),
        }
    }
}

impl<'tree, T> Iterator for Iter<'tree, T> {
    type Item = &'tree T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let cur = self.front;
        self.front = self.tree.step(cur, Dir::Right);
        self.len -= 1;

        Some(self.tree.value(cur))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'tree, T> DoubleEndedIterator for Iter<'tree, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let cur = self.back;
        self.back = self.tree.step(cur, Dir::Left);
        self.len -= 1;

        Some(self.tree.value(cur))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            len: self.len,
        }
    }
}

/// An owning iterator over the elements of an [`AvlTree`] in sorted order.
pub struct IntoIter<T> {
    values: std::vec::IntoIter<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(values: Vec<T>) -> Self {
        IntoIter {
            values: values.into_iter(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.values.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.values.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
mod tests {
    use crate::AvlTree;

    #[test]
    fn empty() {
        let tree: AvlTree<u32> = AvlTree::new();
        let mut iter = tree.iter();

        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn meets_in_the_middle() {
        let tree = AvlTree::from([4, 1, 3, 2, 5]);
        let mut iter = tree.iter();

        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn into_iter_is_sorted() {
        let tree = AvlTree::from([3, 1, 2, 1]);
        let values: Vec<_> = tree.into_iter().collect();

        assert_eq!(values, [1, 1, 2, 3]);
    }

    #[test]
    fn into_iter_drops_remaining() {
        use std::rc::Rc;

        let shared = Rc::new(());
        let mut tree = AvlTree::new();
        for i in 0..10 {
            tree.insert((i, Rc::clone(&shared)));
        }

        let mut iter = tree.into_iter();
        assert_eq!(iter.next().map(|(i, _)| i), Some(0));
        assert_eq!(iter.next_back().map(|(i, _)| i), Some(9));
        drop(iter);

        assert_eq!(Rc::strong_count(&shared), 1);
    }
}
