use core::num::NonZero;

/// Handle to a node slot in an [`Arena`].
///
/// Stored as `index + 1` so that `Option<NodeId>` is the same size as `NodeId`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct NodeId(NonZero<u32>);

impl NodeId {
    pub(crate) const MAX: usize = (u32::MAX - 1) as usize;

    /// The permanent root placeholder. Its left child is the root of the data.
    pub(crate) const SENTINEL: NodeId = NodeId::from_index(0);

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`NodeId::from_index()` - `index` > `NodeId::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        let raw = (index + 1) as u32;
        match NonZero::new(raw) {
            Some(raw) => Self(raw),
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }

    #[inline]
    pub(crate) fn is_sentinel(self) -> bool {
        self == Self::SENTINEL
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Dir {
    Left = 0,
    Right = 1,
}

impl core::ops::Not for Dir {
    type Output = Dir;

    fn not(self) -> Self::Output {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

/// Structural bookkeeping for one node.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Links {
    parent: Option<NodeId>,
    children: [Option<NodeId>; 2],
    // Longest path to a leaf, counted in nodes. Absent subtrees are 0.
    height: u8,
    // Number of elements in this subtree.
    count: usize,
    // Bumped every time the slot is freed.
    generation: u32,
}

impl Links {
    const fn new(generation: u32) -> Self {
        Links {
            parent: None,
            children: [None; 2],
            height: 0,
            count: 0,
            generation,
        }
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub(crate) fn child(&self, dir: Dir) -> Option<NodeId> {
        self.children[dir as usize]
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<NodeId> {
        self.child(Dir::Left)
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<NodeId> {
        self.child(Dir::Right)
    }

    #[inline]
    pub(crate) fn height(&self) -> u8 {
        self.height
    }

    #[inline]
    pub(crate) fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub(crate) fn generation(&self) -> u32 {
        self.generation
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) -> Option<NodeId> {
        core::mem::replace(&mut self.parent, parent)
    }

    #[inline]
    pub(crate) fn set_child(&mut self, dir: Dir, child: Option<NodeId>) -> Option<NodeId> {
        core::mem::replace(&mut self.children[dir as usize], child)
    }

    #[inline]
    pub(crate) fn set_height(&mut self, height: u8) {
        self.height = height;
    }

    #[inline]
    pub(crate) fn set_count(&mut self, count: usize) {
        self.count = count;
    }
}

/// The node store: link records and values in parallel tables.
///
/// Slot 0 always holds the sentinel, which has links but never a value.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    links: Vec<Links>,
    values: Vec<Option<T>>,
    free: Vec<NodeId>,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        let mut links = Vec::with_capacity(1);
        links.push(Links::new(0));

        let mut values = Vec::with_capacity(1);
        values.push(None);

        Self {
            links,
            values,
            free: Vec::new(),
        }
    }

    /// Number of live (value-holding) nodes.
    pub(crate) fn len(&self) -> usize {
        self.values.len() - 1 - self.free.len()
    }

    /// Allocates a detached leaf holding `value`.
    ///
    /// Panics if the arena is at capacity; nothing is modified in that case.
    pub(crate) fn alloc(&mut self, value: T) -> NodeId {
        if let Some(id) = self.free.pop() {
            let links = &mut self.links[id.to_index()];
            *links = Links::new(links.generation);
            links.height = 1;
            links.count = 1;
            self.values[id.to_index()] = Some(value);
            id
        } else {
            assert!(
                self.values.len() <= NodeId::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                NodeId::MAX
            );
            let mut links = Links::new(0);
            links.height = 1;
            links.count = 1;
            self.links.push(links);
            self.values.push(Some(value));
            NodeId::from_index(self.values.len() - 1)
        }
    }

    /// Releases a node's slot and returns its value.
    ///
    /// The caller must already have unlinked the node from the tree.
    pub(crate) fn free(&mut self, id: NodeId) -> T {
        assert!(!id.is_sentinel(), "`Arena::free()` - cannot free the sentinel!");
        let value = self.values[id.to_index()]
            .take()
            .expect("`Arena::free()` - `id` is invalid!");
        let links = &mut self.links[id.to_index()];
        *links = Links::new(links.generation.wrapping_add(1));
        self.free.push(id);
        value
    }

    /// Frees every node and resets the sentinel.
    pub(crate) fn clear(&mut self) {
        for index in 1..self.values.len() {
            if self.values[index].take().is_some() {
                let links = &mut self.links[index];
                *links = Links::new(links.generation.wrapping_add(1));
                self.free.push(NodeId::from_index(index));
            }
        }

        self.links[0] = Links::new(0);
    }

    /// Returns `true` if `id` names a value-holding slot whose generation is `generation`.
    pub(crate) fn is_live(&self, id: NodeId, generation: u32) -> bool {
        let index = id.to_index();
        index < self.values.len()
            && self.values[index].is_some()
            && self.links[index].generation == generation
    }

    #[inline]
    pub(crate) fn links(&self, id: NodeId) -> &Links {
        &self.links[id.to_index()]
    }

    #[inline]
    pub(crate) fn links_mut(&mut self, id: NodeId) -> &mut Links {
        &mut self.links[id.to_index()]
    }

    #[inline]
    pub(crate) fn value(&self, id: NodeId) -> &T {
        self.values[id.to_index()]
            .as_ref()
            .expect("`Arena::value()` - `id` is invalid!")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn node_id_niche() {
        assert_eq!(
            core::mem::size_of::<Option<NodeId>>(),
            core::mem::size_of::<NodeId>()
        );
    }

    #[test]
    #[should_panic(expected = "`NodeId::from_index()` - `index` > `NodeId::MAX`!")]
    fn invalid_node_id() {
        let _ = NodeId::from_index(NodeId::MAX + 1);
    }

    #[test]
    fn sentinel_is_slot_zero() {
        let arena: Arena<u32> = Arena::new();
        assert_eq!(NodeId::SENTINEL.to_index(), 0);
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.links(NodeId::SENTINEL).count(), 0);
        assert!(!arena.is_live(NodeId::SENTINEL, 0));
    }

    #[test]
    fn freed_slot_is_reused_with_new_generation() {
        let mut arena = Arena::new();
        let a = arena.alloc(1u32);
        let generation = arena.links(a).generation();

        assert_eq!(arena.free(a), 1);
        assert!(!arena.is_live(a, generation));

        let b = arena.alloc(2);
        assert_eq!(a, b);
        assert_eq!(arena.links(b).generation(), generation.wrapping_add(1));
        assert!(arena.is_live(b, generation.wrapping_add(1)));
        assert!(!arena.is_live(b, generation));
    }

    #[test]
    fn clear_invalidates_every_slot() {
        let mut arena = Arena::new();
        let ids: Vec<_> = (0u32..8).map(|v| arena.alloc(v)).collect();
        let generations: Vec<_> = ids.iter().map(|&id| arena.links(id).generation()).collect();

        arena.clear();
        assert_eq!(arena.len(), 0);

        for (&id, &generation) in ids.iter().zip(&generations) {
            assert!(!arena.is_live(id, generation));
        }
    }

    proptest! {
        #[test]
        fn node_id_round_trip(index in 0..=NodeId::MAX) {
            prop_assert_eq!(NodeId::from_index(index).to_index(), index);
        }

        #[test]
        fn arena_behaves_like_vec(operations in prop::collection::vec(strategy(), 0..256)) {
            let mut model: Vec<(NodeId, u32)> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for operation in operations {
                match operation {
                    Operation::Alloc(value) => {
                        let id = arena.alloc(value);
                        model.push((id, value));
                    }
                    Operation::Get(which) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let (id, value) = model[index];
                        prop_assert_eq!(*arena.value(id), value);
                    }
                    Operation::Free(which) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let (id, value) = model.swap_remove(index);
                        prop_assert_eq!(arena.free(id), value);
                    }
                    Operation::Clear => {
                        arena.clear();
                        model.clear();
                    }
                }

                prop_assert_eq!(arena.len(), model.len());

                for &(id, value) in &model {
                    prop_assert_eq!(*arena.value(id), value);
                }
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Alloc(u32),
        Get(usize),
        Free(usize),
        Clear,
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            20 => any::<u32>().prop_map(Operation::Alloc),
            5 => any::<usize>().prop_map(Operation::Get),
            5 => any::<usize>().prop_map(Operation::Free),
            1 => Just(Operation::Clear),
        ]
    }
}
