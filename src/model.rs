//! Reference-model equivalence runners, shared by the property tests and the fuzz targets.
//!
//! The reference model is a sorted `Vec`, since the tree is a multiset and keeps duplicates.

use arbitrary::Arbitrary;
use proptest::strategy::{Just, Strategy};

use crate::{AvlTree, Error};

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum ItemValue {
    Index(usize),
    Random(u32),
}

proptest::prop_compose! {
    fn index_strategy()(
        index in 0usize..1000,
    ) -> ItemValue {
        ItemValue::Index(index)
    }
}

proptest::prop_compose! {
    fn random_strategy()(
        random in 0u32..1000,
    ) -> ItemValue {
        ItemValue::Random(random)
    }
}

fn value_strategy() -> impl Strategy<Value = ItemValue> {
    proptest::prop_oneof![index_strategy(), random_strategy()]
}

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum Op {
    Insert(ItemValue),
    Contains(ItemValue),
    Remove(ItemValue),
    At(usize),
    EraseAt(usize),
    First,
    PopFirst,
    Last,
    PopLast,
}

impl Op {
    fn finalize(self, sorted: &[u32]) -> FinalOp {
        fn get_value(v: &[u32], i: ItemValue) -> u32 {
            match i {
                ItemValue::Index(idx) => {
                    if v.is_empty() {
                        idx as u32
                    } else {
                        v[idx % v.len()]
                    }
                }
                ItemValue::Random(v) => v,
            }
        }

        match self {
            Op::Insert(item) => FinalOp::Insert(get_value(sorted, item)),
            Op::Contains(item) => FinalOp::Contains(get_value(sorted, item)),
            Op::Remove(item) => FinalOp::Remove(get_value(sorted, item)),
            Op::At(index) => FinalOp::At(index % (sorted.len() + 1)),
            Op::EraseAt(index) => FinalOp::EraseAt(index % (sorted.len() + 1)),
            Op::First => FinalOp::First,
            Op::PopFirst => FinalOp::PopFirst,
            Op::Last => FinalOp::Last,
            Op::PopLast => FinalOp::PopLast,
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum FinalOp {
    Insert(u32),
    Contains(u32),
    Remove(u32),
    At(usize),
    EraseAt(usize),
    First,
    PopFirst,
    Last,
    PopLast,
}

pub fn op_strategy() -> impl Strategy<Value = Op> {
    proptest::prop_oneof![
        value_strategy().prop_map(Op::Insert),
        value_strategy().prop_map(Op::Contains),
        value_strategy().prop_map(Op::Remove),
        (0usize..1000).prop_map(Op::At),
        (0usize..1000).prop_map(Op::EraseAt),
        Just(Op::First),
        Just(Op::PopFirst),
        Just(Op::Last),
        Just(Op::PopLast),
    ]
}

pub fn run_vec_equivalence(ops: Vec<Op>) {
    let mut sorted_values: Vec<u32> = Vec::with_capacity(ops.len());
    let mut avl: AvlTree<u32> = AvlTree::new();

    for (op_id, op) in ops.into_iter().enumerate() {
        let final_op = op.finalize(&sorted_values);

        match final_op {
            FinalOp::Insert(value) => {
                let idx = sorted_values.partition_point(|&v| v < value);
                sorted_values.insert(idx, value);

                let position = avl.insert(value);

                assert_eq!(avl.get(position), Ok(&value), "FinalOp #{op_id}: {final_op:?}");
                // New duplicates go before the existing equal values.
                assert_eq!(avl.rank_of(position), Ok(idx), "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Contains(value) => {
                let from_vec = sorted_values.binary_search(&value).is_ok();
                let from_avl = avl.contains(&value);

                assert_eq!(from_vec, from_avl, "FinalOp #{op_id}: {final_op:?}");

                let first_rank = avl.find(&value).map(|p| avl.rank_of(p));
                let expected = from_vec.then(|| Ok(sorted_values.partition_point(|&v| v < value)));
                assert_eq!(first_rank, expected, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Remove(value) => {
                let before = sorted_values.len();
                sorted_values.retain(|&v| v != value);

                let from_vec = before - sorted_values.len();
                let from_avl = avl.remove(&value);

                assert_eq!(from_vec, from_avl, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::At(index) => {
                let from_vec = sorted_values.get(index).ok_or(Error::OutOfRange {
                    index,
                    len: sorted_values.len(),
                });
                let from_avl = avl.at(index);

                assert_eq!(from_vec, from_avl, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::EraseAt(index) => match avl.position_at(index) {
                Ok(position) => {
                    let removed = sorted_values.remove(index);
                    assert_eq!(avl.get(position), Ok(&removed));

                    let next = avl.erase(position).expect("live position must erase");
                    assert_eq!(
                        avl.get(next).ok(),
                        sorted_values.get(index),
                        "FinalOp #{op_id}: {final_op:?}"
                    );
                    assert_eq!(avl.erase(position), Err(Error::InvalidPosition));
                }
                Err(err) => {
                    assert_eq!(index, sorted_values.len(), "FinalOp #{op_id}: {final_op:?}");
                    assert_eq!(err, Error::OutOfRange { index, len: index });
                    assert_eq!(avl.erase(avl.end()), Err(Error::InvalidPosition));
                }
            },

            FinalOp::First => {
                assert_eq!(sorted_values.first(), avl.first(), "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::PopFirst => {
                let from_vec = (!sorted_values.is_empty()).then(|| sorted_values.remove(0));
                let from_avl = avl.pop_first();

                assert_eq!(from_vec, from_avl, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Last => {
                assert_eq!(sorted_values.last(), avl.last(), "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::PopLast => {
                let from_vec = sorted_values.pop();
                let from_avl = avl.pop_last();

                assert_eq!(from_vec, from_avl, "FinalOp #{op_id}: {final_op:?}");
            }
        }

        avl.assert_invariants();
        assert_eq!(sorted_values.len(), avl.len());
        assert!(sorted_values.iter().eq(avl.iter()));
    }
}

#[derive(Clone, Debug, Arbitrary)]
pub enum CursorOp {
    // Get is not an operation as it's executed on every loop iteration to check equivalence.
    MovePrev,
    MoveNext,
    PeekNext,
    PeekPrev,
    RemoveCurrent,
    RemoveCurrentMovePrev,
}

pub fn cursor_op_strategy() -> impl Strategy<Value = CursorOp> {
    proptest::prop_oneof![
        Just(CursorOp::MovePrev),
        Just(CursorOp::MoveNext),
        Just(CursorOp::PeekNext),
        Just(CursorOp::PeekPrev),
        Just(CursorOp::RemoveCurrent),
        Just(CursorOp::RemoveCurrentMovePrev),
    ]
}

#[derive(Clone, Debug)]
pub struct CursorEquivalenceInput {
    pub values: Vec<u32>,
    pub ops: Vec<CursorOp>,
}

impl<'a> arbitrary::Arbitrary<'a> for CursorEquivalenceInput {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        fn value(u: &mut arbitrary::Unstructured<'_>) -> u32 {
            // Keep values small so that duplicates are common.
            u8::arbitrary(u).map(u32::from).unwrap_or(0)
        }

        fn op(u: &mut arbitrary::Unstructured<'_>) -> CursorOp {
            CursorOp::arbitrary(u).unwrap_or(CursorOp::MoveNext)
        }

        let num_values = u8::arbitrary(u)? % 100;
        let num_ops = u16::arbitrary(u)? % 1000;

        let values = core::iter::repeat_with(|| value(u))
            .take(num_values.into())
            .collect();

        let ops = core::iter::repeat_with(|| op(u))
            .take(num_ops.into())
            .collect();

        Ok(CursorEquivalenceInput { values, ops })
    }
}

pub fn run_cursor_equivalence(values: Vec<u32>, ops: Vec<CursorOp>) {
    let mut avl: AvlTree<u32> = values.iter().copied().collect();

    let mut vec = values;
    vec.sort_unstable();

    fn vec_curs_prev(v: &[u32], curs: Option<usize>) -> Option<usize> {
        match curs {
            Some(i) => i.checked_sub(1),
            None => v.len().checked_sub(1),
        }
    }

    fn vec_curs_next(v: &[u32], curs: Option<usize>) -> Option<usize> {
        match curs {
            Some(i) => i.checked_add(1).filter(|&i| i < v.len()),
            None => (!v.is_empty()).then_some(0),
        }
    }

    let mut vec_curs = vec_curs_next(&vec, None);
    let mut avl_curs = avl.cursor_first_mut();

    // Check that the initial states are equivalent.
    {
        let v = vec_curs.map(|i| &vec[i]);
        let w = avl_curs.get();

        assert_eq!(v, w);
        assert_eq!(vec_curs, avl_curs.index());
    }

    for op in ops {
        match op {
            CursorOp::MoveNext => {
                vec_curs = vec_curs_next(&vec, vec_curs);
                avl_curs.move_next();
            }

            CursorOp::MovePrev => {
                vec_curs = vec_curs_prev(&vec, vec_curs);
                avl_curs.move_prev();
            }

            CursorOp::PeekNext => {
                let v = vec_curs_next(&vec, vec_curs).map(|i| &vec[i]);
                let w = avl_curs.peek_next();

                assert_eq!(v, w);
            }

            CursorOp::PeekPrev => {
                let v = vec_curs_prev(&vec, vec_curs).map(|i| &vec[i]);
                let w = avl_curs.peek_prev();

                assert_eq!(v, w);
            }

            CursorOp::RemoveCurrent => {
                let v = vec_curs.map(|i| vec.remove(i));

                if vec_curs == Some(vec.len()) {
                    vec_curs = None;
                }

                let w = avl_curs.remove_current();

                assert_eq!(v, w);
            }

            CursorOp::RemoveCurrentMovePrev => {
                let new_v_curs = vec_curs.map(|i| i.checked_sub(1));
                let v = vec_curs.map(|i| vec.remove(i));

                if let Some(vc) = new_v_curs {
                    vec_curs = vc;
                }

                let w = avl_curs.remove_current_and_move_prev();

                assert_eq!(v, w);
            }
        }

        let v = vec_curs.map(|i| &vec[i]);
        let w = avl_curs.get();

        assert_eq!(v, w);
        assert_eq!(vec_curs, avl_curs.index());
    }

    drop(avl_curs);
    avl.assert_invariants();
    assert!(vec.iter().eq(avl.iter()));
}
