use ranked_avl::AvlTree;

fn main() {
    let mut tree: AvlTree<u32> = AvlTree::new();

    for value in [2, 0, 3, 4, 5, 1, 6, 3] {
        tree.insert(value);
        tree.assert_invariants();
        println!("height {}: {:?}", tree.height(), tree);
    }

    for rank in 0..tree.len() {
        let position = tree.position_at(rank).unwrap();
        assert_eq!(tree.rank_of(position), Ok(rank));
        println!("at({rank}) = {}", tree[rank]);
    }

    let zero = tree.pop_first().unwrap();
    assert_eq!(zero, 0);
    tree.assert_invariants();

    let threes = tree.remove(&3);
    assert_eq!(threes, 2);
    tree.assert_invariants();
    println!("{tree:?}");

    drop(tree);
}
