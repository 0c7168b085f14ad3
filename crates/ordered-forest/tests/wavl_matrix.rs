use ordered_forest::wavl::{assert_wavl_tree, BALANCED, LEFT, RIGHT, WEAK};
use ordered_forest::{default_comparator, Hook, Node, TreeError, TreeNode, WavlTree};

type N = TreeNode<i32, ()>;
type Wavl = WavlTree<N, i32, fn(&N) -> &i32>;

fn key(n: &N) -> &i32 {
    &n.k
}

fn build(keys: &[i32]) -> (Vec<N>, Wavl) {
    let mut arena: Vec<N> = keys.iter().map(|&k| TreeNode::new(k, ())).collect();
    let mut tree: Wavl = WavlTree::new(key);
    for i in 0..keys.len() as u32 {
        tree.insert(&mut arena, i);
        tree.assert_valid(&arena).unwrap();
    }
    (arena, tree)
}

fn keys_in_order(tree: &Wavl, arena: &[N]) -> Vec<i32> {
    tree.iter(arena).map(|(_, n)| n.k).collect()
}

#[test]
fn wavl_rank_tags_matrix() {
    let (mut arena, mut tree) = build(&[2]);
    let root = tree.root().unwrap();
    assert_eq!(arena[root as usize].tag(), BALANCED);

    arena.push(TreeNode::new(1, ()));
    tree.insert(&mut arena, 1);
    // Root promoted to rank 1; the missing right child sits two ranks down.
    assert_eq!(arena[root as usize].tag(), LEFT);

    arena.push(TreeNode::new(3, ()));
    tree.insert(&mut arena, 2);
    assert_eq!(arena[root as usize].tag(), BALANCED);

    tree.erase(&mut arena, 1);
    assert_eq!(arena[root as usize].tag(), RIGHT);
    tree.assert_valid(&arena).unwrap();
}

#[test]
fn wavl_erase_can_leave_weak_node_matrix() {
    // 2 with children 1 and 3, 3 with right child 4. Erasing 1 rotates 3 up
    // with both children two ranks down.
    let (mut arena, mut tree) = build(&[2, 1, 3, 4]);
    tree.erase(&mut arena, 1);
    tree.assert_valid(&arena).unwrap();
    let root = tree.root().unwrap();
    assert_eq!(*tree.key(&arena, root), 3);
    assert_eq!(arena[root as usize].tag(), WEAK);
    assert_eq!(arena[0].tag(), BALANCED);

    let keys: Vec<i32> = (0..64).collect();
    let (mut arena, mut tree) = build(&keys);
    for i in (0..64u32).step_by(2) {
        tree.erase(&mut arena, i);
        tree.assert_valid(&arena).unwrap();
        for (idx, n) in tree.iter(&arena) {
            if n.tag() == WEAK {
                assert!(n.l().is_some() && n.r().is_some(), "weak leaf {idx}");
            }
        }
    }
    assert_eq!(tree.len(), 32);
}

#[test]
fn wavl_ladder_matrix() {
    let up: Vec<i32> = (0..=100).collect();
    let down: Vec<i32> = (11..=100).rev().collect();
    let mut zigzag = vec![50];
    for d in 1..=50 {
        zigzag.push(50 - d);
        zigzag.push(50 + d);
    }

    for keys in [up, down, zigzag] {
        let (mut arena, mut tree) = build(&keys);
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys_in_order(&tree, &arena), sorted);
        // Insert-only WAVL trees are AVL trees.
        let n = keys.len() as f64;
        assert!(tree.height(&arena) as f64 <= 1.45 * (n + 2.0).log2());

        for i in (0..keys.len() as u32).rev() {
            tree.erase(&mut arena, i);
            tree.assert_valid(&arena).unwrap();
        }
        assert!(tree.is_empty());
    }
}

#[test]
fn wavl_insert_erase_round_trip_matrix() {
    let mut hits = 0;
    for size in [1, 3, 7, 15, 20] {
        let keys: Vec<i32> = (1..=size).map(|k| k * 2).collect();
        let (mut arena, mut tree) = build(&keys);
        for probe in (1..=size * 2 + 1).step_by(2) {
            arena.push(TreeNode::new(probe, ()));
            let node = arena.len() as u32 - 1;
            let before: Vec<Hook> = arena.iter().map(|n| n.hook).collect();
            let root = tree.root();
            tree.insert(&mut arena, node);
            let after: Vec<Hook> = arena.iter().map(|n| n.hook).collect();
            let no_restructure = (0..before.len()).filter(|&i| i as u32 != node).all(|i| {
                let (b, a) = (before[i], after[i]);
                a.p == b.p
                    && !(b.tag == WEAK && a.tag != WEAK)
                    && (a.l == b.l || (b.l.is_none() && a.l == Some(node)))
                    && (a.r == b.r || (b.r.is_none() && a.r == Some(node)))
            });
            tree.erase(&mut arena, node);
            tree.assert_valid(&arena).unwrap();
            if no_restructure {
                hits += 1;
                let restored: Vec<Hook> = arena.iter().map(|n| n.hook).collect();
                assert_eq!(restored, before);
                assert_eq!(tree.root(), root);
            }
        }
    }
    assert!(hits > 0);
}

#[test]
fn wavl_checker_reports_violations_matrix() {
    let (mut arena, tree) = build(&[2, 1, 3]);
    let root = tree.root().unwrap();
    let left = arena[root as usize].l().unwrap();
    arena[left as usize].set_tag(LEFT);
    assert_eq!(tree.assert_valid(&arena), Err(TreeError::LeafRank(left)));
    arena[left as usize].set_tag(BALANCED);

    arena[root as usize].set_tag(LEFT);
    assert_eq!(tree.assert_valid(&arena), Err(TreeError::RankMismatch(root)));
    arena[root as usize].set_tag(BALANCED);
    assert_wavl_tree(&arena, tree.root(), key, default_comparator::<i32>).unwrap();
}
