use std::collections::BTreeMap;

use ordered_forest::{Avl, RedBlack, Strategy as Balance, Tree, TreeNode, Wavl};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

type N = TreeNode<i32, u32>;
type Forest<S> = Tree<S, N, i32, fn(&N) -> &i32>;

fn key(n: &N) -> &i32 {
    &n.k
}

/// Arena, tree and a `key -> node indices` model kept side by side.
struct Harness<S: Balance> {
    arena: Vec<N>,
    tree: Forest<S>,
    model: BTreeMap<i32, Vec<u32>>,
}

impl<S: Balance> Harness<S> {
    fn new() -> Self {
        Self {
            arena: Vec::new(),
            tree: Tree::new(key),
            model: BTreeMap::new(),
        }
    }

    fn alloc(&mut self, k: i32) -> u32 {
        self.arena.push(TreeNode::new(k, self.arena.len() as u32));
        self.arena.len() as u32 - 1
    }

    fn insert(&mut self, k: i32) {
        let node = self.alloc(k);
        self.tree.insert(&mut self.arena, node);
        self.model.entry(k).or_default().push(node);
    }

    fn insert_unique(&mut self, k: i32) -> bool {
        let node = self.alloc(k);
        let inserted = self.tree.insert_unique(&mut self.arena, node);
        if inserted {
            self.model.entry(k).or_default().push(node);
        }
        inserted
    }

    fn erase(&mut self, k: i32) -> bool {
        let Some(node) = self.tree.search(&self.arena, &k) else {
            return false;
        };
        self.tree.erase(&mut self.arena, node);
        let nodes = self.model.get_mut(&k).expect("model tracks every linked key");
        nodes.retain(|&n| n != node);
        if nodes.is_empty() {
            self.model.remove(&k);
        }
        true
    }

    fn len(&self) -> usize {
        self.model.values().map(Vec::len).sum()
    }

    fn check(&self) -> Result<(), TestCaseError> {
        self.tree
            .assert_valid(&self.arena)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(self.tree.len(), self.len());

        // Same keys; equal keys in insertion order.
        let expected: Vec<u32> = self.model.values().flatten().copied().collect();
        let actual: Vec<u32> = self.tree.iter(&self.arena).map(|(i, _)| i).collect();
        prop_assert_eq!(actual, expected);
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum Op {
    Insert(i32),
    InsertUnique(i32),
    Erase(i32),
    LowerBound(i32),
    UpperBound(i32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0i32..64).prop_map(Op::Insert),
        2 => (0i32..64).prop_map(Op::InsertUnique),
        4 => (0i32..64).prop_map(Op::Erase),
        1 => (-1i32..65).prop_map(Op::LowerBound),
        1 => (-1i32..65).prop_map(Op::UpperBound),
    ]
}

fn replay<S: Balance>(ops: &[Op]) -> Result<(), TestCaseError> {
    let mut h = Harness::<S>::new();
    for op in ops {
        match *op {
            Op::Insert(k) => h.insert(k),
            Op::InsertUnique(k) => {
                let fresh = !h.model.contains_key(&k);
                prop_assert_eq!(h.insert_unique(k), fresh, "insert_unique({})", k);
            }
            Op::Erase(k) => {
                let present = h.model.contains_key(&k);
                prop_assert_eq!(h.erase(k), present, "erase({})", k);
            }
            Op::LowerBound(k) => {
                let got = h.tree.lower_bound(&h.arena, &k);
                let want = h.model.range(k..).next().map(|(_, v)| v[0]);
                prop_assert_eq!(got, want, "lower_bound({})", k);
            }
            Op::UpperBound(k) => {
                let got = h.tree.upper_bound(&h.arena, &k);
                let want = h.model.range(k + 1..).next().map(|(_, v)| v[0]);
                prop_assert_eq!(got, want, "upper_bound({})", k);
            }
        }
        h.check()?;
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn red_black_matches_model(ops in proptest::collection::vec(op_strategy(), 1..400)) {
        replay::<RedBlack>(&ops)?;
    }

    #[test]
    fn avl_matches_model(ops in proptest::collection::vec(op_strategy(), 1..400)) {
        replay::<Avl>(&ops)?;
    }

    #[test]
    fn wavl_matches_model(ops in proptest::collection::vec(op_strategy(), 1..400)) {
        replay::<Wavl>(&ops)?;
    }
}

/// Insert/search/erase mix over a fixed-seed stream, validated periodically.
fn seeded_workload<S: Balance>(seed: u64) {
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
    let mut h = Harness::<S>::new();
    for step in 0..20_000 {
        let k = rng.gen_range(0..2_000);
        match rng.gen_range(0..10) {
            0..=4 => h.insert(k),
            5 => {
                h.insert_unique(k);
            }
            6..=8 => {
                h.erase(k);
            }
            _ => {
                let found = h.tree.search(&h.arena, &k).map(|i| h.arena[i as usize].k);
                assert_eq!(found, h.model.contains_key(&k).then_some(k));
            }
        }
        if step % 1_000 == 0 {
            h.check().unwrap();
        }
    }
    h.check().unwrap();

    let n = h.tree.len() as f64;
    let height = h.tree.height(&h.arena) as f64;
    assert!(height <= 2.0 * (n + 1.0).log2(), "{} height {height} for {n} nodes", S::NAME);
}

#[test]
fn red_black_seeded_workload_matrix() {
    for seed in [1, 7, 42] {
        seeded_workload::<RedBlack>(seed);
    }
}

#[test]
fn avl_seeded_workload_matrix() {
    for seed in [1, 7, 42] {
        seeded_workload::<Avl>(seed);
    }
}

#[test]
fn wavl_seeded_workload_matrix() {
    for seed in [1, 7, 42] {
        seeded_workload::<Wavl>(seed);
    }
}
