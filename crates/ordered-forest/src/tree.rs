use std::fmt::Debug;
use std::marker::PhantomData;

use tracing::debug;

use crate::avl::Avl;
use crate::error::TreeError;
use crate::iter::{Cursor, Iter};
use crate::red_black::RedBlack;
use crate::strategy::Strategy;
use crate::types::{default_comparator, Node};
use crate::util::print::print;
use crate::util::{
    assert_bst, find, find_or_next_lower, first, height, insert, insert_unique, last, lower_bound,
    next, prev, search_range, upper_bound,
};
use crate::wavl::Wavl;

/// Ordered container over caller-owned arena nodes.
///
/// The tree owns only its root index, its length and the two ordering
/// closures. Nodes stay in the arena; every operation borrows it.
pub struct Tree<S, N, K, F, C = fn(&K, &K) -> i32>
where
    S: Strategy,
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    root: Option<u32>,
    len: usize,
    key_of: F,
    comparator: C,
    _marker: PhantomData<(S, fn(&N, &K))>,
}

pub type RbTree<N, K, F, C = fn(&K, &K) -> i32> = Tree<RedBlack, N, K, F, C>;
pub type AvlTree<N, K, F, C = fn(&K, &K) -> i32> = Tree<Avl, N, K, F, C>;
pub type WavlTree<N, K, F, C = fn(&K, &K) -> i32> = Tree<Wavl, N, K, F, C>;

impl<S, N, K, F> Tree<S, N, K, F, fn(&K, &K) -> i32>
where
    S: Strategy,
    N: Node,
    K: PartialOrd,
    F: Fn(&N) -> &K,
{
    pub fn new(key_of: F) -> Self {
        Self::with_comparator(key_of, default_comparator::<K>)
    }
}

impl<S, N, K, F, C> Tree<S, N, K, F, C>
where
    S: Strategy,
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    pub fn with_comparator(key_of: F, comparator: C) -> Self {
        Self {
            root: None,
            len: 0,
            key_of,
            comparator,
            _marker: PhantomData,
        }
    }

    pub fn root(&self) -> Option<u32> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Forgets every node. Hooks in the arena are left as they are.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    pub fn key<'a>(&self, arena: &'a [N], node: u32) -> &'a K {
        (self.key_of)(&arena[node as usize])
    }

    /// Links `node`; equal keys are kept, after the existing ones.
    pub fn insert(&mut self, arena: &mut [N], node: u32) {
        insert(arena, &mut self.root, node, &self.key_of, &self.comparator);
        S::post_insert(arena, &mut self.root, node);
        self.len += 1;
    }

    /// Links `node` unless its key is already present.
    pub fn insert_unique(&mut self, arena: &mut [N], node: u32) -> bool {
        if !insert_unique(arena, &mut self.root, node, &self.key_of, &self.comparator) {
            debug!(node, strategy = S::NAME, "insert_unique: equal key present");
            return false;
        }
        S::post_insert(arena, &mut self.root, node);
        self.len += 1;
        true
    }

    /// Unlinks `node`, which must be linked into this tree.
    pub fn erase(&mut self, arena: &mut [N], node: u32) {
        debug_assert!(
            arena[node as usize].hook().is_linked() || self.root == Some(node),
            "erase of unlinked node {node}"
        );
        S::erase(arena, &mut self.root, node);
        self.len -= 1;
    }

    pub fn try_insert(&mut self, arena: &mut [N], node: u32) -> Result<(), TreeError> {
        self.check_free(arena, node)?;
        self.insert(arena, node);
        Ok(())
    }

    pub fn try_insert_unique(&mut self, arena: &mut [N], node: u32) -> Result<bool, TreeError> {
        self.check_free(arena, node)?;
        Ok(self.insert_unique(arena, node))
    }

    pub fn try_erase(&mut self, arena: &mut [N], node: u32) -> Result<(), TreeError> {
        check_bounds(arena, node)?;
        let mut top = node;
        while let Some(p) = arena[top as usize].p() {
            top = p;
        }
        if self.root != Some(top) {
            debug!(node, strategy = S::NAME, "erase rejected: not in this tree");
            return Err(TreeError::NotLinked(node));
        }
        self.erase(arena, node);
        Ok(())
    }

    fn check_free(&self, arena: &[N], node: u32) -> Result<(), TreeError> {
        check_bounds(arena, node)?;
        if arena[node as usize].hook().is_linked() || self.root == Some(node) {
            debug!(node, strategy = S::NAME, "insert rejected: node already linked");
            return Err(TreeError::AlreadyLinked(node));
        }
        Ok(())
    }

    pub fn search(&self, arena: &[N], key: &K) -> Option<u32> {
        find(arena, self.root, key, &self.key_of, &self.comparator)
    }

    pub fn lower_bound(&self, arena: &[N], key: &K) -> Option<u32> {
        lower_bound(arena, self.root, key, &self.key_of, &self.comparator)
    }

    pub fn upper_bound(&self, arena: &[N], key: &K) -> Option<u32> {
        upper_bound(arena, self.root, key, &self.key_of, &self.comparator)
    }

    /// Exact match, else the greatest key below `key`.
    pub fn floor(&self, arena: &[N], key: &K) -> Option<u32> {
        find_or_next_lower(arena, self.root, key, &self.key_of, &self.comparator)
    }

    /// `(lower_bound(lo), lower_bound(hi))` in a single shared descent.
    pub fn search_range(&self, arena: &[N], lo: &K, hi: &K) -> (Cursor, Cursor) {
        let (begin, end) = search_range(arena, self.root, lo, hi, &self.key_of, &self.comparator);
        (Cursor::new(begin), Cursor::new(end))
    }

    pub fn first(&self, arena: &[N]) -> Option<u32> {
        first(arena, self.root)
    }

    pub fn last(&self, arena: &[N]) -> Option<u32> {
        last(arena, self.root)
    }

    pub fn next(&self, arena: &[N], node: u32) -> Option<u32> {
        next(arena, node)
    }

    pub fn prev(&self, arena: &[N], node: u32) -> Option<u32> {
        prev(arena, node)
    }

    pub fn height(&self, arena: &[N]) -> usize {
        height(arena, self.root)
    }

    pub fn cursor_first(&self, arena: &[N]) -> Cursor {
        Cursor::new(self.first(arena))
    }

    pub fn cursor_last(&self, arena: &[N]) -> Cursor {
        Cursor::new(self.last(arena))
    }

    /// All nodes in key order.
    pub fn iter<'a>(&self, arena: &'a [N]) -> Iter<'a, N> {
        Iter::new(arena, self.root, self.cursor_first(arena), Cursor::end())
    }

    /// Nodes with `lo <= key < hi`.
    pub fn range<'a>(&self, arena: &'a [N], lo: &K, hi: &K) -> Iter<'a, N> {
        let (begin, end) = self.search_range(arena, lo, hi);
        Iter::new(arena, self.root, begin, end)
    }

    pub fn cursor_range<'a>(&self, arena: &'a [N], begin: Cursor, end: Cursor) -> Iter<'a, N> {
        Iter::new(arena, self.root, begin, end)
    }

    /// In-order visit with mutable node access. `f` must leave hooks and
    /// keys untouched.
    pub fn for_each_mut<G>(&self, arena: &mut [N], f: G)
    where
        G: FnMut(u32, &mut N),
    {
        let begin = first(arena, self.root);
        walk_mut(arena, begin, None, f);
    }

    /// Mutable visit of `lo <= key < hi` in key order. Same contract as
    /// [`Tree::for_each_mut`].
    pub fn range_for_each_mut<G>(&self, arena: &mut [N], lo: &K, hi: &K, f: G)
    where
        G: FnMut(u32, &mut N),
    {
        let (begin, end) = search_range(arena, self.root, lo, hi, &self.key_of, &self.comparator);
        walk_mut(arena, begin, end, f);
    }

    /// Mutable visit of `lo <= key < hi` from the greatest key down.
    pub fn range_rev_for_each_mut<G>(&self, arena: &mut [N], lo: &K, hi: &K, mut f: G)
    where
        G: FnMut(u32, &mut N),
    {
        let (begin, end) = search_range(arena, self.root, lo, hi, &self.key_of, &self.comparator);
        if begin == end {
            return;
        }
        let mut curr = match end {
            Some(e) => prev(arena, e),
            None => last(arena, self.root),
        };
        while let Some(i) = curr {
            curr = if Some(i) == begin { None } else { prev(arena, i) };
            f(i, &mut arena[i as usize]);
        }
    }

    /// Links, key order and the strategy's balance invariants.
    pub fn assert_valid(&self, arena: &[N]) -> Result<(), TreeError> {
        assert_bst(arena, self.root, &self.key_of, &self.comparator)?;
        S::check(arena, self.root)
    }

    pub fn print(&self, arena: &[N]) -> String
    where
        K: Debug,
    {
        format!(
            "{} {}",
            S::NAME,
            print(arena, self.root, "", &self.key_of, &S::tag_name)
        )
    }
}

/// Visits `[begin, end)`, stepping before handing out each node.
fn walk_mut<N, G>(arena: &mut [N], begin: Option<u32>, end: Option<u32>, mut f: G)
where
    N: Node,
    G: FnMut(u32, &mut N),
{
    let mut curr = begin;
    while let Some(i) = curr.filter(|&i| Some(i) != end) {
        curr = next(arena, i);
        f(i, &mut arena[i as usize]);
    }
}

fn check_bounds<N>(arena: &[N], node: u32) -> Result<(), TreeError> {
    if node as usize >= arena.len() {
        debug!(node, len = arena.len(), "node index out of bounds");
        return Err(TreeError::OutOfBounds {
            index: node,
            len: arena.len(),
        });
    }
    Ok(())
}
