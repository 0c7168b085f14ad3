//! Binary-search-tree substrate shared by every balancing strategy.
//!
//! - [`rotate`]: single left/right rotations
//! - [`erase`]: structural erase with successor splicing
//! - [`print`]: debug dump
//!
//! Key-based helpers accept a `key_of` accessor and a three-way
//! `comparator` so callers can use any arena node layout.

pub mod erase;
pub mod print;
pub mod rotate;

use crate::error::TreeError;
use crate::types::Node;

pub use erase::{splice, Unlinked};
pub use rotate::{rotate_left, rotate_left_child, rotate_right, rotate_right_child};

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn get_tag<N: Node>(arena: &[N], idx: u32) -> u8 {
    arena[idx as usize].tag()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn set_l<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

#[inline]
pub(crate) fn set_tag<N: Node>(arena: &mut [N], idx: u32, tag: u8) {
    arena[idx as usize].set_tag(tag);
}

/// Leftmost node in the tree.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root;
    while let Some(idx) = curr {
        match get_l(arena, idx) {
            Some(l) => curr = Some(l),
            None => return Some(idx),
        }
    }
    curr
}

/// Rightmost node in the tree.
pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root;
    while let Some(idx) = curr {
        match get_r(arena, idx) {
            Some(r) => curr = Some(r),
            None => return Some(idx),
        }
    }
    curr
}

/// In-order successor.
pub fn next<N: Node>(arena: &[N], node: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, node) {
        let mut curr = r;
        while let Some(l) = get_l(arena, curr) {
            curr = l;
        }
        return Some(curr);
    }
    let mut curr = node;
    let mut p = get_p(arena, node);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor.
pub fn prev<N: Node>(arena: &[N], node: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, node) {
        let mut curr = l;
        while let Some(r) = get_r(arena, curr) {
            curr = r;
        }
        return Some(curr);
    }
    let mut curr = node;
    let mut p = get_p(arena, node);
    while let Some(pi) = p {
        if get_l(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

fn size_inner<N: Node>(arena: &[N], root: u32) -> usize {
    1 + get_l(arena, root).map_or(0, |l| size_inner(arena, l))
        + get_r(arena, root).map_or(0, |r| size_inner(arena, r))
}

/// Number of nodes under `root`.
pub fn size<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |r| size_inner(arena, r))
}

/// Number of nodes on the longest root-to-leaf path; `0` for an empty tree.
pub fn height<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |i| {
        1 + height(arena, get_l(arena, i)).max(height(arena, get_r(arena, i)))
    })
}

/// Finds some node whose key compares equal to `key`.
///
/// With duplicates present, which of the equal nodes is returned depends on
/// the tree shape.
pub fn find<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    key_of: F,
    comparator: C,
) -> Option<u32>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    let mut curr = root;
    while let Some(i) = curr {
        let cmp = comparator(key, key_of(&arena[i as usize]));
        if cmp == 0 {
            return Some(i);
        }
        curr = if cmp < 0 {
            get_l(arena, i)
        } else {
            get_r(arena, i)
        };
    }
    None
}

/// Finds node by key, or the next lower node if the exact key does not exist.
pub fn find_or_next_lower<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    key_of: F,
    comparator: C,
) -> Option<u32>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    let mut curr = root;
    let mut result: Option<u32> = None;
    while let Some(i) = curr {
        let cmp = comparator(key_of(&arena[i as usize]), key);
        if cmp == 0 {
            return Some(i);
        }
        if cmp > 0 {
            curr = get_l(arena, i);
        } else {
            result = Some(i);
            curr = get_r(arena, i);
        }
    }
    result
}

/// Descends from `from`, going right while `go_right(node_key)` holds.
///
/// Returns the last node where the descent went left, i.e. the leftmost node
/// of the subtree for which `go_right` is false, continuing into the rest of
/// the tree through the successor when the final step went right.
fn bound<N, K, F, G>(arena: &[N], from: Option<u32>, key_of: F, go_right: G) -> Option<u32>
where
    N: Node,
    F: Fn(&N) -> &K,
    G: Fn(&K) -> bool,
{
    let mut curr = from;
    let mut last = None;
    let mut went_right = false;
    while let Some(i) = curr {
        last = Some(i);
        went_right = go_right(key_of(&arena[i as usize]));
        curr = if went_right {
            get_r(arena, i)
        } else {
            get_l(arena, i)
        };
    }
    match last {
        Some(q) if went_right => next(arena, q),
        q => q,
    }
}

/// Leftmost node whose key is not less than `key`.
pub fn lower_bound<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    key_of: F,
    comparator: C,
) -> Option<u32>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    bound(arena, root, key_of, |k| comparator(k, key) < 0)
}

/// Leftmost node whose key is strictly greater than `key`.
pub fn upper_bound<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    key_of: F,
    comparator: C,
) -> Option<u32>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    bound(arena, root, key_of, |k| comparator(key, k) >= 0)
}

/// Half-open boundary pair `(lower_bound(lo), lower_bound(hi))`.
///
/// Walks the shared prefix of both descents once, down to the first node
/// that separates `lo` from `hi`, and finishes both bound searches from
/// there.
pub fn search_range<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    lo: &K,
    hi: &K,
    key_of: F,
    comparator: C,
) -> (Option<u32>, Option<u32>)
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    let mut curr = root;
    let mut last = None;
    let mut went_right = false;
    while let Some(i) = curr {
        let k = key_of(&arena[i as usize]);
        if comparator(lo, k) < 0 && comparator(hi, k) < 0 {
            went_right = false;
            curr = get_l(arena, i);
        } else if comparator(k, lo) < 0 && comparator(k, hi) < 0 {
            went_right = true;
            curr = get_r(arena, i);
        } else {
            return (
                bound(arena, Some(i), &key_of, |k| comparator(k, lo) < 0),
                bound(arena, Some(i), &key_of, |k| comparator(k, hi) < 0),
            );
        }
        last = Some(i);
    }
    let split = match last {
        Some(q) if went_right => next(arena, q),
        q => q,
    };
    (split, split)
}

fn link_leaf<N: Node>(arena: &mut [N], root: &mut Option<u32>, node: u32, parent: Option<u32>, left: bool) {
    set_l(arena, node, None);
    set_r(arena, node, None);
    set_p(arena, node, parent);
    match parent {
        Some(p) if left => set_l(arena, p, Some(node)),
        Some(p) => set_r(arena, p, Some(node)),
        None => *root = Some(node),
    }
}

/// Links `node` as a leaf. Equal keys go right, so duplicates keep their
/// insertion order.
pub fn insert<N, K, F, C>(arena: &mut [N], root: &mut Option<u32>, node: u32, key_of: F, comparator: C)
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    let mut parent = None;
    let mut left = false;
    let mut curr = *root;
    while let Some(i) = curr {
        parent = Some(i);
        left = comparator(key_of(&arena[node as usize]), key_of(&arena[i as usize])) < 0;
        curr = if left { get_l(arena, i) } else { get_r(arena, i) };
    }
    link_leaf(arena, root, node, parent, left);
}

/// Links `node` as a leaf unless an equal key is present.
///
/// On rejection neither the tree nor `node` is touched.
pub fn insert_unique<N, K, F, C>(
    arena: &mut [N],
    root: &mut Option<u32>,
    node: u32,
    key_of: F,
    comparator: C,
) -> bool
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    let mut parent = None;
    let mut left = false;
    let mut curr = *root;
    while let Some(i) = curr {
        let cmp = comparator(key_of(&arena[node as usize]), key_of(&arena[i as usize]));
        if cmp == 0 {
            return false;
        }
        parent = Some(i);
        left = cmp < 0;
        curr = if left { get_l(arena, i) } else { get_r(arena, i) };
    }
    link_leaf(arena, root, node, parent, left);
    true
}

/// Checks parent links and in-order key order of the tree under `root`.
pub fn assert_bst<N, K, F, C>(arena: &[N], root: Option<u32>, key_of: F, comparator: C) -> Result<(), TreeError>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    let Some(root) = root else {
        return Ok(());
    };
    if get_p(arena, root).is_some() {
        return Err(TreeError::RootHasParent(root));
    }

    let mut stack = vec![root];
    while let Some(i) = stack.pop() {
        for c in [get_l(arena, i), get_r(arena, i)].into_iter().flatten() {
            if get_p(arena, c) != Some(i) {
                return Err(TreeError::BrokenLink(i));
            }
            stack.push(c);
        }
    }

    let mut curr = first(arena, Some(root));
    let mut prev_node: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev_node {
            if comparator(key_of(&arena[prev as usize]), key_of(&arena[i as usize])) > 0 {
                return Err(TreeError::OrderViolated(i));
            }
        }
        prev_node = Some(i);
        curr = next(arena, i);
    }
    Ok(())
}
