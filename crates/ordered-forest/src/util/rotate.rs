//! Single rotations.
//!
//! The plain variants may move the subtree root and therefore take the
//! tree's root slot. The `_child` variants are for nodes known to have a
//! parent, as happens inside double rotations and erase fixups.

use crate::types::Node;

use super::{get_l, get_p, get_r, set_l, set_p, set_r};

#[cfg(test)]
thread_local! {
    /// Single rotations performed on this thread.
    pub(crate) static ROTATIONS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

#[inline]
fn count_rotation() {
    #[cfg(test)]
    ROTATIONS.with(|c| c.set(c.get() + 1));
}

/// Points whichever parent link referenced `old` at `new`.
#[inline]
pub(crate) fn replace_child<N: Node>(arena: &mut [N], parent: u32, old: u32, new: Option<u32>) {
    if get_l(arena, parent) == Some(old) {
        set_l(arena, parent, new);
    } else {
        set_r(arena, parent, new);
    }
}

/// Like [`replace_child`], rewriting the root slot when there is no parent.
#[inline]
pub(crate) fn replace_node<N: Node>(
    arena: &mut [N],
    root: &mut Option<u32>,
    parent: Option<u32>,
    old: u32,
    new: Option<u32>,
) {
    match parent {
        Some(p) => replace_child(arena, p, old, new),
        None => *root = new,
    }
}

/// Moves `n`'s right child into `n`'s position and returns `(parent, right)`.
#[inline]
fn lift_right<N: Node>(arena: &mut [N], n: u32) -> (Option<u32>, u32) {
    count_rotation();
    let r = get_r(arena, n).expect("left rotation needs a right child");
    let p = get_p(arena, n);
    let rl = get_l(arena, r);
    set_r(arena, n, rl);
    if let Some(rl) = rl {
        set_p(arena, rl, Some(n));
    }
    set_l(arena, r, Some(n));
    set_p(arena, r, p);
    set_p(arena, n, Some(r));
    (p, r)
}

/// Moves `n`'s left child into `n`'s position and returns `(parent, left)`.
#[inline]
fn lift_left<N: Node>(arena: &mut [N], n: u32) -> (Option<u32>, u32) {
    count_rotation();
    let l = get_l(arena, n).expect("right rotation needs a left child");
    let p = get_p(arena, n);
    let lr = get_r(arena, l);
    set_l(arena, n, lr);
    if let Some(lr) = lr {
        set_p(arena, lr, Some(n));
    }
    set_r(arena, l, Some(n));
    set_p(arena, l, p);
    set_p(arena, n, Some(l));
    (p, l)
}

/// Left rotation at `n`: its right child takes its place.
pub fn rotate_left<N: Node>(arena: &mut [N], root: &mut Option<u32>, n: u32) {
    let (p, r) = lift_right(arena, n);
    replace_node(arena, root, p, n, Some(r));
}

/// Right rotation at `n`: its left child takes its place.
pub fn rotate_right<N: Node>(arena: &mut [N], root: &mut Option<u32>, n: u32) {
    let (p, l) = lift_left(arena, n);
    replace_node(arena, root, p, n, Some(l));
}

/// Left rotation at a node that is not the root.
pub fn rotate_left_child<N: Node>(arena: &mut [N], n: u32) {
    let (p, r) = lift_right(arena, n);
    let p = p.expect("child rotation at the tree root");
    replace_child(arena, p, n, Some(r));
}

/// Right rotation at a node that is not the root.
pub fn rotate_right_child<N: Node>(arena: &mut [N], n: u32) {
    let (p, l) = lift_left(arena, n);
    let p = p.expect("child rotation at the tree root");
    replace_child(arena, p, n, Some(l));
}
