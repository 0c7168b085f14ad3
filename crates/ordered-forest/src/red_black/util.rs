use tracing::trace;

use crate::error::TreeError;
use crate::types::Node;
use crate::util::{
    assert_bst, get_l, get_p, get_r, get_tag, rotate_left, rotate_left_child, rotate_right,
    rotate_right_child, set_tag, Unlinked,
};

use super::{BLACK, RED};

#[inline]
fn is_black<N: Node>(arena: &[N], i: Option<u32>) -> bool {
    i.map_or(true, |i| get_tag(arena, i) == BLACK)
}

#[inline]
fn is_red<N: Node>(arena: &[N], i: Option<u32>) -> bool {
    !is_black(arena, i)
}

/// Recolours and rotates upward from a freshly linked leaf.
pub fn post_insert<N: Node>(arena: &mut [N], root: &mut Option<u32>, node: u32) {
    set_tag(arena, node, RED);
    let mut n = node;
    while let Some(mut p) = get_p(arena, n) {
        if get_tag(arena, p) != RED {
            break;
        }
        let g = get_p(arena, p).expect("red parent is never the root");
        if get_l(arena, g) == Some(p) {
            let uncle = get_r(arena, g);
            if let Some(u) = uncle.filter(|&u| get_tag(arena, u) == RED) {
                set_tag(arena, u, BLACK);
                set_tag(arena, p, BLACK);
                set_tag(arena, g, RED);
                trace!(grandparent = g, "red-black insert: recoloured");
                n = g;
                continue;
            }
            if get_r(arena, p) == Some(n) {
                trace!(node = n, parent = p, "red-black insert: left-right case");
                rotate_left_child(arena, p);
                p = n;
            }
            set_tag(arena, p, BLACK);
            set_tag(arena, g, RED);
            rotate_right(arena, root, g);
        } else {
            let uncle = get_l(arena, g);
            if let Some(u) = uncle.filter(|&u| get_tag(arena, u) == RED) {
                set_tag(arena, u, BLACK);
                set_tag(arena, p, BLACK);
                set_tag(arena, g, RED);
                trace!(grandparent = g, "red-black insert: recoloured");
                n = g;
                continue;
            }
            if get_l(arena, p) == Some(n) {
                trace!(node = n, parent = p, "red-black insert: right-left case");
                rotate_right_child(arena, p);
                p = n;
            }
            set_tag(arena, p, BLACK);
            set_tag(arena, g, RED);
            rotate_left(arena, root, g);
        }
        trace!(grandparent = g, "red-black insert: rotated");
        break;
    }
    if let Some(r) = *root {
        set_tag(arena, r, BLACK);
    }
}

/// Resolves the missing black after a black slot was unlinked.
pub fn post_erase<N: Node>(arena: &mut [N], root: &mut Option<u32>, unlinked: Unlinked) {
    if unlinked.tag != BLACK {
        return;
    }
    let mut node = unlinked.child;
    let mut parent = unlinked.parent;
    let mut left = unlinked.left;

    while is_black(arena, node) && node != *root {
        let p = parent.expect("non-root slot has a parent");
        if left {
            let mut other = get_r(arena, p).expect("black deficit implies a sibling");
            if get_tag(arena, other) == RED {
                set_tag(arena, other, BLACK);
                set_tag(arena, p, RED);
                rotate_left(arena, root, p);
                other = get_r(arena, p).expect("black deficit implies a sibling");
            }
            if is_black(arena, get_l(arena, other)) && is_black(arena, get_r(arena, other)) {
                set_tag(arena, other, RED);
            } else {
                if is_black(arena, get_r(arena, other)) {
                    if let Some(ol) = get_l(arena, other) {
                        set_tag(arena, ol, BLACK);
                    }
                    set_tag(arena, other, RED);
                    rotate_right_child(arena, other);
                    other = get_r(arena, p).expect("rotation keeps a sibling");
                }
                let ptag = get_tag(arena, p);
                set_tag(arena, other, ptag);
                set_tag(arena, p, BLACK);
                if let Some(or) = get_r(arena, other) {
                    set_tag(arena, or, BLACK);
                }
                rotate_left(arena, root, p);
                trace!(parent = p, "red-black erase: deficit absorbed");
                node = *root;
                break;
            }
        } else {
            let mut other = get_l(arena, p).expect("black deficit implies a sibling");
            if get_tag(arena, other) == RED {
                set_tag(arena, other, BLACK);
                set_tag(arena, p, RED);
                rotate_right(arena, root, p);
                other = get_l(arena, p).expect("black deficit implies a sibling");
            }
            if is_black(arena, get_l(arena, other)) && is_black(arena, get_r(arena, other)) {
                set_tag(arena, other, RED);
            } else {
                if is_black(arena, get_l(arena, other)) {
                    if let Some(or) = get_r(arena, other) {
                        set_tag(arena, or, BLACK);
                    }
                    set_tag(arena, other, RED);
                    rotate_left_child(arena, other);
                    other = get_l(arena, p).expect("rotation keeps a sibling");
                }
                let ptag = get_tag(arena, p);
                set_tag(arena, other, ptag);
                set_tag(arena, p, BLACK);
                if let Some(ol) = get_l(arena, other) {
                    set_tag(arena, ol, BLACK);
                }
                rotate_right(arena, root, p);
                trace!(parent = p, "red-black erase: deficit absorbed");
                node = *root;
                break;
            }
        }
        node = Some(p);
        parent = get_p(arena, p);
        left = parent.is_some_and(|pp| get_l(arena, pp) == Some(p));
    }

    if let Some(n) = node {
        set_tag(arena, n, BLACK);
    }
}

/// Colour invariants: black root, no red-red edge, uniform black height.
pub fn check_colors<N: Node>(arena: &[N], root: Option<u32>) -> Result<(), TreeError> {
    let Some(root) = root else {
        return Ok(());
    };
    if get_tag(arena, root) != BLACK {
        return Err(TreeError::RedRoot(root));
    }

    fn black_height<N: Node>(arena: &[N], node: Option<u32>) -> Result<usize, TreeError> {
        let Some(node) = node else {
            return Ok(0);
        };
        let tag = get_tag(arena, node);
        if tag != RED && tag != BLACK {
            return Err(TreeError::InvalidTag { node, tag });
        }
        let l = get_l(arena, node);
        let r = get_r(arena, node);
        if tag == RED && (is_red(arena, l) || is_red(arena, r)) {
            return Err(TreeError::RedRedViolation(node));
        }
        let lh = black_height(arena, l)?;
        let rh = black_height(arena, r)?;
        if lh != rh {
            return Err(TreeError::BlackHeightMismatch(node));
        }
        Ok(lh + usize::from(tag == BLACK))
    }

    black_height(arena, Some(root)).map(|_| ())
}

/// Full red-black validation: links, key order and colours.
pub fn assert_red_black_tree<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    key_of: F,
    comparator: C,
) -> Result<(), TreeError>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    assert_bst(arena, root, key_of, comparator)?;
    check_colors(arena, root)
}
