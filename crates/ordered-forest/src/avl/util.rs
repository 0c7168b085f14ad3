use tracing::trace;

use crate::error::TreeError;
use crate::types::Node;
use crate::util::{
    assert_bst, get_l, get_p, get_r, get_tag, rotate_left, rotate_left_child, rotate_right,
    rotate_right_child, set_tag, Unlinked,
};

use super::{BALANCED, LEFT, RIGHT};

/// Walks up from a new leaf, updating lean tags until a subtree stops
/// growing or a single/double rotation absorbs the growth.
pub fn post_insert<N: Node>(arena: &mut [N], root: &mut Option<u32>, node: u32) {
    set_tag(arena, node, BALANCED);
    let mut n = node;
    while let Some(p) = get_p(arena, n) {
        let ptag = get_tag(arena, p);
        if get_l(arena, p) == Some(n) {
            if ptag == LEFT {
                let ntag = get_tag(arena, n);
                if ntag == RIGHT {
                    let t = get_r(arena, n).expect("right-leaning node has a right child");
                    let ttag = get_tag(arena, t);
                    rotate_left_child(arena, n);
                    set_tag(arena, p, if ttag == LEFT { RIGHT } else { BALANCED });
                    set_tag(arena, n, if ttag == RIGHT { LEFT } else { BALANCED });
                    set_tag(arena, t, BALANCED);
                } else {
                    set_tag(arena, p, if ntag == LEFT { BALANCED } else { LEFT });
                    set_tag(arena, n, if ntag == LEFT { BALANCED } else { RIGHT });
                }
                rotate_right(arena, root, p);
                trace!(node = p, "avl insert: rotated right");
                return;
            }
            if ptag != BALANCED {
                set_tag(arena, p, BALANCED);
                return;
            }
            set_tag(arena, p, LEFT);
        } else {
            if ptag == RIGHT {
                let ntag = get_tag(arena, n);
                if ntag == LEFT {
                    let t = get_l(arena, n).expect("left-leaning node has a left child");
                    let ttag = get_tag(arena, t);
                    rotate_right_child(arena, n);
                    set_tag(arena, p, if ttag == RIGHT { LEFT } else { BALANCED });
                    set_tag(arena, n, if ttag == LEFT { RIGHT } else { BALANCED });
                    set_tag(arena, t, BALANCED);
                } else {
                    set_tag(arena, p, if ntag == RIGHT { BALANCED } else { RIGHT });
                    set_tag(arena, n, if ntag == RIGHT { BALANCED } else { LEFT });
                }
                rotate_left(arena, root, p);
                trace!(node = p, "avl insert: rotated left");
                return;
            }
            if ptag != BALANCED {
                set_tag(arena, p, BALANCED);
                return;
            }
            set_tag(arena, p, RIGHT);
        }
        n = p;
    }
}

/// Walks up from the vacated slot while subtree heights keep shrinking.
///
/// A rotation whose sibling was balanced leaves the subtree height intact
/// and ends the walk.
pub fn post_erase<N: Node>(arena: &mut [N], root: &mut Option<u32>, unlinked: Unlinked) {
    let Some(mut p) = unlinked.parent else {
        return;
    };
    let mut left = unlinked.left;
    loop {
        let ptag = get_tag(arena, p);
        let top = if left {
            if ptag == RIGHT {
                let s = get_r(arena, p).expect("right-leaning node has a right child");
                let stag = get_tag(arena, s);
                let top = if stag == LEFT {
                    let t = get_l(arena, s).expect("left-leaning node has a left child");
                    let ttag = get_tag(arena, t);
                    rotate_right_child(arena, s);
                    set_tag(arena, p, if ttag == RIGHT { LEFT } else { BALANCED });
                    set_tag(arena, s, if ttag == LEFT { RIGHT } else { BALANCED });
                    set_tag(arena, t, BALANCED);
                    t
                } else {
                    set_tag(arena, p, if stag == BALANCED { RIGHT } else { BALANCED });
                    set_tag(arena, s, if stag == BALANCED { LEFT } else { BALANCED });
                    s
                };
                rotate_left(arena, root, p);
                trace!(node = p, "avl erase: rotated left");
                if stag == BALANCED {
                    return;
                }
                top
            } else if ptag == BALANCED {
                set_tag(arena, p, RIGHT);
                return;
            } else {
                set_tag(arena, p, BALANCED);
                p
            }
        } else if ptag == LEFT {
            let s = get_l(arena, p).expect("left-leaning node has a left child");
            let stag = get_tag(arena, s);
            let top = if stag == RIGHT {
                let t = get_r(arena, s).expect("right-leaning node has a right child");
                let ttag = get_tag(arena, t);
                rotate_left_child(arena, s);
                set_tag(arena, p, if ttag == LEFT { RIGHT } else { BALANCED });
                set_tag(arena, s, if ttag == RIGHT { LEFT } else { BALANCED });
                set_tag(arena, t, BALANCED);
                t
            } else {
                set_tag(arena, p, if stag == BALANCED { LEFT } else { BALANCED });
                set_tag(arena, s, if stag == BALANCED { RIGHT } else { BALANCED });
                s
            };
            rotate_right(arena, root, p);
            trace!(node = p, "avl erase: rotated right");
            if stag == BALANCED {
                return;
            }
            top
        } else if ptag == BALANCED {
            set_tag(arena, p, LEFT);
            return;
        } else {
            set_tag(arena, p, BALANCED);
            p
        };

        let Some(pp) = get_p(arena, top) else {
            return;
        };
        left = get_l(arena, pp) == Some(top);
        p = pp;
    }
}

/// Height balance: every node's subtree heights differ by at most one and
/// its tag names the taller side.
pub fn check_balance<N: Node>(arena: &[N], root: Option<u32>) -> Result<(), TreeError> {
    fn height<N: Node>(arena: &[N], node: Option<u32>) -> Result<i32, TreeError> {
        let Some(node) = node else {
            return Ok(0);
        };
        let tag = get_tag(arena, node);
        if tag != BALANCED && tag != LEFT && tag != RIGHT {
            return Err(TreeError::InvalidTag { node, tag });
        }
        let lh = height(arena, get_l(arena, node))?;
        let rh = height(arena, get_r(arena, node))?;
        let diff = lh - rh;
        let expected = match diff {
            0 => BALANCED,
            1 => LEFT,
            -1 => RIGHT,
            _ => return Err(TreeError::Unbalanced { node, diff }),
        };
        if tag != expected {
            return Err(TreeError::TagMismatch {
                node,
                expected,
                actual: tag,
            });
        }
        Ok(1 + lh.max(rh))
    }

    height(arena, root).map(|_| ())
}

/// Full AVL validation: links, key order and balance.
pub fn assert_avl_tree<N, K, F, C>(
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
    check_balance(arena, root)
}
