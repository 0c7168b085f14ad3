use tracing::trace;

use crate::error::TreeError;
use crate::types::Node;
use crate::util::{
    assert_bst, get_l, get_p, get_r, get_tag, rotate_left, rotate_left_child, rotate_right,
    rotate_right_child, set_tag, Unlinked,
};

use super::{BALANCED, LEFT, RIGHT, WEAK};

/// Promotes up the access path after a leaf was linked. Stops at a node
/// that absorbs the promotion or at a rotation.
pub fn post_insert<N: Node>(arena: &mut [N], root: &mut Option<u32>, node: u32) {
    set_tag(arena, node, BALANCED);
    let mut n = node;
    while let Some(p) = get_p(arena, n) {
        let ptag = get_tag(arena, p);
        if get_l(arena, p) == Some(n) {
            if ptag == LEFT {
                let ntag = get_tag(arena, n);
                if ntag == RIGHT {
                    let t = get_r(arena, n).expect("node with a 1-right child has one");
                    let ttag = get_tag(arena, t);
                    rotate_left_child(arena, n);
                    set_tag(arena, p, if (ttag & LEFT) != 0 { RIGHT } else { BALANCED });
                    set_tag(arena, n, if (ttag & RIGHT) != 0 { LEFT } else { BALANCED });
                    set_tag(arena, t, BALANCED);
                } else {
                    set_tag(arena, p, if (ntag & LEFT) != 0 { BALANCED } else { LEFT });
                    set_tag(arena, n, if ntag == LEFT { BALANCED } else { RIGHT });
                }
                rotate_right(arena, root, p);
                trace!(node = p, "wavl insert: rotated right");
                return;
            }
            if ptag == RIGHT {
                set_tag(arena, p, BALANCED);
                return;
            }
            set_tag(arena, p, LEFT);
        } else {
            if ptag == RIGHT {
                let ntag = get_tag(arena, n);
                if ntag == LEFT {
                    let t = get_l(arena, n).expect("node with a 1-left child has one");
                    let ttag = get_tag(arena, t);
                    rotate_right_child(arena, n);
                    set_tag(arena, p, if (ttag & RIGHT) != 0 { LEFT } else { BALANCED });
                    set_tag(arena, n, if (ttag & LEFT) != 0 { RIGHT } else { BALANCED });
                    set_tag(arena, t, BALANCED);
                } else {
                    set_tag(arena, p, if (ntag & RIGHT) != 0 { BALANCED } else { RIGHT });
                    set_tag(arena, n, if ntag == RIGHT { BALANCED } else { LEFT });
                }
                rotate_left(arena, root, p);
                trace!(node = p, "wavl insert: rotated left");
                return;
            }
            if ptag == LEFT {
                set_tag(arena, p, BALANCED);
                return;
            }
            set_tag(arena, p, RIGHT);
        }
        if ptag == WEAK {
            return;
        }
        n = p;
    }
}

/// Demotes up the path from the vacated slot, finishing with at most one
/// single or double rotation.
pub fn post_erase<N: Node>(arena: &mut [N], root: &mut Option<u32>, unlinked: Unlinked) {
    let Some(mut p) = unlinked.parent else {
        return;
    };
    let mut left = unlinked.left;
    loop {
        let ptag = get_tag(arena, p);
        if left {
            if ptag == RIGHT {
                let s = get_r(arena, p).expect("node with a 1-right child has one");
                let stag = get_tag(arena, s);
                if stag == WEAK {
                    set_tag(arena, s, BALANCED);
                } else {
                    if stag == LEFT {
                        let t = get_l(arena, s).expect("node with a 1-left child has one");
                        let ttag = get_tag(arena, t);
                        rotate_right_child(arena, s);
                        set_tag(arena, p, if (ttag & RIGHT) != 0 { LEFT } else { BALANCED });
                        set_tag(arena, s, if (ttag & LEFT) != 0 { RIGHT } else { BALANCED });
                        set_tag(arena, t, WEAK);
                    } else {
                        set_tag(arena, p, if stag == RIGHT { BALANCED } else { RIGHT });
                        set_tag(arena, s, if stag == RIGHT { WEAK } else { LEFT });
                    }
                    rotate_left(arena, root, p);
                    trace!(node = p, "wavl erase: rotated left");
                    return;
                }
            } else if ptag == LEFT {
                set_tag(arena, p, BALANCED);
            } else {
                set_tag(arena, p, RIGHT);
                if ptag == BALANCED {
                    return;
                }
            }
        } else if ptag == LEFT {
            let s = get_l(arena, p).expect("node with a 1-left child has one");
            let stag = get_tag(arena, s);
            if stag == WEAK {
                set_tag(arena, s, BALANCED);
            } else {
                if stag == RIGHT {
                    let t = get_r(arena, s).expect("node with a 1-right child has one");
                    let ttag = get_tag(arena, t);
                    rotate_left_child(arena, s);
                    set_tag(arena, p, if (ttag & LEFT) != 0 { RIGHT } else { BALANCED });
                    set_tag(arena, s, if (ttag & RIGHT) != 0 { LEFT } else { BALANCED });
                    set_tag(arena, t, WEAK);
                } else {
                    set_tag(arena, p, if stag == LEFT { BALANCED } else { LEFT });
                    set_tag(arena, s, if stag == LEFT { WEAK } else { RIGHT });
                }
                rotate_right(arena, root, p);
                trace!(node = p, "wavl erase: rotated right");
                return;
            }
        } else if ptag == RIGHT {
            set_tag(arena, p, BALANCED);
        } else {
            set_tag(arena, p, LEFT);
            if ptag == BALANCED {
                return;
            }
        }

        let Some(pp) = get_p(arena, p) else {
            return;
        };
        left = get_l(arena, pp) == Some(p);
        p = pp;
    }
}

/// Rank rule: ranks implied by the tags agree through both children, every
/// rank difference is 1 or 2, and leaves have rank 0.
pub fn check_ranks<N: Node>(arena: &[N], root: Option<u32>) -> Result<(), TreeError> {
    fn rank<N: Node>(arena: &[N], node: Option<u32>) -> Result<i32, TreeError> {
        let Some(node) = node else {
            return Ok(-1);
        };
        let tag = get_tag(arena, node);
        if tag > WEAK {
            return Err(TreeError::InvalidTag { node, tag });
        }
        let l = get_l(arena, node);
        let r = get_r(arena, node);
        if l.is_none() && r.is_none() && tag != BALANCED {
            return Err(TreeError::LeafRank(node));
        }
        let dl = if (tag & RIGHT) != 0 { 2 } else { 1 };
        let dr = if (tag & LEFT) != 0 { 2 } else { 1 };
        let via_l = rank(arena, l)? + dl;
        let via_r = rank(arena, r)? + dr;
        if via_l != via_r {
            return Err(TreeError::RankMismatch(node));
        }
        Ok(via_l)
    }

    rank(arena, root).map(|_| ())
}

/// Full weak-AVL validation: links, key order and rank rule.
pub fn assert_wavl_tree<N, K, F, C>(
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
    check_ranks(arena, root)
}
