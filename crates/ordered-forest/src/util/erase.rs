//! Structural erase shared by every strategy.

use tracing::trace;

use crate::types::{Hook, Node};

use super::rotate::replace_node;
use super::{get_l, get_p, get_r, get_tag, set_l, set_p, set_r, set_tag};

/// What [`splice`] physically unlinked. Input to a strategy's post-erase
/// fixup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unlinked {
    /// Child that took over the vacated slot.
    pub child: Option<u32>,
    /// Former parent of the vacated slot; `None` when the slot was the root.
    pub parent: Option<u32>,
    /// Tag the vacated slot carried.
    pub tag: u8,
    /// Whether the vacated slot was a left child.
    pub left: bool,
}

/// Unlinks `node` from the tree.
///
/// A two-child node is replaced by its in-order successor, which inherits
/// its children, parent and tag; the successor's own slot (at most one child)
/// is the one actually vacated. `node`'s hook is reset afterwards.
pub fn splice<N: Node>(arena: &mut [N], root: &mut Option<u32>, node: u32) -> Unlinked {
    let unlinked = match (get_l(arena, node), get_r(arena, node)) {
        (Some(l), Some(r)) => {
            let mut succ = r;
            while let Some(sl) = get_l(arena, succ) {
                succ = sl;
            }
            trace!(node, successor = succ, "splicing successor into two-child slot");

            let child = get_r(arena, succ);
            let tag = get_tag(arena, succ);
            let mut parent = get_p(arena, succ).expect("successor has a parent");
            if let Some(c) = child {
                set_p(arena, c, Some(parent));
            }
            let left = if parent == node {
                set_r(arena, node, child);
                parent = succ;
                false
            } else {
                set_l(arena, parent, child);
                true
            };

            let np = get_p(arena, node);
            let nr = get_r(arena, node);
            set_l(arena, succ, Some(l));
            set_r(arena, succ, nr);
            set_p(arena, succ, np);
            let ntag = get_tag(arena, node);
            set_tag(arena, succ, ntag);
            replace_node(arena, root, np, node, Some(succ));
            set_p(arena, l, Some(succ));
            if let Some(nr) = nr {
                set_p(arena, nr, Some(succ));
            }

            Unlinked {
                child,
                parent: Some(parent),
                tag,
                left,
            }
        }
        (l, r) => {
            let child = l.or(r);
            let parent = get_p(arena, node);
            let left = parent.is_some_and(|p| get_l(arena, p) == Some(node));
            replace_node(arena, root, parent, node, child);
            if let Some(c) = child {
                set_p(arena, c, parent);
            }
            Unlinked {
                child,
                parent,
                tag: get_tag(arena, node),
                left,
            }
        }
    };
    *arena[node as usize].hook_mut() = Hook::new();
    unlinked
}
