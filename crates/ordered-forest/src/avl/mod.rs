//! AVL balancing.
//!
//! The tag records which subtree is taller. Heights are never stored.

pub mod util;

use crate::error::TreeError;
use crate::strategy::Strategy;
use crate::types::Node;
use crate::util::Unlinked;

pub use util::assert_avl_tree;

pub const BALANCED: u8 = 0;
/// Right subtree is one level taller.
pub const RIGHT: u8 = 2;
/// Left subtree is one level taller.
pub const LEFT: u8 = 3;

#[derive(Clone, Copy, Debug, Default)]
pub struct Avl;

impl Strategy for Avl {
    const NAME: &'static str = "avl";

    fn post_insert<N: Node>(arena: &mut [N], root: &mut Option<u32>, node: u32) {
        util::post_insert(arena, root, node);
    }

    fn post_erase<N: Node>(arena: &mut [N], root: &mut Option<u32>, unlinked: Unlinked) {
        util::post_erase(arena, root, unlinked);
    }

    fn check<N: Node>(arena: &[N], root: Option<u32>) -> Result<(), TreeError> {
        util::check_balance(arena, root)
    }

    fn tag_name(tag: u8) -> &'static str {
        match tag {
            BALANCED => "=",
            LEFT => "<",
            RIGHT => ">",
            _ => "?",
        }
    }
}
