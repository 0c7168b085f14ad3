//! Weak-AVL (rank-balanced) trees.
//!
//! Each node has an implicit rank; a missing child has rank -1. The tag
//! stores the rank differences to the two children, each 1 or 2:
//!
//! | tag        | left diff | right diff |
//! |------------|-----------|------------|
//! | `BALANCED` | 1         | 1          |
//! | `LEFT`     | 1         | 2          |
//! | `RIGHT`    | 2         | 1          |
//! | `WEAK`     | 2         | 2          |
//!
//! Bit `RIGHT` set means the left child sits two ranks down, bit `LEFT`
//! set means the right child does. Leaves always have rank 0.

pub mod util;

use crate::error::TreeError;
use crate::strategy::Strategy;
use crate::types::Node;
use crate::util::Unlinked;

pub use util::assert_wavl_tree;

pub const BALANCED: u8 = 0;
pub const LEFT: u8 = 1;
pub const RIGHT: u8 = 2;
pub const WEAK: u8 = 3;

#[derive(Clone, Copy, Debug, Default)]
pub struct Wavl;

impl Strategy for Wavl {
    const NAME: &'static str = "wavl";

    fn post_insert<N: Node>(arena: &mut [N], root: &mut Option<u32>, node: u32) {
        util::post_insert(arena, root, node);
    }

    fn post_erase<N: Node>(arena: &mut [N], root: &mut Option<u32>, unlinked: Unlinked) {
        util::post_erase(arena, root, unlinked);
    }

    fn check<N: Node>(arena: &[N], root: Option<u32>) -> Result<(), TreeError> {
        util::check_ranks(arena, root)
    }

    fn tag_name(tag: u8) -> &'static str {
        match tag {
            BALANCED => "1,1",
            LEFT => "1,2",
            RIGHT => "2,1",
            WEAK => "2,2",
            _ => "?",
        }
    }
}
