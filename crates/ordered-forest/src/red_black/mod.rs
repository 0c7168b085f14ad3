//! Red-black balancing.
//!
//! The tag holds the node colour.

pub mod util;

use crate::error::TreeError;
use crate::strategy::Strategy;
use crate::types::Node;
use crate::util::Unlinked;

pub use util::assert_red_black_tree;

pub const RED: u8 = 0;
pub const BLACK: u8 = 3;

#[derive(Clone, Copy, Debug, Default)]
pub struct RedBlack;

impl Strategy for RedBlack {
    const NAME: &'static str = "red-black";

    fn post_insert<N: Node>(arena: &mut [N], root: &mut Option<u32>, node: u32) {
        util::post_insert(arena, root, node);
    }

    fn post_erase<N: Node>(arena: &mut [N], root: &mut Option<u32>, unlinked: Unlinked) {
        util::post_erase(arena, root, unlinked);
    }

    fn check<N: Node>(arena: &[N], root: Option<u32>) -> Result<(), TreeError> {
        util::check_colors(arena, root)
    }

    fn tag_name(tag: u8) -> &'static str {
        match tag {
            RED => "red",
            BLACK => "black",
            _ => "?",
        }
    }
}
