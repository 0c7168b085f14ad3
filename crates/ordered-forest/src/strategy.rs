//! Balancing strategy contract.

use crate::error::TreeError;
use crate::types::Node;
use crate::util::{splice, Unlinked};

/// A self-balancing scheme plugged into the shared BST substrate.
///
/// Implementors own the meaning of the 2-bit node tag. The substrate does
/// leaf insertion and structural splicing; the strategy restores its
/// invariants afterwards.
pub trait Strategy {
    const NAME: &'static str;

    /// Restores the invariants after `node` was linked as a leaf.
    fn post_insert<N: Node>(arena: &mut [N], root: &mut Option<u32>, node: u32);

    /// Restores the invariants after [`splice`] vacated a slot.
    fn post_erase<N: Node>(arena: &mut [N], root: &mut Option<u32>, unlinked: Unlinked);

    /// Verifies the strategy's shape invariants. Links are assumed sound.
    fn check<N: Node>(arena: &[N], root: Option<u32>) -> Result<(), TreeError>;

    /// Human-readable name of a tag value.
    fn tag_name(tag: u8) -> &'static str;

    /// Unlinks `node` and rebalances.
    fn erase<N: Node>(arena: &mut [N], root: &mut Option<u32>, node: u32) {
        let unlinked = splice(arena, root, node);
        Self::post_erase(arena, root, unlinked);
    }
}
