//! Intrusive ordered trees over a caller-owned arena.
//!
//! Nodes embed a [`Hook`] (parent/left/right links plus a 2-bit tag) and
//! live in a `Vec<N>` or slice the caller owns. Every link is an
//! `Option<u32>` index into that arena, so the library never allocates,
//! moves or drops nodes; it only rewires hooks.
//!
//! One generic BST core handles search, bounds, leaf insertion and
//! structural erase. A [`Strategy`] plugs in the rebalancing:
//!
//! | Strategy | Tag meaning | Module |
//! |----------|-------------|--------|
//! | [`RedBlack`] | colour | [`red_black`] |
//! | [`Avl`] | taller side | [`avl`] |
//! | [`Wavl`] | rank differences | [`wavl`] |
//!
//! [`Tree`] is the container facade; [`Cursor`] and [`Iter`] provide
//! bidirectional traversal and half-open ranges.
//!
//! ```
//! use ordered_forest::{AvlTree, TreeNode};
//!
//! fn key<'a>(n: &'a TreeNode<i32, &'static str>) -> &'a i32 {
//!     &n.k
//! }
//!
//! let mut arena: Vec<_> = (1..=7).map(|k| TreeNode::new(k, "")).collect();
//! let mut tree = AvlTree::new(key);
//! for i in 0..7 {
//!     tree.insert(&mut arena, i);
//! }
//! assert_eq!(tree.height(&arena), 3);
//! let keys: Vec<i32> = tree.range(&arena, &3, &6).map(|(_, n)| n.k).collect();
//! assert_eq!(keys, vec![3, 4, 5]);
//! ```

pub mod avl;
pub mod error;
pub mod iter;
pub mod red_black;
pub mod strategy;
pub mod tree;
pub mod types;
pub mod util;
pub mod wavl;

pub use avl::Avl;
pub use error::TreeError;
pub use iter::{Cursor, Iter};
pub use red_black::RedBlack;
pub use strategy::Strategy;
pub use tree::{AvlTree, RbTree, Tree, WavlTree};
pub use types::{default_comparator, Comparator, Hook, Node, TreeNode};
pub use wavl::Wavl;
