use thiserror::Error;

/// Errors reported by the checked tree operations and the invariant checkers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("node {index} is out of bounds for an arena of {len} nodes")]
    OutOfBounds { index: u32, len: usize },
    #[error("node {0} is already linked into a tree")]
    AlreadyLinked(u32),
    #[error("node {0} is not linked into this tree")]
    NotLinked(u32),
    #[error("root node {0} has a parent")]
    RootHasParent(u32),
    #[error("broken parent link below node {0}")]
    BrokenLink(u32),
    #[error("node order violated at node {0}")]
    OrderViolated(u32),
    #[error("node {node} carries tag {tag}, which the strategy does not use")]
    InvalidTag { node: u32, tag: u8 },
    #[error("root node {0} is not black")]
    RedRoot(u32),
    #[error("red node {0} has a red child")]
    RedRedViolation(u32),
    #[error("black height mismatch below node {0}")]
    BlackHeightMismatch(u32),
    #[error("node {node} is out of balance: height(left) - height(right) = {diff}")]
    Unbalanced { node: u32, diff: i32 },
    #[error("node {node} is tagged {actual} but its shape calls for {expected}")]
    TagMismatch { node: u32, expected: u8, actual: u8 },
    #[error("rank differences at node {0} disagree between its two children")]
    RankMismatch(u32),
    #[error("leaf node {0} does not have rank 0")]
    LeafRank(u32),
}
