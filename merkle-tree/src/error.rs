use std::fmt;

use thiserror::Error;

/// Alias for `core::result::Result<T, MerkleTreeError>`.
pub type Result<T> = core::result::Result<T, MerkleTreeError>;

/// Which argument of a merge call was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    /// The left-hand operand.
    First,
    /// The right-hand operand.
    Second,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::First => write!(f, "first"),
            Operand::Second => write!(f, "second"),
        }
    }
}

/// Errors from Merkle tree operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MerkleTreeError {
    /// A merge was invoked without one of its two operands.
    #[error("the merge function expects two arguments, the {0} was not received")]
    MissingOperand(Operand),
    /// `build` was called with no leaves.
    #[error("cannot build a merkle tree from zero leaves")]
    EmptyInput,
    /// A read operation was called before a successful `build`.
    #[error("merkle tree has not been built")]
    NotBuilt,
    /// `build` was called on a tree that is already built.
    #[error("merkle tree is already built")]
    AlreadyBuilt,
    /// A proof was requested for a leaf that does not exist.
    #[error("leaf index {index} is out of range (leaf count {leaf_count})")]
    IndexOutOfRange {
        /// The requested leaf index.
        index: usize,
        /// Number of leaves in the tree.
        leaf_count: usize,
    },
    /// The merge function failed for a reason of its own.
    #[error("merge failed: {0}")]
    MergeFailed(String),
    /// A proof could not be decoded or is structurally invalid.
    #[error("invalid proof: {0}")]
    InvalidProof(String),
}
