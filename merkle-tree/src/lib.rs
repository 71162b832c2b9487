//! Build-once binary Merkle tree over a pluggable asynchronous merge function.
//!
//! Leaves are wrapped in [`Node`]s (level 0) and paired left to right through
//! a [`MergeFunction`] until a single root remains. When a level has an odd
//! number of nodes, the unpaired final node is promoted to the next level
//! unchanged, without a merge call.
//!
//! ```text
//!                    root
//!               /           \
//!          m(ab,cd)          e        <- e promoted
//!          /     \           |
//!      m(a,b)   m(c,d)       e        <- e promoted
//!      /   \    /   \        |
//!     a     b  c     d       e
//! ```
//!
//! A [`Proof`] for a leaf lists the siblings met on the way to the root,
//! each tagged with the side it sits on. Levels where the path node was
//! promoted contribute no entry. [`compute_root`] replays a proof against a
//! leaf value without access to the tree.
//!
//! # Core types
//!
//! - [`MerkleTree`]: build, root, proof extraction.
//! - [`MergeFunction`]: the injected combiner; [`Sha256Merge`],
//!   [`Blake3Merge`], [`LabelMerge`] and [`MergeFn`] are provided.
//! - [`Proof`] / [`ProofEntry`]: inclusion proof, bincode-encodable.
//! - [`compute_root`] / [`verify`]: verifier-side replay.

#![warn(missing_docs)]

mod config;
mod error;
mod hashers;
mod merge;
mod node;
mod proof;
mod tree;
mod verify;


pub use config::MerkleTreeConfig;
pub use error::{MerkleTreeError, Operand, Result};
pub use hashers::{Blake3Merge, LabelMerge, Sha256Merge};
pub use merge::{MergeFn, MergeFunction};
pub use merkle_costs::{CostContext, CostResult, CostsExt, OperationCost};
pub use node::Node;
pub use proof::{Proof, ProofEntry, MAX_PROOF_ENTRIES};
pub use tree::MerkleTree;
pub use verify::{compute_root, verify};
