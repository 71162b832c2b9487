//! Inclusion proofs.
//!
//! A [`Proof`] lists, from the leaf level upwards, the sibling of every path
//! node that had one, together with the side the sibling sits on. Levels where
//! the path node was promoted unpaired contribute nothing.

use std::{fmt, ops::Deref};

use bincode::{Decode, Encode};

use crate::{MerkleTreeError, Node, Result};

/// Upper bound on the number of entries a decoded proof may carry. A tree
/// indexed by `usize` is never deeper than this.
pub const MAX_PROOF_ENTRIES: usize = 64;

/// One step of a proof: the sibling node and which side it goes on.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProofEntry<T> {
    /// The sibling needed at this level.
    pub node: Node<T>,
    /// `true` when the sibling is placed to the left of the running value,
    /// i.e. the path node is the right child.
    pub left: bool,
}

impl<T> ProofEntry<T> {
    /// Sibling that goes on the left of the running value.
    pub fn left(node: Node<T>) -> Self {
        ProofEntry { node, left: true }
    }

    /// Sibling that goes on the right of the running value.
    pub fn right(node: Node<T>) -> Self {
        ProofEntry { node, left: false }
    }
}

/// An inclusion proof for a single leaf.
///
/// Holds only sibling nodes, never tree structure, so it can outlive the
/// tree it came from.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Proof<T> {
    pub(crate) leaf_index: u64,
    pub(crate) entries: Vec<ProofEntry<T>>,
}

impl<T> Proof<T> {
    /// Assemble a proof from entries ordered leaf level first.
    pub fn new(leaf_index: u64, entries: Vec<ProofEntry<T>>) -> Self {
        Proof {
            leaf_index,
            entries,
        }
    }

    /// Index of the leaf this proof was generated for.
    pub fn leaf_index(&self) -> u64 {
        self.leaf_index
    }

    /// The entries, leaf level first.
    pub fn entries(&self) -> &[ProofEntry<T>] {
        &self.entries
    }

    /// Consume the proof and return its entries.
    pub fn into_entries(self) -> Vec<ProofEntry<T>> {
        self.entries
    }
}

impl<T: Encode> Proof<T> {
    /// Encode to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>> {
        let config = bincode::config::standard().with_big_endian();
        bincode::encode_to_vec(self, config)
            .map_err(|e| MerkleTreeError::InvalidProof(format!("encode error: {}", e)))
    }
}

impl<T: Decode<()>> Proof<T> {
    /// Decode from bytes using bincode.
    ///
    /// Rejects proofs with more than [`MAX_PROOF_ENTRIES`] entries and
    /// trailing bytes after the proof.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_limit::<{ 16 * 1024 * 1024 }>();
        let (proof, read): (Self, usize) = bincode::decode_from_slice(bytes, config)
            .map_err(|e| MerkleTreeError::InvalidProof(format!("decode error: {}", e)))?;
        if read != bytes.len() {
            return Err(MerkleTreeError::InvalidProof(format!(
                "{} trailing bytes after proof",
                bytes.len() - read
            )));
        }
        if proof.entries.len() > MAX_PROOF_ENTRIES {
            return Err(MerkleTreeError::InvalidProof(format!(
                "proof has {} entries (max {})",
                proof.entries.len(),
                MAX_PROOF_ENTRIES
            )));
        }
        Ok(proof)
    }
}

impl<T> Deref for Proof<T> {
    type Target = [ProofEntry<T>];

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

impl<'a, T> IntoIterator for &'a Proof<T> {
    type Item = &'a ProofEntry<T>;
    type IntoIter = std::slice::Iter<'a, ProofEntry<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<T> IntoIterator for Proof<T> {
    type Item = ProofEntry<T>;
    type IntoIter = std::vec::IntoIter<ProofEntry<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<T: fmt::Display> fmt::Display for Proof<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "proof for leaf {}:", self.leaf_index)?;
        for (level, entry) in self.entries.iter().enumerate() {
            let side = if entry.left { "left " } else { "right" };
            writeln!(f, "  {} {} {}", level, side, entry.node)?;
        }
        Ok(())
    }
}
