//! Ready-made merge functions.
//!
//! The digest merges hash the plain concatenation `left || right` with no
//! domain separation, so a tree built with them matches any other tree that
//! hashes concatenated sibling digests.

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::{MergeFunction, Node, Result};

/// `sha256(left || right)` over byte vectors.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256Merge;

impl Sha256Merge {
    /// SHA-256 of raw bytes, for turning leaf values into leaf digests.
    pub fn digest(bytes: impl AsRef<[u8]>) -> Vec<u8> {
        Sha256::digest(bytes.as_ref()).to_vec()
    }
}

#[async_trait]
impl MergeFunction<Vec<u8>> for Sha256Merge {
    async fn combine(&self, left: &Node<Vec<u8>>, right: &Node<Vec<u8>>) -> Result<Node<Vec<u8>>> {
        let mut hasher = Sha256::new();
        hasher.update(left.data());
        hasher.update(right.data());
        Ok(Node::new(hasher.finalize().to_vec()))
    }
}

/// `blake3(left || right)` over byte vectors.
#[derive(Debug, Default, Clone, Copy)]
pub struct Blake3Merge;

impl Blake3Merge {
    /// Blake3 of raw bytes, for turning leaf values into leaf digests.
    pub fn digest(bytes: impl AsRef<[u8]>) -> Vec<u8> {
        blake3::hash(bytes.as_ref()).as_bytes().to_vec()
    }
}

#[async_trait]
impl MergeFunction<Vec<u8>> for Blake3Merge {
    async fn combine(&self, left: &Node<Vec<u8>>, right: &Node<Vec<u8>>) -> Result<Node<Vec<u8>>> {
        let mut hasher = blake3::Hasher::new();
        hasher.update(left.data());
        hasher.update(right.data());
        Ok(Node::new(hasher.finalize().as_bytes().to_vec()))
    }
}

/// Non-cryptographic merge that renders the merge structure as text,
/// `Hash(<left> + <right>)`. Useful for printing what a proof contains.
#[derive(Debug, Default, Clone, Copy)]
pub struct LabelMerge;

#[async_trait]
impl MergeFunction<String> for LabelMerge {
    async fn combine(&self, left: &Node<String>, right: &Node<String>) -> Result<Node<String>> {
        Ok(Node::new(format!("Hash({} + {})", left, right)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sha256_merge_is_concatenation() {
        let left = Node::new(Sha256Merge::digest(b"A"));
        let right = Node::new(Sha256Merge::digest(b"B"));
        let merged = Sha256Merge.combine(&left, &right).await.expect("merge");

        let mut concatenated = left.data().clone();
        concatenated.extend_from_slice(right.data());
        assert_eq!(merged.data(), &Sha256Merge::digest(&concatenated));
        assert_eq!(merged.data().len(), 32);
    }

    #[tokio::test]
    async fn test_blake3_merge_order_matters() {
        let left = Node::new(Blake3Merge::digest(b"left"));
        let right = Node::new(Blake3Merge::digest(b"right"));
        let forward = Blake3Merge.combine(&left, &right).await.expect("merge");
        let backward = Blake3Merge.combine(&right, &left).await.expect("merge");
        assert_ne!(forward, backward);
    }

    #[tokio::test]
    async fn test_label_merge() {
        let merged = LabelMerge
            .merge(Some(&Node::new("A".into())), Some(&Node::new("B".into())))
            .await
            .expect("merge");
        assert_eq!(merged.data(), "Hash(A + B)");
    }
}
