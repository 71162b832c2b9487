use futures::{stream, StreamExt, TryStreamExt};
use merkle_costs::{
    cost_return_on_error, cost_return_on_error_no_add, CostResult, CostsExt, OperationCost,
};
use tracing::{debug, trace, warn};

use crate::{
    verify::verify, MergeFunction, MerkleTreeConfig, MerkleTreeError, Node, Proof, ProofEntry,
    Result,
};

/// A build-once binary Merkle tree.
///
/// Level 0 holds the leaves in input order; level `k + 1` pairs the nodes of
/// level `k` left to right through the merge function. An unpaired final node
/// is promoted to the next level unchanged. The last level holds only the
/// root.
///
/// The tree starts unbuilt. A successful [`build`](Self::build) makes it
/// built for good; a failed or cancelled one leaves it unbuilt.
#[derive(Debug)]
pub struct MerkleTree<T, M> {
    merge: M,
    config: MerkleTreeConfig,
    levels: Vec<Vec<Node<T>>>,
}

impl<T, M> MerkleTree<T, M> {
    /// Create an unbuilt tree that will combine nodes with `merge`.
    pub fn new(merge: M) -> Self {
        Self::with_config(merge, MerkleTreeConfig::default())
    }

    /// Create an unbuilt tree with explicit build options.
    pub fn with_config(merge: M, config: MerkleTreeConfig) -> Self {
        MerkleTree {
            merge,
            config,
            levels: Vec::new(),
        }
    }

    /// Whether [`build`](Self::build) has completed successfully.
    pub fn is_built(&self) -> bool {
        !self.levels.is_empty()
    }

    /// Number of leaves, `0` while unbuilt.
    pub fn leaf_count(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    /// Number of levels including leaves and root, `0` while unbuilt.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// All levels, leaves first.
    pub fn levels(&self) -> &[Vec<Node<T>>] {
        &self.levels
    }

    /// The leaf node at `index`, if built and in range.
    pub fn leaf(&self, index: usize) -> Option<&Node<T>> {
        self.levels.first().and_then(|leaves| leaves.get(index))
    }

    /// The merge function this tree was constructed with.
    pub fn merge_function(&self) -> &M {
        &self.merge
    }

    /// Build options in effect.
    pub fn config(&self) -> &MerkleTreeConfig {
        &self.config
    }

    /// The single node of the top level.
    pub fn get_root(&self) -> Result<&Node<T>> {
        self.levels
            .last()
            .and_then(|top| top.first())
            .ok_or(MerkleTreeError::NotBuilt)
    }

    /// Inclusion proof for the leaf at `index`.
    ///
    /// Walking up from the leaf, an odd position contributes its left
    /// neighbour (`left = true`), an even position its right neighbour
    /// (`left = false`), and a promoted position nothing.
    pub fn get_proof(&self, index: usize) -> Result<Proof<T>>
    where
        T: Clone,
    {
        let Some((_root, below_root)) = self.levels.split_last() else {
            return Err(MerkleTreeError::NotBuilt);
        };
        let leaf_count = self.leaf_count();
        if index >= leaf_count {
            return Err(MerkleTreeError::IndexOutOfRange { index, leaf_count });
        }

        let mut entries = Vec::with_capacity(below_root.len());
        let mut position = index;
        for level in below_root {
            let entry = if position % 2 == 1 {
                Some(ProofEntry::left(level[position - 1].clone()))
            } else {
                level.get(position + 1).cloned().map(ProofEntry::right)
            };
            entries.extend(entry);
            position /= 2;
        }

        debug!(index, entries = entries.len(), "generated merkle proof");
        Ok(Proof::new(index as u64, entries))
    }
}

impl<T, M> MerkleTree<T, M>
where
    T: Clone + Send + Sync + 'static,
    M: MergeFunction<T>,
{
    /// Create a tree with `merge` and build it from `leaves` in one step.
    pub async fn from_leaves<I>(merge: M, leaves: I) -> CostResult<Self, MerkleTreeError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = Self::new(merge);
        let built = tree.build(leaves).await;
        built.map_ok(|()| tree)
    }

    /// Build every level from `leaves`.
    ///
    /// Merges within a level run concurrently, up to
    /// [`MerkleTreeConfig::merge_concurrency`] at a time; a level is complete
    /// before the next one starts. The levels are installed only once the
    /// root exists, so an error or a dropped future leaves the tree unbuilt.
    pub async fn build<I>(&mut self, leaves: I) -> CostResult<(), MerkleTreeError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut cost = OperationCost::default();
        if self.is_built() {
            return Err(MerkleTreeError::AlreadyBuilt).wrap_with_cost(cost);
        }

        let mut current: Vec<Node<T>> = leaves.into_iter().map(Node::new).collect();
        if current.is_empty() {
            return Err(MerkleTreeError::EmptyInput).wrap_with_cost(cost);
        }
        debug!(leaf_count = current.len(), "building merkle tree");

        let mut levels = Vec::new();
        while current.len() > 1 {
            let next = cost_return_on_error!(
                &mut cost,
                self.next_level(&current, levels.len()).await
            );
            trace!(level = levels.len() + 1, width = next.len(), "merged level");
            levels.push(std::mem::replace(&mut current, next));
        }
        levels.push(current);

        debug!(
            levels = levels.len(),
            merge_calls = cost.merge_calls,
            promoted_nodes = cost.promoted_nodes,
            "built merkle tree"
        );
        self.levels = levels;
        Ok(()).wrap_with_cost(cost)
    }

    /// Check a proof against this tree's root using its own merge function.
    pub async fn verify_proof(&self, leaf: T, proof: &Proof<T>) -> CostResult<bool, MerkleTreeError>
    where
        T: PartialEq,
    {
        let root = match self.get_root() {
            Ok(root) => root,
            Err(e) => return Err(e).wrap_with_cost(OperationCost::default()),
        };
        verify(leaf, proof, root, &self.merge).await
    }

    /// Pair `level` (at height `height`) into the level above it.
    async fn next_level(
        &self,
        level: &[Node<T>],
        height: usize,
    ) -> CostResult<Vec<Node<T>>, MerkleTreeError> {
        let mut cost = OperationCost::default();
        let pairs = level.chunks_exact(2);
        let unpaired = pairs.remainder().first();

        let merge = &self.merge;
        let mut merge_calls = 0u64;
        let merged: Result<Vec<Node<T>>> = stream::iter(pairs)
            .map(|pair| {
                merge_calls += 1;
                merge.merge(pair.first(), pair.get(1))
            })
            .buffered(self.config.merge_concurrency())
            .try_collect()
            .await;
        cost.merge_calls += merge_calls;

        let merged = merged
            .inspect_err(|e| warn!(error = %e, level = height, "merkle tree build aborted"));
        let mut next = cost_return_on_error_no_add!(&cost, merged);
        if let Some(node) = unpaired {
            next.push(node.clone());
            cost.promoted_nodes += 1;
        }
        Ok(next).wrap_with_cost(cost)
    }
}
