//! Proof verification.
//!
//! Pure functions: no tree required. The root is recomputed from the leaf
//! value and the proof's sibling nodes, merging in the order each entry
//! dictates.

use merkle_costs::{cost_return_on_error_no_add, CostResult, CostsExt, OperationCost};

use crate::{MergeFunction, Node, Proof};

/// Recompute the root implied by `leaf` and `proof`.
///
/// Starting from `Node::new(leaf)`, each entry is merged with the running
/// node, sibling on the left when `entry.left` is set and on the right
/// otherwise.
pub async fn compute_root<T, M>(
    leaf: T,
    proof: &Proof<T>,
    merge: &M,
) -> CostResult<Node<T>, crate::MerkleTreeError>
where
    T: Send + Sync + 'static,
    M: MergeFunction<T> + ?Sized,
{
    let mut cost = OperationCost::default();
    let mut running = Node::new(leaf);
    for entry in proof {
        let merged = if entry.left {
            merge.merge(Some(&entry.node), Some(&running)).await
        } else {
            merge.merge(Some(&running), Some(&entry.node)).await
        };
        cost.merge_calls += 1;
        running = cost_return_on_error_no_add!(&cost, merged);
    }
    Ok(running).wrap_with_cost(cost)
}

/// Check that `leaf` and `proof` replay to `expected_root`.
///
/// A mismatch is `Ok(false)`; errors are reserved for merge failures.
pub async fn verify<T, M>(
    leaf: T,
    proof: &Proof<T>,
    expected_root: &Node<T>,
    merge: &M,
) -> CostResult<bool, crate::MerkleTreeError>
where
    T: PartialEq + Send + Sync + 'static,
    M: MergeFunction<T> + ?Sized,
{
    compute_root(leaf, proof, merge)
        .await
        .map_ok(|root| &root == expected_root)
}

impl<T> Proof<T>
where
    T: Send + Sync + 'static,
{
    /// Method form of [`compute_root`].
    pub async fn calculate_root<M>(
        &self,
        leaf: T,
        merge: &M,
    ) -> CostResult<Node<T>, crate::MerkleTreeError>
    where
        M: MergeFunction<T> + ?Sized,
    {
        compute_root(leaf, self, merge).await
    }

    /// Method form of [`verify`].
    pub async fn verify<M>(
        &self,
        leaf: T,
        expected_root: &Node<T>,
        merge: &M,
    ) -> CostResult<bool, crate::MerkleTreeError>
    where
        T: PartialEq,
        M: MergeFunction<T> + ?Sized,
    {
        verify(leaf, self, expected_root, merge).await
    }
}
