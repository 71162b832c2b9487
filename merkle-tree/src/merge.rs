//! The merge capability injected into a [`MerkleTree`](crate::MerkleTree).

use std::sync::Arc;

use async_trait::async_trait;

use crate::{MerkleTreeError, Node, Operand, Result};

/// Combines two sibling nodes into their parent.
///
/// Implementations provide [`combine`](MergeFunction::combine); the tree and
/// the verifier call [`merge`](MergeFunction::merge), which rejects absent
/// operands before delegating. A merge is the only point where tree
/// operations suspend, so implementations are free to do I/O.
///
/// Implementations must be deterministic: equal inputs always produce equal
/// output, otherwise proofs will not replay to the root.
#[async_trait]
pub trait MergeFunction<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    /// Combine `left` and `right`, in that order, into a parent node.
    async fn combine(&self, left: &Node<T>, right: &Node<T>) -> Result<Node<T>>;

    /// Merge two operands, failing with [`MerkleTreeError::MissingOperand`]
    /// when either is absent.
    async fn merge(&self, left: Option<&Node<T>>, right: Option<&Node<T>>) -> Result<Node<T>> {
        let left = left.ok_or(MerkleTreeError::MissingOperand(Operand::First))?;
        let right = right.ok_or(MerkleTreeError::MissingOperand(Operand::Second))?;
        self.combine(left, right).await
    }
}

#[async_trait]
impl<T, M> MergeFunction<T> for Arc<M>
where
    T: Send + Sync + 'static,
    M: MergeFunction<T> + ?Sized,
{
    async fn combine(&self, left: &Node<T>, right: &Node<T>) -> Result<Node<T>> {
        (**self).combine(left, right).await
    }
}

/// Adapts a synchronous closure into a [`MergeFunction`].
///
/// ```
/// use merkle_tree::{MergeFn, MerkleTree, Node, Result};
///
/// let xor = MergeFn::new(|l: &Node<u8>, r: &Node<u8>| -> Result<Node<u8>> {
///     Ok(Node::new(l.data() ^ r.data()))
/// });
/// let tree: MerkleTree<u8, _> = MerkleTree::new(xor);
/// assert!(!tree.is_built());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MergeFn<F>(F);

impl<F> MergeFn<F> {
    /// Wrap `f`.
    pub fn new(f: F) -> Self {
        MergeFn(f)
    }
}

#[async_trait]
impl<T, F> MergeFunction<T> for MergeFn<F>
where
    T: Send + Sync + 'static,
    F: Fn(&Node<T>, &Node<T>) -> Result<Node<T>> + Send + Sync,
{
    async fn combine(&self, left: &Node<T>, right: &Node<T>) -> Result<Node<T>> {
        (self.0)(left, right)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn sum() -> MergeFn<impl Fn(&Node<u64>, &Node<u64>) -> Result<Node<u64>>> {
        MergeFn::new(|l: &Node<u64>, r: &Node<u64>| Ok(Node::new(l.data() + r.data())))
    }

    #[tokio::test]
    async fn test_merge_missing_first_operand() {
        let right = Node::new(2u64);
        let result = sum().merge(None, Some(&right)).await;
        assert_matches!(result, Err(MerkleTreeError::MissingOperand(Operand::First)));
    }

    #[tokio::test]
    async fn test_merge_missing_second_operand() {
        let left = Node::new(1u64);
        let result = sum().merge(Some(&left), None).await;
        assert_matches!(result, Err(MerkleTreeError::MissingOperand(Operand::Second)));
    }

    #[tokio::test]
    async fn test_merge_missing_both_reports_first() {
        let result = sum().merge(None, None).await;
        assert_matches!(result, Err(MerkleTreeError::MissingOperand(Operand::First)));
    }

    #[tokio::test]
    async fn test_merge_delegates_to_combine() {
        let merged = sum()
            .merge(Some(&Node::new(1)), Some(&Node::new(2)))
            .await
            .expect("merge");
        assert_eq!(merged, Node::new(3));
    }

    #[tokio::test]
    async fn test_arc_forwards() {
        let shared = Arc::new(sum());
        let merged = shared
            .combine(&Node::new(4), &Node::new(5))
            .await
            .expect("combine");
        assert_eq!(*merged.data(), 9);
    }

    #[test]
    fn test_missing_operand_messages() {
        assert_eq!(
            MerkleTreeError::MissingOperand(Operand::First).to_string(),
            "the merge function expects two arguments, the first was not received"
        );
        assert_eq!(
            MerkleTreeError::MissingOperand(Operand::Second).to_string(),
            "the merge function expects two arguments, the second was not received"
        );
    }
}
