//! Build configuration. Options here affect performance only, never the
//! shape of the tree or its root.
//!
//! The environment variable takes precedence over values passed to
//! [`MerkleTreeConfig::new`]; [`MerkleTreeConfig::with_merge_concurrency`]
//! ignores it.

/// Tuning options for [`MerkleTree::build`](crate::MerkleTree::build).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MerkleTreeConfig {
    merge_concurrency: usize,
}

impl MerkleTreeConfig {
    const MERGE_CONCURRENCY_ENV_VAR: &'static str = "MERKLE_TREE_MERGE_CONCURRENCY";
    const DEFAULT_MERGE_CONCURRENCY: usize = 64;
    const MINIMUM_MERGE_CONCURRENCY: usize = 1;

    /// Configuration with the given merge concurrency, or the default if
    /// `None`. `MERKLE_TREE_MERGE_CONCURRENCY` overrides both.
    pub fn new(merge_concurrency: Option<usize>) -> Self {
        let env = std::env::var(Self::MERGE_CONCURRENCY_ENV_VAR).ok();
        Self::resolve(env.as_deref(), merge_concurrency)
    }

    /// Configuration with exactly `merge_concurrency` (at least 1),
    /// regardless of the environment.
    pub fn with_merge_concurrency(merge_concurrency: usize) -> Self {
        Self::resolve(None, Some(merge_concurrency))
    }

    /// Maximum number of merges of one level that are in flight at once.
    pub fn merge_concurrency(&self) -> usize {
        self.merge_concurrency
    }

    fn resolve(env_value: Option<&str>, configured: Option<usize>) -> Self {
        let merge_concurrency = env_value
            .and_then(|s| s.trim().parse().ok())
            .or(configured)
            .unwrap_or(Self::DEFAULT_MERGE_CONCURRENCY)
            .max(Self::MINIMUM_MERGE_CONCURRENCY);

        Self { merge_concurrency }
    }
}

impl Default for MerkleTreeConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_concurrency() {
        let config = MerkleTreeConfig::resolve(None, None);
        assert_eq!(config.merge_concurrency(), 64);
    }

    #[test]
    fn test_configured_value_used_without_env() {
        assert_eq!(MerkleTreeConfig::resolve(None, Some(8)).merge_concurrency(), 8);
    }

    #[test]
    fn test_env_takes_precedence() {
        let config = MerkleTreeConfig::resolve(Some("3"), Some(8));
        assert_eq!(config.merge_concurrency(), 3);
    }

    #[test]
    fn test_unparsable_env_is_ignored() {
        let config = MerkleTreeConfig::resolve(Some("lots"), Some(8));
        assert_eq!(config.merge_concurrency(), 8);
    }

    #[test]
    fn test_explicit_concurrency_skips_env() {
        let config = MerkleTreeConfig::with_merge_concurrency(2);
        assert_eq!(config, MerkleTreeConfig::resolve(None, Some(2)));
        assert_eq!(config.merge_concurrency(), 2);
        assert_eq!(MerkleTreeConfig::with_merge_concurrency(0).merge_concurrency(), 1);
    }

    #[test]
    fn test_minimum_is_one() {
        assert_eq!(MerkleTreeConfig::resolve(None, Some(0)).merge_concurrency(), 1);
        assert_eq!(MerkleTreeConfig::resolve(Some("0"), None).merge_concurrency(), 1);
    }
}
