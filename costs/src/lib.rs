#![deny(missing_docs)]
//! Interface crate to unify how the costs of Merkle tree operations are
//! passed and retrieved.

use std::ops::AddAssign;

mod context;

pub use context::{CostContext, CostResult};

/// Work performed by a tree operation, counted in merge-function terms.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct OperationCost {
    /// How many times the merge function was invoked.
    pub merge_calls: u64,
    /// How many unpaired nodes were carried up a level without merging.
    pub promoted_nodes: u64,
}

impl OperationCost {
    /// `true` when no work was recorded.
    pub fn is_nothing(&self) -> bool {
        self == &Self::default()
    }
}

impl AddAssign for OperationCost {
    fn add_assign(&mut self, rhs: Self) {
        self.merge_calls = self.merge_calls.saturating_add(rhs.merge_calls);
        self.promoted_nodes = self.promoted_nodes.saturating_add(rhs.promoted_nodes);
    }
}

/// Extension trait to add costs context to values.
pub trait CostsExt {
    /// Wraps any value into a `CostContext` object with provided costs.
    fn wrap_with_cost(self, cost: OperationCost) -> CostContext<Self>
    where
        Self: Sized,
    {
        CostContext { value: self, cost }
    }
}

impl<T> CostsExt for T {}

/// Early return on error for `CostResult` values, like `?` but keeping the
/// costs collected so far in the external accumulator.
#[macro_export]
macro_rules! cost_return_on_error {
    ( &mut $cost:ident, $($body:tt)+ ) => {
        {
            use $crate::CostsExt;
            let result_with_cost = { $($body)+ };
            let result = result_with_cost.unwrap_add_cost(&mut $cost);
            match result {
                Ok(x) => x,
                Err(e) => return Err(e).wrap_with_cost($cost),
            }
        }
    };
}

/// Same as [`cost_return_on_error`] but for a plain `Result`: nothing is
/// added, previously accumulated costs are returned with the error.
#[macro_export]
macro_rules! cost_return_on_error_no_add {
    ( &$cost:ident, $($body:tt)+ ) => {
        {
            use $crate::CostsExt;
            let result = { $($body)+ };
            match result {
                Ok(x) => x,
                Err(e) => return Err(e).wrap_with_cost($cost),
            }
        }
    };
}
