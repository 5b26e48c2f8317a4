//! Batched engine calls executed as one atomic unit

use migrator_core::{Address, MigrationRequest, MigrationResult, U256};
use serde::{Deserialize, Serialize};

/// One call within a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MigratorCall {
    /// Create and initialize a destination pool if necessary
    EnsurePool {
        asset_a: Address,
        asset_b: Address,
        fee: u32,
        sqrt_price_x96: U256,
    },
    Migrate(MigrationRequest),
}

/// Output of one call, in batch order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallOutput {
    Pool(Address),
    Migration(MigrationResult),
}

impl CallOutput {
    /// Pool the call touched
    pub fn pool(&self) -> Address {
        match self {
            CallOutput::Pool(pool) => *pool,
            CallOutput::Migration(result) => result.pool,
        }
    }

    pub fn migration(&self) -> Option<&MigrationResult> {
        match self {
            CallOutput::Migration(result) => Some(result),
            CallOutput::Pool(_) => None,
        }
    }
}
