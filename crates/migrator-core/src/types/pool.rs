//! # Destination Pool Types
//!
//! Identity and state of concentrated-liquidity pools and the parameters
//! exchanged with their position manager.

use ethnum::U256;

use crate::errors::{CoreError, CoreResult};
use crate::types::Address;

/// Canonical pool identity: tokens sorted by address plus the fee tier
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolKey {
    pub token0: Address,
    pub token1: Address,
    pub fee: u32,
}

impl PoolKey {
    /// Build the canonical key for two tokens in any order
    pub fn new(token_a: Address, token_b: Address, fee: u32) -> CoreResult<Self> {
        let (token0, token1) = sort_tokens(token_a, token_b)?;
        Ok(Self { token0, token1, fee })
    }

    /// Whether `token` is one of the pool's tokens
    pub fn contains(&self, token: Address) -> bool {
        self.token0 == token || self.token1 == token
    }
}

impl std::fmt::Display for PoolKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}@{}", self.token0, self.token1, self.fee)
    }
}

/// Sort two token identities, rejecting duplicates
pub fn sort_tokens(token_a: Address, token_b: Address) -> CoreResult<(Address, Address)> {
    if token_a == token_b {
        return Err(CoreError::IdenticalAssets);
    }
    if token_a < token_b {
        Ok((token_a, token_b))
    } else {
        Ok((token_b, token_a))
    }
}

/// Price state of an initialized pool
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolState {
    /// Current sqrt price in Q64.96
    pub sqrt_price_x96: U256,
    /// Tick containing the current price
    pub tick: i32,
}

/// Parameters for minting a position through the position manager
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintParams {
    pub key: PoolKey,
    pub tick_lower: i32,
    pub tick_upper: i32,
    /// Most of token0 the position manager may pull from the payer
    pub amount0_desired: u128,
    /// Most of token1 the position manager may pull from the payer
    pub amount1_desired: u128,
    pub recipient: Address,
    pub deadline: u64,
}

/// Outcome of a successful mint
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintReceipt {
    pub position_id: u64,
    pub liquidity: u128,
    pub amount0: u128,
    pub amount1: u128,
}

/// Snapshot of a constant-product pair used for previews
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PairReserves {
    pub reserve0: u128,
    pub reserve1: u128,
    pub total_supply: u128,
}
