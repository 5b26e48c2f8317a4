//! # Migration Types
//!
//! The request a caller submits, the intermediate amounts the engine tracks
//! and the result it returns.

use ethnum::U256;

use crate::types::Address;

/// One of the two assets of a migration, labelled as the caller labelled it
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

/// An asset identity tagged with whether it wraps the native currency
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Asset {
    pub address: Address,
    pub is_wrapped_native: bool,
}

impl Asset {
    /// Tag `address` against the configured wrapped-native address
    pub fn resolve(address: Address, wrapped_native: Address) -> Self {
        Self {
            address,
            is_wrapped_native: address == wrapped_native,
        }
    }
}

/// Caller-supplied migration parameters
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationRequest {
    /// Account holding the source shares; shares are pulled from it
    pub sender: Address,
    /// Constant-product pair holding the position
    pub source_pool: Address,
    /// Share units to redeem
    pub liquidity_to_migrate: u128,
    /// Percentage of the withdrawn amounts to deposit, in (0, 100]
    pub migration_percentage: u8,
    pub asset_a: Address,
    pub asset_b: Address,
    pub fee_tier: u32,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub min_amount_a: u128,
    pub min_amount_b: u128,
    /// Owner of the new position and of every refund
    pub recipient: Address,
    /// Unix timestamp the migration must complete by
    pub deadline: u64,
    pub refund_native_as_unwrapped: bool,
    /// Q64.96 price used only if the destination pool still needs initializing
    pub initial_sqrt_price: Option<U256>,
}

impl MigrationRequest {
    /// Address of the asset on `side`
    pub fn asset(&self, side: Side) -> Address {
        match side {
            Side::A => self.asset_a,
            Side::B => self.asset_b,
        }
    }

    /// Slippage floor for `side`
    pub fn min_amount(&self, side: Side) -> u128 {
        match side {
            Side::A => self.min_amount_a,
            Side::B => self.min_amount_b,
        }
    }
}

/// Amounts received from redeeming source shares, in caller labelling
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WithdrawnAmounts {
    pub amount_a: u128,
    pub amount_b: u128,
}

/// Result of a completed migration
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationResult {
    /// Destination pool the position was minted in
    pub pool: Address,
    pub position_id: u64,
    pub liquidity_minted: u128,
    pub amount_a_deposited: u128,
    pub amount_b_deposited: u128,
    /// Leftover of asset A returned to the recipient
    pub refund_a: u128,
    /// Leftover of asset B returned to the recipient
    pub refund_b: u128,
    /// Portion of the refunds paid out as unwrapped native currency
    pub refunded_native: u128,
}

/// Read-only estimate of a migration at current state
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationPreview {
    pub withdrawn: WithdrawnAmounts,
    pub amount_a_to_migrate: u128,
    pub amount_b_to_migrate: u128,
    pub liquidity: u128,
    pub amount_a_deposited: u128,
    pub amount_b_deposited: u128,
    pub refund_a: u128,
    pub refund_b: u128,
    /// Whether both deposits would clear the caller's floors
    pub meets_minimums: bool,
    /// Whether the destination pool would be created or initialized first
    pub initializes_pool: bool,
}
