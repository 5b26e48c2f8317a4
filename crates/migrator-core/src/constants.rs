//! # Protocol Constants
//!
//! Fundamental constants for the migrator including:
//! - Fixed-point scale factors (Q96, Q128)
//! - Tick and sqrt price bounds of the destination pools
//! - Standard fee tiers and their tick spacings
//! - Migration limits

use ethnum::U256;

// ============================================================================
// Mathematical Constants
// ============================================================================

/// Q96 fixed-point resolution in bits
pub const RESOLUTION: u32 = 96;

/// Q96 fixed-point scale factor: 2^96
pub const Q96: U256 = U256::from_words(0, 1u128 << 96);

/// Q128 scale factor: 2^128
pub const Q128: U256 = U256::from_words(1, 0);

// ============================================================================
// Tick Bounds
// ============================================================================

/// Minimum tick supported by the destination pools
pub const MIN_TICK: i32 = -887_272;

/// Maximum tick supported by the destination pools
pub const MAX_TICK: i32 = 887_272;

/// Sqrt price at MIN_TICK in Q64.96
pub const MIN_SQRT_RATIO: U256 = U256::from_words(0, 4_295_128_739);

/// Sqrt price at MAX_TICK in Q64.96
pub const MAX_SQRT_RATIO: U256 =
    U256::from_words(0xfffd8963, 0xefd1fc6a506488495d951d5263988d26);

// ============================================================================
// Fee Tiers
// ============================================================================

/// 0.05% fee tier
pub const FEE_LOW: u32 = 500;

/// 0.3% fee tier
pub const FEE_MEDIUM: u32 = 3_000;

/// 1% fee tier
pub const FEE_HIGH: u32 = 10_000;

/// Standard fee tiers with their tick spacings
pub const STANDARD_FEE_TIERS: [(u32, i32); 3] = [(FEE_LOW, 10), (FEE_MEDIUM, 60), (FEE_HIGH, 200)];

// ============================================================================
// Migration Limits
// ============================================================================

/// Upper bound of `migration_percentage`
pub const MAX_MIGRATION_PERCENTAGE: u8 = 100;

/// Shares permanently locked by a constant-product pool on its first mint
pub const MINIMUM_LIQUIDITY: u128 = 1_000;

/// Look up the tick spacing of a standard fee tier
pub fn standard_tick_spacing(fee: u32) -> Option<i32> {
    STANDARD_FEE_TIERS
        .iter()
        .find(|(tier, _)| *tier == fee)
        .map(|(_, spacing)| *spacing)
}

/// Lowest usable tick for a tick spacing
pub fn min_usable_tick(tick_spacing: i32) -> i32 {
    // Integer division truncates toward zero, which rounds MIN_TICK up
    (MIN_TICK / tick_spacing) * tick_spacing
}

/// Highest usable tick for a tick spacing
pub fn max_usable_tick(tick_spacing: i32) -> i32 {
    (MAX_TICK / tick_spacing) * tick_spacing
}
