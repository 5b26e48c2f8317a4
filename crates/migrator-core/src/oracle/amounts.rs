//! # Amount Oracle
//!
//! Resolves canonical token ordering and quotes how much of two available
//! balances a concentrated position would consume at a given price. Quotes
//! follow the pool's own rules: liquidity rounds down, owed amounts round up.

use ethnum::U256;

use crate::errors::{CoreError, CoreResult};
use crate::math::{get_amounts_for_liquidity, get_liquidity_for_amounts, get_sqrt_ratio_at_tick};
use crate::types::{sort_tokens, Address};

/// Two token identities in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalPair {
    pub token0: Address,
    pub token1: Address,
    /// True when the caller's asset A is token1
    pub flipped: bool,
}

impl CanonicalPair {
    /// Reorder a caller-labelled (a, b) pair into (token0, token1)
    pub fn to_canonical<T>(&self, a: T, b: T) -> (T, T) {
        if self.flipped {
            (b, a)
        } else {
            (a, b)
        }
    }

    /// Reorder a (token0, token1) pair back into caller labelling
    pub fn from_canonical<T>(&self, value0: T, value1: T) -> (T, T) {
        // The swap is its own inverse
        self.to_canonical(value0, value1)
    }
}

/// Resolve canonical ordering of two caller-supplied assets
pub fn canonical_order(asset_a: Address, asset_b: Address) -> CoreResult<CanonicalPair> {
    let (token0, token1) = sort_tokens(asset_a, asset_b)?;
    Ok(CanonicalPair {
        token0,
        token1,
        flipped: token0 != asset_a,
    })
}

/// Quoted deposit for a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MintQuote {
    pub liquidity: u128,
    pub amount0: u128,
    pub amount1: u128,
}

impl MintQuote {
    pub fn is_empty(&self) -> bool {
        self.liquidity == 0
    }
}

/// Quote the liquidity and consumed amounts for a position over
/// `[tick_lower, tick_upper)` at `sqrt_price_x96`, never exceeding the
/// available balances. Zero liquidity is a valid quote.
pub fn quote_mint(
    sqrt_price_x96: U256,
    tick_lower: i32,
    tick_upper: i32,
    amount0_available: u128,
    amount1_available: u128,
) -> CoreResult<MintQuote> {
    if tick_lower >= tick_upper {
        return Err(CoreError::invalid_tick_range(tick_lower, tick_upper));
    }

    let sqrt_lower = get_sqrt_ratio_at_tick(tick_lower)?;
    let sqrt_upper = get_sqrt_ratio_at_tick(tick_upper)?;

    let liquidity = get_liquidity_for_amounts(
        sqrt_price_x96,
        sqrt_lower,
        sqrt_upper,
        amount0_available,
        amount1_available,
    )?;

    if liquidity == 0 {
        return Ok(MintQuote::default());
    }

    let (amount0, amount1) =
        get_amounts_for_liquidity(sqrt_price_x96, sqrt_lower, sqrt_upper, liquidity, true)?;

    Ok(MintQuote {
        liquidity,
        amount0,
        amount1,
    })
}
