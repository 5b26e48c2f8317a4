//! # Sqrt Price Math
//!
//! Token amount deltas between two Q64.96 sqrt prices for a given liquidity.

use ethnum::U256;

use crate::constants::{Q96, RESOLUTION};
use crate::errors::{CoreError, CoreResult};
use crate::math::full_math::{div_rounding_up, mul_div, mul_div_rounding_up, sqrt_u256, Rounding};

/// Amount of token0 between two sqrt prices:
/// `liquidity * (sqrt_b - sqrt_a) / (sqrt_a * sqrt_b)`
pub fn get_amount_0_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> CoreResult<U256> {
    let (sqrt_a, sqrt_b) = sort_ratios(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    if sqrt_a == U256::ZERO {
        return Err(CoreError::DivisionByZero);
    }

    let numerator1 = U256::from(liquidity) << RESOLUTION;
    let numerator2 = sqrt_b - sqrt_a;

    if round_up {
        div_rounding_up(mul_div_rounding_up(numerator1, numerator2, sqrt_b)?, sqrt_a)
    } else {
        Ok(mul_div(numerator1, numerator2, sqrt_b, Rounding::Down)? / sqrt_a)
    }
}

/// Amount of token1 between two sqrt prices:
/// `liquidity * (sqrt_b - sqrt_a)`
pub fn get_amount_1_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> CoreResult<U256> {
    let (sqrt_a, sqrt_b) = sort_ratios(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    let rounding = if round_up { Rounding::Up } else { Rounding::Down };
    mul_div(U256::from(liquidity), sqrt_b - sqrt_a, Q96, rounding)
}

/// Encode a price ratio `reserve1 / reserve0` as a Q64.96 sqrt price
pub fn encode_price_sqrt(reserve1: u128, reserve0: u128) -> CoreResult<U256> {
    if reserve0 == 0 {
        return Err(CoreError::DivisionByZero);
    }
    let ratio_x192 = mul_div(
        U256::from(reserve1),
        U256::ONE << (2 * RESOLUTION),
        U256::from(reserve0),
        Rounding::Down,
    )?;
    Ok(sqrt_u256(ratio_x192))
}

fn sort_ratios(a: U256, b: U256) -> (U256, U256) {
    if a > b {
        (b, a)
    } else {
        (a, b)
    }
}
