//! # Liquidity Math
//!
//! Conversions between token amounts and concentrated liquidity for a
//! position bounded by two sqrt prices.

use ethnum::U256;

use crate::constants::Q96;
use crate::errors::{CoreError, CoreResult};
use crate::math::full_math::{mul_div, to_u128, Rounding};
use crate::math::sqrt_price_math::{get_amount_0_delta, get_amount_1_delta};

/// Liquidity supported by `amount0` between two sqrt prices
pub fn get_liquidity_for_amount_0(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount0: u128,
) -> CoreResult<u128> {
    let (sqrt_a, sqrt_b) = order(sqrt_ratio_a_x96, sqrt_ratio_b_x96)?;
    let intermediate = mul_div(sqrt_a, sqrt_b, Q96, Rounding::Down)?;
    let liquidity = mul_div(U256::from(amount0), intermediate, sqrt_b - sqrt_a, Rounding::Down)?;
    to_u128(liquidity)
}

/// Liquidity supported by `amount1` between two sqrt prices
pub fn get_liquidity_for_amount_1(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount1: u128,
) -> CoreResult<u128> {
    let (sqrt_a, sqrt_b) = order(sqrt_ratio_a_x96, sqrt_ratio_b_x96)?;
    let liquidity = mul_div(U256::from(amount1), Q96, sqrt_b - sqrt_a, Rounding::Down)?;
    to_u128(liquidity)
}

/// Maximum liquidity that both amounts can support at the current price
pub fn get_liquidity_for_amounts(
    sqrt_price_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount0: u128,
    amount1: u128,
) -> CoreResult<u128> {
    let (sqrt_a, sqrt_b) = order(sqrt_ratio_a_x96, sqrt_ratio_b_x96)?;

    if sqrt_price_x96 <= sqrt_a {
        get_liquidity_for_amount_0(sqrt_a, sqrt_b, amount0)
    } else if sqrt_price_x96 < sqrt_b {
        let liquidity0 = get_liquidity_for_amount_0(sqrt_price_x96, sqrt_b, amount0)?;
        let liquidity1 = get_liquidity_for_amount_1(sqrt_a, sqrt_price_x96, amount1)?;
        Ok(liquidity0.min(liquidity1))
    } else {
        get_liquidity_for_amount_1(sqrt_a, sqrt_b, amount1)
    }
}

/// Token amounts owed for `liquidity` at the current price.
///
/// `round_up` is used when depositing so the pool is never short.
pub fn get_amounts_for_liquidity(
    sqrt_price_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> CoreResult<(u128, u128)> {
    let (sqrt_a, sqrt_b) = order(sqrt_ratio_a_x96, sqrt_ratio_b_x96)?;

    let (amount0, amount1) = if sqrt_price_x96 <= sqrt_a {
        (get_amount_0_delta(sqrt_a, sqrt_b, liquidity, round_up)?, U256::ZERO)
    } else if sqrt_price_x96 < sqrt_b {
        (
            get_amount_0_delta(sqrt_price_x96, sqrt_b, liquidity, round_up)?,
            get_amount_1_delta(sqrt_a, sqrt_price_x96, liquidity, round_up)?,
        )
    } else {
        (U256::ZERO, get_amount_1_delta(sqrt_a, sqrt_b, liquidity, round_up)?)
    };

    Ok((to_u128(amount0)?, to_u128(amount1)?))
}

fn order(a: U256, b: U256) -> CoreResult<(U256, U256)> {
    match a.cmp(&b) {
        std::cmp::Ordering::Less => Ok((a, b)),
        std::cmp::Ordering::Greater => Ok((b, a)),
        std::cmp::Ordering::Equal => Err(CoreError::DivisionByZero),
    }
}
