//! Full-precision multiply-divide
//!
//! `a * b / denominator` where the product may need 512 bits. The product is
//! held as a pair of U256 words and divided with a shift-subtract long
//! division, so the result is exact whenever it fits in 256 bits.

use ethnum::U256;

use crate::errors::{CoreError, CoreResult};

/// Rounding mode for division operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Round down (towards zero)
    Down,
    /// Round up (away from zero)
    Up,
}

/// 512-bit product of two U256 values as (high, low) words
pub fn full_mul(a: U256, b: U256) -> (U256, U256) {
    let (a1, a0) = a.into_words();
    let (b1, b0) = b.into_words();

    let p00 = U256::from(a0) * U256::from(b0);
    let p01 = U256::from(a0) * U256::from(b1);
    let p10 = U256::from(a1) * U256::from(b0);
    let p11 = U256::from(a1) * U256::from(b1);

    let (mid, mid_carry) = p01.overflowing_add(p10);
    let (lo, lo_carry) = p00.overflowing_add(mid << 128u32);

    let mut hi = p11 + (mid >> 128u32);
    if mid_carry {
        hi += U256::ONE << 128u32;
    }
    if lo_carry {
        hi += U256::ONE;
    }

    (hi, lo)
}

/// Divide the 512-bit value (hi, lo) by `denominator`.
///
/// Returns (quotient, remainder). Fails if the quotient needs more than
/// 256 bits.
fn div_512(hi: U256, lo: U256, denominator: U256) -> CoreResult<(U256, U256)> {
    if denominator == U256::ZERO {
        return Err(CoreError::DivisionByZero);
    }

    if hi == U256::ZERO {
        return Ok((lo / denominator, lo % denominator));
    }

    if hi >= denominator {
        return Err(CoreError::MulDivOverflow);
    }

    let mut remainder = hi;
    let mut quotient = U256::ZERO;

    for bit in (0..256u32).rev() {
        let overflow = remainder >> 255u32 == U256::ONE;
        remainder = (remainder << 1u32) | ((lo >> bit) & U256::ONE);

        if overflow || remainder >= denominator {
            remainder = remainder.wrapping_sub(denominator);
            quotient |= U256::ONE << bit;
        }
    }

    Ok((quotient, remainder))
}

/// Multiply two values and divide by a third with specified rounding
/// result = (a * b) / denominator
pub fn mul_div(a: U256, b: U256, denominator: U256, rounding: Rounding) -> CoreResult<U256> {
    let (hi, lo) = full_mul(a, b);
    let (quotient, remainder) = div_512(hi, lo, denominator)?;

    if rounding == Rounding::Up && remainder != U256::ZERO {
        return quotient
            .checked_add(U256::ONE)
            .ok_or(CoreError::MulDivOverflow);
    }

    Ok(quotient)
}

/// `ceil(a * b / denominator)`
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> CoreResult<U256> {
    mul_div(a, b, denominator, Rounding::Up)
}

/// `ceil(x / y)` for 256-bit operands
pub fn div_rounding_up(x: U256, y: U256) -> CoreResult<U256> {
    if y == U256::ZERO {
        return Err(CoreError::DivisionByZero);
    }
    let quotient = x / y;
    if x % y != U256::ZERO {
        Ok(quotient + U256::ONE)
    } else {
        Ok(quotient)
    }
}

/// Multiply two u128 values and divide by a third with specified rounding
pub fn mul_div_u128(a: u128, b: u128, denominator: u128, rounding: Rounding) -> CoreResult<u128> {
    let result = mul_div(
        U256::from(a),
        U256::from(b),
        U256::from(denominator),
        rounding,
    )?;
    to_u128(result)
}

/// Narrow a U256 to u128
pub fn to_u128(value: U256) -> CoreResult<u128> {
    let (hi, lo) = value.into_words();
    if hi != 0 {
        return Err(CoreError::ConversionError);
    }
    Ok(lo)
}

/// Floor square root of a U256 (Newton iteration)
pub fn sqrt_u256(value: U256) -> U256 {
    if value < U256::from(2u8) {
        return value;
    }

    let bits = 256 - value.leading_zeros();
    let mut x = U256::ONE << ((bits + 1) / 2);
    loop {
        let y = (x + value / x) >> 1u32;
        if y >= x {
            return x;
        }
        x = y;
    }
}
