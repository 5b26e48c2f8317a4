//! # Tick Math
//!
//! Conversions between ticks and Q64.96 sqrt prices. Each tick is a 0.01%
//! price step: `sqrt_price(tick) = sqrt(1.0001^tick) * 2^96`.

use ethnum::U256;

use crate::constants::{MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO, MIN_TICK};
use crate::errors::{CoreError, CoreResult};

/// sqrt(1.0001)^(-2^i) in Q128.128 for i in 1..20
const MAGIC_SQRT_1_0001_POW_2: [u128; 19] = [
    0xfff97272373d413259a46990580e213a,
    0xfff2e50f5f656932ef12357cf3c7fdcc,
    0xffe5caca7e10e4e61c3624eaa0941cd0,
    0xffcb9843d60f6159c9db58835c926644,
    0xff973b41fa98c081472e6896dfb254c0,
    0xff2ea16466c96a3843ec78b326b52861,
    0xfe5dee046a99a2a811c461f1969c3053,
    0xfcbe86c7900a88aedcffc83b479aa3a4,
    0xf987a7253ac413176f2b074cf7815e54,
    0xf3392b0822b70005940c7a398e4b70f3,
    0xe7159475a2c29b7443b29c7fa6e889d9,
    0xd097f3bdfd2022b8845ad8f792aa5825,
    0xa9f746462d870fdf8a65dc1f90e061e5,
    0x70d869a156d2a1b890bb3df62baf32f7,
    0x31be135f97d08fd981231505542fcfa6,
    0x9aa508b5b7a84e1c677de54f3e99bc9,
    0x5d6af8dedb81196699c329225ee604,
    0x2216e584f5fa1ea926041bedfe98,
    0x48a170391f7dc42444e8fa2,
];

/// sqrt(1.0001)^-1 in Q128.128
const MAGIC_SQRT_1_0001: u128 = 0xfffcb933bd6fad37aa2d162d1a594001;

/// Get the Q64.96 sqrt price at a tick
pub fn get_sqrt_ratio_at_tick(tick: i32) -> CoreResult<U256> {
    if !is_tick_valid(tick) {
        return Err(CoreError::TickOutOfRange(tick));
    }

    let abs_tick = tick.unsigned_abs();

    // Q128.128 accumulator
    let mut ratio = if abs_tick & 0x1 != 0 {
        U256::from(MAGIC_SQRT_1_0001)
    } else {
        U256::ONE << 128u32
    };

    for (i, magic) in MAGIC_SQRT_1_0001_POW_2.iter().enumerate() {
        if abs_tick & (1 << (i + 1)) != 0 {
            ratio = (ratio * U256::from(*magic)) >> 128u32;
        }
    }

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 -> Q64.96, rounding up so the result is never below the true value
    let remainder = ratio & U256::from(u32::MAX);
    let sqrt_price = (ratio >> 32u32) + if remainder == U256::ZERO { U256::ZERO } else { U256::ONE };

    Ok(sqrt_price)
}

/// Get the greatest tick whose sqrt price is at or below `sqrt_price_x96`
pub fn get_tick_at_sqrt_ratio(sqrt_price_x96: U256) -> CoreResult<i32> {
    if !is_sqrt_price_valid(sqrt_price_x96) {
        return Err(CoreError::SqrtPriceOutOfRange);
    }

    // Binary search over the tick domain
    let mut low = MIN_TICK;
    let mut high = MAX_TICK;

    while low < high {
        let mid = low + (high - low + 1) / 2;
        if get_sqrt_ratio_at_tick(mid)? <= sqrt_price_x96 {
            low = mid;
        } else {
            high = mid - 1;
        }
    }

    Ok(low)
}

/// Check if a tick is within the supported range
pub fn is_tick_valid(tick: i32) -> bool {
    (MIN_TICK..=MAX_TICK).contains(&tick)
}

/// Check if a sqrt price can be used to initialize a pool
pub fn is_sqrt_price_valid(sqrt_price_x96: U256) -> bool {
    sqrt_price_x96 >= MIN_SQRT_RATIO && sqrt_price_x96 < MAX_SQRT_RATIO
}
