//! # Safe Math Operations
//!
//! Overflow-checked arithmetic on token amounts.

use crate::errors::{CoreError, CoreResult};

/// Macro to generate safe arithmetic functions
macro_rules! safe_arith {
    // Binary operations with checked methods
    ($fn_name:ident, $type:ty, $checked_method:ident, $error:expr) => {
        #[doc = concat!("Checked `", stringify!($checked_method), "` on `", stringify!($type), "`")]
        pub fn $fn_name(a: $type, b: $type) -> CoreResult<$type> {
            a.$checked_method(b).ok_or($error)
        }
    };

    // Division operations with zero check
    (div, $fn_name:ident, $type:ty) => {
        /// Safe division with zero check
        pub fn $fn_name(a: $type, b: $type) -> CoreResult<$type> {
            if b == 0 {
                return Err(CoreError::DivisionByZero);
            }
            Ok(a / b)
        }
    };
}

safe_arith!(safe_add_u128, u128, checked_add, CoreError::MathOverflow);
safe_arith!(safe_sub_u128, u128, checked_sub, CoreError::MathUnderflow);
safe_arith!(safe_mul_u128, u128, checked_mul, CoreError::MathOverflow);
safe_arith!(div, safe_div_u128, u128);

safe_arith!(safe_add_u64, u64, checked_add, CoreError::MathOverflow);
safe_arith!(safe_sub_u64, u64, checked_sub, CoreError::MathUnderflow);

/// Apply an integer percentage to an amount, truncating toward zero
pub fn apply_percentage(amount: u128, percentage: u8) -> CoreResult<u128> {
    safe_div_u128(safe_mul_u128(amount, percentage as u128)?, 100)
}
