//! # Mathematical Functions
//!
//! Exact integer math for Q64.96 concentrated liquidity.

pub mod full_math;
pub mod liquidity_math;
pub mod safe_math;
pub mod sqrt_price_math;
pub mod tick_math;

// Re-export commonly used functions
pub use full_math::*;
pub use liquidity_math::*;
pub use safe_math::*;
pub use sqrt_price_math::*;
pub use tick_math::*;
