//! # Core Error Types
//!
//! Math and validation errors shared by the engine and every host
//! implementation.

use thiserror::Error;

/// Errors raised by pure computations in this crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoreError {
    // ========================================================================
    // Math Errors
    // ========================================================================
    #[error("Math overflow")]
    MathOverflow,

    #[error("Math underflow")]
    MathUnderflow,

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Mul div overflow")]
    MulDivOverflow,

    #[error("Conversion error")]
    ConversionError,

    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Tick {0} out of range")]
    TickOutOfRange(i32),

    #[error("Sqrt price out of range")]
    SqrtPriceOutOfRange,

    #[error("Invalid tick range: lower {lower} must be below upper {upper}")]
    InvalidTickRange { lower: i32, upper: i32 },

    #[error("Identical assets")]
    IdenticalAssets,

    #[error("Zero address")]
    ZeroAddress,

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid amount")]
    InvalidAmount,
}

/// Result type using core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create an invalid tick range error
    pub fn invalid_tick_range(lower: i32, upper: i32) -> Self {
        Self::InvalidTickRange { lower, upper }
    }

    /// Create an invalid address error with the rejected input
    pub fn invalid_address(input: &str) -> Self {
        Self::InvalidAddress(input.to_string())
    }
}
