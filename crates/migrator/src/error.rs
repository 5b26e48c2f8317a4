//! Error types for the migration engine

use migrator_core::host::HostError;
use migrator_core::{CoreError, PoolKey, Side};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MigrationError {
    #[error("Deadline expired: now {now}, deadline {deadline}")]
    DeadlineExpired { now: u64, deadline: u64 },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Source redemption failed: {0}")]
    SourceRedemptionFailed(String),

    #[error("Pool not initialized: {key}")]
    PoolNotInitialized { key: PoolKey },

    #[error("Slippage exceeded on asset {side:?}: used {used}, minimum {minimum}")]
    SlippageExceeded { side: Side, used: u128, minimum: u128 },

    #[error("Settlement failed: {0}")]
    SettlementFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Math error: {0}")]
    Math(#[from] CoreError),

    #[error("Host error: {0}")]
    Host(#[from] HostError),
}

/// Result type for engine operations
pub type MigratorResult<T> = Result<T, MigrationError>;

impl MigrationError {
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest(reason.into())
    }

    pub fn source_failed(reason: impl std::fmt::Display) -> Self {
        Self::SourceRedemptionFailed(reason.to_string())
    }

    pub fn settlement_failed(reason: impl std::fmt::Display) -> Self {
        Self::SettlementFailed(reason.to_string())
    }
}
