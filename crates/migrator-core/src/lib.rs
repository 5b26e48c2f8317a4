//! # Migrator Core - Shared Migration Logic
//!
//! This crate contains the types and integer math shared by the migration
//! engine, the simulation host and off-chain tooling. It provides:
//!
//! - Domain types for migration requests, results and pool identities
//! - Exact Q64.96 fixed-point math for concentrated liquidity
//! - The amount oracle used to quote deposits at a given price
//! - Capability traits for the external collaborators the engine drives
//!
//! ## Feature Flags
//!
//! - `serde`: Enables serde derives on the domain types

pub mod constants;
pub mod errors;
pub mod host;
pub mod math;
pub mod oracle;
pub mod types;

// Re-export commonly used items
pub use constants::*;
pub use errors::{CoreError, CoreResult};
pub use ethnum::U256;
pub use types::*;
