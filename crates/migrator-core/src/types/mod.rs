//! # Core Type Definitions
//!
//! Shared type definitions used by the engine, hosts and tooling.

pub mod address;
pub mod migration;
pub mod pool;

// Re-export all types
pub use address::*;
pub use migration::*;
pub use pool::*;
