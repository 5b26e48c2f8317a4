//! # Liquidity Migrator
//!
//! Engine that redeems a constant-product pair position and re-deposits the
//! proceeds into a concentrated-liquidity pool over a caller-chosen range,
//! refunding whatever the new position does not consume.
//!
//! The engine holds no chain state of its own. It drives a host implementing
//! [`migrator_core::host::MigrationHost`] and wraps every mutating operation in
//! a journal checkpoint so a failed attempt leaves no trace.

pub mod config;
pub mod error;
pub mod logic;

pub use config::MigratorConfig;
pub use error::{MigrationError, MigratorResult};
pub use logic::{CallOutput, MigrationStage, Migrator, MigratorCall};
