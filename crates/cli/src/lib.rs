//! Scenario runner for the liquidity migrator
//!
//! Loads a TOML scenario, builds it on the simulated chain and runs each
//! configured migration through the engine.

pub mod config;
pub mod error;
pub mod runner;

pub use config::{create_example_config, example_config, MigrationConfig, ScenarioConfig};
pub use error::{ConfigError, ConfigResult};
pub use runner::{run_scenario, MigrationOutcome, ScenarioReport};
