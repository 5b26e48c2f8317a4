/// Simulation framework for testing the liquidity migrator
///
/// Provides utilities for:
/// - An in-memory journaled chain implementing every host capability
/// - Generating test accounts and tokens
/// - Seeding constant-product pairs and concentrated pools
/// - Assembling the standard migration fixture
pub mod account_factory;
pub mod chain;
pub mod concentrated;
pub mod events;
pub mod ledger;
pub mod pool_factory;
pub mod scenario_runner;
pub mod test_environment;
pub mod token_factory;
pub mod v2_pair;

pub use account_factory::{AccountFactory, TestAccount};
pub use chain::{SimulatedChain, TokenInfo, FACTORY_ADDRESS, POSITION_MANAGER_ADDRESS};
pub use concentrated::{ConcentratedPool, Position};
pub use events::ChainEvent;
pub use pool_factory::{PoolFactory, TestPair, TestPool};
pub use scenario_runner::{MigrationFixture, ScenarioRunner, TokenOrder};
pub use test_environment::TestEnvironment;
pub use token_factory::{TestToken, TokenFactory};
pub use v2_pair::PairState;

use migrator_core::host::HostError;
use migrator_core::CoreError;

/// Simulation setup errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Host error: {0}")]
    Host(#[from] HostError),

    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

/// Simulation result type
pub type SimulationResult<T> = std::result::Result<T, SimulationError>;
