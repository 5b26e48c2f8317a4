pub mod constants;
pub mod helpers;
pub mod tracing;

pub use constants::*;
pub use helpers::*;
pub use tracing::init_test_tracing;

use migrator_core::host::TokenLedger;
use migrator_core::Address;
use migrator_simulation::{
    MigrationFixture, ScenarioRunner, SimulationResult, TestEnvironment, TokenOrder,
};

/// Fixture environment shared by migration tests
pub struct TestContext {
    pub env: TestEnvironment,
    pub fixture: MigrationFixture,
}

impl TestContext {
    /// Standard fixture with the given token ordering
    pub fn new(order: TokenOrder) -> SimulationResult<Self> {
        init_test_tracing();
        let mut runner = ScenarioRunner::new();
        let fixture = runner.run_migration_fixture(order)?;
        Ok(Self {
            env: runner.env,
            fixture,
        })
    }

    pub fn wallet(&self) -> Address {
        self.fixture.wallet.address
    }

    pub fn token(&self) -> Address {
        self.fixture.token().address
    }

    pub fn wrapped_native(&self) -> Address {
        self.fixture.wrapped_native.address
    }

    pub fn pair(&self) -> Address {
        self.fixture.pair.address
    }

    /// `(token0, token1)` of the fixture pair
    pub fn sorted_tokens(&self) -> (Address, Address) {
        (self.fixture.pair.token0, self.fixture.pair.token1)
    }

    /// Let the engine pull `amount` of the wallet's pair shares
    pub fn approve_shares(&mut self, amount: u128) -> SimulationResult<()> {
        let (pair, wallet, engine) = (self.pair(), self.wallet(), self.env.engine);
        self.env.chain.approve(pair, wallet, engine, amount)?;
        Ok(())
    }

    pub fn into_parts(self) -> (TestEnvironment, MigrationFixture) {
        (self.env, self.fixture)
    }
}
