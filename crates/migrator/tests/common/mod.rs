//! Shared harness for engine integration tests
//!
//! Builds the standard migration fixture on a simulated chain and wraps it
//! in a `Migrator` configured against that chain.

#![allow(dead_code, unused_imports)]

pub mod assertions;
pub mod builders;

pub use assertions::MigrationAssertions;
pub use builders::MigrationRequestBuilder;

pub use liquidity_migrator::{
    CallOutput, MigrationError, Migrator, MigratorCall, MigratorConfig, MigratorResult,
};
pub use migrator_core::host::{ConcentratedPools, TokenLedger};
pub use migrator_core::{Address, MigrationResult, PoolKey, Side, U256};
pub use migrator_simulation::{SimulatedChain, TokenOrder};
pub use migrator_test_utils::*;

/// Both token orderings, for tests that run once per ordering
pub const ORDERS: [TokenOrder; 2] = [TokenOrder::TokenLower, TokenOrder::TokenHigher];

/// Engine plus the fixture it operates on
pub struct Harness {
    pub migrator: Migrator<SimulatedChain>,
    pub wallet: Address,
    pub token: Address,
    pub wrapped_native: Address,
    pub pair: Address,
    pub token0: Address,
    pub token1: Address,
    /// Other fixture tokens, unrelated to the pair
    pub spare_tokens: [Address; 2],
}

impl Harness {
    pub fn new(order: TokenOrder) -> Self {
        let ctx = TestContext::new(order).expect("fixture");
        let (token0, token1) = ctx.sorted_tokens();
        let (wallet, token, wrapped_native, pair) =
            (ctx.wallet(), ctx.token(), ctx.wrapped_native(), ctx.pair());
        let (env, fixture) = ctx.into_parts();

        let config = MigratorConfig::new(
            env.engine,
            env.position_manager(),
            env.factory(),
            wrapped_native,
        )
        .expect("valid config");
        let migrator = Migrator::new(config, env.into_chain()).expect("engine");

        Self {
            migrator,
            wallet,
            token,
            wrapped_native,
            pair,
            token0,
            token1,
            spare_tokens: [fixture.tokens[1].address, fixture.tokens[2].address],
        }
    }

    pub fn chain(&self) -> &SimulatedChain {
        self.migrator.host()
    }

    pub fn chain_mut(&mut self) -> &mut SimulatedChain {
        self.migrator.host_mut()
    }

    pub fn engine(&self) -> Address {
        self.migrator.config().engine
    }

    pub fn position_manager(&self) -> Address {
        self.migrator.config().position_manager
    }

    pub fn token_lower(&self) -> bool {
        self.token == self.token0
    }

    /// Let the engine pull `amount` of the wallet's shares
    pub fn approve_shares(&mut self, amount: u128) {
        let (pair, wallet, engine) = (self.pair, self.wallet, self.engine());
        self.chain_mut()
            .approve(pair, wallet, engine, amount)
            .expect("approve shares");
    }

    /// Create and initialize the fixture's destination pool at `price`
    pub fn initialize_pool(&mut self, price: U256) -> Address {
        let (token, wrapped) = (self.token, self.wrapped_native);
        self.migrator
            .create_and_initialize_pool_if_necessary(token, wrapped, FEE_MEDIUM, price)
            .expect("pool initialized")
    }

    pub fn pool_key(&self) -> PoolKey {
        PoolKey::new(self.token, self.wrapped_native, FEE_MEDIUM).expect("pool key")
    }

    pub fn pool_address(&self) -> Option<Address> {
        self.chain().get_pool(&self.pool_key()).expect("pool lookup")
    }

    /// Full-range request for every share the wallet holds, with the
    /// fixture token as asset A
    pub fn request(&self) -> MigrationRequestBuilder {
        MigrationRequestBuilder::new(self.wallet, self.pair, self.token, self.wrapped_native)
    }

    pub fn migrate(&mut self, builder: MigrationRequestBuilder) -> MigratorResult<MigrationResult> {
        self.migrator.migrate(&builder.build())
    }

    pub fn balance(&self, token: Address, holder: Address) -> u128 {
        token_balance(self.chain(), token, holder)
    }

    pub fn shares(&self) -> u128 {
        self.balance(self.pair, self.wallet)
    }

    pub fn native(&self, holder: Address) -> u128 {
        native_balance(self.chain(), holder)
    }

    /// The engine holds nothing and has approved nothing
    pub fn assert_engine_clean(&self) {
        assert_engine_clean(
            self.chain(),
            self.engine(),
            self.position_manager(),
            &[self.token, self.wrapped_native, self.pair],
        );
    }
}
