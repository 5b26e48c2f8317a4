use migrator_core::Address;

use crate::{SimulationResult, TestEnvironment};

/// Native balance handed to a generic test account
pub const DEFAULT_NATIVE_BALANCE: u128 = 1_000_000_000;

/// Factory for creating test accounts
pub struct AccountFactory<'a> {
    env: &'a mut TestEnvironment,
}

impl<'a> AccountFactory<'a> {
    /// Create a new account factory
    pub fn new(env: &'a mut TestEnvironment) -> Self {
        Self { env }
    }

    /// Create a new funded test account
    pub fn create_account(&mut self, native: u128) -> SimulationResult<TestAccount> {
        let address = self.env.next_address();
        if native > 0 {
            self.env.chain.fund_native(address, native)?;
        }
        Ok(TestAccount { address })
    }

    /// Create multiple funded test accounts
    pub fn create_accounts(&mut self, count: usize, native: u128) -> SimulationResult<Vec<TestAccount>> {
        (0..count).map(|_| self.create_account(native)).collect()
    }

    /// Create a liquidity provider account
    pub fn create_liquidity_provider(&mut self) -> SimulationResult<TestAccount> {
        self.create_account(DEFAULT_NATIVE_BALANCE)
    }
}

/// Represents a test account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestAccount {
    pub address: Address,
}

impl TestAccount {
    pub fn address(&self) -> Address {
        self.address
    }
}
