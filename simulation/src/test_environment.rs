use migrator_core::Address;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::chain::SimulatedChain;

/// Seed used when a test does not pick one
pub const DEFAULT_SEED: u64 = 0x5eed;

/// Chain time the environment starts at
pub const GENESIS_TIMESTAMP: u64 = 1;

/// Test environment for simulating migrations
pub struct TestEnvironment {
    pub chain: SimulatedChain,

    /// Account the engine holds balances under
    pub engine: Address,

    rng: StdRng,
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnvironment {
    /// Create a new test environment
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Environment whose generated addresses derive from `seed`
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let engine = random_address(&mut rng);

        let mut chain = SimulatedChain::new();
        chain.set_timestamp(GENESIS_TIMESTAMP);

        Self { chain, engine, rng }
    }

    /// Fresh address from the environment's generator
    pub fn next_address(&mut self) -> Address {
        random_address(&mut self.rng)
    }

    pub fn factory(&self) -> Address {
        self.chain.factory()
    }

    pub fn position_manager(&self) -> Address {
        self.chain.position_manager()
    }

    /// Advance the clock by a number of seconds
    pub fn advance_clock(&mut self, seconds: u64) {
        self.chain.advance_time(seconds);
    }

    pub fn into_chain(self) -> SimulatedChain {
        self.chain
    }
}

fn random_address(rng: &mut StdRng) -> Address {
    let mut bytes = [0u8; 20];
    rng.fill(&mut bytes[..]);
    Address::new(bytes)
}
