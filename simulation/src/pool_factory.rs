use migrator_core::host::{ConcentratedPools, TokenLedger};
use migrator_core::{Address, PoolKey, PoolState, U256};

use crate::{SimulationError, SimulationResult, TestEnvironment, TestToken};

/// Factory for creating test pairs and pools
pub struct PoolFactory<'a> {
    env: &'a mut TestEnvironment,
}

impl<'a> PoolFactory<'a> {
    /// Create a new pool factory
    pub fn new(env: &'a mut TestEnvironment) -> Self {
        Self { env }
    }

    /// Create a constant-product pair
    pub fn create_pair(&mut self, token_a: &TestToken, token_b: &TestToken) -> SimulationResult<TestPair> {
        let address = self.env.chain.create_pair(token_a.address, token_b.address)?;
        let (token0, token1) = if token_a.address < token_b.address {
            (token_a.address, token_b.address)
        } else {
            (token_b.address, token_a.address)
        };
        Ok(TestPair {
            address,
            token0,
            token1,
        })
    }

    /// Send `amount_a`/`amount_b` from `provider` to the pair and mint shares
    /// to `provider`. Returns the shares minted.
    pub fn add_pair_liquidity(
        &mut self,
        pair: &TestPair,
        provider: Address,
        token_a: Address,
        amount_a: u128,
        amount_b: u128,
    ) -> SimulationResult<u128> {
        let token_b = pair.other(token_a).ok_or_else(|| {
            SimulationError::InvalidParameter(format!("{} is not in pair {}", token_a, pair.address))
        })?;
        let chain = &mut self.env.chain;
        chain.transfer(token_a, provider, pair.address, amount_a)?;
        chain.transfer(token_b, provider, pair.address, amount_b)?;
        Ok(chain.mint_pair_liquidity(pair.address, provider)?)
    }

    /// Create a concentrated pool, initializing it when a price is given
    pub fn create_pool(
        &mut self,
        token_a: &TestToken,
        token_b: &TestToken,
        fee: u32,
        sqrt_price_x96: Option<U256>,
    ) -> SimulationResult<TestPool> {
        let key = PoolKey::new(token_a.address, token_b.address, fee)?;
        let address = self.env.chain.create_pool(&key)?;
        let state = match sqrt_price_x96 {
            Some(price) => Some(self.env.chain.initialize(address, price)?),
            None => None,
        };
        Ok(TestPool {
            address,
            key,
            state,
        })
    }
}

/// Represents a test pair
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TestPair {
    pub address: Address,
    pub token0: Address,
    pub token1: Address,
}

impl TestPair {
    /// The pair's other token
    pub fn other(&self, token: Address) -> Option<Address> {
        if token == self.token0 {
            Some(self.token1)
        } else if token == self.token1 {
            Some(self.token0)
        } else {
            None
        }
    }
}

/// Represents a test pool
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TestPool {
    pub address: Address,
    pub key: PoolKey,
    pub state: Option<PoolState>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenFactory;
    use migrator_core::math::encode_price_sqrt;
    use migrator_core::FEE_MEDIUM;

    #[test]
    fn test_pair_and_pool_creation() {
        let mut env = TestEnvironment::new();
        let provider = env.next_address();
        let mut tokens = TokenFactory::new(&mut env);
        let token_a = tokens.create_token("TK1");
        let token_b = tokens.create_token("TK2");
        tokens.mint_to(&token_a, provider, 10_000).unwrap();
        tokens.mint_to(&token_b, provider, 10_000).unwrap();

        let mut pools = PoolFactory::new(&mut env);
        let pair = pools.create_pair(&token_b, &token_a).unwrap();
        assert_eq!(pair.token0, token_a.address);
        let shares = pools
            .add_pair_liquidity(&pair, provider, token_b.address, 10_000, 10_000)
            .unwrap();
        assert_eq!(shares, 9_000);

        let pool = pools
            .create_pool(&token_a, &token_b, FEE_MEDIUM, Some(encode_price_sqrt(1, 1).unwrap()))
            .unwrap();
        assert_eq!(pool.state.map(|s| s.tick), Some(0));
        assert_eq!(env.chain.get_pool(&pool.key).unwrap(), Some(pool.address));
    }
}
