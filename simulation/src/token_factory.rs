use migrator_core::host::NativeAsset;
use migrator_core::Address;

use crate::{SimulationResult, TestEnvironment};

/// Factory for creating test tokens
pub struct TokenFactory<'a> {
    env: &'a mut TestEnvironment,
}

impl<'a> TokenFactory<'a> {
    /// Create a new token factory
    pub fn new(env: &'a mut TestEnvironment) -> Self {
        Self { env }
    }

    /// Register a plain fungible token
    pub fn create_token(&mut self, symbol: &str) -> TestToken {
        TestToken {
            address: self.env.chain.create_token(symbol),
            symbol: symbol.to_string(),
            is_wrapped_native: false,
        }
    }

    /// Deploy the wrapped native contract
    pub fn create_wrapped_native(&mut self, symbol: &str) -> SimulationResult<TestToken> {
        Ok(TestToken {
            address: self.env.chain.create_wrapped_native(symbol)?,
            symbol: symbol.to_string(),
            is_wrapped_native: true,
        })
    }

    /// Mint tokens to an account
    pub fn mint_to(&mut self, token: &TestToken, recipient: Address, amount: u128) -> SimulationResult<()> {
        self.env.chain.mint_tokens(token.address, recipient, amount)?;
        Ok(())
    }

    /// Wrap native currency the holder already owns, funding any shortfall
    pub fn wrap(&mut self, holder: Address, amount: u128) -> SimulationResult<()> {
        let native = self.env.chain.native_balance_of(holder)?;
        if native < amount {
            self.env.chain.fund_native(holder, amount - native)?;
        }
        self.env.chain.deposit(holder, amount)?;
        Ok(())
    }
}

/// Represents a test token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestToken {
    pub address: Address,
    pub symbol: String,
    pub is_wrapped_native: bool,
}

/// Order two tokens by address
pub fn sorted_tokens<'t>(a: &'t TestToken, b: &'t TestToken) -> (&'t TestToken, &'t TestToken) {
    if a.address < b.address {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migrator_core::host::TokenLedger;

    #[test]
    fn test_create_and_mint() {
        let mut env = TestEnvironment::new();
        let holder = env.next_address();
        let mut factory = TokenFactory::new(&mut env);

        let token = factory.create_token("TK1");
        let weth = factory.create_wrapped_native("WETH").unwrap();
        factory.mint_to(&token, holder, 500).unwrap();
        factory.wrap(holder, 40).unwrap();

        assert!(token.address < weth.address);
        assert_eq!(sorted_tokens(&weth, &token).0, &token);
        assert_eq!(env.chain.balance_of(token.address, holder).unwrap(), 500);
        assert_eq!(env.chain.balance_of(weth.address, holder).unwrap(), 40);
        assert_eq!(env.chain.wrapped_native(), Some(weth.address));
    }
}
