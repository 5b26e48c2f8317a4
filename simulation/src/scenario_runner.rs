use tracing::info;

use crate::{
    AccountFactory, PoolFactory, SimulationResult, TestAccount, TestEnvironment, TestPair,
    TestToken, TokenFactory,
};

/// Balance of each fixture token minted to the wallet
pub const FIXTURE_TOKEN_SUPPLY: u128 = u128::MAX / 2;

/// Native currency wrapped by the wallet during setup
pub const FIXTURE_WRAPPED_DEPOSIT: u128 = 10_000;

/// Amount of each token seeded into the pair
pub const FIXTURE_PAIR_LIQUIDITY: u128 = 10_000;

/// Where the fixture token sorts relative to the wrapped native token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenOrder {
    /// The plain token is token0
    TokenLower,
    /// The wrapped native token is token0
    TokenHigher,
}

/// Standard migration setup: a funded wallet, three tokens sorted by
/// address, the wrapped native token and a seeded pair between the lowest
/// token and the wrapped native token
#[derive(Debug, Clone)]
pub struct MigrationFixture {
    pub wallet: TestAccount,
    pub tokens: [TestToken; 3],
    pub wrapped_native: TestToken,
    pub pair: TestPair,
    /// Shares the wallet received from the pair
    pub shares: u128,
}

impl MigrationFixture {
    /// Token paired with the wrapped native token
    pub fn token(&self) -> &TestToken {
        &self.tokens[0]
    }

    pub fn token_lower(&self) -> bool {
        self.token().address < self.wrapped_native.address
    }
}

/// High-level scenario runner for migration tests
pub struct ScenarioRunner {
    pub env: TestEnvironment,
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioRunner {
    /// Create a new scenario runner
    pub fn new() -> Self {
        Self {
            env: TestEnvironment::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            env: TestEnvironment::with_seed(seed),
        }
    }

    /// Build the standard migration fixture
    pub fn run_migration_fixture(&mut self, order: TokenOrder) -> SimulationResult<MigrationFixture> {
        let wallet = AccountFactory::new(&mut self.env).create_liquidity_provider()?;

        let mut token_factory = TokenFactory::new(&mut self.env);
        let (mut tokens, wrapped_native) = match order {
            TokenOrder::TokenLower => {
                let tokens = create_fixture_tokens(&mut token_factory);
                (tokens, token_factory.create_wrapped_native("WETH")?)
            }
            TokenOrder::TokenHigher => {
                let wrapped = token_factory.create_wrapped_native("WETH")?;
                (create_fixture_tokens(&mut token_factory), wrapped)
            }
        };
        tokens.sort_by(|a, b| a.address.cmp(&b.address));

        for token in &tokens {
            token_factory.mint_to(token, wallet.address, FIXTURE_TOKEN_SUPPLY)?;
        }
        token_factory.wrap(wallet.address, FIXTURE_WRAPPED_DEPOSIT)?;

        let token = tokens[0].clone();
        let mut pool_factory = PoolFactory::new(&mut self.env);
        let pair = pool_factory.create_pair(&token, &wrapped_native)?;
        let shares = pool_factory.add_pair_liquidity(
            &pair,
            wallet.address,
            token.address,
            FIXTURE_PAIR_LIQUIDITY,
            FIXTURE_PAIR_LIQUIDITY,
        )?;

        info!(
            pair = %pair.address,
            token = %token.address,
            wrapped_native = %wrapped_native.address,
            shares,
            "migration fixture ready"
        );

        Ok(MigrationFixture {
            wallet,
            tokens,
            wrapped_native,
            pair,
            shares,
        })
    }
}

fn create_fixture_tokens(factory: &mut TokenFactory<'_>) -> [TestToken; 3] {
    [
        factory.create_token("TK1"),
        factory.create_token("TK2"),
        factory.create_token("TK3"),
    ]
}
