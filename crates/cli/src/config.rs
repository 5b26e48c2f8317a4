use std::collections::BTreeSet;
use std::fs;

use migrator_core::{standard_tick_spacing, Address, MAX_MIGRATION_PERCENTAGE};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Scenario loaded from a TOML file: the chain to build and the migrations
/// to run against it
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScenarioConfig {
    /// Seed for generated account addresses
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Native currency the wallet starts with
    pub wallet_native: u64,

    pub wrapped_native: WrappedNativeConfig,

    /// Plain tokens minted to the wallet
    pub tokens: Vec<TokenConfig>,

    /// Constant-product pairs seeded by the wallet
    pub pairs: Vec<PairConfig>,

    /// Concentrated pools initialized before any migration
    #[serde(default)]
    pub pools: Vec<PoolConfig>,

    pub migrations: Vec<MigrationConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WrappedNativeConfig {
    pub symbol: String,
    /// Amount the wallet wraps during setup
    pub deposit: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TokenConfig {
    pub symbol: String,
    /// Balance minted to the wallet
    pub supply: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PairConfig {
    pub token_a: String,
    pub token_b: String,
    pub amount_a: u64,
    pub amount_b: u64,
}

/// Price as a reserve ratio, `reserve1 / reserve0` in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PriceRatio {
    pub reserve1: u64,
    pub reserve0: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PoolConfig {
    pub token_a: String,
    pub token_b: String,
    pub fee: u32,
    pub price: PriceRatio,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MigrationConfig {
    /// Name for logging and the report
    pub name: String,

    /// Pair assets; `token_a` is asset A of the request
    pub token_a: String,
    pub token_b: String,

    /// Shares to redeem; every share the wallet holds when omitted
    #[serde(default)]
    pub shares: Option<u64>,

    pub percentage: u8,
    pub fee: u32,

    /// Full usable range for the fee tier when omitted
    #[serde(default)]
    pub tick_lower: Option<i32>,
    #[serde(default)]
    pub tick_upper: Option<i32>,

    #[serde(default)]
    pub min_amount_a: u64,
    #[serde(default)]
    pub min_amount_b: u64,

    /// The wallet when omitted
    #[serde(default)]
    pub recipient: Option<Address>,

    /// Seconds past the chain clock the deadline sits at
    #[serde(default)]
    pub deadline_offset: u64,

    #[serde(default)]
    pub refund_native: bool,

    /// Price used if the destination pool is not initialized yet
    #[serde(default)]
    pub initial_price: Option<PriceRatio>,
}

fn default_seed() -> u64 {
    0x5eed
}

impl ScenarioConfig {
    /// Load configuration from TOML file
    pub fn load(path: &str) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate TOML text
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        let config: ScenarioConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: &str) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.tokens.is_empty() {
            return Err(ConfigError::invalid_parameter("tokens", "empty", "at least one token"));
        }
        if self.migrations.is_empty() {
            return Err(ConfigError::invalid_parameter(
                "migrations",
                "empty",
                "at least one migration",
            ));
        }

        let mut symbols = BTreeSet::new();
        for symbol in self
            .tokens
            .iter()
            .map(|t| &t.symbol)
            .chain(std::iter::once(&self.wrapped_native.symbol))
        {
            if symbol.is_empty() {
                return Err(ConfigError::invalid_parameter("symbol", "empty", "non-empty string"));
            }
            if !symbols.insert(symbol.as_str()) {
                return Err(ConfigError::invalid_parameter("symbol", symbol, "unique symbols"));
            }
        }
        let known = |symbol: &String| {
            if symbols.contains(symbol.as_str()) {
                Ok(())
            } else {
                Err(ConfigError::UnknownToken(symbol.clone()))
            }
        };

        for pair in &self.pairs {
            known(&pair.token_a)?;
            known(&pair.token_b)?;
            if pair.token_a == pair.token_b {
                return Err(ConfigError::invalid_parameter("pair", &pair.token_a, "two distinct tokens"));
            }
            if pair.amount_a == 0 || pair.amount_b == 0 {
                return Err(ConfigError::invalid_parameter("pair amount", 0, "greater than 0"));
            }
        }

        for pool in &self.pools {
            known(&pool.token_a)?;
            known(&pool.token_b)?;
            pool.price.validate()?;
        }

        for migration in &self.migrations {
            known(&migration.token_a)?;
            known(&migration.token_b)?;
            migration.validate()?;
        }

        Ok(())
    }
}

impl PriceRatio {
    fn validate(&self) -> ConfigResult<()> {
        if self.reserve0 == 0 || self.reserve1 == 0 {
            return Err(ConfigError::invalid_parameter(
                "price",
                format!("{}/{}", self.reserve1, self.reserve0),
                "non-zero reserves",
            ));
        }
        Ok(())
    }
}

impl MigrationConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.name.is_empty() {
            return Err(ConfigError::invalid_parameter("migration name", "empty", "non-empty string"));
        }
        if self.percentage == 0 || self.percentage > MAX_MIGRATION_PERCENTAGE {
            return Err(ConfigError::invalid_parameter("percentage", self.percentage, "1 to 100"));
        }
        if standard_tick_spacing(self.fee).is_none() {
            return Err(ConfigError::invalid_parameter("fee", self.fee, "500, 3000 or 10000"));
        }
        if self.shares == Some(0) {
            return Err(ConfigError::invalid_parameter("shares", 0, "greater than 0"));
        }
        if let Some(price) = &self.initial_price {
            price.validate()?;
        }
        Ok(())
    }
}

/// Create example configuration file
pub fn create_example_config(path: &str) -> ConfigResult<()> {
    example_config().save(path)
}

/// Two tokens paired with the wrapped native token. The first migrates half
/// its pair into a pool already priced at parity and takes the wrapped
/// leftover as native currency; the second creates its pool at twice the
/// parity price.
pub fn example_config() -> ScenarioConfig {
    let pair = |token: &str| PairConfig {
        token_a: token.to_string(),
        token_b: "WETH".to_string(),
        amount_a: 10_000,
        amount_b: 10_000,
    };
    let migration = |name: &str, token: &str| MigrationConfig {
        name: name.to_string(),
        token_a: token.to_string(),
        token_b: "WETH".to_string(),
        shares: None,
        percentage: 100,
        fee: 3_000,
        tick_lower: None,
        tick_upper: None,
        min_amount_a: 0,
        min_amount_b: 0,
        recipient: None,
        deadline_offset: 0,
        refund_native: false,
        initial_price: None,
    };

    ScenarioConfig {
        seed: default_seed(),
        wallet_native: 1_000_000,
        wrapped_native: WrappedNativeConfig {
            symbol: "WETH".to_string(),
            deposit: 20_000,
        },
        tokens: vec![
            TokenConfig {
                symbol: "TK1".to_string(),
                supply: 1_000_000,
            },
            TokenConfig {
                symbol: "TK2".to_string(),
                supply: 1_000_000,
            },
        ],
        pairs: vec![pair("TK1"), pair("TK2")],
        pools: vec![PoolConfig {
            token_a: "TK1".to_string(),
            token_b: "WETH".to_string(),
            fee: 3_000,
            price: PriceRatio {
                reserve1: 1,
                reserve0: 1,
            },
        }],
        migrations: vec![
            MigrationConfig {
                percentage: 50,
                refund_native: true,
                ..migration("TK1 half at parity", "TK1")
            },
            MigrationConfig {
                initial_price: Some(PriceRatio {
                    reserve1: 2,
                    reserve0: 1,
                }),
                ..migration("TK2 into new pool", "TK2")
            },
        ],
    }
}
