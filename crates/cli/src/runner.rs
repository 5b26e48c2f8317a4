//! Builds a simulated chain from a scenario and runs its migrations through
//! the engine

use std::collections::BTreeMap;

use anyhow::{anyhow, Context, Result};
use liquidity_migrator::{Migrator, MigratorConfig};
use migrator_core::host::{Clock, ConcentratedPools, TokenLedger};
use migrator_core::math::encode_price_sqrt;
use migrator_core::{
    max_usable_tick, min_usable_tick, standard_tick_spacing, Address, MigrationPreview,
    MigrationRequest, MigrationResult, U256,
};
use migrator_simulation::{
    AccountFactory, PoolFactory, SimulatedChain, TestEnvironment, TestToken, TokenFactory,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::{MigrationConfig, PriceRatio, ScenarioConfig};
use crate::error::ConfigError;

/// Everything a scenario run produced, printed as JSON
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub wallet: Address,
    pub engine: Address,
    pub tokens: BTreeMap<String, Address>,
    pub pairs: Vec<PairReport>,
    pub pools: Vec<PoolReport>,
    pub migrations: Vec<MigrationOutcome>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PairReport {
    pub name: String,
    pub address: Address,
    pub shares: u128,
}

#[derive(Debug, Clone, Serialize)]
pub struct PoolReport {
    pub name: String,
    pub address: Address,
    pub fee: u32,
    pub tick: i32,
}

/// Outcome of one configured migration
#[derive(Debug, Clone, Serialize)]
pub struct MigrationOutcome {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<MigrationPreview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<MigrationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScenarioReport {
    /// Number of migrations that did not complete
    pub fn failed(&self) -> usize {
        self.migrations.iter().filter(|m| m.result.is_none()).count()
    }
}

/// Build the scenario's chain, then run every migration in order. A failed
/// migration is recorded in the report and the run continues.
pub fn run_scenario(config: &ScenarioConfig) -> Result<ScenarioReport> {
    let mut env = TestEnvironment::with_seed(config.seed);
    let wallet = AccountFactory::new(&mut env)
        .create_account(config.wallet_native.into())?
        .address;

    let tokens = create_tokens(&mut env, config, wallet)?;
    let wrapped_native = lookup(&tokens, &config.wrapped_native.symbol)?.address;

    let mut pairs = Vec::with_capacity(config.pairs.len());
    for pair_config in &config.pairs {
        let token_a = lookup(&tokens, &pair_config.token_a)?;
        let token_b = lookup(&tokens, &pair_config.token_b)?;
        let name = format!("{}/{}", token_a.symbol, token_b.symbol);

        let mut factory = PoolFactory::new(&mut env);
        let pair = factory
            .create_pair(token_a, token_b)
            .with_context(|| format!("creating pair {}", name))?;
        let shares = factory
            .add_pair_liquidity(
                &pair,
                wallet,
                token_a.address,
                pair_config.amount_a.into(),
                pair_config.amount_b.into(),
            )
            .with_context(|| format!("seeding pair {}", name))?;
        info!(pair = %name, address = %pair.address, shares, "seeded pair");
        pairs.push(PairReport {
            name,
            address: pair.address,
            shares,
        });
    }

    let engine = env.engine;
    let migrator_config =
        MigratorConfig::new(engine, env.position_manager(), env.factory(), wrapped_native)?;
    let mut migrator = Migrator::new(migrator_config, env.into_chain())?;

    let mut pools = Vec::with_capacity(config.pools.len());
    for pool_config in &config.pools {
        let token_a = lookup(&tokens, &pool_config.token_a)?;
        let token_b = lookup(&tokens, &pool_config.token_b)?;
        let name = format!("{}/{}", token_a.symbol, token_b.symbol);

        let address = migrator
            .create_and_initialize_pool_if_necessary(
                token_a.address,
                token_b.address,
                pool_config.fee,
                sqrt_price(pool_config.price)?,
            )
            .with_context(|| format!("initializing pool {}", name))?;
        let tick = migrator
            .host()
            .pool_state(address)?
            .map(|state| state.tick)
            .ok_or_else(|| anyhow!("pool {} left uninitialized", name))?;
        info!(pool = %name, %address, tick, "initialized pool");
        pools.push(PoolReport {
            name,
            address,
            fee: pool_config.fee,
            tick,
        });
    }

    let mut migrations = Vec::with_capacity(config.migrations.len());
    for migration in &config.migrations {
        let request = build_request(migrator.host(), &tokens, wallet, migration)?;
        migrator
            .host_mut()
            .approve(request.source_pool, wallet, engine, request.liquidity_to_migrate)?;

        let preview = migrator.preview(&request).ok();
        let outcome = match migrator.migrate(&request) {
            Ok(result) => MigrationOutcome {
                name: migration.name.clone(),
                preview,
                result: Some(result),
                error: None,
            },
            Err(err) => {
                warn!(migration = %migration.name, error = %err, "migration failed");
                // Leave no share approval behind a failed attempt
                migrator.host_mut().approve(request.source_pool, wallet, engine, 0)?;
                MigrationOutcome {
                    name: migration.name.clone(),
                    preview,
                    result: None,
                    error: Some(err.to_string()),
                }
            }
        };
        migrations.push(outcome);
    }

    Ok(ScenarioReport {
        wallet,
        engine,
        tokens: tokens
            .iter()
            .map(|(symbol, token)| (symbol.clone(), token.address))
            .collect(),
        pairs,
        pools,
        migrations,
    })
}

fn create_tokens(
    env: &mut TestEnvironment,
    config: &ScenarioConfig,
    wallet: Address,
) -> Result<BTreeMap<String, TestToken>> {
    let mut factory = TokenFactory::new(env);
    let mut tokens = BTreeMap::new();

    for token_config in &config.tokens {
        let token = factory.create_token(&token_config.symbol);
        factory.mint_to(&token, wallet, token_config.supply.into())?;
        tokens.insert(token_config.symbol.clone(), token);
    }

    let wrapped = factory.create_wrapped_native(&config.wrapped_native.symbol)?;
    if config.wrapped_native.deposit > 0 {
        factory.wrap(wallet, config.wrapped_native.deposit.into())?;
    }
    tokens.insert(config.wrapped_native.symbol.clone(), wrapped);

    Ok(tokens)
}

fn lookup<'t>(tokens: &'t BTreeMap<String, TestToken>, symbol: &str) -> Result<&'t TestToken, ConfigError> {
    tokens
        .get(symbol)
        .ok_or_else(|| ConfigError::UnknownToken(symbol.to_string()))
}

fn sqrt_price(price: PriceRatio) -> Result<U256> {
    Ok(encode_price_sqrt(price.reserve1.into(), price.reserve0.into())?)
}

fn build_request(
    chain: &SimulatedChain,
    tokens: &BTreeMap<String, TestToken>,
    wallet: Address,
    migration: &MigrationConfig,
) -> Result<MigrationRequest> {
    let asset_a = lookup(tokens, &migration.token_a)?.address;
    let asset_b = lookup(tokens, &migration.token_b)?.address;
    let source_pool = chain.get_pair(asset_a, asset_b).ok_or_else(|| {
        anyhow!(
            "no pair for {}/{} in migration {}",
            migration.token_a,
            migration.token_b,
            migration.name
        )
    })?;

    let liquidity_to_migrate = match migration.shares {
        Some(shares) => shares.into(),
        None => chain.balance_of(source_pool, wallet)?,
    };
    let spacing = standard_tick_spacing(migration.fee)
        .ok_or_else(|| ConfigError::invalid_parameter("fee", migration.fee, "a standard fee tier"))?;

    Ok(MigrationRequest {
        sender: wallet,
        source_pool,
        liquidity_to_migrate,
        migration_percentage: migration.percentage,
        asset_a,
        asset_b,
        fee_tier: migration.fee,
        tick_lower: migration.tick_lower.unwrap_or_else(|| min_usable_tick(spacing)),
        tick_upper: migration.tick_upper.unwrap_or_else(|| max_usable_tick(spacing)),
        min_amount_a: migration.min_amount_a.into(),
        min_amount_b: migration.min_amount_b.into(),
        recipient: migration.recipient.unwrap_or(wallet),
        deadline: chain.now().saturating_add(migration.deadline_offset),
        refund_native_as_unwrapped: migration.refund_native,
        initial_sqrt_price: migration.initial_price.map(sqrt_price).transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::example_config;

    #[test]
    fn test_example_scenario_runs() {
        let report = run_scenario(&example_config()).unwrap();

        assert_eq!(report.failed(), 0);
        assert_eq!(report.pairs.len(), 2);
        assert!(report.pairs.iter().all(|p| p.shares == 9_000));
        assert_eq!(report.pools[0].tick, 0);

        let half = report.migrations[0].result.expect("first migration");
        assert_eq!(half.liquidity_minted, 4_500);
        assert_eq!(half.refunded_native, 4_500);
        assert_eq!(report.migrations[0].preview.map(|p| p.liquidity), Some(4_500));

        let created = report.migrations[1].result.expect("second migration");
        assert_eq!(created.liquidity_minted, 6_363);
        assert_ne!(created.pool, report.pools[0].address);
    }

    #[test]
    fn test_failed_migration_is_reported() {
        let mut config = example_config();
        config.migrations[1].initial_price = None;

        let report = run_scenario(&config).unwrap();
        assert_eq!(report.failed(), 1);
        let outcome = &report.migrations[1];
        assert!(outcome.result.is_none());
        assert!(outcome.error.as_deref().unwrap_or("").contains("Pool not initialized"));
    }

    #[test]
    fn test_report_serializes() {
        let report = run_scenario(&example_config()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["migrations"][0]["name"], "TK1 half at parity");
        assert!(json["migrations"][0].get("error").is_none());
        assert_eq!(json["wallet"], report.wallet.to_string());
    }
}
