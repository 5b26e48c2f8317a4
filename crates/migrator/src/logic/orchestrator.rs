//! # Migration Orchestrator
//!
//! Sequences a migration through its stages:
//!
//! ```text
//! Validating -> Withdrawing -> Minting -> Settling -> Done
//! ```
//!
//! Any failure exits through a single abort path that reverts the host to
//! the checkpoint taken before validation. Source effects always precede
//! destination effects, which precede settlement.

use std::fmt;

use migrator_core::host::MigrationHost;
use migrator_core::math::{apply_percentage, is_tick_valid, mul_div_u128, Rounding};
use migrator_core::oracle::{canonical_order, quote_mint};
use migrator_core::{
    Address, Asset, MigrationPreview, MigrationRequest, MigrationResult, Side, WithdrawnAmounts,
    MAX_MIGRATION_PERCENTAGE, U256,
};
use tracing::{debug, info, warn};

use crate::config::MigratorConfig;
use crate::error::{MigrationError, MigratorResult};
use crate::logic::multicall::{CallOutput, MigratorCall};
use crate::logic::pool_gateway::{
    ensure_pool, initialized_pool, mint_position, pool_key, require_fee_tier,
};
use crate::logic::settlement::{compute_leftovers, engine_baseline, settle, verify_clean};
use crate::logic::source_withdrawal::{pair_matches_request, withdraw};
use crate::logic::unit_of_work::atomically;

/// Stage a migration is in, reported when it aborts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationStage {
    Validating,
    Withdrawing,
    Minting,
    Settling,
    Done,
}

impl fmt::Display for MigrationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MigrationStage::Validating => "validating",
            MigrationStage::Withdrawing => "withdrawing",
            MigrationStage::Minting => "minting",
            MigrationStage::Settling => "settling",
            MigrationStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Migration engine bound to a host
pub struct Migrator<H> {
    config: MigratorConfig,
    host: H,
}

impl<H: MigrationHost> Migrator<H> {
    pub fn new(config: MigratorConfig, host: H) -> MigratorResult<Self> {
        config.validate()?;
        Ok(Self { config, host })
    }

    pub fn config(&self) -> &MigratorConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Move a constant-product position into a concentrated pool
    pub fn migrate(&mut self, request: &MigrationRequest) -> MigratorResult<MigrationResult> {
        run_migration(&mut self.host, &self.config, request)
    }

    /// Create and initialize the destination pool unless it already is
    pub fn create_and_initialize_pool_if_necessary(
        &mut self,
        asset_a: Address,
        asset_b: Address,
        fee: u32,
        sqrt_price_x96: U256,
    ) -> MigratorResult<Address> {
        atomically(&mut self.host, |host| {
            ensure_pool(host, asset_a, asset_b, fee, sqrt_price_x96)
        })
    }

    /// Execute `calls` in order as one atomic unit. The first failure
    /// reverts every earlier call and is returned.
    pub fn multicall(&mut self, calls: Vec<MigratorCall>) -> MigratorResult<Vec<CallOutput>> {
        let config = self.config;
        let count = calls.len();
        info!(calls = count, "multicall");

        atomically(&mut self.host, |host| {
            let mut outputs = Vec::with_capacity(count);
            for (index, call) in calls.into_iter().enumerate() {
                let output = match call {
                    MigratorCall::EnsurePool {
                        asset_a,
                        asset_b,
                        fee,
                        sqrt_price_x96,
                    } => atomically(host, |host| {
                        ensure_pool(host, asset_a, asset_b, fee, sqrt_price_x96)
                    })
                    .map(CallOutput::Pool),
                    MigratorCall::Migrate(request) => {
                        run_migration(host, &config, &request).map(CallOutput::Migration)
                    }
                };
                match output {
                    Ok(output) => outputs.push(output),
                    Err(err) => {
                        warn!(index, error = %err, "multicall element failed");
                        return Err(err);
                    }
                }
            }
            Ok(outputs)
        })
    }

    /// Estimate a migration against current state without changing it
    pub fn preview(&self, request: &MigrationRequest) -> MigratorResult<MigrationPreview> {
        let host = &self.host;
        let assets = validate_request(host.now(), &self.config, request)?;
        require_fee_tier(host, request.fee_tier)?;

        // Withdrawal estimate mirrors a pair burn: pro-rata of the reserves
        let a_is_token0 = pair_matches_request(host, request)?;
        let reserves = host
            .pair_reserves(request.source_pool)
            .map_err(MigrationError::source_failed)?;
        if request.liquidity_to_migrate > reserves.total_supply {
            return Err(MigrationError::source_failed(format!(
                "{} shares exceed total supply {}",
                request.liquidity_to_migrate, reserves.total_supply
            )));
        }
        let amount0 = mul_div_u128(
            request.liquidity_to_migrate,
            reserves.reserve0,
            reserves.total_supply,
            Rounding::Down,
        )?;
        let amount1 = mul_div_u128(
            request.liquidity_to_migrate,
            reserves.reserve1,
            reserves.total_supply,
            Rounding::Down,
        )?;
        let withdrawn = if a_is_token0 {
            WithdrawnAmounts {
                amount_a: amount0,
                amount_b: amount1,
            }
        } else {
            WithdrawnAmounts {
                amount_a: amount1,
                amount_b: amount0,
            }
        };

        let amount_a_to_migrate = apply_percentage(withdrawn.amount_a, request.migration_percentage)?;
        let amount_b_to_migrate = apply_percentage(withdrawn.amount_b, request.migration_percentage)?;

        let key = pool_key(request.asset_a, request.asset_b, request.fee_tier)?;
        let (sqrt_price_x96, initializes_pool) = match initialized_pool(host, &key)? {
            Some((_, state)) => (state.sqrt_price_x96, false),
            None => match request.initial_sqrt_price {
                Some(price) => (price, true),
                None => return Err(MigrationError::PoolNotInitialized { key }),
            },
        };

        let pair = canonical_order(request.asset_a, request.asset_b)?;
        let (available0, available1) = pair.to_canonical(amount_a_to_migrate, amount_b_to_migrate);
        let quote = quote_mint(
            sqrt_price_x96,
            request.tick_lower,
            request.tick_upper,
            available0,
            available1,
        )?;
        let (amount_a_deposited, amount_b_deposited) =
            pair.from_canonical(quote.amount0, quote.amount1);
        let (refund_a, refund_b) =
            compute_leftovers(withdrawn, amount_a_deposited, amount_b_deposited)?;

        debug!(?assets, liquidity = quote.liquidity, "previewed migration");

        Ok(MigrationPreview {
            withdrawn,
            amount_a_to_migrate,
            amount_b_to_migrate,
            liquidity: quote.liquidity,
            amount_a_deposited,
            amount_b_deposited,
            refund_a,
            refund_b,
            meets_minimums: amount_a_deposited >= request.min_amount_a
                && amount_b_deposited >= request.min_amount_b,
            initializes_pool,
        })
    }
}

/// One atomic migration with start/finish logging
fn run_migration<H: MigrationHost>(
    host: &mut H,
    config: &MigratorConfig,
    request: &MigrationRequest,
) -> MigratorResult<MigrationResult> {
    info!(
        source_pool = %request.source_pool,
        liquidity = request.liquidity_to_migrate,
        percentage = request.migration_percentage,
        fee = request.fee_tier,
        "starting migration"
    );

    let mut stage = MigrationStage::Validating;
    let outcome = atomically(host, |host| execute(host, config, request, &mut stage));

    match &outcome {
        Ok(result) => info!(
            pool = %result.pool,
            position_id = result.position_id,
            liquidity = result.liquidity_minted,
            refund_a = result.refund_a,
            refund_b = result.refund_b,
            "migration complete"
        ),
        Err(err) => warn!(%stage, error = %err, "migration aborted"),
    }
    outcome
}

fn enter(stage: &mut MigrationStage, next: MigrationStage) {
    debug!(from = %stage, to = %next, "stage transition");
    *stage = next;
}

fn execute<H: MigrationHost>(
    host: &mut H,
    config: &MigratorConfig,
    request: &MigrationRequest,
    stage: &mut MigrationStage,
) -> MigratorResult<MigrationResult> {
    let assets = validate_request(host.now(), config, request)?;
    require_fee_tier(&*host, request.fee_tier)?;
    let baseline = engine_baseline(&*host, config, assets)?;

    enter(stage, MigrationStage::Withdrawing);
    let withdrawn = withdraw(host, config.engine, request)?;
    let amount_a = apply_percentage(withdrawn.amount_a, request.migration_percentage)?;
    let amount_b = apply_percentage(withdrawn.amount_b, request.migration_percentage)?;

    enter(stage, MigrationStage::Minting);
    if let Some(price) = request.initial_sqrt_price {
        ensure_pool(host, request.asset_a, request.asset_b, request.fee_tier, price)?;
    }
    let minted = mint_position(host, config, request, amount_a, amount_b)?;

    for (side, used) in [(Side::A, minted.amount_a_used), (Side::B, minted.amount_b_used)] {
        let minimum = request.min_amount(side);
        if used < minimum {
            return Err(MigrationError::SlippageExceeded { side, used, minimum });
        }
    }

    enter(stage, MigrationStage::Settling);
    let leftovers = compute_leftovers(withdrawn, minted.amount_a_used, minted.amount_b_used)?;
    let refunds = settle(
        host,
        config.engine,
        request.recipient,
        assets,
        request.refund_native_as_unwrapped,
        leftovers,
    )?;
    verify_clean(&*host, config, assets, &baseline)?;

    enter(stage, MigrationStage::Done);
    Ok(MigrationResult {
        pool: minted.pool,
        position_id: minted.position_id,
        liquidity_minted: minted.liquidity,
        amount_a_deposited: minted.amount_a_used,
        amount_b_deposited: minted.amount_b_used,
        refund_a: refunds.refund_a,
        refund_b: refunds.refund_b,
        refunded_native: refunds.refunded_native,
    })
}

/// Check a request against the clock and its own invariants, resolving the
/// wrapped-native tag of both assets
fn validate_request(
    now: u64,
    config: &MigratorConfig,
    request: &MigrationRequest,
) -> MigratorResult<[Asset; 2]> {
    if now > request.deadline {
        return Err(MigrationError::DeadlineExpired {
            now,
            deadline: request.deadline,
        });
    }

    let pct = request.migration_percentage;
    if pct == 0 {
        return Err(MigrationError::invalid_request("percentage too small"));
    }
    if pct > MAX_MIGRATION_PERCENTAGE {
        return Err(MigrationError::invalid_request("percentage too large"));
    }

    if request.asset_a == request.asset_b {
        return Err(MigrationError::invalid_request("assets must differ"));
    }
    if request.asset_a.is_zero() || request.asset_b.is_zero() || request.recipient.is_zero() {
        return Err(MigrationError::invalid_request("zero address"));
    }
    if request.tick_lower >= request.tick_upper {
        return Err(MigrationError::invalid_request(format!(
            "tick_lower {} must be below tick_upper {}",
            request.tick_lower, request.tick_upper
        )));
    }
    if !is_tick_valid(request.tick_lower) || !is_tick_valid(request.tick_upper) {
        return Err(MigrationError::invalid_request("tick out of range"));
    }
    if request.liquidity_to_migrate == 0 {
        return Err(MigrationError::invalid_request("nothing to migrate"));
    }

    Ok([
        Asset::resolve(request.asset_a, config.wrapped_native),
        Asset::resolve(request.asset_b, config.wrapped_native),
    ])
}
