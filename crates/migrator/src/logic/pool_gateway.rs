//! # Target Pool Gateway
//!
//! Everything the engine does against the concentrated-liquidity side:
//! making sure a pool exists and is priced, and minting a position into it
//! under a scoped allowance to the position manager.

use migrator_core::host::{ConcentratedPools, HostError, TokenLedger};
use migrator_core::math::is_sqrt_price_valid;
use migrator_core::oracle::{canonical_order, quote_mint, CanonicalPair};
use migrator_core::{Address, CoreError, MintParams, MigrationRequest, PoolKey, PoolState, U256};
use tracing::debug;

use crate::config::MigratorConfig;
use crate::error::{MigrationError, MigratorResult};

/// Position minted on behalf of a migration, in caller labelling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintedPosition {
    pub pool: Address,
    pub position_id: u64,
    pub liquidity: u128,
    pub amount_a_used: u128,
    pub amount_b_used: u128,
}

/// Canonical key for a caller-labelled asset pair
pub fn pool_key(asset_a: Address, asset_b: Address, fee: u32) -> MigratorResult<PoolKey> {
    PoolKey::new(asset_a, asset_b, fee).map_err(|err| match err {
        CoreError::IdenticalAssets => MigrationError::invalid_request("assets must differ"),
        other => MigrationError::Math(other),
    })
}

/// Spacing for `fee`, rejecting tiers the factory has not enabled
pub fn require_fee_tier<H: ConcentratedPools>(host: &H, fee: u32) -> MigratorResult<i32> {
    host.tick_spacing(fee)?
        .ok_or_else(|| MigrationError::invalid_request(format!("unsupported fee tier {}", fee)))
}

/// Pool address and price for `key`, if the pool exists and is initialized
pub fn initialized_pool<H: ConcentratedPools>(
    host: &H,
    key: &PoolKey,
) -> MigratorResult<Option<(Address, PoolState)>> {
    let Some(pool) = host.get_pool(key)? else {
        return Ok(None);
    };
    Ok(host.pool_state(pool)?.map(|state| (pool, state)))
}

/// Create and initialize the pool for the pair if necessary.
///
/// Absent pools are created then initialized at `sqrt_price_x96`; present but
/// uninitialized pools are initialized; initialized pools are left alone and
/// the supplied price is ignored.
pub fn ensure_pool<H: ConcentratedPools>(
    host: &mut H,
    asset_a: Address,
    asset_b: Address,
    fee: u32,
    sqrt_price_x96: U256,
) -> MigratorResult<Address> {
    let key = pool_key(asset_a, asset_b, fee)?;
    require_fee_tier(&*host, fee)?;

    let pool = match host.get_pool(&key)? {
        Some(pool) => pool,
        None => {
            let pool = host.create_pool(&key)?;
            debug!(%key, %pool, "created pool");
            pool
        }
    };

    if host.pool_state(pool)?.is_none() {
        if !is_sqrt_price_valid(sqrt_price_x96) {
            return Err(MigrationError::invalid_request(format!(
                "initial sqrt price {} out of range",
                sqrt_price_x96
            )));
        }
        let state = host.initialize(pool, sqrt_price_x96)?;
        debug!(%pool, tick = state.tick, "initialized pool");
    }

    Ok(pool)
}

/// Mint a position with up to `amount_a`/`amount_b` of the request's assets.
///
/// The position manager is approved for exactly the available amounts and
/// any allowance it leaves unspent is reset to zero before returning.
pub fn mint_position<H: TokenLedger + ConcentratedPools>(
    host: &mut H,
    config: &MigratorConfig,
    request: &MigrationRequest,
    amount_a: u128,
    amount_b: u128,
) -> MigratorResult<MintedPosition> {
    let key = pool_key(request.asset_a, request.asset_b, request.fee_tier)?;
    let pair: CanonicalPair = canonical_order(request.asset_a, request.asset_b)?;

    let (pool, state) =
        initialized_pool(&*host, &key)?.ok_or(MigrationError::PoolNotInitialized { key })?;

    let (amount0, amount1) = pair.to_canonical(amount_a, amount_b);
    let quote = quote_mint(
        state.sqrt_price_x96,
        request.tick_lower,
        request.tick_upper,
        amount0,
        amount1,
    )?;
    if quote.is_empty() {
        return Err(MigrationError::invalid_request(
            "migrated amounts provide zero liquidity at the pool price",
        ));
    }
    debug!(
        %pool,
        liquidity = quote.liquidity,
        amount0 = quote.amount0,
        amount1 = quote.amount1,
        "quoted mint"
    );

    let spender = config.position_manager;
    host.approve(key.token0, config.engine, spender, amount0)?;
    host.approve(key.token1, config.engine, spender, amount1)?;

    let params = MintParams {
        key,
        tick_lower: request.tick_lower,
        tick_upper: request.tick_upper,
        amount0_desired: amount0,
        amount1_desired: amount1,
        recipient: request.recipient,
        deadline: request.deadline,
    };
    let receipt = host
        .mint(config.engine, &params)
        .map_err(|err| map_mint_error(err, key))?;

    if receipt.amount0 < amount0 {
        host.approve(key.token0, config.engine, spender, 0)?;
    }
    if receipt.amount1 < amount1 {
        host.approve(key.token1, config.engine, spender, 0)?;
    }

    let (amount_a_used, amount_b_used) = pair.from_canonical(receipt.amount0, receipt.amount1);
    debug!(
        position_id = receipt.position_id,
        liquidity = receipt.liquidity,
        amount_a_used,
        amount_b_used,
        "minted position"
    );

    Ok(MintedPosition {
        pool,
        position_id: receipt.position_id,
        liquidity: receipt.liquidity,
        amount_a_used,
        amount_b_used,
    })
}

fn map_mint_error(err: HostError, key: PoolKey) -> MigrationError {
    match err {
        HostError::DeadlinePassed { now, deadline } => {
            MigrationError::DeadlineExpired { now, deadline }
        }
        HostError::NotInitialized(_) => MigrationError::PoolNotInitialized { key },
        HostError::InvalidTickRange { .. } | HostError::TickNotAligned { .. } => {
            MigrationError::invalid_request(err.to_string())
        }
        HostError::ZeroLiquidity => MigrationError::invalid_request("zero liquidity"),
        other => MigrationError::Host(other),
    }
}
