//! # Source Withdrawal
//!
//! Redeems constant-product pair shares for the two underlying assets. The
//! shares move from the sender straight to the pair on the engine's
//! allowance, then the pair burns what it holds of itself and pays the engine.

use migrator_core::host::{SourcePools, TokenLedger};
use migrator_core::{Address, MigrationRequest, WithdrawnAmounts};
use tracing::debug;

use crate::error::{MigrationError, MigratorResult};

/// Check that `pair` trades exactly the request's two assets and report
/// whether its token0 is asset A
pub fn pair_matches_request<H: SourcePools>(
    host: &H,
    request: &MigrationRequest,
) -> MigratorResult<bool> {
    let (token0, token1) = host
        .pair_tokens(request.source_pool)
        .map_err(MigrationError::source_failed)?;

    if token0 == request.asset_a && token1 == request.asset_b {
        Ok(true)
    } else if token0 == request.asset_b && token1 == request.asset_a {
        Ok(false)
    } else {
        Err(MigrationError::source_failed(format!(
            "pair {} trades {}/{}, not the requested assets",
            request.source_pool, token0, token1
        )))
    }
}

/// Redeem `request.liquidity_to_migrate` shares and return the proceeds in
/// the caller's asset labelling
pub fn withdraw<H: TokenLedger + SourcePools>(
    host: &mut H,
    engine: Address,
    request: &MigrationRequest,
) -> MigratorResult<WithdrawnAmounts> {
    let pair = request.source_pool;
    let a_is_token0 = pair_matches_request(&*host, request)?;

    let before_a = host
        .balance_of(request.asset_a, engine)
        .map_err(MigrationError::source_failed)?;
    let before_b = host
        .balance_of(request.asset_b, engine)
        .map_err(MigrationError::source_failed)?;

    host.transfer_from(
        pair,
        engine,
        request.sender,
        pair,
        request.liquidity_to_migrate,
    )
    .map_err(MigrationError::source_failed)?;
    debug!(%pair, shares = request.liquidity_to_migrate, "moved shares to pair");

    let (amount0, amount1) = host
        .redeem(pair, engine)
        .map_err(MigrationError::source_failed)?;

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

    // The pair's report must be backed by what actually arrived
    let received_a = host
        .balance_of(request.asset_a, engine)
        .map_err(MigrationError::source_failed)?
        .saturating_sub(before_a);
    let received_b = host
        .balance_of(request.asset_b, engine)
        .map_err(MigrationError::source_failed)?
        .saturating_sub(before_b);

    if received_a < withdrawn.amount_a || received_b < withdrawn.amount_b {
        return Err(MigrationError::source_failed(format!(
            "pair reported ({}, {}) but engine received ({}, {})",
            withdrawn.amount_a, withdrawn.amount_b, received_a, received_b
        )));
    }

    debug!(
        amount_a = withdrawn.amount_a,
        amount_b = withdrawn.amount_b,
        "redeemed source shares"
    );
    Ok(withdrawn)
}
