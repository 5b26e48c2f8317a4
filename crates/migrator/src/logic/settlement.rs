//! # Settlement
//!
//! Returns whatever the engine withdrew but did not deposit. A leftover
//! covers both the unmigrated percentage and the mint remainder. A wrapped
//! native leftover can be unwrapped and paid out as native currency.

use migrator_core::host::{NativeAsset, TokenLedger};
use migrator_core::{Address, Asset, Side, WithdrawnAmounts};
use tracing::debug;

use crate::config::MigratorConfig;
use crate::error::{MigrationError, MigratorResult};

/// Amounts paid back to the recipient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Refunds {
    pub refund_a: u128,
    pub refund_b: u128,
    /// Portion of the refunds paid as native currency
    pub refunded_native: u128,
}

/// Per-side leftovers, failing if more was used than withdrawn
pub fn compute_leftovers(
    withdrawn: WithdrawnAmounts,
    used_a: u128,
    used_b: u128,
) -> MigratorResult<(u128, u128)> {
    let leftover = |side: Side, have: u128, used: u128| {
        have.checked_sub(used).ok_or_else(|| {
            MigrationError::settlement_failed(format!(
                "asset {:?} used {} exceeds withdrawn {}",
                side, used, have
            ))
        })
    };
    Ok((
        leftover(Side::A, withdrawn.amount_a, used_a)?,
        leftover(Side::B, withdrawn.amount_b, used_b)?,
    ))
}

/// Pay every non-zero leftover to `recipient`
pub fn settle<H: TokenLedger + NativeAsset>(
    host: &mut H,
    engine: Address,
    recipient: Address,
    assets: [Asset; 2],
    refund_native_as_unwrapped: bool,
    leftovers: (u128, u128),
) -> MigratorResult<Refunds> {
    let mut refunded_native = 0u128;

    for (asset, amount) in assets.into_iter().zip([leftovers.0, leftovers.1]) {
        if amount == 0 {
            continue;
        }

        if refund_native_as_unwrapped && asset.is_wrapped_native {
            host.unwrap(asset.address, engine, amount)
                .map_err(MigrationError::settlement_failed)?;
            host.transfer_native(engine, recipient, amount)
                .map_err(MigrationError::settlement_failed)?;
            refunded_native += amount;
            debug!(%recipient, amount, "refunded native");
        } else {
            host.transfer(asset.address, engine, recipient, amount)
                .map_err(MigrationError::settlement_failed)?;
            debug!(token = %asset.address, %recipient, amount, "refunded token");
        }
    }

    Ok(Refunds {
        refund_a: leftovers.0,
        refund_b: leftovers.1,
        refunded_native,
    })
}

/// Engine holdings taken before a migration touches anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineBaseline {
    pub balances: [u128; 2],
    pub native: u128,
}

/// Record what the engine already holds of `assets` and in native currency
pub fn engine_baseline<H: TokenLedger + NativeAsset>(
    host: &H,
    config: &MigratorConfig,
    assets: [Asset; 2],
) -> MigratorResult<EngineBaseline> {
    Ok(EngineBaseline {
        balances: [
            host.balance_of(assets[0].address, config.engine)?,
            host.balance_of(assets[1].address, config.engine)?,
        ],
        native: host.native_balance_of(config.engine)?,
    })
}

/// Fail unless the engine is back to `baseline` and has granted nothing.
/// Holdings that predate the migration are left where they are.
pub fn verify_clean<H: TokenLedger + NativeAsset>(
    host: &H,
    config: &MigratorConfig,
    assets: [Asset; 2],
    baseline: &EngineBaseline,
) -> MigratorResult<()> {
    for (asset, before) in assets.into_iter().zip(baseline.balances) {
        let balance = host.balance_of(asset.address, config.engine)?;
        if balance != before {
            return Err(MigrationError::settlement_failed(format!(
                "engine holds {} of {}, expected {}",
                balance, asset.address, before
            )));
        }
        let allowance = host.allowance(asset.address, config.engine, config.position_manager)?;
        if allowance != 0 {
            return Err(MigrationError::settlement_failed(format!(
                "position manager retains allowance {} of {}",
                allowance, asset.address
            )));
        }
    }

    let native = host.native_balance_of(config.engine)?;
    if native != baseline.native {
        return Err(MigrationError::settlement_failed(format!(
            "engine holds {} native, expected {}",
            native, baseline.native
        )));
    }

    Ok(())
}
