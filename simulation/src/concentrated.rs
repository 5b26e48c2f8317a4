//! Concentrated-liquidity factory, pools and position manager
//!
//! Pools hold their tokens in the ledger under the pool address. Minting
//! prices a position with the same Q64.96 math a production pool uses:
//! liquidity rounds down, owed amounts round up.

use migrator_core::host::{ConcentratedPools, HostError, HostResult, TokenLedger};
use migrator_core::math::{
    get_amounts_for_liquidity, get_liquidity_for_amounts, get_sqrt_ratio_at_tick,
    get_tick_at_sqrt_ratio, is_sqrt_price_valid, is_tick_valid,
};
use migrator_core::{Address, CoreError, MintParams, MintReceipt, PoolKey, PoolState, U256};
use tracing::debug;

use crate::chain::{SimulatedChain, POSITION_MANAGER_ADDRESS};
use crate::events::ChainEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcentratedPool {
    pub key: PoolKey,
    pub tick_spacing: i32,
    /// `None` until initialized
    pub state: Option<PoolState>,
    /// Liquidity active at the current tick
    pub liquidity: u128,
}

/// A numbered position held by the position manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub id: u64,
    pub owner: Address,
    pub pool: Address,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub liquidity: u128,
}

impl SimulatedChain {
    /// Position by id, numbered from 1
    pub fn position(&self, id: u64) -> Option<&Position> {
        let index = usize::try_from(id.checked_sub(1)?).ok()?;
        self.state.positions.get(index)
    }

    pub fn positions(&self) -> &[Position] {
        &self.state.positions
    }

    pub fn pool(&self, pool: Address) -> Option<&ConcentratedPool> {
        self.state.pools.get(&pool)
    }

    fn pool_record(&self, pool: Address) -> HostResult<&ConcentratedPool> {
        self.state.pools.get(&pool).ok_or(HostError::UnknownPool(pool))
    }

    fn check_ticks(lower: i32, upper: i32, spacing: i32) -> HostResult<()> {
        if lower >= upper || !is_tick_valid(lower) || !is_tick_valid(upper) {
            return Err(HostError::InvalidTickRange { lower, upper });
        }
        for tick in [lower, upper] {
            if tick % spacing != 0 {
                return Err(HostError::TickNotAligned { tick, spacing });
            }
        }
        Ok(())
    }
}

impl ConcentratedPools for SimulatedChain {
    fn tick_spacing(&self, fee: u32) -> HostResult<Option<i32>> {
        Ok(self.state.fee_tiers.get(&fee).copied())
    }

    fn get_pool(&self, key: &PoolKey) -> HostResult<Option<Address>> {
        Ok(self.state.pool_index.get(key).copied())
    }

    fn create_pool(&mut self, key: &PoolKey) -> HostResult<Address> {
        let tick_spacing = self
            .state
            .fee_tiers
            .get(&key.fee)
            .copied()
            .ok_or(HostError::UnsupportedFee(key.fee))?;
        if key.token0 >= key.token1 {
            return Err(CoreError::IdenticalAssets.into());
        }
        if self.state.pool_index.contains_key(key) {
            return Err(HostError::PoolAlreadyExists(*key));
        }

        let pool = self.allocate_address();
        self.state.pools.insert(
            pool,
            ConcentratedPool {
                key: *key,
                tick_spacing,
                state: None,
                liquidity: 0,
            },
        );
        self.state.pool_index.insert(*key, pool);
        self.emit(ChainEvent::PoolCreated { key: *key, pool });
        Ok(pool)
    }

    fn pool_state(&self, pool: Address) -> HostResult<Option<PoolState>> {
        Ok(self.pool_record(pool)?.state)
    }

    fn initialize(&mut self, pool: Address, sqrt_price_x96: U256) -> HostResult<PoolState> {
        if self.pool_record(pool)?.state.is_some() {
            return Err(HostError::AlreadyInitialized(pool));
        }
        if !is_sqrt_price_valid(sqrt_price_x96) {
            return Err(CoreError::SqrtPriceOutOfRange.into());
        }

        let tick = get_tick_at_sqrt_ratio(sqrt_price_x96)?;
        let state = PoolState {
            sqrt_price_x96,
            tick,
        };
        if let Some(record) = self.state.pools.get_mut(&pool) {
            record.state = Some(state);
        }
        self.emit(ChainEvent::Initialize {
            pool,
            sqrt_price_x96,
            tick,
        });
        Ok(state)
    }

    fn mint(&mut self, payer: Address, params: &MintParams) -> HostResult<MintReceipt> {
        let now = self.state.timestamp;
        if now > params.deadline {
            return Err(HostError::DeadlinePassed {
                now,
                deadline: params.deadline,
            });
        }

        let pool = self
            .state
            .pool_index
            .get(&params.key)
            .copied()
            .ok_or(HostError::UnknownPool(Address::ZERO))?;
        let record = self.pool_record(pool)?;
        let state = record.state.ok_or(HostError::NotInitialized(pool))?;
        Self::check_ticks(params.tick_lower, params.tick_upper, record.tick_spacing)?;

        let sqrt_lower = get_sqrt_ratio_at_tick(params.tick_lower)?;
        let sqrt_upper = get_sqrt_ratio_at_tick(params.tick_upper)?;
        let liquidity = get_liquidity_for_amounts(
            state.sqrt_price_x96,
            sqrt_lower,
            sqrt_upper,
            params.amount0_desired,
            params.amount1_desired,
        )?;
        if liquidity == 0 {
            return Err(HostError::ZeroLiquidity);
        }
        let (amount0, amount1) =
            get_amounts_for_liquidity(state.sqrt_price_x96, sqrt_lower, sqrt_upper, liquidity, true)?;

        if amount0 > 0 {
            self.transfer_from(params.key.token0, POSITION_MANAGER_ADDRESS, payer, pool, amount0)?;
        }
        if amount1 > 0 {
            self.transfer_from(params.key.token1, POSITION_MANAGER_ADDRESS, payer, pool, amount1)?;
        }

        if let Some(record) = self.state.pools.get_mut(&pool) {
            if params.tick_lower <= state.tick && state.tick < params.tick_upper {
                record.liquidity = record
                    .liquidity
                    .checked_add(liquidity)
                    .ok_or(CoreError::MathOverflow)?;
            }
        }

        let position_id = self.state.positions.len() as u64 + 1;
        self.state.positions.push(Position {
            id: position_id,
            owner: params.recipient,
            pool,
            tick_lower: params.tick_lower,
            tick_upper: params.tick_upper,
            liquidity,
        });
        self.emit(ChainEvent::IncreaseLiquidity {
            position_id,
            liquidity,
            amount0,
            amount1,
        });
        debug!(%pool, position_id, liquidity, amount0, amount1, "minted position");

        Ok(MintReceipt {
            position_id,
            liquidity,
            amount0,
            amount1,
        })
    }
}
