//! Constant-product pairs
//!
//! A pair's share token lives in the ledger under the pair's own address.
//! Minting and burning follow the usual flow: tokens (or shares) are sent to
//! the pair first, then `mint`/`redeem` settles the difference against the
//! recorded reserves.

use integer_sqrt::IntegerSquareRoot;
use migrator_core::host::{HostError, HostResult, SourcePools, TokenLedger};
use migrator_core::math::{mul_div_u128, Rounding};
use migrator_core::{sort_tokens, Address, CoreError, PairReserves, MINIMUM_LIQUIDITY};
use tracing::debug;

use crate::chain::{SimulatedChain, TokenInfo};
use crate::events::ChainEvent;
use crate::{SimulationError, SimulationResult};

/// Share symbol used for every pair
pub const PAIR_SYMBOL: &str = "UNI-V2";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairState {
    pub token0: Address,
    pub token1: Address,
    pub reserve0: u128,
    pub reserve1: u128,
    pub total_supply: u128,
}

impl SimulatedChain {
    /// Create the pair for two tokens
    pub fn create_pair(&mut self, token_a: Address, token_b: Address) -> SimulationResult<Address> {
        let (token0, token1) = sort_tokens(token_a, token_b)?;
        if let Some(existing) = self.get_pair(token0, token1) {
            return Err(SimulationError::InvalidParameter(format!(
                "pair already exists at {}",
                existing
            )));
        }
        for token in [token0, token1] {
            if !self.state.tokens.contains_key(&token) {
                return Err(HostError::UnknownToken(token).into());
            }
        }

        let pair = self.allocate_address();
        self.state.tokens.insert(
            pair,
            TokenInfo {
                symbol: PAIR_SYMBOL.to_string(),
            },
        );
        self.state.pairs.insert(
            pair,
            PairState {
                token0,
                token1,
                reserve0: 0,
                reserve1: 0,
                total_supply: 0,
            },
        );
        self.state.pair_index.insert((token0, token1), pair);
        self.emit(ChainEvent::PairCreated {
            token0,
            token1,
            pair,
        });
        debug!(%pair, %token0, %token1, "created pair");
        Ok(pair)
    }

    /// Pair for two tokens in either order
    pub fn get_pair(&self, token_a: Address, token_b: Address) -> Option<Address> {
        let (token0, token1) = sort_tokens(token_a, token_b).ok()?;
        self.state.pair_index.get(&(token0, token1)).copied()
    }

    /// Mint shares to `to` for the tokens sent to `pair` since the last sync.
    /// The first mint locks the minimum liquidity at the zero address.
    pub fn mint_pair_liquidity(&mut self, pair: Address, to: Address) -> HostResult<u128> {
        let state = self.pair(pair)?.clone();
        let balance0 = self.balance_of(state.token0, pair)?;
        let balance1 = self.balance_of(state.token1, pair)?;
        let amount0 = balance0.checked_sub(state.reserve0).ok_or(CoreError::MathUnderflow)?;
        let amount1 = balance1.checked_sub(state.reserve1).ok_or(CoreError::MathUnderflow)?;

        let liquidity = if state.total_supply == 0 {
            let product = amount0.checked_mul(amount1).ok_or(CoreError::MathOverflow)?;
            let root = product.integer_sqrt();
            if root <= MINIMUM_LIQUIDITY {
                return Err(HostError::InsufficientLiquidityMinted);
            }
            self.mint_shares(pair, Address::ZERO, MINIMUM_LIQUIDITY)?;
            root - MINIMUM_LIQUIDITY
        } else {
            let by0 = mul_div_u128(amount0, state.total_supply, state.reserve0, Rounding::Down)?;
            let by1 = mul_div_u128(amount1, state.total_supply, state.reserve1, Rounding::Down)?;
            by0.min(by1)
        };
        if liquidity == 0 {
            return Err(HostError::InsufficientLiquidityMinted);
        }

        self.mint_shares(pair, to, liquidity)?;
        self.sync(pair, balance0, balance1)?;
        self.emit(ChainEvent::Mint {
            pair,
            amount0,
            amount1,
        });
        Ok(liquidity)
    }

    fn pair(&self, pair: Address) -> HostResult<&PairState> {
        self.state.pairs.get(&pair).ok_or(HostError::UnknownPair(pair))
    }

    fn pair_mut(&mut self, pair: Address) -> HostResult<&mut PairState> {
        self.state.pairs.get_mut(&pair).ok_or(HostError::UnknownPair(pair))
    }

    fn mint_shares(&mut self, pair: Address, to: Address, amount: u128) -> HostResult<()> {
        let state = self.pair_mut(pair)?;
        state.total_supply = state
            .total_supply
            .checked_add(amount)
            .ok_or(CoreError::MathOverflow)?;
        self.mint_tokens(pair, to, amount)
    }

    fn sync(&mut self, pair: Address, balance0: u128, balance1: u128) -> HostResult<()> {
        let state = self.pair_mut(pair)?;
        state.reserve0 = balance0;
        state.reserve1 = balance1;
        Ok(())
    }
}

impl SourcePools for SimulatedChain {
    fn pair_tokens(&self, pair: Address) -> HostResult<(Address, Address)> {
        let state = self.pair(pair)?;
        Ok((state.token0, state.token1))
    }

    fn pair_reserves(&self, pair: Address) -> HostResult<PairReserves> {
        let state = self.pair(pair)?;
        Ok(PairReserves {
            reserve0: state.reserve0,
            reserve1: state.reserve1,
            total_supply: state.total_supply,
        })
    }

    fn redeem(&mut self, pair: Address, to: Address) -> HostResult<(u128, u128)> {
        let state = self.pair(pair)?.clone();
        let balance0 = self.balance_of(state.token0, pair)?;
        let balance1 = self.balance_of(state.token1, pair)?;
        let liquidity = self.balance_of(pair, pair)?;

        if state.total_supply == 0 {
            return Err(HostError::InsufficientLiquidityBurned);
        }
        let amount0 = mul_div_u128(liquidity, balance0, state.total_supply, Rounding::Down)?;
        let amount1 = mul_div_u128(liquidity, balance1, state.total_supply, Rounding::Down)?;
        if amount0 == 0 || amount1 == 0 {
            return Err(HostError::InsufficientLiquidityBurned);
        }

        self.burn_tokens(pair, pair, liquidity)?;
        self.pair_mut(pair)?.total_supply -= liquidity;
        self.transfer(state.token0, pair, to, amount0)?;
        self.transfer(state.token1, pair, to, amount1)?;
        self.sync(pair, balance0 - amount0, balance1 - amount1)?;

        self.emit(ChainEvent::Burn {
            pair,
            amount0,
            amount1,
            to,
        });
        debug!(%pair, liquidity, amount0, amount1, "burned pair liquidity");
        Ok((amount0, amount1))
    }
}
