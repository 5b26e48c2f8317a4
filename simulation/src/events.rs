//! Events emitted by simulated contracts

use migrator_core::{Address, PoolKey, U256};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainEvent {
    // Token ledger
    Transfer {
        token: Address,
        from: Address,
        to: Address,
        amount: u128,
    },
    Approval {
        token: Address,
        owner: Address,
        spender: Address,
        amount: u128,
    },

    // Wrapped native
    Deposit {
        dst: Address,
        amount: u128,
    },
    Withdrawal {
        src: Address,
        amount: u128,
    },

    // Constant-product pairs
    PairCreated {
        token0: Address,
        token1: Address,
        pair: Address,
    },
    Mint {
        pair: Address,
        amount0: u128,
        amount1: u128,
    },
    Burn {
        pair: Address,
        amount0: u128,
        amount1: u128,
        to: Address,
    },

    // Concentrated pools
    PoolCreated {
        key: PoolKey,
        pool: Address,
    },
    Initialize {
        pool: Address,
        sqrt_price_x96: U256,
        tick: i32,
    },
    IncreaseLiquidity {
        position_id: u64,
        liquidity: u128,
        amount0: u128,
        amount1: u128,
    },
}

impl ChainEvent {
    /// `(src, amount)` if this is a wrapped native withdrawal
    pub fn as_withdrawal(&self) -> Option<(Address, u128)> {
        match self {
            ChainEvent::Withdrawal { src, amount } => Some((*src, *amount)),
            _ => None,
        }
    }
}
