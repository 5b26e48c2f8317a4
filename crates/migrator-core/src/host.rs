//! # Host Capabilities
//!
//! The engine never owns chain state. Every external collaborator it drives
//! (token ledger, wrapped native contract, source pairs, destination factory
//! and position manager, clock, journal) is reached through the traits in
//! this module, implemented by whatever host the engine is embedded in.
//!
//! All mutating calls take `&mut self`, so a single engine holds exclusive
//! access to its host for the duration of a request.

use ethnum::U256;
use thiserror::Error;

use crate::errors::CoreError;
use crate::types::{Address, MintParams, MintReceipt, PairReserves, PoolKey, PoolState};

/// Failures reported by a host collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    // ========================================================================
    // Ledger Errors
    // ========================================================================
    #[error("Insufficient balance of {token} for {holder}: have {balance}, need {required}")]
    InsufficientBalance {
        token: Address,
        holder: Address,
        balance: u128,
        required: u128,
    },

    #[error("Insufficient allowance of {token} from {owner} to {spender}: have {allowance}, need {required}")]
    InsufficientAllowance {
        token: Address,
        owner: Address,
        spender: Address,
        allowance: u128,
        required: u128,
    },

    #[error("Insufficient native balance for {holder}: have {balance}, need {required}")]
    InsufficientNativeBalance {
        holder: Address,
        balance: u128,
        required: u128,
    },

    #[error("Unknown token {0}")]
    UnknownToken(Address),

    #[error("Token {0} is not the wrapped native asset")]
    NotWrappedNative(Address),

    // ========================================================================
    // Source Pair Errors
    // ========================================================================
    #[error("Unknown pair {0}")]
    UnknownPair(Address),

    #[error("Insufficient liquidity burned")]
    InsufficientLiquidityBurned,

    #[error("Insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    // ========================================================================
    // Concentrated Pool Errors
    // ========================================================================
    #[error("Unsupported fee tier {0}")]
    UnsupportedFee(u32),

    #[error("Pool already exists for {0}")]
    PoolAlreadyExists(PoolKey),

    #[error("Unknown pool {0}")]
    UnknownPool(Address),

    #[error("Pool {0} already initialized")]
    AlreadyInitialized(Address),

    #[error("Pool {0} not initialized")]
    NotInitialized(Address),

    #[error("Invalid tick range: lower {lower}, upper {upper}")]
    InvalidTickRange { lower: i32, upper: i32 },

    #[error("Tick {tick} is not a multiple of spacing {spacing}")]
    TickNotAligned { tick: i32, spacing: i32 },

    #[error("Zero liquidity")]
    ZeroLiquidity,

    #[error("Transaction too old: now {now}, deadline {deadline}")]
    DeadlinePassed { now: u64, deadline: u64 },

    // ========================================================================
    // Journal Errors
    // ========================================================================
    #[error("No open checkpoint")]
    NoCheckpoint,

    #[error(transparent)]
    Math(#[from] CoreError),
}

/// Result type for host calls
pub type HostResult<T> = Result<T, HostError>;

/// Fungible token balances and allowances
pub trait TokenLedger {
    fn balance_of(&self, token: Address, holder: Address) -> HostResult<u128>;

    fn allowance(&self, token: Address, owner: Address, spender: Address) -> HostResult<u128>;

    /// Set `spender`'s allowance over `owner`'s balance to exactly `amount`
    fn approve(
        &mut self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: u128,
    ) -> HostResult<()>;

    fn transfer(&mut self, token: Address, from: Address, to: Address, amount: u128)
        -> HostResult<()>;

    /// Move `amount` from `from` to `to`, spending `spender`'s allowance
    fn transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: u128,
    ) -> HostResult<()>;
}

/// Native currency and its 1:1 wrapper
pub trait NativeAsset {
    fn native_balance_of(&self, holder: Address) -> HostResult<u128>;

    fn transfer_native(&mut self, from: Address, to: Address, amount: u128) -> HostResult<()>;

    /// Burn `amount` of `wrapped` held by `holder` and credit the same amount
    /// of native currency to it. Emits a withdrawal event.
    fn unwrap(&mut self, wrapped: Address, holder: Address, amount: u128) -> HostResult<()>;
}

/// Constant-product pairs. A pair's share token identity is the pair address.
pub trait SourcePools {
    /// Tokens of `pair` in the pair's own (sorted) order
    fn pair_tokens(&self, pair: Address) -> HostResult<(Address, Address)>;

    fn pair_reserves(&self, pair: Address) -> HostResult<PairReserves>;

    fn pair_total_supply(&self, pair: Address) -> HostResult<u128> {
        Ok(self.pair_reserves(pair)?.total_supply)
    }

    /// Burn the shares `pair` holds of itself and pay both tokens to `to`.
    /// Returns `(amount0, amount1)` in the pair's order.
    fn redeem(&mut self, pair: Address, to: Address) -> HostResult<(u128, u128)>;
}

/// Concentrated-liquidity factory, pools and position manager
pub trait ConcentratedPools {
    /// Spacing enabled for `fee`, `None` when the tier is unknown
    fn tick_spacing(&self, fee: u32) -> HostResult<Option<i32>>;

    fn get_pool(&self, key: &PoolKey) -> HostResult<Option<Address>>;

    fn create_pool(&mut self, key: &PoolKey) -> HostResult<Address>;

    /// Price state of `pool`, `None` while uninitialized
    fn pool_state(&self, pool: Address) -> HostResult<Option<PoolState>>;

    fn initialize(&mut self, pool: Address, sqrt_price_x96: U256) -> HostResult<PoolState>;

    /// Mint a position for `params.recipient`, pulling the owed amounts from
    /// `payer` through the position manager's allowance
    fn mint(&mut self, payer: Address, params: &MintParams) -> HostResult<MintReceipt>;
}

/// Source of the current unix time
pub trait Clock {
    fn now(&self) -> u64;
}

/// Nested checkpoints over all host state
pub trait Journal {
    /// Open a checkpoint; returns the resulting depth
    fn checkpoint(&mut self) -> usize;

    /// Keep all changes since the innermost checkpoint
    fn commit(&mut self) -> HostResult<()>;

    /// Discard all changes since the innermost checkpoint
    fn revert(&mut self) -> HostResult<()>;
}

/// Everything the engine needs from its host
pub trait MigrationHost:
    TokenLedger + NativeAsset + SourcePools + ConcentratedPools + Clock + Journal
{
}

impl<T> MigrationHost for T where
    T: TokenLedger + NativeAsset + SourcePools + ConcentratedPools + Clock + Journal
{
}
