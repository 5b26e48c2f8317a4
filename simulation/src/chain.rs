//! In-memory chain state with nested journal snapshots

use std::collections::{BTreeMap, HashMap};

use migrator_core::host::{Clock, HostError, HostResult, Journal};
use migrator_core::{Address, PoolKey, STANDARD_FEE_TIERS};
use tracing::trace;

use crate::concentrated::{ConcentratedPool, Position};
use crate::events::ChainEvent;
use crate::v2_pair::PairState;

/// First address handed out to tokens, pairs and pools
const ADDRESS_BASE: u64 = 0x1000_0000;

/// Concentrated-liquidity factory
pub const FACTORY_ADDRESS: Address = Address([
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xfa, 0xc7,
]);

/// Position manager that mints positions and pulls payer tokens
pub const POSITION_MANAGER_ADDRESS: Address = Address([
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x9e, 0x55,
]);

/// Registered token metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub symbol: String,
}

/// Everything a snapshot captures
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainState {
    pub(crate) timestamp: u64,
    pub(crate) next_nonce: u64,
    pub(crate) tokens: BTreeMap<Address, TokenInfo>,
    pub(crate) balances: HashMap<(Address, Address), u128>,
    pub(crate) allowances: HashMap<(Address, Address, Address), u128>,
    pub(crate) native: HashMap<Address, u128>,
    pub(crate) wrapped_native: Option<Address>,
    pub(crate) pairs: BTreeMap<Address, PairState>,
    pub(crate) pair_index: HashMap<(Address, Address), Address>,
    pub(crate) fee_tiers: BTreeMap<u32, i32>,
    pub(crate) pools: BTreeMap<Address, ConcentratedPool>,
    pub(crate) pool_index: HashMap<PoolKey, Address>,
    pub(crate) positions: Vec<Position>,
    pub(crate) events: Vec<ChainEvent>,
}

/// Journaled host implementing every capability the engine consumes
#[derive(Debug, Clone)]
pub struct SimulatedChain {
    pub(crate) state: ChainState,
    snapshots: Vec<ChainState>,
}

impl Default for SimulatedChain {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedChain {
    /// Empty chain at time 0 with the standard fee tiers enabled
    pub fn new() -> Self {
        let mut state = ChainState::default();
        for (fee, spacing) in STANDARD_FEE_TIERS {
            state.fee_tiers.insert(fee, spacing);
        }
        Self {
            state,
            snapshots: Vec::new(),
        }
    }

    pub fn factory(&self) -> Address {
        FACTORY_ADDRESS
    }

    pub fn position_manager(&self) -> Address {
        POSITION_MANAGER_ADDRESS
    }

    pub fn set_timestamp(&mut self, timestamp: u64) {
        self.state.timestamp = timestamp;
    }

    pub fn advance_time(&mut self, seconds: u64) {
        self.state.timestamp = self.state.timestamp.saturating_add(seconds);
    }

    /// Enable an extra fee tier on the factory
    pub fn enable_fee_amount(&mut self, fee: u32, tick_spacing: i32) {
        self.state.fee_tiers.insert(fee, tick_spacing);
    }

    /// Every event emitted so far, oldest first
    pub fn events(&self) -> &[ChainEvent] {
        &self.state.events
    }

    /// Copy of the full chain state, for before/after comparisons
    pub fn snapshot(&self) -> ChainState {
        self.state.clone()
    }

    /// Depth of open checkpoints
    pub fn journal_depth(&self) -> usize {
        self.snapshots.len()
    }

    pub(crate) fn allocate_address(&mut self) -> Address {
        self.state.next_nonce += 1;
        Address::from_low_u64(ADDRESS_BASE + self.state.next_nonce)
    }

    pub(crate) fn emit(&mut self, event: ChainEvent) {
        trace!(?event, "event");
        self.state.events.push(event);
    }
}

impl Clock for SimulatedChain {
    fn now(&self) -> u64 {
        self.state.timestamp
    }
}

impl Journal for SimulatedChain {
    fn checkpoint(&mut self) -> usize {
        self.snapshots.push(self.state.clone());
        self.snapshots.len()
    }

    fn commit(&mut self) -> HostResult<()> {
        self.snapshots.pop().ok_or(HostError::NoCheckpoint)?;
        Ok(())
    }

    fn revert(&mut self) -> HostResult<()> {
        self.state = self.snapshots.pop().ok_or(HostError::NoCheckpoint)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_fee_tiers_enabled() {
        let chain = SimulatedChain::new();
        assert_eq!(chain.state.fee_tiers.get(&3_000), Some(&60));
        assert_eq!(chain.state.fee_tiers.len(), 3);
    }

    #[test]
    fn test_revert_restores_state() {
        let mut chain = SimulatedChain::new();
        chain.set_timestamp(5);

        assert_eq!(chain.checkpoint(), 1);
        chain.set_timestamp(9);
        chain.allocate_address();
        chain.revert().unwrap();

        assert_eq!(chain.now(), 5);
        assert_eq!(chain.state.next_nonce, 0);
        assert_eq!(chain.journal_depth(), 0);
    }

    #[test]
    fn test_nested_commit_then_outer_revert() {
        let mut chain = SimulatedChain::new();
        chain.checkpoint();
        chain.checkpoint();
        chain.advance_time(10);
        chain.commit().unwrap();
        assert_eq!(chain.now(), 10);
        chain.revert().unwrap();
        assert_eq!(chain.now(), 0);
        assert_eq!(chain.commit(), Err(HostError::NoCheckpoint));
    }
}
