use migrator_core::host::{NativeAsset, TokenLedger};
use migrator_core::math::encode_price_sqrt as encode;
use migrator_core::{max_usable_tick, min_usable_tick, standard_tick_spacing, Address, U256};
use migrator_simulation::SimulatedChain;

/// Lowest usable tick for a standard fee tier
pub fn get_min_tick(fee: u32) -> i32 {
    min_usable_tick(spacing(fee))
}

/// Highest usable tick for a standard fee tier
pub fn get_max_tick(fee: u32) -> i32 {
    max_usable_tick(spacing(fee))
}

fn spacing(fee: u32) -> i32 {
    standard_tick_spacing(fee).unwrap_or_else(|| panic!("fee tier {fee} has no standard spacing"))
}

/// Q64.96 sqrt of `reserve1 / reserve0`
pub fn encode_price_sqrt(reserve1: u128, reserve0: u128) -> U256 {
    encode(reserve1, reserve0).expect("encodable price")
}

pub fn token_balance(chain: &SimulatedChain, token: Address, holder: Address) -> u128 {
    chain.balance_of(token, holder).expect("known token")
}

pub fn native_balance(chain: &SimulatedChain, holder: Address) -> u128 {
    chain.native_balance_of(holder).unwrap_or(0)
}

/// Every wrapped native withdrawal as `(src, amount)`, oldest first
pub fn withdrawal_events(chain: &SimulatedChain) -> Vec<(Address, u128)> {
    chain.events().iter().filter_map(|e| e.as_withdrawal()).collect()
}

/// Assert `engine` holds no tokens, no native currency and no outstanding
/// approvals to `spender`
pub fn assert_engine_clean(chain: &SimulatedChain, engine: Address, spender: Address, tokens: &[Address]) {
    for &token in tokens {
        assert_eq!(token_balance(chain, token, engine), 0, "engine balance of {token}");
        assert_eq!(
            chain.allowance(token, engine, spender).expect("known token"),
            0,
            "engine allowance of {token} to {spender}"
        );
    }
    assert_eq!(native_balance(chain, engine), 0, "engine native balance");
}

#[cfg(test)]
mod tests {
    use super::*;
    use migrator_core::FEE_MEDIUM;

    #[test]
    fn test_usable_ticks() {
        assert_eq!(get_min_tick(FEE_MEDIUM), -887_220);
        assert_eq!(get_max_tick(FEE_MEDIUM), 887_220);
    }
}
