//! Builder for migration requests

use migrator_core::{Address, MigrationRequest, U256};
use migrator_test_utils::{get_max_tick, get_min_tick, EXPECTED_LIQUIDITY, FEE_MEDIUM, TEST_DEADLINE};

/// Builder for migration requests with fixture defaults
#[derive(Debug, Clone)]
pub struct MigrationRequestBuilder {
    request: MigrationRequest,
}

impl MigrationRequestBuilder {
    pub fn new(wallet: Address, pair: Address, asset_a: Address, asset_b: Address) -> Self {
        Self {
            request: MigrationRequest {
                sender: wallet,
                source_pool: pair,
                liquidity_to_migrate: EXPECTED_LIQUIDITY,
                migration_percentage: 100,
                asset_a,
                asset_b,
                fee_tier: FEE_MEDIUM,
                tick_lower: get_min_tick(FEE_MEDIUM),
                tick_upper: get_max_tick(FEE_MEDIUM),
                min_amount_a: 0,
                min_amount_b: 0,
                recipient: wallet,
                deadline: TEST_DEADLINE,
                refund_native_as_unwrapped: false,
                initial_sqrt_price: None,
            },
        }
    }

    pub fn liquidity(mut self, shares: u128) -> Self {
        self.request.liquidity_to_migrate = shares;
        self
    }

    pub fn percentage(mut self, pct: u8) -> Self {
        self.request.migration_percentage = pct;
        self
    }

    pub fn ticks(mut self, lower: i32, upper: i32) -> Self {
        self.request.tick_lower = lower;
        self.request.tick_upper = upper;
        self
    }

    pub fn fee(mut self, fee: u32) -> Self {
        self.request.fee_tier = fee;
        self
    }

    pub fn minimums(mut self, min_a: u128, min_b: u128) -> Self {
        self.request.min_amount_a = min_a;
        self.request.min_amount_b = min_b;
        self
    }

    /// Swap the caller labelling of the two assets
    pub fn swapped_assets(mut self) -> Self {
        std::mem::swap(&mut self.request.asset_a, &mut self.request.asset_b);
        self
    }

    pub fn asset_b(mut self, asset: Address) -> Self {
        self.request.asset_b = asset;
        self
    }

    pub fn recipient(mut self, recipient: Address) -> Self {
        self.request.recipient = recipient;
        self
    }

    pub fn deadline(mut self, deadline: u64) -> Self {
        self.request.deadline = deadline;
        self
    }

    pub fn as_native(mut self) -> Self {
        self.request.refund_native_as_unwrapped = true;
        self
    }

    pub fn initial_price(mut self, sqrt_price_x96: U256) -> Self {
        self.request.initial_sqrt_price = Some(sqrt_price_x96);
        self
    }

    pub fn build(self) -> MigrationRequest {
        self.request
    }
}
