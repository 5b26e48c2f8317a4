pub use migrator_core::{FEE_HIGH, FEE_LOW, FEE_MEDIUM};

/// Shares the fixture wallet holds: 10000 per side minus the locked minimum
pub const EXPECTED_LIQUIDITY: u128 = 10_000 - 1_000;

/// Deadline used by fixture requests; the fixture chain starts at time 1
pub const TEST_DEADLINE: u64 = 1;
