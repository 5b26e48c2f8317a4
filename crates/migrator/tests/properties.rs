//! Property tests over whole migrations

mod common;

use common::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Whatever the price, share count and percentage, every withdrawn unit
    /// is either deposited or refunded and the engine ends empty
    #[test]
    fn prop_migration_conserves_assets(
        token_lower in any::<bool>(),
        reserve1 in 1u128..=16,
        reserve0 in 1u128..=16,
        shares in 1_000u128..=EXPECTED_LIQUIDITY,
        pct in 1u8..=100,
        as_native in any::<bool>(),
    ) {
        let order = if token_lower { TokenOrder::TokenLower } else { TokenOrder::TokenHigher };
        let mut h = Harness::new(order);
        h.initialize_pool(encode_price_sqrt(reserve1, reserve0));
        h.approve_shares(shares);

        let mut request = h.request().liquidity(shares).percentage(pct);
        if as_native {
            request = request.as_native();
        }

        let before = h.chain().snapshot();
        match h.migrate(request) {
            Ok(result) => {
                // The pair is balanced, so both sides withdraw the share count
                result.assert_conserves(shares, shares);
                prop_assert!(result.liquidity_minted > 0);
                if !as_native {
                    prop_assert_eq!(result.refunded_native, 0);
                }
                prop_assert_eq!(h.shares(), EXPECTED_LIQUIDITY - shares);
                h.assert_engine_clean();
            }
            Err(err) => {
                prop_assert!(matches!(err, MigrationError::InvalidRequest(_)), "{}", err);
                prop_assert_eq!(h.chain().snapshot(), before);
            }
        }
    }
}
