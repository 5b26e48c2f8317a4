//! End-to-end migrations from a constant-product pair into a concentrated
//! pool, run against both token orderings

mod common;

use common::*;

#[test]
fn test_fails_if_pool_is_not_initialized() {
    for order in ORDERS {
        let mut h = Harness::new(order);
        h.approve_shares(EXPECTED_LIQUIDITY);

        let err = h
            .migrate(h.request().ticks(-1, 1).minimums(9_000, 9_000))
            .unwrap_err();
        assert_eq!(err, MigrationError::PoolNotInitialized { key: h.pool_key() });

        assert_eq!(h.shares(), EXPECTED_LIQUIDITY);
        assert!(h.pool_address().is_none());
        h.assert_engine_clean();
    }
}

#[test]
fn test_works_once_pool_is_initialized() {
    for order in ORDERS {
        let mut h = Harness::new(order);
        let pool = h.initialize_pool(encode_price_sqrt(1, 1));
        h.approve_shares(EXPECTED_LIQUIDITY);

        let result = h
            .migrate(h.request().minimums(9_000, 9_000))
            .expect("migration succeeds");

        assert_eq!(result.pool, pool);
        assert_eq!(result.position_id, 1);
        assert_eq!(result.liquidity_minted, 9_000);
        result.assert_deposited(9_000, 9_000);
        result.assert_refunded(0, 0);

        let position = h.chain().position(1).expect("position minted");
        assert_eq!(position.liquidity, 9_000);
        assert_eq!(position.owner, h.wallet);
        assert_eq!(h.balance(h.token, pool), 9_000);
        assert_eq!(h.balance(h.wrapped_native, pool), 9_000);
        assert_eq!(h.shares(), 0);
        h.assert_engine_clean();
    }
}

#[test]
fn test_works_for_partial() {
    for order in ORDERS {
        let mut h = Harness::new(order);
        let pool = h.initialize_pool(encode_price_sqrt(1, 1));
        h.approve_shares(EXPECTED_LIQUIDITY);

        let token_before = h.balance(h.token, h.wallet);
        let wrapped_before = h.balance(h.wrapped_native, h.wallet);

        let result = h
            .migrate(h.request().percentage(50).minimums(4_500, 4_500))
            .expect("migration succeeds");

        assert_eq!(result.liquidity_minted, 4_500);
        result.assert_deposited(4_500, 4_500);
        result.assert_refunded(4_500, 4_500);

        assert_eq!(h.balance(h.token, h.wallet) - token_before, 4_500);
        assert_eq!(h.balance(h.wrapped_native, h.wallet) - wrapped_before, 4_500);
        assert_eq!(h.chain().position(1).map(|p| p.liquidity), Some(4_500));
        assert_eq!(h.balance(h.token, pool), 4_500);
        assert_eq!(h.balance(h.wrapped_native, pool), 4_500);
        h.assert_engine_clean();
    }
}

/// `(token deposited, wrapped deposited)` at a token1/token0 price of 2
fn double_price_deposits(token_lower: bool) -> (u128, u128) {
    if token_lower {
        (4_500, 8_999)
    } else {
        (8_999, 4_500)
    }
}

#[test]
fn test_double_the_price() {
    for order in ORDERS {
        let mut h = Harness::new(order);
        let pool = h.initialize_pool(encode_price_sqrt(2, 1));
        h.approve_shares(EXPECTED_LIQUIDITY);

        let token_before = h.balance(h.token, h.wallet);
        let wrapped_before = h.balance(h.wrapped_native, h.wallet);
        let (token_used, wrapped_used) = double_price_deposits(h.token_lower());

        let result = h
            .migrate(h.request().minimums(token_used, wrapped_used))
            .expect("migration succeeds");

        assert_eq!(result.liquidity_minted, 6_363);
        result.assert_deposited(token_used, wrapped_used);
        result.assert_conserves(9_000, 9_000);
        assert_eq!(result.refunded_native, 0);

        assert_eq!(h.balance(h.token, h.wallet) - token_before, 9_000 - token_used);
        assert_eq!(
            h.balance(h.wrapped_native, h.wallet) - wrapped_before,
            9_000 - wrapped_used
        );
        assert_eq!(h.balance(h.token, pool), token_used);
        assert_eq!(h.balance(h.wrapped_native, pool), wrapped_used);
        h.assert_engine_clean();
    }
}

#[test]
fn test_half_the_price() {
    for order in ORDERS {
        let mut h = Harness::new(order);
        let pool = h.initialize_pool(encode_price_sqrt(1, 2));
        h.approve_shares(EXPECTED_LIQUIDITY);

        // Halving the price mirrors the doubled case across the ordering
        let (token_used, wrapped_used) = double_price_deposits(!h.token_lower());

        let result = h
            .migrate(h.request().minimums(token_used, wrapped_used))
            .expect("migration succeeds");

        assert_eq!(result.liquidity_minted, 6_363);
        result.assert_deposited(token_used, wrapped_used);
        result.assert_refunded(9_000 - token_used, 9_000 - wrapped_used);
        assert_eq!(h.balance(h.token, pool), token_used);
        assert_eq!(h.balance(h.wrapped_native, pool), wrapped_used);
        h.assert_engine_clean();
    }
}

#[test]
fn test_double_the_price_as_native() {
    for order in ORDERS {
        let mut h = Harness::new(order);
        h.initialize_pool(encode_price_sqrt(2, 1));
        h.approve_shares(EXPECTED_LIQUIDITY);

        let token_before = h.balance(h.token, h.wallet);
        let wrapped_before = h.balance(h.wrapped_native, h.wallet);
        let native_before = h.native(h.wallet);
        let (token_used, wrapped_used) = double_price_deposits(h.token_lower());
        let expected_native = if h.token_lower() { 1 } else { 4_500 };

        let result = h
            .migrate(h.request().minimums(token_used, wrapped_used).as_native())
            .expect("migration succeeds");

        assert_eq!(result.refunded_native, expected_native);
        assert_eq!(
            withdrawal_events(h.chain()).last(),
            Some(&(h.engine(), expected_native))
        );
        assert_eq!(h.balance(h.token, h.wallet) - token_before, 9_000 - token_used);
        assert_eq!(h.balance(h.wrapped_native, h.wallet), wrapped_before);
        assert_eq!(h.native(h.wallet) - native_before, expected_native);
        h.assert_engine_clean();
    }
}

#[test]
fn test_half_the_price_as_native() {
    for order in ORDERS {
        let mut h = Harness::new(order);
        h.initialize_pool(encode_price_sqrt(1, 2));
        h.approve_shares(EXPECTED_LIQUIDITY);

        let native_before = h.native(h.wallet);
        let (token_used, wrapped_used) = double_price_deposits(!h.token_lower());
        let expected_native = if h.token_lower() { 4_500 } else { 1 };

        let result = h
            .migrate(h.request().minimums(token_used, wrapped_used).as_native())
            .expect("migration succeeds");

        assert_eq!(result.refunded_native, expected_native);
        assert_eq!(
            withdrawal_events(h.chain()).last(),
            Some(&(h.engine(), expected_native))
        );
        assert_eq!(h.native(h.wallet) - native_before, expected_native);
        h.assert_engine_clean();
    }
}

#[test]
fn test_as_native_without_wrapped_leftover_emits_no_withdrawal() {
    let mut h = Harness::new(TokenOrder::TokenLower);
    h.initialize_pool(encode_price_sqrt(1, 1));
    h.approve_shares(EXPECTED_LIQUIDITY);
    let withdrawals_before = withdrawal_events(h.chain()).len();

    let result = h.migrate(h.request().as_native()).expect("migration succeeds");

    assert_eq!(result.refunded_native, 0);
    assert_eq!(withdrawal_events(h.chain()).len(), withdrawals_before);
    h.assert_engine_clean();
}

#[test]
fn test_results_follow_caller_labelling() {
    for order in ORDERS {
        let mut h = Harness::new(order);
        h.initialize_pool(encode_price_sqrt(2, 1));
        h.approve_shares(EXPECTED_LIQUIDITY);
        let (token_used, wrapped_used) = double_price_deposits(h.token_lower());

        let result = h
            .migrate(h.request().swapped_assets())
            .expect("migration succeeds");

        // Asset A is now the wrapped native token
        result.assert_deposited(wrapped_used, token_used);
        result.assert_refunded(9_000 - wrapped_used, 9_000 - token_used);
        h.assert_engine_clean();
    }
}

#[test]
fn test_slippage_floor_reverts_everything() {
    for order in ORDERS {
        let mut h = Harness::new(order);
        h.initialize_pool(encode_price_sqrt(2, 1));
        h.approve_shares(EXPECTED_LIQUIDITY);
        let before = h.chain().snapshot();
        let (token_used, _) = double_price_deposits(h.token_lower());

        let err = h
            .migrate(h.request().minimums(9_000, 9_000))
            .unwrap_err();

        assert_eq!(
            err,
            MigrationError::SlippageExceeded {
                side: Side::A,
                used: token_used,
                minimum: 9_000
            }
        );
        assert_eq!(h.chain().snapshot(), before);
        assert!(h.chain().positions().is_empty());
    }
}

#[test]
fn test_initial_price_creates_and_initializes_pool() {
    for order in ORDERS {
        let mut h = Harness::new(order);
        h.approve_shares(EXPECTED_LIQUIDITY);

        let result = h
            .migrate(h.request().initial_price(encode_price_sqrt(1, 1)))
            .expect("migration succeeds");

        let pool = h.pool_address().expect("pool created");
        assert_eq!(result.pool, pool);
        assert_eq!(h.chain().pool_state(pool).unwrap().map(|s| s.tick), Some(0));
        assert_eq!(result.liquidity_minted, 9_000);
        h.assert_engine_clean();
    }
}

#[test]
fn test_initial_price_ignored_for_initialized_pool() {
    let mut h = Harness::new(TokenOrder::TokenLower);
    h.initialize_pool(encode_price_sqrt(2, 1));
    h.approve_shares(EXPECTED_LIQUIDITY);

    let result = h
        .migrate(h.request().initial_price(encode_price_sqrt(1, 1)))
        .expect("migration succeeds");

    assert_eq!(result.liquidity_minted, 6_363);
    result.assert_deposited(4_500, 8_999);
}

#[test]
fn test_unsupported_fee_tier() {
    let mut h = Harness::new(TokenOrder::TokenLower);
    h.approve_shares(EXPECTED_LIQUIDITY);

    let err = h
        .migrate(
            h.request()
                .fee(2_500)
                .ticks(-600, 600)
                .initial_price(encode_price_sqrt(1, 1)),
        )
        .unwrap_err();
    assert!(matches!(err, MigrationError::InvalidRequest(_)), "{err}");
    assert_eq!(h.shares(), EXPECTED_LIQUIDITY);

    // Without an initial price the tier is still rejected, by both entry points
    let request = h.request().fee(2_500).ticks(-600, 600);
    let previewed = h.migrator.preview(&request.clone().build()).unwrap_err();
    let err = h.migrate(request).unwrap_err();
    assert_eq!(err, MigrationError::invalid_request("unsupported fee tier 2500"));
    assert_eq!(previewed, err);
    assert_eq!(h.shares(), EXPECTED_LIQUIDITY);
}

#[test]
fn test_holdings_already_on_engine_are_left_alone() {
    for order in ORDERS {
        let mut h = Harness::new(order);
        h.initialize_pool(encode_price_sqrt(1, 1));
        h.approve_shares(EXPECTED_LIQUIDITY);

        let (token, wrapped, wallet, engine) = (h.token, h.wrapped_native, h.wallet, h.engine());
        h.chain_mut().transfer(token, wallet, engine, 1).unwrap();
        h.chain_mut().mint_tokens(wrapped, engine, 2).unwrap();
        h.chain_mut().fund_native(engine, 3).unwrap();

        let result = h
            .migrate(h.request().percentage(50).as_native())
            .expect("migration succeeds");

        assert_eq!(result.liquidity_minted, 4_500);
        result.assert_refunded(4_500, 4_500);
        assert_eq!(result.refunded_native, 4_500);
        assert_eq!(h.balance(token, engine), 1);
        assert_eq!(h.balance(wrapped, engine), 2);
        assert_eq!(h.native(engine), 3);
        assert_eq!(h.chain().allowance(token, engine, h.position_manager()).unwrap(), 0);
        assert_eq!(h.chain().allowance(wrapped, engine, h.position_manager()).unwrap(), 0);
    }
}

#[test]
fn test_deadline_expired() {
    let mut h = Harness::new(TokenOrder::TokenLower);
    h.initialize_pool(encode_price_sqrt(1, 1));
    h.approve_shares(EXPECTED_LIQUIDITY);
    h.chain_mut().set_timestamp(TEST_DEADLINE + 1);

    assert_eq!(
        h.migrate(h.request()),
        Err(MigrationError::DeadlineExpired {
            now: TEST_DEADLINE + 1,
            deadline: TEST_DEADLINE
        })
    );

    // The deadline is inclusive
    let result = h.migrate(h.request().deadline(TEST_DEADLINE + 1));
    assert!(result.is_ok(), "{result:?}");
}

#[test]
fn test_percentage_bounds() {
    let mut h = Harness::new(TokenOrder::TokenLower);
    h.initialize_pool(encode_price_sqrt(1, 1));
    h.approve_shares(EXPECTED_LIQUIDITY);

    assert_eq!(
        h.migrate(h.request().percentage(0)),
        Err(MigrationError::invalid_request("percentage too small"))
    );
    assert_eq!(
        h.migrate(h.request().percentage(101)),
        Err(MigrationError::invalid_request("percentage too large"))
    );
    assert_eq!(h.shares(), EXPECTED_LIQUIDITY);
}

#[test]
fn test_pair_must_trade_requested_assets() {
    let mut h = Harness::new(TokenOrder::TokenLower);
    h.initialize_pool(encode_price_sqrt(1, 1));
    h.approve_shares(EXPECTED_LIQUIDITY);
    let spare = h.spare_tokens[0];

    let err = h.migrate(h.request().asset_b(spare)).unwrap_err();
    assert!(matches!(err, MigrationError::SourceRedemptionFailed(_)), "{err}");
    assert_eq!(h.shares(), EXPECTED_LIQUIDITY);
}

#[test]
fn test_share_allowance_is_required() {
    let mut h = Harness::new(TokenOrder::TokenLower);
    h.initialize_pool(encode_price_sqrt(1, 1));
    h.approve_shares(EXPECTED_LIQUIDITY - 1);
    let before = h.chain().snapshot();

    let err = h.migrate(h.request()).unwrap_err();
    assert!(matches!(err, MigrationError::SourceRedemptionFailed(_)), "{err}");
    assert_eq!(h.chain().snapshot(), before);
}

#[test]
fn test_dust_that_mints_nothing_is_rejected() {
    let mut h = Harness::new(TokenOrder::TokenLower);
    h.initialize_pool(encode_price_sqrt(1, 1));
    h.approve_shares(1);

    // One share redeems one unit per side; one percent of that rounds to zero
    let err = h
        .migrate(h.request().liquidity(1).percentage(1))
        .unwrap_err();
    assert!(matches!(err, MigrationError::InvalidRequest(_)), "{err}");
    assert_eq!(h.shares(), EXPECTED_LIQUIDITY);
}

#[test]
fn test_misaligned_ticks_rejected_by_pool() {
    let mut h = Harness::new(TokenOrder::TokenLower);
    h.initialize_pool(encode_price_sqrt(1, 1));
    h.approve_shares(EXPECTED_LIQUIDITY);

    let err = h.migrate(h.request().ticks(-1, 1)).unwrap_err();
    assert!(matches!(err, MigrationError::InvalidRequest(_)), "{err}");
    assert_eq!(h.shares(), EXPECTED_LIQUIDITY);
    h.assert_engine_clean();
}

#[test]
fn test_refunds_go_to_recipient() {
    let mut h = Harness::new(TokenOrder::TokenLower);
    h.initialize_pool(encode_price_sqrt(1, 1));
    h.approve_shares(EXPECTED_LIQUIDITY);
    let recipient = Address::from_low_u64(0xbeef);

    let result = h
        .migrate(h.request().percentage(50).recipient(recipient))
        .expect("migration succeeds");

    assert_eq!(h.chain().position(result.position_id).map(|p| p.owner), Some(recipient));
    assert_eq!(h.balance(h.token, recipient), 4_500);
    assert_eq!(h.balance(h.wrapped_native, recipient), 4_500);
    h.assert_engine_clean();
}

#[test]
fn test_sequential_migrations_number_positions() {
    let mut h = Harness::new(TokenOrder::TokenHigher);
    h.initialize_pool(encode_price_sqrt(1, 1));
    h.approve_shares(EXPECTED_LIQUIDITY);

    let first = h
        .migrate(h.request().liquidity(4_000))
        .expect("first migration");
    let second = h
        .migrate(h.request().liquidity(5_000))
        .expect("second migration");

    assert_eq!((first.position_id, second.position_id), (1, 2));
    assert_eq!(first.liquidity_minted, 4_000);
    assert_eq!(second.liquidity_minted, 5_000);
    assert_eq!(h.shares(), 0);
    h.assert_engine_clean();
}
