//! Destination pool creation and initialization

mod common;

use common::*;

#[test]
fn test_creates_and_initializes_once() {
    let mut h = Harness::new(TokenOrder::TokenLower);
    let (token, wrapped) = (h.token, h.wrapped_native);

    let pool = h
        .migrator
        .create_and_initialize_pool_if_necessary(token, wrapped, FEE_MEDIUM, encode_price_sqrt(2, 1))
        .expect("pool created");
    assert_eq!(h.pool_address(), Some(pool));
    assert_eq!(h.chain().pool_state(pool).unwrap().map(|s| s.tick), Some(6_931));

    // Second call with the assets reversed and another price is a no-op
    let again = h
        .migrator
        .create_and_initialize_pool_if_necessary(wrapped, token, FEE_MEDIUM, encode_price_sqrt(1, 1))
        .expect("existing pool");
    assert_eq!(again, pool);
    assert_eq!(h.chain().pool_state(pool).unwrap().map(|s| s.tick), Some(6_931));
}

#[test]
fn test_initializes_existing_uninitialized_pool() {
    let mut h = Harness::new(TokenOrder::TokenHigher);
    let key = h.pool_key();
    let pool = h.chain_mut().create_pool(&key).expect("bare pool");
    assert_eq!(h.chain().pool_state(pool).unwrap(), None);

    let ensured = h.initialize_pool(encode_price_sqrt(1, 1));
    assert_eq!(ensured, pool);
    assert_eq!(h.chain().pool_state(pool).unwrap().map(|s| s.tick), Some(0));
}

#[test]
fn test_rejects_bad_parameters() {
    let mut h = Harness::new(TokenOrder::TokenLower);
    let (token, wrapped) = (h.token, h.wrapped_native);
    let price = encode_price_sqrt(1, 1);

    let identical = h
        .migrator
        .create_and_initialize_pool_if_necessary(token, token, FEE_MEDIUM, price);
    assert!(matches!(identical, Err(MigrationError::InvalidRequest(_))));

    let unsupported = h
        .migrator
        .create_and_initialize_pool_if_necessary(token, wrapped, 1_234, price);
    assert!(matches!(unsupported, Err(MigrationError::InvalidRequest(_))));
}

#[test]
fn test_invalid_price_leaves_no_pool_behind() {
    let mut h = Harness::new(TokenOrder::TokenLower);
    let (token, wrapped) = (h.token, h.wrapped_native);
    let before = h.chain().snapshot();

    let err = h
        .migrator
        .create_and_initialize_pool_if_necessary(token, wrapped, FEE_MEDIUM, U256::ZERO)
        .unwrap_err();

    assert!(matches!(err, MigrationError::InvalidRequest(_)), "{err}");
    assert!(h.pool_address().is_none());
    assert_eq!(h.chain().snapshot(), before);
}

#[test]
fn test_other_fee_tiers_get_their_own_pool() {
    let mut h = Harness::new(TokenOrder::TokenLower);
    let (token, wrapped) = (h.token, h.wrapped_native);
    let price = encode_price_sqrt(1, 1);

    let medium = h.initialize_pool(price);
    let low = h
        .migrator
        .create_and_initialize_pool_if_necessary(token, wrapped, FEE_LOW, price)
        .expect("low tier pool");
    let high = h
        .migrator
        .create_and_initialize_pool_if_necessary(token, wrapped, FEE_HIGH, price)
        .expect("high tier pool");

    assert_ne!(medium, low);
    assert_ne!(low, high);
    assert_eq!(h.chain().pool(high).map(|p| p.tick_spacing), Some(200));
}
