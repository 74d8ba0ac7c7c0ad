//! Reserve pool integration tests: seeding, swap pricing, path validation,
//! and all-or-nothing failure behavior.

use exchange_core::*;

const TWD: Address = Address(1);
const USD: Address = Address(2);
const MKT: Address = Address(3);
const POOL: Address = Address(100);
const ALICE: Address = Address(10);
const BOB: Address = Address(11);

/// Exact output for reserves (50000, 37500) and input 450:
/// |floor(50000e18 * 37500e18 / 50450e18) - 37500e18|
const FIXTURE_OUT_RAW: u128 = 334489593657086223985;

fn setup() -> (ReservePool, InMemoryTokenLedger) {
    (ReservePool::new(POOL, TWD, USD), InMemoryTokenLedger::new())
}

fn add_liquidity(
    pool: &mut ReservePool,
    bank: &mut InMemoryTokenLedger,
    provider: Address,
    units_a: u64,
    units_b: u64,
) {
    let a = Amount::from_units(units_a);
    let b = Amount::from_units(units_b);
    bank.mint(TWD, provider, a).unwrap();
    bank.mint(USD, provider, b).unwrap();
    bank.approve(TWD, provider, POOL, a);
    bank.approve(USD, provider, POOL, b);
    pool.add_liquidity(bank, provider, a, b).unwrap();
}

fn fund_for_swap(bank: &mut InMemoryTokenLedger, trader: Address, token: Address, units: u64) {
    bank.mint(token, trader, Amount::from_units(units)).unwrap();
    bank.approve(token, trader, POOL, Amount::from_units(units));
}

#[test]
fn seeding_moves_tokens_into_the_pool() {
    let (mut pool, mut bank) = setup();
    add_liquidity(&mut pool, &mut bank, ALICE, 50000, 50000);

    assert_eq!(bank.balance_of(TWD, POOL), Amount::from_units(50000));
    assert_eq!(bank.balance_of(USD, POOL), Amount::from_units(50000));
    assert_eq!(bank.balance_of(TWD, ALICE), Amount::ZERO);
    assert_eq!(
        pool.get_reserves(),
        (Amount::from_units(50000), Amount::from_units(50000))
    );
}

#[test]
fn liquidity_accumulates_at_any_ratio() {
    let (mut pool, mut bank) = setup();
    add_liquidity(&mut pool, &mut bank, ALICE, 100, 900);
    add_liquidity(&mut pool, &mut bank, BOB, 5, 1);
    add_liquidity(&mut pool, &mut bank, ALICE, 7, 7);

    assert_eq!(
        pool.get_reserves(),
        (Amount::from_units(112), Amount::from_units(908))
    );
}

#[test]
fn liquidity_sum_is_order_independent() {
    let contributions = [(100u64, 200u64), (5, 5), (7, 1), (3000, 41)];

    let (mut forward, mut bank_a) = setup();
    for (a, b) in contributions {
        add_liquidity(&mut forward, &mut bank_a, ALICE, a, b);
    }
    let (mut backward, mut bank_b) = setup();
    for (a, b) in contributions.iter().rev() {
        add_liquidity(&mut backward, &mut bank_b, BOB, *a, *b);
    }

    assert_eq!(forward.get_reserves(), backward.get_reserves());
}

#[test]
fn add_liquidity_emits_one_record() {
    let (mut pool, mut bank) = setup();
    add_liquidity(&mut pool, &mut bank, ALICE, 100, 200);

    let events = pool.events();
    assert_eq!(events.len(), 1);
    assert_eq!(
        events[0].payload,
        EventPayload::AddLiquidity(AddLiquidityEvent {
            provider: ALICE,
            amount_a: Amount::from_units(100),
            amount_b: Amount::from_units(200),
        })
    );
}

#[test]
fn records_carry_the_component_clock() {
    let (mut pool, mut bank) = setup();
    pool.set_time(Timestamp::from_millis(1_000));
    add_liquidity(&mut pool, &mut bank, ALICE, 50000, 37500);

    pool.set_time(Timestamp::from_millis(2_500));
    fund_for_swap(&mut bank, BOB, USD, 450);
    pool.swap(&mut bank, BOB, Amount::from_units(450), &[USD, TWD])
        .unwrap();

    let events = pool.events();
    assert_eq!(events[0].timestamp, Timestamp::from_millis(1_000));
    // both swap records are stamped with the clock at call time
    assert_eq!(events[1].timestamp, Timestamp::from_millis(2_500));
    assert_eq!(events[2].timestamp, Timestamp::from_millis(2_500));
}

#[test]
fn add_liquidity_rejects_zero_amounts() {
    let (mut pool, mut bank) = setup();
    let err = pool
        .add_liquidity(&mut bank, ALICE, Amount::ZERO, Amount::from_units(1))
        .unwrap_err();
    assert_eq!(err, PoolError::ZeroAmount);
    assert_eq!(pool.get_reserves(), (Amount::ZERO, Amount::ZERO));
}

#[test]
fn add_liquidity_failure_moves_nothing() {
    let (mut pool, mut bank) = setup();
    // first leg fully funded, second leg missing its allowance
    let a = Amount::from_units(100);
    bank.mint(TWD, ALICE, a).unwrap();
    bank.mint(USD, ALICE, a).unwrap();
    bank.approve(TWD, ALICE, POOL, a);

    let err = pool.add_liquidity(&mut bank, ALICE, a, a).unwrap_err();
    assert_eq!(err, PoolError::InsufficientAllowance);
    assert_eq!(bank.balance_of(TWD, ALICE), a);
    assert_eq!(bank.balance_of(TWD, POOL), Amount::ZERO);
    assert_eq!(pool.get_reserves(), (Amount::ZERO, Amount::ZERO));
    assert!(pool.events().is_empty());
}

#[test]
fn swap_matches_the_pricing_fixture_exactly() {
    let (mut pool, mut bank) = setup();
    add_liquidity(&mut pool, &mut bank, ALICE, 50000, 37500);
    fund_for_swap(&mut bank, BOB, USD, 450);

    let result = pool
        .swap(&mut bank, BOB, Amount::from_units(450), &[USD, TWD])
        .unwrap();

    assert_eq!(result.amount_out, Amount::from_raw(FIXTURE_OUT_RAW));
    assert_eq!(bank.balance_of(TWD, BOB), Amount::from_raw(FIXTURE_OUT_RAW));
    assert_eq!(bank.balance_of(USD, BOB), Amount::ZERO);

    // reserveIn grew by amountIn, reserveOut shrank by amountOut
    let (reserve_twd, reserve_usd) = pool.get_reserves();
    assert_eq!(
        reserve_usd,
        Amount::from_units(37500).checked_add(Amount::from_units(450)).unwrap()
    );
    assert_eq!(
        reserve_twd,
        Amount::from_units(50000)
            .checked_sub(Amount::from_raw(FIXTURE_OUT_RAW))
            .unwrap()
    );

    // pool custody mirrors the reserves
    assert_eq!(bank.balance_of(TWD, POOL), reserve_twd);
    assert_eq!(bank.balance_of(USD, POOL), reserve_usd);
}

#[test]
fn swap_emits_exchange_and_update_reserves() {
    let (mut pool, mut bank) = setup();
    add_liquidity(&mut pool, &mut bank, ALICE, 50000, 37500);
    fund_for_swap(&mut bank, BOB, USD, 450);
    pool.clear_events();

    pool.swap(&mut bank, BOB, Amount::from_units(450), &[USD, TWD])
        .unwrap();

    let events = pool.events();
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[0].payload,
        EventPayload::Exchange(ExchangeEvent {
            sender: BOB,
            traded_token: USD,
            traded_amount: Amount::from_units(450),
        })
    );
    assert_eq!(
        events[1].payload,
        EventPayload::UpdateReserves(UpdateReservesEvent {
            old_reserve_out: Amount::from_units(50000),
            new_reserve_out: Amount::from_units(50000)
                .checked_sub(Amount::from_raw(FIXTURE_OUT_RAW))
                .unwrap(),
            old_reserve_in: Amount::from_units(37500),
            new_reserve_in: Amount::from_units(37950),
        })
    );
}

#[test]
fn invalid_paths_are_rejected_identically() {
    let (mut pool, mut bank) = setup();
    add_liquidity(&mut pool, &mut bank, ALICE, 50000, 37500);
    fund_for_swap(&mut bank, BOB, USD, 450);
    pool.clear_events();

    let reserves_before = pool.get_reserves();
    let amount = Amount::from_units(450);

    let one_element: &[Address] = &[USD];
    let zero_token: &[Address] = &[USD, Address::ZERO];
    let foreign_token: &[Address] = &[USD, MKT];
    let same_token: &[Address] = &[USD, USD];
    let three_hops: &[Address] = &[USD, TWD, USD];

    for path in [one_element, zero_token, foreign_token, same_token, three_hops] {
        let err = pool.swap(&mut bank, BOB, amount, path).unwrap_err();
        assert_eq!(err, PoolError::InvalidPath);
    }

    assert_eq!(pool.get_reserves(), reserves_before);
    assert_eq!(bank.balance_of(USD, BOB), amount);
    assert!(pool.events().is_empty());
}

#[test]
fn swap_requires_allowance_then_balance() {
    let (mut pool, mut bank) = setup();
    add_liquidity(&mut pool, &mut bank, ALICE, 50000, 37500);

    // no allowance at all
    bank.mint(USD, BOB, Amount::from_units(450)).unwrap();
    let err = pool
        .swap(&mut bank, BOB, Amount::from_units(450), &[USD, TWD])
        .unwrap_err();
    assert_eq!(err, PoolError::InsufficientAllowance);

    // allowance covers more than the balance
    bank.approve(USD, BOB, POOL, Amount::from_units(1000));
    let err = pool
        .swap(&mut bank, BOB, Amount::from_units(600), &[USD, TWD])
        .unwrap_err();
    assert_eq!(err, PoolError::InsufficientBalance);

    // nothing moved across either failure
    assert_eq!(bank.balance_of(USD, BOB), Amount::from_units(450));
    assert_eq!(
        pool.get_reserves(),
        (Amount::from_units(50000), Amount::from_units(37500))
    );
}

#[test]
fn swap_rejects_output_the_pool_cannot_cover() {
    // the asymmetric quotient can demand more of token A than the pool holds
    let (mut pool, mut bank) = setup();
    add_liquidity(&mut pool, &mut bank, ALICE, 10, 1000);
    fund_for_swap(&mut bank, BOB, USD, 10);

    let err = pool
        .swap(&mut bank, BOB, Amount::from_units(10), &[USD, TWD])
        .unwrap_err();
    assert_eq!(err, PoolError::InsufficientOutputBalance);
    assert_eq!(
        pool.get_reserves(),
        (Amount::from_units(10), Amount::from_units(1000))
    );
    assert_eq!(bank.balance_of(USD, BOB), Amount::from_units(10));
}

#[test]
fn swap_rejects_zero_input() {
    let (mut pool, mut bank) = setup();
    add_liquidity(&mut pool, &mut bank, ALICE, 50000, 37500);

    let err = pool
        .swap(&mut bank, BOB, Amount::ZERO, &[USD, TWD])
        .unwrap_err();
    assert_eq!(err, PoolError::ZeroAmount);
}
