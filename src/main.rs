//! Exchange Core Simulation.
//!
//! Replays the deployment flow end to end: token setup, pool seeding, swaps on
//! both paths, collateral deposits, and leveraged position opening.

use exchange_core::*;

const TWD: Address = Address(1);
const USD: Address = Address(2);
const MKT: Address = Address(3);
const POOL: Address = Address(100);
const LEDGER: Address = Address(200);
const ALICE: Address = Address(10);
const BOB: Address = Address(11);

fn main() {
    println!("Exchange Core Simulation");
    println!("Reserve Pool + Margin Ledger, exact integer fixed point\n");

    let mut bank = InMemoryTokenLedger::new();

    scenario_1_pool_seeding_and_swaps(&mut bank);
    scenario_2_margin_lifecycle(&mut bank);

    println!("\nAll simulations completed successfully.");
}

/// Seed the pool 50000/37500 and trade both directions.
fn scenario_1_pool_seeding_and_swaps(bank: &mut InMemoryTokenLedger) {
    println!("Scenario 1: Pool Seeding and Swaps\n");

    let mut pool = ReservePool::new(POOL, TWD, USD);

    let amount_a = Amount::from_units(50000);
    let amount_b = Amount::from_units(37500);
    bank.mint(TWD, ALICE, amount_a).unwrap();
    bank.mint(USD, ALICE, amount_b).unwrap();
    bank.approve(TWD, ALICE, POOL, amount_a);
    bank.approve(USD, ALICE, POOL, amount_b);
    pool.add_liquidity(bank, ALICE, amount_a, amount_b).unwrap();

    let (reserve_a, reserve_b) = pool.get_reserves();
    println!("  Alice seeds the pool: {} TWD / {} USD", reserve_a, reserve_b);

    let amount_in = Amount::from_units(450);
    bank.mint(USD, BOB, amount_in).unwrap();
    bank.approve(USD, BOB, POOL, amount_in);
    let result = pool.swap(bank, BOB, amount_in, &[USD, TWD]).unwrap();
    println!("  Bob swaps {} USD for {} TWD", result.amount_in, result.amount_out);

    let (reserve_a, reserve_b) = pool.get_reserves();
    println!("  Reserves now {} TWD / {} USD", reserve_a, reserve_b);

    let err = pool
        .swap(bank, BOB, Amount::from_units(1), &[USD, MKT])
        .unwrap_err();
    println!("  Swap on a foreign token is rejected: {err}");
    println!("  Pool emitted {} records\n", pool.events().len());
}

/// Deposit collateral, open positions up to the leverage cap.
fn scenario_2_margin_lifecycle(bank: &mut InMemoryTokenLedger) {
    println!("Scenario 2: Margin Lifecycle\n");

    let mut ledger = MarginLedger::new(LEDGER);
    let mut oracle = MockPriceOracle::new();

    let amount = Amount::from_units(2000);
    bank.mint(MKT, ALICE, amount).unwrap();
    bank.approve(MKT, ALICE, LEDGER, amount);
    ledger.deposit_token(bank, ALICE, MKT, amount).unwrap();
    println!("  Alice deposits {} MKT as collateral", amount);

    oracle.set_price(2468);
    let opened = ledger
        .open_long_position(&oracle, ALICE, MKT, Leverage(7))
        .unwrap();
    println!(
        "  Alice opens a {} long: notional {}, locked price {}",
        Leverage(7),
        opened.notional_amount,
        opened.locked_price
    );

    let err = ledger
        .open_long_position(&oracle, ALICE, MKT, Leverage(4))
        .unwrap_err();
    println!("  A further 4x open is rejected: {err}");

    let opened = ledger
        .open_short_position(&oracle, ALICE, MKT, Leverage(3))
        .unwrap();
    println!(
        "  A 3x short fits: total leverage now {}/{}",
        opened.total_leverage, MAX_LEVERAGE
    );
    println!("  Ledger emitted {} records", ledger.events().len());
}
