//! Leveraged position records.
//!
//! A position is written once at open time and never mutated: the oracle price is
//! locked in, the notional exposure is derived from it, and there is no close or
//! liquidation path. Accounts keep their positions as an append-only sequence.

use crate::math::mul_div;
use crate::types::{Amount, Leverage, Price, Side, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Exposure in whole units of the reference asset. Computed as
    /// `floor(leverage * collateral / locked_price)` on raw values, where the
    /// two 18-decimal scales cancel.
    pub notional_amount: u128,
    /// Oracle price captured at open time, fixed for the life of the position.
    pub locked_price: Price,
    pub side: Side,
    pub opened_at: Timestamp,
}

impl Position {
    /// Derives a new position from the account's full current collateral.
    /// Returns `None` only if the notional does not fit in u128.
    #[must_use]
    pub fn open(
        collateral: Amount,
        leverage: Leverage,
        locked_price: Price,
        side: Side,
        opened_at: Timestamp,
    ) -> Option<Self> {
        let notional_amount = mul_div(
            leverage.value() as u128,
            collateral.raw(),
            locked_price.raw(),
        )?;
        Some(Self {
            notional_amount,
            locked_price,
            side,
            opened_at,
        })
    }
}
