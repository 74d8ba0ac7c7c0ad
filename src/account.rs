//! Margin account state.
//!
//! One account exists per owner/collateral-token pair, created implicitly on first
//! deposit. Collateral only accumulates and `total_leverage` only grows, bounded by
//! `MAX_LEVERAGE`; there is no withdrawal or close path in scope.

use crate::position::Position;
use crate::types::{Amount, Leverage, MAX_LEVERAGE};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginAccount {
    pub enabled: bool,
    pub collateral: Amount,
    /// Sum of leverage multipliers across every position ever opened.
    pub total_leverage: u32,
    pub positions: Vec<Position>,
}

impl MarginAccount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits a deposit and enables the account. `None` on overflow.
    #[must_use]
    pub fn deposit(&mut self, amount: Amount) -> Option<Amount> {
        let collateral = self.collateral.checked_add(amount)?;
        self.collateral = collateral;
        self.enabled = true;
        Some(collateral)
    }

    /// Leverage headroom left under the cumulative cap.
    pub fn remaining_leverage(&self) -> u32 {
        MAX_LEVERAGE.saturating_sub(self.total_leverage)
    }

    pub fn can_add_leverage(&self, leverage: Leverage) -> bool {
        leverage.value() <= self.remaining_leverage()
    }

    /// Records an opened position. Caller validates the cap first.
    pub fn push_position(&mut self, position: Position, leverage: Leverage) {
        self.positions.push(position);
        self.total_leverage += leverage.value();
    }
}
