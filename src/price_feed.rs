// Price Feed Integration
//
// The ledger is agnostic to where the reference price comes from. Anything that
// can answer "what is the latest round" works: a real aggregator adapter, a
// replayed fixture, or the mock below. Answers carry 8 fractional decimals and
// freshness metadata; the ledger treats whatever it reads as final.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum OracleError {
    #[error("no price available")]
    NoPrice,
}

/// One oracle round, shaped like an aggregator's `latestRoundData` answer.
/// `answer` is a raw unsigned price with 8 fractional decimal digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundData {
    pub round_id: u64,
    pub answer: u128,
    pub started_at: u64,
    pub updated_at: u64,
    pub answered_in_round: u64,
}

/// Read-only price capability consumed by the margin ledger.
pub trait PriceOracle {
    fn latest_round(&self) -> Result<RoundData, OracleError>;
}

// mock oracle for tests and the sim. set a price, every read returns it.
#[derive(Debug, Default, Clone)]
pub struct MockPriceOracle {
    round: Option<RoundData>,
    next_round_id: u64,
}

impl MockPriceOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a whole-unit price (e.g. 2468) as the next round.
    pub fn set_price(&mut self, units: u64) {
        self.set_answer(units as u128 * crate::types::PRICE_ONE);
    }

    /// Publishes a raw 8-decimal answer as the next round.
    pub fn set_answer(&mut self, answer: u128) {
        self.next_round_id += 1;
        self.round = Some(RoundData {
            round_id: self.next_round_id,
            answer,
            started_at: 0,
            updated_at: 0,
            answered_in_round: self.next_round_id,
        });
    }

    pub fn set_round(&mut self, round: RoundData) {
        self.round = Some(round);
    }

    pub fn clear(&mut self) {
        self.round = None;
    }
}

impl PriceOracle for MockPriceOracle {
    fn latest_round(&self) -> Result<RoundData, OracleError> {
        self.round.ok_or(OracleError::NoPrice)
    }
}
