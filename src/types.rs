// 1.0: all the primitives live here. nothing in the pool or ledger works without these types.
// addresses, amounts, prices, leverage, timestamps. each is a newtype so the compiler catches
// unit mixups (an 8-decimal oracle answer is not an 18-decimal amount).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fractional decimal digits of every token amount.
pub const AMOUNT_DECIMALS: u32 = 18;

/// Fractional decimal digits of a raw oracle answer.
pub const PRICE_DECIMALS: u32 = 8;

/// One whole token unit in raw amount representation.
pub const ONE: u128 = 10u128.pow(AMOUNT_DECIMALS);

/// One whole unit in raw oracle-answer representation.
pub const PRICE_ONE: u128 = 10u128.pow(PRICE_DECIMALS);

/// Scale gap between an oracle answer and an 18-decimal price.
pub const PRICE_SCALE_GAP: u128 = 10u128.pow(AMOUNT_DECIMALS - PRICE_DECIMALS);

/// Cumulative leverage ceiling per account/token pair.
pub const MAX_LEVERAGE: u32 = 10;

// 1.1: opaque on-ledger identity. used for both token contracts and account owners.
// the zero address is never a valid token or owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address(pub u64);

impl Address {
    pub const ZERO: Address = Address(0);

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.0)
    }
}

// writes a raw 18-decimal fixed-point value as a decimal string, fraction trimmed
fn fmt_fixed(raw: u128, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let units = raw / ONE;
    let frac = raw % ONE;
    if frac == 0 {
        write!(f, "{units}")
    } else {
        let digits = format!("{frac:018}");
        write!(f, "{}.{}", units, digits.trim_end_matches('0'))
    }
}

// 1.2: unsigned token amount, raw u128 at 18 fractional decimals. all arithmetic is
// exact integer arithmetic; overflow is surfaced through the checked helpers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    /// Whole token units scaled up by 10^18.
    pub fn from_units(units: u64) -> Self {
        Self(units as u128 * ONE)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    #[must_use]
    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_fixed(self.0, f)
    }
}

// 1.3: reference price, raw u128 at 18 fractional decimals. constructed from an
// 8-decimal oracle answer by scaling up, matching how a locked price is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price(u128);

impl Price {
    #[must_use]
    pub fn new(raw: u128) -> Option<Self> {
        if raw > 0 {
            Some(Self(raw))
        } else {
            None
        }
    }

    /// Lifts an 8-decimal oracle answer to the 18-decimal convention.
    /// Returns `None` for a zero answer or on overflow.
    #[must_use]
    pub fn from_answer(answer: u128) -> Option<Self> {
        if answer == 0 {
            return None;
        }
        answer.checked_mul(PRICE_SCALE_GAP).map(Self)
    }

    /// Whole price units scaled up by 10^18.
    pub fn from_units(units: u64) -> Self {
        Self(units as u128 * ONE)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_fixed(self.0, f)
    }
}

// 1.4: integer leverage multiplier. whole multiples only, no fractional leverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Leverage(pub u32);

impl Leverage {
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Leverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}

// Long = exposure gains when the reference price rises. Short = the opposite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Long,
    Short,
}

impl Side {
    pub fn opposite(&self) -> Self {
        match self {
            Side::Long => Side::Short,
            Side::Short => Side::Long,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Long => write!(f, "long"),
            Side::Short => write!(f, "short"),
        }
    }
}

// 1.5: millisecond timestamp. components carry a settable clock for deterministic tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp_millis())
    }

    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn as_millis(&self) -> i64 {
        self.0
    }
}
