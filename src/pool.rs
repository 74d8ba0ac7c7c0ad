// 5.0: the reserve pool. two token reserves, constant-relationship swap pricing,
// no liquidity shares. every operation validates fully before touching any state,
// so a failed call leaves reserves and balances byte-identical.

use crate::events::{
    AddLiquidityEvent, Event, EventCollector, EventEmitter, EventPayload, ExchangeEvent,
    UpdateReservesEvent,
};
use crate::math::mul_div;
use crate::token::{TokenError, TokenLedger};
use crate::types::{Address, Amount, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum PoolError {
    #[error("invalid path")]
    InvalidPath,

    #[error("zero amount")]
    ZeroAmount,

    #[error("pool not seeded")]
    NotSeeded,

    #[error("insufficient allowance")]
    InsufficientAllowance,

    #[error("insufficient balance")]
    InsufficientBalance,

    #[error("insufficient output balance")]
    InsufficientOutputBalance,

    #[error("arithmetic overflow")]
    Overflow,

    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Outcome of a successful swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapResult {
    pub token_in: Address,
    pub token_out: Address,
    pub amount_in: Amount,
    pub amount_out: Amount,
}

// 5.1: pool state. reserves start at zero and are seeded by the first liquidity add.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservePool {
    address: Address,
    token_a: Address,
    token_b: Address,
    reserve_a: Amount,
    reserve_b: Amount,
    events: EventCollector,
    current_time: Timestamp,
}

impl ReservePool {
    pub fn new(address: Address, token_a: Address, token_b: Address) -> Self {
        Self {
            address,
            token_a,
            token_b,
            reserve_a: Amount::ZERO,
            reserve_b: Amount::ZERO,
            events: EventCollector::new(),
            current_time: Timestamp::from_millis(0),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn tokens(&self) -> (Address, Address) {
        (self.token_a, self.token_b)
    }

    pub fn get_reserves(&self) -> (Amount, Amount) {
        (self.reserve_a, self.reserve_b)
    }

    pub fn set_time(&mut self, timestamp: Timestamp) {
        self.current_time = timestamp;
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn clear_events(&mut self) {
        self.events.clear()
    }

    fn emit(&mut self, payload: EventPayload) {
        let event = Event::new(self.events.next_id(), self.current_time, payload);
        self.events.emit(event);
    }

    // 5.2: add liquidity at any ratio. both legs are prechecked so a failure on the
    // second token never leaves a half-applied transfer.
    pub fn add_liquidity(
        &mut self,
        tokens: &mut dyn TokenLedger,
        provider: Address,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<(), PoolError> {
        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(PoolError::ZeroAmount);
        }

        for (token, amount) in [(self.token_a, amount_a), (self.token_b, amount_b)] {
            if tokens.allowance(token, provider, self.address) < amount {
                return Err(PoolError::InsufficientAllowance);
            }
            if tokens.balance_of(token, provider) < amount {
                return Err(PoolError::InsufficientBalance);
            }
            tokens
                .balance_of(token, self.address)
                .checked_add(amount)
                .ok_or(PoolError::Overflow)?;
        }
        let new_reserve_a = self
            .reserve_a
            .checked_add(amount_a)
            .ok_or(PoolError::Overflow)?;
        let new_reserve_b = self
            .reserve_b
            .checked_add(amount_b)
            .ok_or(PoolError::Overflow)?;

        tokens.transfer_from(self.token_a, provider, self.address, self.address, amount_a)?;
        tokens.transfer_from(self.token_b, provider, self.address, self.address, amount_b)?;
        self.reserve_a = new_reserve_a;
        self.reserve_b = new_reserve_b;

        self.emit(EventPayload::AddLiquidity(AddLiquidityEvent {
            provider,
            amount_a,
            amount_b,
        }));
        Ok(())
    }

    // 5.3: single-hop swap. the pricing quotient is always evaluated against the
    // configured (reserve_a, reserve_b) ordering, whichever direction the trade
    // runs, and the magnitude of the reserve_b delta is the amount paid out.
    pub fn swap(
        &mut self,
        tokens: &mut dyn TokenLedger,
        caller: Address,
        amount_in: Amount,
        path: &[Address],
    ) -> Result<SwapResult, PoolError> {
        if amount_in.is_zero() {
            return Err(PoolError::ZeroAmount);
        }
        let [token_in, token_out] = *path else {
            return Err(PoolError::InvalidPath);
        };
        if token_in.is_zero() || token_out.is_zero() || token_in == token_out {
            return Err(PoolError::InvalidPath);
        }
        if !self.is_pool_token(token_in) || !self.is_pool_token(token_out) {
            return Err(PoolError::InvalidPath);
        }
        if self.reserve_a.is_zero() || self.reserve_b.is_zero() {
            return Err(PoolError::NotSeeded);
        }

        if tokens.allowance(token_in, caller, self.address) < amount_in {
            return Err(PoolError::InsufficientAllowance);
        }
        if tokens.balance_of(token_in, caller) < amount_in {
            return Err(PoolError::InsufficientBalance);
        }

        let amount_out = self.output_amount(amount_in)?;
        if tokens.balance_of(token_out, self.address) < amount_out {
            return Err(PoolError::InsufficientOutputBalance);
        }

        let (reserve_in, reserve_out) = if token_in == self.token_a {
            (self.reserve_a, self.reserve_b)
        } else {
            (self.reserve_b, self.reserve_a)
        };
        let new_reserve_in = reserve_in
            .checked_add(amount_in)
            .ok_or(PoolError::Overflow)?;
        let new_reserve_out = reserve_out
            .checked_sub(amount_out)
            .ok_or(PoolError::InsufficientOutputBalance)?;
        tokens
            .balance_of(token_out, caller)
            .checked_add(amount_out)
            .ok_or(PoolError::Overflow)?;

        // all checks passed; apply both transfers and the reserve update
        tokens.transfer_from(token_in, caller, self.address, self.address, amount_in)?;
        tokens.transfer(token_out, self.address, caller, amount_out)?;
        if token_in == self.token_a {
            self.reserve_a = new_reserve_in;
            self.reserve_b = new_reserve_out;
        } else {
            self.reserve_b = new_reserve_in;
            self.reserve_a = new_reserve_out;
        }

        self.emit(EventPayload::Exchange(ExchangeEvent {
            sender: caller,
            traded_token: token_in,
            traded_amount: amount_in,
        }));
        self.emit(EventPayload::UpdateReserves(UpdateReservesEvent {
            old_reserve_out: reserve_out,
            new_reserve_out,
            old_reserve_in: reserve_in,
            new_reserve_in,
        }));

        Ok(SwapResult {
            token_in,
            token_out,
            amount_in,
            amount_out,
        })
    }

    fn is_pool_token(&self, token: Address) -> bool {
        token == self.token_a || token == self.token_b
    }

    /// `|rA * rB / (rA + amountIn) - rB|` with floor division, independent of
    /// trade direction. The reserve-order asymmetry is intentional and kept.
    fn output_amount(&self, amount_in: Amount) -> Result<Amount, PoolError> {
        let r_a = self.reserve_a.raw();
        let r_b = self.reserve_b.raw();
        let denominator = r_a
            .checked_add(amount_in.raw())
            .ok_or(PoolError::Overflow)?;
        let quotient = mul_div(r_a, r_b, denominator).ok_or(PoolError::Overflow)?;
        Ok(Amount::from_raw(quotient.abs_diff(r_b)))
    }
}
