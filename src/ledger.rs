// 6.0: the margin ledger. per owner/collateral-token accounts, leveraged exposure
// opened against an oracle price locked at open time. the cumulative leverage cap
// is the only risk control in scope; positions are permanent once opened.

use crate::account::MarginAccount;
use crate::events::{
    DepositTokenEvent, Event, EventCollector, EventEmitter, EventPayload, OpenPositionEvent,
};
use crate::position::Position;
use crate::price_feed::{OracleError, PriceOracle};
use crate::token::{TokenError, TokenLedger};
use crate::types::{Address, Amount, Leverage, Price, Side, Timestamp, MAX_LEVERAGE};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum LedgerError {
    #[error("invalid token")]
    InvalidToken,

    #[error("zero amount")]
    ZeroAmount,

    #[error("zero leverage")]
    ZeroLeverage,

    #[error("exceeded MAX_LEVERAGE")]
    ExceededMaxLeverage,

    #[error("insufficient collateral")]
    InsufficientCollateral,

    #[error("exceeded MAX position")]
    ExceededMaxPosition,

    #[error("invalid oracle price")]
    InvalidOraclePrice,

    #[error("arithmetic overflow")]
    Overflow,

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Outcome of a successful position open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenPositionResult {
    pub notional_amount: u128,
    pub locked_price: Price,
    pub side: Side,
    pub total_leverage: u32,
}

// 6.1: ledger state. accounts are created implicitly on first deposit and
// never removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginLedger {
    address: Address,
    accounts: HashMap<(Address, Address), MarginAccount>,
    events: EventCollector,
    current_time: Timestamp,
}

impl MarginLedger {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            accounts: HashMap::new(),
            events: EventCollector::new(),
            current_time: Timestamp::from_millis(0),
        }
    }

    pub fn address(&self) -> Address {
        self.address
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

    pub fn get_account(&self, owner: Address, token: Address) -> Option<&MarginAccount> {
        self.accounts.get(&(owner, token))
    }

    pub fn get_positions(&self, owner: Address, token: Address) -> &[Position] {
        self.accounts
            .get(&(owner, token))
            .map(|account| account.positions.as_slice())
            .unwrap_or(&[])
    }

    fn emit(&mut self, payload: EventPayload) {
        let event = Event::new(self.events.next_id(), self.current_time, payload);
        self.events.emit(event);
    }

    // 6.2: deposit collateral. enables the account on first deposit, accumulates
    // on every later one. the transfer is the first mutation, so an allowance or
    // balance failure leaves nothing changed.
    pub fn deposit_token(
        &mut self,
        tokens: &mut dyn TokenLedger,
        caller: Address,
        token: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if token.is_zero() || caller.is_zero() {
            return Err(LedgerError::InvalidToken);
        }
        if amount.is_zero() {
            return Err(LedgerError::ZeroAmount);
        }

        // precheck the credit so a collateral overflow cannot strand a transfer,
        // without inserting an account that a failed call would leave behind
        let collateral = self
            .accounts
            .get(&(caller, token))
            .map(|account| account.collateral)
            .unwrap_or(Amount::ZERO);
        collateral.checked_add(amount).ok_or(LedgerError::Overflow)?;

        tokens.transfer_from(token, caller, self.address, self.address, amount)?;

        let account = self.accounts.entry((caller, token)).or_default();
        account.deposit(amount).ok_or(LedgerError::Overflow)?;

        self.emit(EventPayload::DepositToken(DepositTokenEvent {
            account: caller,
            token,
            amount,
        }));
        Ok(())
    }

    // 6.3: open a leveraged position against the latest oracle round. validation
    // order: per-call leverage bound, collateral present, cumulative cap, oracle
    // read. only then is any state written.
    pub fn open_position(
        &mut self,
        oracle: &dyn PriceOracle,
        caller: Address,
        token: Address,
        leverage: Leverage,
        side: Side,
    ) -> Result<OpenPositionResult, LedgerError> {
        if leverage.value() == 0 {
            return Err(LedgerError::ZeroLeverage);
        }
        if leverage.value() > MAX_LEVERAGE {
            return Err(LedgerError::ExceededMaxLeverage);
        }

        let account = self
            .accounts
            .get(&(caller, token))
            .ok_or(LedgerError::InsufficientCollateral)?;
        if account.collateral.is_zero() {
            return Err(LedgerError::InsufficientCollateral);
        }
        if !account.can_add_leverage(leverage) {
            return Err(LedgerError::ExceededMaxPosition);
        }
        let collateral = account.collateral;
        let total_leverage = account.total_leverage;

        let round = oracle.latest_round()?;
        let locked_price =
            Price::from_answer(round.answer).ok_or(LedgerError::InvalidOraclePrice)?;

        let position = Position::open(collateral, leverage, locked_price, side, self.current_time)
            .ok_or(LedgerError::Overflow)?;
        let result = OpenPositionResult {
            notional_amount: position.notional_amount,
            locked_price,
            side,
            total_leverage: total_leverage + leverage.value(),
        };

        let account = self
            .accounts
            .get_mut(&(caller, token))
            .ok_or(LedgerError::InsufficientCollateral)?;
        account.push_position(position, leverage);

        self.emit(EventPayload::OpenPosition(OpenPositionEvent {
            account: caller,
            leverage,
            notional_amount: position.notional_amount,
            side,
        }));
        Ok(result)
    }

    pub fn open_long_position(
        &mut self,
        oracle: &dyn PriceOracle,
        caller: Address,
        token: Address,
        leverage: Leverage,
    ) -> Result<OpenPositionResult, LedgerError> {
        self.open_position(oracle, caller, token, leverage, Side::Long)
    }

    pub fn open_short_position(
        &mut self,
        oracle: &dyn PriceOracle,
        caller: Address,
        token: Address,
        leverage: Leverage,
    ) -> Result<OpenPositionResult, LedgerError> {
        self.open_position(oracle, caller, token, leverage, Side::Short)
    }
}
