// 4.0: every successful mutating call produces exactly one record of each kind it
// documents, emitted after all state changes with values reflecting the final state.
// external observers and tests reconstruct behavior from these, never from internals.

use crate::types::{Address, Amount, Leverage, Side, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub timestamp: Timestamp,
    pub payload: EventPayload,
}

impl Event {
    pub fn new(id: EventId, timestamp: Timestamp, payload: EventPayload) -> Self {
        Self {
            id,
            timestamp,
            payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventPayload {
    // pool events
    AddLiquidity(AddLiquidityEvent),
    Exchange(ExchangeEvent),
    UpdateReserves(UpdateReservesEvent),

    // ledger events
    DepositToken(DepositTokenEvent),
    OpenPosition(OpenPositionEvent),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddLiquidityEvent {
    pub provider: Address,
    pub amount_a: Amount,
    pub amount_b: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeEvent {
    pub sender: Address,
    pub traded_token: Address,
    pub traded_amount: Amount,
}

/// Before/after values of both reserves. The output-side pair comes first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateReservesEvent {
    pub old_reserve_out: Amount,
    pub new_reserve_out: Amount,
    pub old_reserve_in: Amount,
    pub new_reserve_in: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositTokenEvent {
    pub account: Address,
    pub token: Address,
    pub amount: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenPositionEvent {
    pub account: Address,
    pub leverage: Leverage,
    /// Whole units of the reference asset (the 18-decimal scales cancel).
    pub notional_amount: u128,
    pub side: Side,
}

pub trait EventEmitter {
    fn emit(&mut self, event: Event);
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct EventCollector {
    events: Vec<Event>,
    next_id: u64,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            next_id: 1,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn next_id(&mut self) -> EventId {
        let id = EventId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl EventEmitter for EventCollector {
    fn emit(&mut self, event: Event) {
        self.events.push(event);
    }
}
