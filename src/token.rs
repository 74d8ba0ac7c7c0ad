// 3.0: the fungible-token collaborator. the pool and ledger only ever read balances,
// read allowances, and request transfers; any failure aborts the enclosing operation
// with nothing applied. the in-memory implementation backs tests and the sim.

use crate::types::{Address, Amount};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum TokenError {
    #[error("insufficient allowance")]
    InsufficientAllowance,

    #[error("insufficient balance")]
    InsufficientBalance,

    #[error("arithmetic overflow")]
    Overflow,
}

/// Standard fungible-token ledger surface. `transfer` moves a holder's own funds,
/// `transfer_from` spends an allowance previously granted to `spender`.
pub trait TokenLedger {
    fn balance_of(&self, token: Address, account: Address) -> Amount;

    fn allowance(&self, token: Address, owner: Address, spender: Address) -> Amount;

    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TokenError>;

    fn transfer_from(
        &mut self,
        token: Address,
        owner: Address,
        spender: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TokenError>;
}

// 3.1: in-memory token bank. every token is just a balance map; mint and approve
// replace the deploy-and-fund choreography of a live environment.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct InMemoryTokenLedger {
    // (token, holder) -> balance
    balances: HashMap<(Address, Address), Amount>,
    // (token, owner, spender) -> remaining allowance
    allowances: HashMap<(Address, Address, Address), Amount>,
}

impl InMemoryTokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&mut self, token: Address, to: Address, amount: Amount) -> Result<(), TokenError> {
        let balance = self.balances.entry((token, to)).or_default();
        *balance = balance.checked_add(amount).ok_or(TokenError::Overflow)?;
        Ok(())
    }

    pub fn approve(&mut self, token: Address, owner: Address, spender: Address, amount: Amount) {
        self.allowances.insert((token, owner, spender), amount);
    }

    fn move_balance(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let from_balance = self.balance_of(token, from);
        let new_from = from_balance
            .checked_sub(amount)
            .ok_or(TokenError::InsufficientBalance)?;
        // a self-transfer conserves the balance; writing both legs from the
        // stale read would credit the debit away
        if from == to {
            return Ok(());
        }
        let new_to = self
            .balance_of(token, to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        self.balances.insert((token, from), new_from);
        self.balances.insert((token, to), new_to);
        Ok(())
    }
}

impl TokenLedger for InMemoryTokenLedger {
    fn balance_of(&self, token: Address, account: Address) -> Amount {
        self.balances
            .get(&(token, account))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn allowance(&self, token: Address, owner: Address, spender: Address) -> Amount {
        self.allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        self.move_balance(token, from, to, amount)
    }

    fn transfer_from(
        &mut self,
        token: Address,
        owner: Address,
        spender: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let granted = self.allowance(token, owner, spender);
        let remaining = granted
            .checked_sub(amount)
            .ok_or(TokenError::InsufficientAllowance)?;
        self.move_balance(token, owner, to, amount)?;
        self.allowances.insert((token, owner, spender), remaining);
        Ok(())
    }
}
