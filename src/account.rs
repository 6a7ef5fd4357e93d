//! Account entity and its transaction operations.
//!
//! Maintains the invariant: an Open account's balance never drops below
//! its type's minimum balance through a withdrawal or transfer. Deposits
//! and account creation may leave the balance under the floor; the floor
//! gates outflows only.

use crate::error::{LedgerError, Result};
use crate::money::Money;
use crate::rules;
use crate::transaction::{Transaction, TransactionLedger, TxKind};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique account identifier. Never reused, even after closing.
pub type AccountId = u32;

/// Largest amount accepted in a single deposit: 100,000.00.
pub const SINGLE_DEPOSIT_CAP: Money = Money::from_cents(10_000_000);

/// Cumulative withdrawal allowance per account per UTC day: 50,000.00.
///
/// The counter is derived from the transaction log, so it resets at UTC
/// midnight with no extra state to maintain.
pub const DAILY_WITHDRAWAL_LIMIT: Money = Money::from_cents(5_000_000);

/// The kind of account, which determines the minimum balance floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    #[serde(alias = "Savings")]
    Savings,
    #[serde(alias = "Current")]
    Current,
}

impl AccountType {
    /// Floor an Open account of this type must keep after any outflow.
    pub fn minimum_balance(&self) -> Money {
        match self {
            AccountType::Savings => Money::from_cents(50_000),
            AccountType::Current => Money::from_cents(100_000),
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountType::Savings => write!(f, "Savings"),
            AccountType::Current => write!(f, "Current"),
        }
    }
}

/// Account lifecycle state.
///
/// Closed accounts reject every mutation except reopening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccountStatus {
    Open,
    Closed,
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountStatus::Open => write!(f, "Open"),
            AccountStatus::Closed => write!(f, "Closed"),
        }
    }
}

/// A customer account with its own append-only transaction log.
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    holder_name: String,
    age: u32,
    account_type: AccountType,
    balance: Money,
    pin: String,
    status: AccountStatus,
    ledger: TransactionLedger,
}

impl Account {
    /// Creates an Open account and records the opening deposit.
    ///
    /// Caller (the registry) has already validated age and deposit sign.
    pub(crate) fn open_at(
        now: DateTime<Utc>,
        id: AccountId,
        holder_name: String,
        age: u32,
        initial_deposit: Money,
        account_type: AccountType,
        pin: String,
    ) -> Self {
        let mut ledger = TransactionLedger::new();
        ledger.append(now, TxKind::Deposit, initial_deposit, initial_deposit, None);

        Account {
            id,
            holder_name,
            age,
            account_type,
            balance: initial_deposit,
            pin,
            status: AccountStatus::Open,
            ledger,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn status(&self) -> AccountStatus {
        self.status
    }

    /// Returns `true` if the account accepts mutations.
    pub fn is_open(&self) -> bool {
        self.status == AccountStatus::Open
    }

    /// Read-only history view, oldest entry first.
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.ledger.iter()
    }

    /// Cumulative withdrawals and transfer-outs recorded on `date` (UTC).
    pub fn withdrawn_on(&self, date: NaiveDate) -> Money {
        self.ledger.withdrawn_on(date)
    }

    pub(crate) fn set_holder_name(&mut self, name: String) {
        self.holder_name = name;
    }

    pub(crate) fn set_account_type(&mut self, account_type: AccountType) {
        self.account_type = account_type;
    }

    pub(crate) fn set_status(&mut self, status: AccountStatus) {
        self.status = status;
    }

    /// Deposits funds, returning the new balance.
    pub fn deposit(&mut self, amount: Money) -> Result<Money> {
        self.deposit_at(Utc::now(), amount)
    }

    /// Deposit with an explicit timestamp.
    pub fn deposit_at(&mut self, now: DateTime<Utc>, amount: Money) -> Result<Money> {
        if !self.is_open() {
            return Err(LedgerError::AccountClosed { id: self.id });
        }
        if amount <= Money::ZERO {
            return Err(LedgerError::InvalidAmount { amount });
        }
        if amount > SINGLE_DEPOSIT_CAP {
            return Err(LedgerError::DepositCapExceeded {
                amount,
                cap: SINGLE_DEPOSIT_CAP,
            });
        }

        Ok(self.apply_credit_at(now, amount, TxKind::Deposit, None))
    }

    /// Withdraws funds, returning the new balance.
    ///
    /// Checks run in a fixed order and the first failure wins: account
    /// open, PIN match, positive amount, minimum balance, daily limit.
    pub fn withdraw(&mut self, amount: Money, pin: &str) -> Result<Money> {
        self.withdraw_at(Utc::now(), amount, pin)
    }

    /// Withdrawal with an explicit timestamp.
    pub fn withdraw_at(&mut self, now: DateTime<Utc>, amount: Money, pin: &str) -> Result<Money> {
        self.authorize_debit_at(now, amount, pin)?;
        Ok(self.apply_debit_at(now, amount, TxKind::Withdrawal, None))
    }

    /// Runs the full ordered debit rule chain without mutating anything.
    ///
    /// Shared by withdrawals and the source leg of transfers so both gate
    /// on identical rules.
    pub(crate) fn authorize_debit_at(
        &self,
        now: DateTime<Utc>,
        amount: Money,
        pin: &str,
    ) -> Result<()> {
        if !self.is_open() {
            return Err(LedgerError::AccountClosed { id: self.id });
        }
        rules::check_pin(pin, &self.pin)?;
        if amount <= Money::ZERO {
            return Err(LedgerError::InvalidAmount { amount });
        }
        rules::check_minimum_balance(self.balance, amount, self.account_type.minimum_balance())?;
        rules::check_daily_limit(
            self.withdrawn_on(now.date_naive()),
            amount,
            DAILY_WITHDRAWAL_LIMIT,
        )?;
        Ok(())
    }

    /// Applies a validated credit and records it. Returns the new balance.
    pub(crate) fn apply_credit_at(
        &mut self,
        now: DateTime<Utc>,
        amount: Money,
        kind: TxKind,
        counterparty: Option<AccountId>,
    ) -> Money {
        self.balance += amount;
        self.ledger
            .append(now, kind, amount, self.balance, counterparty);
        self.balance
    }

    /// Applies a validated debit and records it. Returns the new balance.
    pub(crate) fn apply_debit_at(
        &mut self,
        now: DateTime<Utc>,
        amount: Money,
        kind: TxKind,
        counterparty: Option<AccountId>,
    ) -> Money {
        self.balance -= amount;
        self.ledger
            .append(now, kind, amount, self.balance, counterparty);
        self.balance
    }
}
