//! Error types for the ledger engine.

use crate::account::{AccountId, AccountStatus};
use crate::money::Money;
use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur during ledger operation.
///
/// All validation failures are recoverable; the engine never retries on
/// behalf of the caller.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Account holder is below the eligible age
    #[error("age {age} is below the minimum of 18")]
    AgeIneligible { age: u32 },

    /// Opening deposit is negative
    #[error("invalid opening deposit {amount}")]
    InvalidDeposit { amount: Money },

    /// Transaction amount must be strictly positive
    #[error("invalid amount {amount}: must be greater than zero")]
    InvalidAmount { amount: Money },

    /// Single deposit exceeds the per-deposit cap
    #[error("deposit {amount} exceeds the single-deposit cap of {cap}")]
    DepositCapExceeded { amount: Money, cap: Money },

    /// Operation attempted on a closed account
    #[error("account {id} is closed")]
    AccountClosed { id: AccountId },

    /// No account with the given id
    #[error("account {id} not found")]
    AccountNotFound { id: AccountId },

    /// Provided PIN does not match the stored PIN
    #[error("PIN mismatch")]
    PinMismatch,

    /// Withdrawal would take the balance below the required minimum
    #[error(
        "insufficient funds: balance {balance} minus {requested} would fall below minimum {minimum}"
    )]
    InsufficientFunds {
        balance: Money,
        requested: Money,
        minimum: Money,
    },

    /// Cumulative withdrawals for the day would exceed the daily limit
    #[error(
        "daily limit exceeded: {withdrawn_today} already withdrawn today, {requested} more would exceed {limit}"
    )]
    DailyLimitExceeded {
        withdrawn_today: Money,
        requested: Money,
        limit: Money,
    },

    /// Transfer target account does not exist
    #[error("transfer target account {id} not found")]
    TargetNotFound { id: AccountId },

    /// Transfer target account is closed
    #[error("transfer target account {id} is closed")]
    TargetClosed { id: AccountId },

    /// Source and target of a transfer are the same account
    #[error("cannot transfer an amount to the originating account")]
    SelfTransfer,

    /// Lifecycle transition attempted from the wrong state
    #[error("account {id} is {status}; operation not permitted in this state")]
    InvalidState { id: AccountId, status: AccountStatus },

    /// Insight requested over a registry with no open accounts
    #[error("no open accounts in the registry")]
    EmptyRegistry,

    /// Failed to open or read an input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Missing input file argument
    #[error("Missing input file argument. Usage: bank-ledger <accounts.csv>")]
    MissingArgument,
}
