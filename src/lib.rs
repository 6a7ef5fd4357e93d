//! # Bank Ledger
//!
//! An in-memory banking ledger engine: accounts, rule-gated deposits and
//! withdrawals, atomic transfers, and read-only insight queries.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: 2 decimal places via `rust_decimal`
//! - **Explicit ownership**: the registry is a plain value owned by the
//!   caller; there is no process-wide account store
//! - **Rules before mutation**: every check runs before any balance moves,
//!   so transfers are atomic and failed operations leave no trace
//! - **Append-only history**: each account owns an ordered transaction log
//!
//! ## Example
//!
//! ```
//! use bank_ledger::{AccountRegistry, AccountType, Money};
//! use std::str::FromStr;
//!
//! let mut registry = AccountRegistry::new();
//! let id = registry
//!     .create_account("Asha", 25, Money::from_str("1000").unwrap(), AccountType::Savings, "1234")
//!     .unwrap();
//! let balance = registry.withdraw(id, Money::from_str("200").unwrap(), "1234").unwrap();
//! assert_eq!(balance.to_string(), "800.00");
//! ```

pub mod account;
pub mod error;
pub mod money;
pub mod record;
pub mod registry;
pub mod rules;
pub mod transaction;

pub use account::{
    Account, AccountId, AccountStatus, AccountType, DAILY_WITHDRAWAL_LIMIT, SINGLE_DEPOSIT_CAP,
};
pub use error::{LedgerError, Result};
pub use money::Money;
pub use record::{AccountRecord, AccountSnapshot, BulkLoadReport, RejectedRecord};
pub use registry::AccountRegistry;
pub use transaction::{Transaction, TransactionLedger, TxKind};
