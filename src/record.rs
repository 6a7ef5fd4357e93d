//! Boundary records for bulk import and the read-only export view.

use crate::account::{AccountId, AccountStatus, AccountType};
use crate::error::{LedgerError, Result};
use crate::money::Money;
use crate::rules;
use serde::{Deserialize, Serialize};

/// One incoming account record for bulk import.
///
/// Validated exactly as `create_account` validates, field by field, before
/// it is admitted to the registry.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountRecord {
    pub holder_name: String,
    pub age: u32,
    pub initial_deposit: Money,
    pub account_type: AccountType,
    pub pin: String,
}

impl AccountRecord {
    /// Runs the creation rules against this record without touching any
    /// registry state.
    pub fn validate(&self) -> Result<()> {
        rules::check_age(self.age)?;
        if self.initial_deposit.is_negative() {
            return Err(LedgerError::InvalidDeposit {
                amount: self.initial_deposit,
            });
        }
        Ok(())
    }
}

/// Read-only export row describing one account.
///
/// The reporting layer owns serialization formats; this is the whole
/// boundary the core exposes for it.
#[derive(Debug, Clone, Serialize)]
pub struct AccountSnapshot {
    pub id: AccountId,
    pub holder_name: String,
    pub age: u32,
    pub account_type: AccountType,
    pub balance: Money,
    pub status: AccountStatus,
}

/// A record rejected during bulk import, paired with the rule it broke.
#[derive(Debug)]
pub struct RejectedRecord {
    pub record: AccountRecord,
    pub reason: LedgerError,
}

/// Outcome of a bulk import: admitted count plus every rejection.
///
/// Rejections never abort the batch; valid records are admitted even when
/// neighbours fail.
#[derive(Debug, Default)]
pub struct BulkLoadReport {
    pub succeeded: usize,
    pub rejected: Vec<RejectedRecord>,
}
