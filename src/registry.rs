//! Account registry: lifecycle, lookup, transfers and insights.
//!
//! Owns every account and is the only way to reach one. Ids are allocated
//! from a counter that is never rewound, so ascending id order equals
//! creation order and iteration for reports is deterministic.

use crate::account::{Account, AccountId, AccountStatus, AccountType};
use crate::error::{LedgerError, Result};
use crate::money::Money;
use crate::record::{AccountRecord, AccountSnapshot, BulkLoadReport, RejectedRecord};
use crate::rules;
use crate::transaction::TxKind;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::collections::BTreeMap;

/// First id handed out by a fresh registry.
const FIRST_ACCOUNT_ID: AccountId = 1001;

/// In-memory collection of accounts.
///
/// Single-threaded by design: callers embedding the registry in a
/// concurrent host must serialize writers externally.
pub struct AccountRegistry {
    /// Accounts keyed by id. BTreeMap keeps iteration in id order, which
    /// doubles as creation order since ids only ever grow.
    accounts: BTreeMap<AccountId, Account>,

    /// Next id to allocate. Not reset by `delete_all`, so ids are never
    /// reused for the lifetime of the registry.
    next_id: AccountId,
}

impl AccountRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        AccountRegistry {
            accounts: BTreeMap::new(),
            next_id: FIRST_ACCOUNT_ID,
        }
    }

    /// Number of accounts, open or closed.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns `true` if no accounts exist.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Iterates all accounts in creation order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Opens a new account and logs its opening deposit.
    ///
    /// Fails with `AgeIneligible` for holders under 18 and
    /// `InvalidDeposit` for a negative opening amount.
    pub fn create_account(
        &mut self,
        holder_name: &str,
        age: u32,
        initial_deposit: Money,
        account_type: AccountType,
        pin: &str,
    ) -> Result<AccountId> {
        self.create_account_at(Utc::now(), holder_name, age, initial_deposit, account_type, pin)
    }

    /// Account creation with an explicit timestamp for the opening entry.
    pub fn create_account_at(
        &mut self,
        now: DateTime<Utc>,
        holder_name: &str,
        age: u32,
        initial_deposit: Money,
        account_type: AccountType,
        pin: &str,
    ) -> Result<AccountId> {
        rules::check_age(age)?;
        if initial_deposit.is_negative() {
            return Err(LedgerError::InvalidDeposit {
                amount: initial_deposit,
            });
        }

        let id = self.next_id;
        self.next_id += 1;

        let account = Account::open_at(
            now,
            id,
            holder_name.to_string(),
            age,
            initial_deposit,
            account_type,
            pin.to_string(),
        );
        self.accounts.insert(id, account);

        debug!(
            "Opened {} account {} for {} with {}",
            account_type, id, holder_name, initial_deposit
        );
        Ok(id)
    }

    /// Looks up an account by id.
    pub fn find(&self, id: AccountId) -> Result<&Account> {
        self.accounts
            .get(&id)
            .ok_or(LedgerError::AccountNotFound { id })
    }

    /// Looks up an account by id for mutation.
    pub fn find_mut(&mut self, id: AccountId) -> Result<&mut Account> {
        self.accounts
            .get_mut(&id)
            .ok_or(LedgerError::AccountNotFound { id })
    }

    /// Deposits into the identified account.
    pub fn deposit(&mut self, id: AccountId, amount: Money) -> Result<Money> {
        self.deposit_at(Utc::now(), id, amount)
    }

    /// Deposit with an explicit timestamp.
    pub fn deposit_at(&mut self, now: DateTime<Utc>, id: AccountId, amount: Money) -> Result<Money> {
        let balance = self.find_mut(id)?.deposit_at(now, amount)?;
        debug!("Deposited {} to account {}, balance now {}", amount, id, balance);
        Ok(balance)
    }

    /// Withdraws from the identified account.
    pub fn withdraw(&mut self, id: AccountId, amount: Money, pin: &str) -> Result<Money> {
        self.withdraw_at(Utc::now(), id, amount, pin)
    }

    /// Withdrawal with an explicit timestamp.
    pub fn withdraw_at(
        &mut self,
        now: DateTime<Utc>,
        id: AccountId,
        amount: Money,
        pin: &str,
    ) -> Result<Money> {
        let balance = self.find_mut(id)?.withdraw_at(now, amount, pin)?;
        debug!("Withdrew {} from account {}, balance now {}", amount, id, balance);
        Ok(balance)
    }

    /// Moves funds between two accounts as one indivisible unit.
    ///
    /// The source is gated by the same ordered rule chain as a withdrawal;
    /// the target must exist, be open and differ from the source. Every
    /// check runs before either balance moves, so a failed transfer leaves
    /// both accounts and both logs untouched.
    pub fn transfer(
        &mut self,
        from_id: AccountId,
        to_id: AccountId,
        amount: Money,
        pin: &str,
    ) -> Result<(Money, Money)> {
        self.transfer_at(Utc::now(), from_id, to_id, amount, pin)
    }

    /// Transfer with an explicit timestamp.
    pub fn transfer_at(
        &mut self,
        now: DateTime<Utc>,
        from_id: AccountId,
        to_id: AccountId,
        amount: Money,
        pin: &str,
    ) -> Result<(Money, Money)> {
        let source = self.find(from_id)?;
        source.authorize_debit_at(now, amount, pin)?;

        if to_id == from_id {
            return Err(LedgerError::SelfTransfer);
        }
        let target = self
            .accounts
            .get(&to_id)
            .ok_or(LedgerError::TargetNotFound { id: to_id })?;
        if !target.is_open() {
            return Err(LedgerError::TargetClosed { id: to_id });
        }

        // All rules passed; apply both legs.
        // Safety: both accounts were just looked up above
        let from_balance = self
            .accounts
            .get_mut(&from_id)
            .expect("source account exists")
            .apply_debit_at(now, amount, TxKind::TransferOut, Some(to_id));
        let to_balance = self
            .accounts
            .get_mut(&to_id)
            .expect("target account exists")
            .apply_credit_at(now, amount, TxKind::TransferIn, Some(from_id));

        debug!(
            "Transferred {} from account {} to account {}",
            amount, from_id, to_id
        );
        Ok((from_balance, to_balance))
    }

    /// Closes an Open account. Fails with `InvalidState` if already Closed.
    pub fn close_account(&mut self, id: AccountId) -> Result<()> {
        let account = self.find_mut(id)?;
        if !account.is_open() {
            return Err(LedgerError::InvalidState {
                id,
                status: AccountStatus::Closed,
            });
        }
        account.set_status(AccountStatus::Closed);
        debug!("Closed account {}", id);
        Ok(())
    }

    /// Reopens a Closed account. Fails with `InvalidState` if already Open.
    pub fn reopen_account(&mut self, id: AccountId) -> Result<()> {
        let account = self.find_mut(id)?;
        if account.is_open() {
            return Err(LedgerError::InvalidState {
                id,
                status: AccountStatus::Open,
            });
        }
        account.set_status(AccountStatus::Open);
        debug!("Reopened account {}", id);
        Ok(())
    }

    /// Changes the account type. Fails with `InvalidState` on a Closed account.
    ///
    /// Moving to a type with a higher floor does not retroactively require
    /// the balance to meet it; the floor gates future outflows only.
    pub fn upgrade_type(&mut self, id: AccountId, new_type: AccountType) -> Result<()> {
        let account = self.find_mut(id)?;
        if !account.is_open() {
            return Err(LedgerError::InvalidState {
                id,
                status: AccountStatus::Closed,
            });
        }
        account.set_account_type(new_type);
        debug!("Account {} is now a {} account", id, new_type);
        Ok(())
    }

    /// Renames the holder. Only existence is checked.
    pub fn rename_holder(&mut self, id: AccountId, new_name: &str) -> Result<()> {
        self.find_mut(id)?.set_holder_name(new_name.to_string());
        Ok(())
    }

    /// Finds accounts whose holder name matches, case-insensitively.
    pub fn find_by_name(&self, name: &str) -> Vec<&Account> {
        self.accounts
            .values()
            .filter(|a| a.holder_name().eq_ignore_ascii_case(name))
            .collect()
    }

    /// Clears the entire registry. Irreversible; id allocation continues
    /// from where it left off.
    pub fn delete_all(&mut self) {
        let count = self.accounts.len();
        self.accounts.clear();
        warn!("Deleted all {} accounts from the registry", count);
    }

    /// The `n` Open accounts with the highest balances, descending, ties
    /// broken by ascending id.
    pub fn top_n_by_balance(&self, n: usize) -> Vec<&Account> {
        let mut open: Vec<&Account> = self.accounts.values().filter(|a| a.is_open()).collect();
        open.sort_by(|a, b| {
            b.balance()
                .cmp(&a.balance())
                .then(a.id().cmp(&b.id()))
        });
        open.truncate(n);
        open
    }

    /// The Open account with the lowest holder age, earliest-created on ties.
    pub fn youngest(&self) -> Result<&Account> {
        self.extreme_by_age(|candidate, best| candidate < best)
    }

    /// The Open account with the highest holder age, earliest-created on ties.
    pub fn oldest(&self) -> Result<&Account> {
        self.extreme_by_age(|candidate, best| candidate > best)
    }

    /// Walks Open accounts in creation order, keeping the first account
    /// that wins the strict comparison. Ties keep the earlier account.
    fn extreme_by_age(&self, beats: impl Fn(u32, u32) -> bool) -> Result<&Account> {
        let mut best: Option<&Account> = None;
        for account in self.accounts.values().filter(|a| a.is_open()) {
            match best {
                Some(current) if !beats(account.age(), current.age()) => {}
                _ => best = Some(account),
            }
        }
        best.ok_or(LedgerError::EmptyRegistry)
    }

    /// Mean balance over Open accounts.
    pub fn average_balance(&self) -> Result<Money> {
        rules::average_balance(self.accounts.values())
    }

    /// Read-only export view in creation order.
    pub fn snapshot(&self) -> Vec<AccountSnapshot> {
        self.accounts
            .values()
            .map(|a| AccountSnapshot {
                id: a.id(),
                holder_name: a.holder_name().to_string(),
                age: a.age(),
                account_type: a.account_type(),
                balance: a.balance(),
                status: a.status(),
            })
            .collect()
    }

    /// Admits records one by one, validating each exactly as
    /// `create_account` does. Rejected records are reported with their
    /// reason and never abort the batch.
    pub fn bulk_load(&mut self, records: Vec<AccountRecord>) -> BulkLoadReport {
        let mut report = BulkLoadReport::default();

        for record in records {
            match self.create_account(
                &record.holder_name,
                record.age,
                record.initial_deposit,
                record.account_type,
                &record.pin,
            ) {
                Ok(id) => {
                    debug!("Bulk load admitted account {} for {}", id, record.holder_name);
                    report.succeeded += 1;
                }
                Err(reason) => {
                    warn!("Bulk load rejected record for {}: {}", record.holder_name, reason);
                    report.rejected.push(RejectedRecord { record, reason });
                }
            }
        }

        report
    }
}

impl Default for AccountRegistry {
    fn default() -> Self {
        Self::new()
    }
}
