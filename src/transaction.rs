//! Transaction model and the per-account append-only ledger.

use crate::account::AccountId;
use crate::money::Money;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Transaction type variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TxKind {
    /// Credit funds into the account.
    Deposit,

    /// Debit funds out of the account.
    Withdrawal,

    /// Credit leg of a transfer from another account.
    TransferIn,

    /// Debit leg of a transfer to another account.
    TransferOut,
}

impl TxKind {
    /// Returns `true` for kinds that count against the daily withdrawal limit.
    pub fn is_outflow(&self) -> bool {
        matches!(self, TxKind::Withdrawal | TxKind::TransferOut)
    }
}

/// A single recorded ledger entry.
///
/// Immutable once appended; only the owning [`TransactionLedger`] creates
/// these, and it hands out shared references only.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    /// When the transaction was recorded.
    pub timestamp: DateTime<Utc>,

    /// What happened.
    pub kind: TxKind,

    /// Amount moved, always positive.
    pub amount: Money,

    /// Account balance immediately after this entry was applied.
    pub resulting_balance: Money,

    /// The other account involved, for transfer legs only.
    pub counterparty: Option<AccountId>,
}

/// Append-only, time-ordered log of an account's transactions.
///
/// Entries are totally ordered by timestamp. If the wall clock steps
/// backwards between operations, the new entry's timestamp is clamped up
/// to the previous entry's so the ordering invariant still holds.
#[derive(Debug, Clone, Default)]
pub struct TransactionLedger {
    entries: Vec<Transaction>,
}

impl TransactionLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        TransactionLedger::default()
    }

    /// Appends an entry, clamping its timestamp to keep the log ordered.
    pub(crate) fn append(
        &mut self,
        timestamp: DateTime<Utc>,
        kind: TxKind,
        amount: Money,
        resulting_balance: Money,
        counterparty: Option<AccountId>,
    ) {
        let timestamp = match self.entries.last() {
            Some(last) if timestamp < last.timestamp => last.timestamp,
            _ => timestamp,
        };

        self.entries.push(Transaction {
            timestamp,
            kind,
            amount,
            resulting_balance,
            counterparty,
        });
    }

    /// Lazy, restartable view over the history, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter()
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent entry, if any.
    pub fn last(&self) -> Option<&Transaction> {
        self.entries.last()
    }

    /// Sum of withdrawal and transfer-out amounts recorded on the given
    /// UTC date. Feeds the daily withdrawal limit check.
    pub fn withdrawn_on(&self, date: NaiveDate) -> Money {
        self.entries
            .iter()
            .filter(|tx| tx.kind.is_outflow() && tx.timestamp.date_naive() == date)
            .fold(Money::ZERO, |sum, tx| sum + tx.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_append_preserves_order() {
        let mut ledger = TransactionLedger::new();
        ledger.append(ts(100), TxKind::Deposit, money("10"), money("10"), None);
        ledger.append(ts(200), TxKind::Withdrawal, money("5"), money("5"), None);

        let stamps: Vec<_> = ledger.iter().map(|tx| tx.timestamp).collect();
        assert_eq!(stamps, vec![ts(100), ts(200)]);
    }

    #[test]
    fn test_append_clamps_backwards_clock() {
        let mut ledger = TransactionLedger::new();
        ledger.append(ts(200), TxKind::Deposit, money("10"), money("10"), None);
        ledger.append(ts(100), TxKind::Deposit, money("5"), money("15"), None);

        let stamps: Vec<_> = ledger.iter().map(|tx| tx.timestamp).collect();
        assert_eq!(stamps, vec![ts(200), ts(200)]);
    }

    #[test]
    fn test_iter_is_restartable() {
        let mut ledger = TransactionLedger::new();
        ledger.append(ts(1), TxKind::Deposit, money("1"), money("1"), None);
        ledger.append(ts(2), TxKind::Deposit, money("2"), money("3"), None);

        assert_eq!(ledger.iter().count(), 2);
        assert_eq!(ledger.iter().count(), 2);
        assert_eq!(ledger.last().unwrap().resulting_balance, money("3"));
    }

    #[test]
    fn test_withdrawn_on_counts_outflows_only() {
        let day1 = ts(86_400);
        let day2 = ts(2 * 86_400);

        let mut ledger = TransactionLedger::new();
        ledger.append(day1, TxKind::Deposit, money("1000"), money("1000"), None);
        ledger.append(day1, TxKind::Withdrawal, money("100"), money("900"), None);
        ledger.append(
            day1,
            TxKind::TransferOut,
            money("50"),
            money("850"),
            Some(1002),
        );
        ledger.append(day2, TxKind::Withdrawal, money("25"), money("825"), None);

        assert_eq!(ledger.withdrawn_on(day1.date_naive()), money("150"));
        assert_eq!(ledger.withdrawn_on(day2.date_naive()), money("25"));
    }
}
