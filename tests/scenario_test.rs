//! End-to-end scenarios exercising the ledger engine through its public API.

use bank_ledger::{
    rules, AccountRegistry, AccountType, LedgerError, Money, TxKind, DAILY_WITHDRAWAL_LIMIT,
};
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

fn money(s: &str) -> Money {
    Money::from_str(s).unwrap()
}

fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

#[test]
fn test_deposit_adds_exactly_amount_and_one_entry() {
    let mut registry = AccountRegistry::new();
    let id = registry
        .create_account_at(ts(0), "Asha", 25, money("1000"), AccountType::Savings, "1234")
        .unwrap();

    let before = registry.find(id).unwrap().transactions().count();
    let balance = registry.deposit_at(ts(60), id, money("123.45")).unwrap();

    assert_eq!(balance, money("1123.45"));
    assert_eq!(registry.find(id).unwrap().transactions().count(), before + 1);
}

#[test]
fn test_withdrawals_never_break_the_minimum_balance_floor() {
    let mut registry = AccountRegistry::new();
    let id = registry
        .create_account_at(ts(0), "Asha", 25, money("1200"), AccountType::Savings, "1234")
        .unwrap();

    // drain in chunks; every refusal must leave the balance intact
    let mut clock = 60;
    for _ in 0..20 {
        let _ = registry.withdraw_at(ts(clock), id, money("100"), "1234");
        clock += 60;
    }

    let floor = AccountType::Savings.minimum_balance();
    assert!(registry.find(id).unwrap().balance() >= floor);
    assert_eq!(registry.find(id).unwrap().balance(), money("500"));
}

#[test]
fn test_same_day_withdrawals_never_exceed_daily_limit() {
    let mut registry = AccountRegistry::new();
    let id = registry
        .create_account_at(ts(0), "Rich", 50, money("500000"), AccountType::Current, "1234")
        .unwrap();

    let day = ts(86_400);
    for _ in 0..10 {
        let _ = registry.withdraw_at(day, id, money("9000"), "1234");
    }

    let withdrawn = registry.find(id).unwrap().withdrawn_on(day.date_naive());
    assert!(withdrawn <= DAILY_WITHDRAWAL_LIMIT);
    // 5 * 9000 = 45,000 fits; the sixth would reach 54,000 and is refused
    assert_eq!(withdrawn, money("45000"));
}

#[test]
fn test_failed_transfer_is_zero_net_system_wide() {
    let mut registry = AccountRegistry::new();
    let a = registry
        .create_account_at(ts(0), "A", 30, money("1000"), AccountType::Savings, "1234")
        .unwrap();
    let b = registry
        .create_account_at(ts(1), "B", 30, money("2000"), AccountType::Savings, "5678")
        .unwrap();

    let total_before: Money = registry
        .accounts()
        .fold(Money::ZERO, |sum, acc| sum + acc.balance());

    assert!(registry.transfer_at(ts(60), a, b, money("100"), "wrong").is_err());
    assert!(registry.transfer_at(ts(61), a, a, money("100"), "1234").is_err());
    assert!(registry.transfer_at(ts(62), a, 9999, money("100"), "1234").is_err());

    let total_after: Money = registry
        .accounts()
        .fold(Money::ZERO, |sum, acc| sum + acc.balance());
    assert_eq!(total_before, total_after);
    assert_eq!(registry.find(a).unwrap().balance(), money("1000"));
    assert_eq!(registry.find(b).unwrap().balance(), money("2000"));
}

#[test]
fn test_successful_transfer_conserves_total_funds() {
    let mut registry = AccountRegistry::new();
    let a = registry
        .create_account_at(ts(0), "A", 30, money("1000"), AccountType::Savings, "1234")
        .unwrap();
    let b = registry
        .create_account_at(ts(1), "B", 30, money("2000"), AccountType::Savings, "5678")
        .unwrap();

    let (from_balance, to_balance) = registry
        .transfer_at(ts(60), a, b, money("250"), "1234")
        .unwrap();

    assert_eq!(from_balance, money("750"));
    assert_eq!(to_balance, money("2250"));
    assert_eq!(from_balance + to_balance, money("3000"));
}

#[test]
fn test_asha_withdrawal_scenario() {
    let mut registry = AccountRegistry::new();
    let id = registry
        .create_account_at(ts(0), "Asha", 25, money("1000"), AccountType::Savings, "1234")
        .unwrap();
    assert_eq!(registry.find(id).unwrap().balance(), money("1000"));

    assert_eq!(
        registry.withdraw_at(ts(60), id, money("200"), "1234").unwrap(),
        money("800")
    );

    let err = registry
        .withdraw_at(ts(120), id, money("5000"), "1234")
        .unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientFunds { .. }));
    assert_eq!(registry.find(id).unwrap().balance(), money("800"));
}

#[test]
fn test_history_is_ordered_and_most_recent_last() {
    let mut registry = AccountRegistry::new();
    let id = registry
        .create_account_at(ts(0), "Asha", 25, money("1000"), AccountType::Savings, "1234")
        .unwrap();

    registry.deposit_at(ts(60), id, money("10")).unwrap();
    registry.withdraw_at(ts(120), id, money("20"), "1234").unwrap();

    let account = registry.find(id).unwrap();
    let kinds: Vec<TxKind> = account.transactions().map(|tx| tx.kind).collect();
    assert_eq!(kinds, vec![TxKind::Deposit, TxKind::Deposit, TxKind::Withdrawal]);

    let stamps: Vec<_> = account.transactions().map(|tx| tx.timestamp).collect();
    let mut sorted = stamps.clone();
    sorted.sort();
    assert_eq!(stamps, sorted);

    assert_eq!(
        account.transactions().last().unwrap().resulting_balance,
        money("990")
    );
}

#[test]
fn test_compound_interest_known_vector() {
    // 1000 * (1.1)^2 - 1000 = 210
    let earned = rules::compound_interest(money("1000"), Decimal::from(10), 2, 1);
    assert_eq!(earned, money("210"));
}

#[test]
fn test_quarterly_compounding_beats_annual() {
    let annual = rules::compound_interest(money("1000"), Decimal::from(8), 1, 1);
    let quarterly = rules::compound_interest(money("1000"), Decimal::from(8), 1, 4);

    assert_eq!(annual, money("80"));
    assert!(quarterly > annual);
}

#[test]
fn test_simple_interest_matches_formula() {
    let earned = rules::simple_interest(money("2500"), Decimal::from(4), 5);
    assert_eq!(earned, money("500"));
}
