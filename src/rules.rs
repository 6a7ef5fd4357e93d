//! Stateless business rules and calculators.
//!
//! Every function here is pure: it inspects its arguments and returns a
//! result, never touching account or registry state. Account and registry
//! operations call into these checks before mutating anything.

use crate::account::Account;
use crate::error::{LedgerError, Result};
use crate::money::Money;
use rust_decimal::Decimal;

/// Minimum age for opening an account.
pub const MINIMUM_AGE: u32 = 18;

/// Rejects holders younger than [`MINIMUM_AGE`].
pub fn check_age(age: u32) -> Result<()> {
    if age < MINIMUM_AGE {
        return Err(LedgerError::AgeIneligible { age });
    }
    Ok(())
}

/// Rejects a debit that would take `balance` below `minimum`.
pub fn check_minimum_balance(balance: Money, amount: Money, minimum: Money) -> Result<()> {
    if balance - amount < minimum {
        return Err(LedgerError::InsufficientFunds {
            balance,
            requested: amount,
            minimum,
        });
    }
    Ok(())
}

/// Rejects a debit that would push the day's cumulative withdrawals past `limit`.
pub fn check_daily_limit(withdrawn_today: Money, amount: Money, limit: Money) -> Result<()> {
    if withdrawn_today + amount > limit {
        return Err(LedgerError::DailyLimitExceeded {
            withdrawn_today,
            requested: amount,
            limit,
        });
    }
    Ok(())
}

/// Compares a provided PIN against the stored one.
pub fn check_pin(provided: &str, stored: &str) -> Result<()> {
    if provided != stored {
        return Err(LedgerError::PinMismatch);
    }
    Ok(())
}

/// Simple interest: `balance * rate * years / 100`.
///
/// `rate` is a percentage, e.g. `10` for 10% per annum.
pub fn simple_interest(balance: Money, rate: Decimal, years: u32) -> Money {
    let interest = balance.to_decimal() * rate * Decimal::from(years) / Decimal::from(100);
    Money::new(interest)
}

/// Compound interest earned: `balance * (1 + rate/(100*frequency))^(frequency*years) - balance`.
///
/// Computed by per-period multiplication so the arithmetic stays exact in
/// decimal for whole-period inputs. `frequency` is compounding periods per
/// year and must be non-zero.
pub fn compound_interest(balance: Money, rate: Decimal, years: u32, frequency: u32) -> Money {
    let per_period = rate / (Decimal::from(100) * Decimal::from(frequency.max(1)));
    let growth = Decimal::ONE + per_period;

    let mut accumulated = balance.to_decimal();
    for _ in 0..years * frequency {
        accumulated *= growth;
    }

    Money::new(accumulated - balance.to_decimal())
}

/// Arithmetic mean balance over Open accounts.
///
/// Fails with `EmptyRegistry` when no account is open.
pub fn average_balance<'a, I>(accounts: I) -> Result<Money>
where
    I: IntoIterator<Item = &'a Account>,
{
    let mut sum = Decimal::ZERO;
    let mut count = 0u32;

    for account in accounts.into_iter().filter(|a| a.is_open()) {
        sum += account.balance().to_decimal();
        count += 1;
    }

    if count == 0 {
        return Err(LedgerError::EmptyRegistry);
    }
    Ok(Money::new(sum / Decimal::from(count)))
}
