//! Ledger balance arithmetic using rust_decimal for precision
//!
//! Customer, Supplier and Expense records each embed an append-only list
//! of transactions and cache a running balance. This module owns the
//! signed-delta arithmetic applied when a transaction is appended. All
//! calculations are done using `Decimal` internally, then converted to
//! `f64` for storage/serialization.
//!
//! The running balance is maintained incrementally: it is never
//! recomputed from the transaction history on read.

use crate::utils::AppError;
use rust_decimal::prelude::*;

#[cfg(test)]
mod tests;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed transaction amount
const MAX_AMOUNT: f64 = 1_000_000_000.0;

/// Direction of a ledger entry relative to its parent's running balance.
///
/// Implemented by the entity-specific transaction kind enums:
/// debt/expense entries increase the balance, payment/refund entries
/// decrease it.
pub trait LedgerKind {
    fn increases_balance(&self) -> bool;
}

/// Convert an f64 into a Decimal for exact arithmetic
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in ledger calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert a Decimal back to f64, rounded to 2dp
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        // SAFETY: Decimal rounded to 2dp with amounts bounded by MAX_AMOUNT
        // is always within f64 representable range
        .expect("Decimal rounded to 2dp is always representable as f64")
}

/// Validate a transaction amount before it is applied to a balance.
///
/// NaN or infinite amounts would silently corrupt every balance computed
/// after them, so they are rejected at the boundary. Sign and magnitude
/// are otherwise taken as-is (the dashboard enforces positivity).
pub fn validate_amount(amount: f64) -> Result<(), AppError> {
    if !amount.is_finite() {
        return Err(AppError::validation(format!(
            "amount must be a finite number, got {amount}"
        )));
    }
    if amount.abs() > MAX_AMOUNT {
        return Err(AppError::validation(format!(
            "amount exceeds maximum allowed ({MAX_AMOUNT}), got {amount}"
        )));
    }
    Ok(())
}

/// Apply one ledger entry to a running balance.
///
/// Entries whose kind increases the balance add their amount, the rest
/// subtract it. The result is rounded to 2dp.
pub fn apply_entry<K: LedgerKind>(balance: f64, kind: &K, amount: f64) -> f64 {
    let delta = if kind.increases_balance() {
        to_decimal(amount)
    } else {
        -to_decimal(amount)
    };
    to_f64(to_decimal(balance) + delta)
}
