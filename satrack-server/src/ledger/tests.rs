use super::*;
use crate::db::models::{BalanceEntryKind, ExpenseEntryKind};

#[test]
fn test_to_decimal_precision() {
    // Classic floating point problem: 0.1 + 0.2 != 0.3
    let a = 0.1_f64;
    let b = 0.2_f64;
    let sum_f64 = a + b;

    // f64 fails
    assert_ne!(sum_f64, 0.3);

    // Decimal succeeds
    let sum_dec = to_decimal(a) + to_decimal(b);
    assert_eq!(to_f64(sum_dec), 0.3);
}

#[test]
fn test_debt_then_payment() {
    // Fresh customer: debt 100 -> 100, payment 40 -> 60
    let mut balance = 0.0;
    balance = apply_entry(balance, &BalanceEntryKind::Debt, 100.0);
    assert_eq!(balance, 100.0);
    balance = apply_entry(balance, &BalanceEntryKind::Payment, 40.0);
    assert_eq!(balance, 60.0);
}

#[test]
fn test_expense_then_refund() {
    // Fresh expense item: expense 500 -> 500, refund 200 -> 300
    let mut total = 0.0;
    total = apply_entry(total, &ExpenseEntryKind::Expense, 500.0);
    assert_eq!(total, 500.0);
    total = apply_entry(total, &ExpenseEntryKind::Refund, 200.0);
    assert_eq!(total, 300.0);
}

#[test]
fn test_payments_can_drive_balance_negative() {
    // Overpayment is legal: the balance is a signed total
    let balance = apply_entry(50.0, &BalanceEntryKind::Payment, 80.0);
    assert_eq!(balance, -30.0);
}

#[test]
fn test_additive_law_over_sequence() {
    // Final balance equals sum(debt) - sum(payment) regardless of interleaving
    let entries = [
        (BalanceEntryKind::Debt, 120.55),
        (BalanceEntryKind::Payment, 20.05),
        (BalanceEntryKind::Debt, 10.0),
        (BalanceEntryKind::Payment, 0.5),
        (BalanceEntryKind::Debt, 99.99),
    ];

    let mut balance = 0.0;
    for (kind, amount) in entries {
        balance = apply_entry(balance, &kind, amount);
    }

    // 120.55 - 20.05 + 10.0 - 0.5 + 99.99
    assert_eq!(balance, 209.99);
}

#[test]
fn test_accumulation_precision() {
    // 0.01 appended one thousand times must land exactly on 10.00
    let mut balance = 0.0;
    for _ in 0..1000 {
        balance = apply_entry(balance, &BalanceEntryKind::Debt, 0.01);
    }
    assert_eq!(balance, 10.0);
}

#[test]
fn test_result_rounded_to_two_decimals() {
    let balance = apply_entry(0.0, &BalanceEntryKind::Debt, 10.005);
    assert_eq!(balance, 10.01); // half-up
}

#[test]
fn test_validate_amount_rejects_non_finite() {
    assert!(validate_amount(f64::NAN).is_err());
    assert!(validate_amount(f64::INFINITY).is_err());
    assert!(validate_amount(f64::NEG_INFINITY).is_err());
}

#[test]
fn test_validate_amount_rejects_oversized() {
    assert!(validate_amount(1.0e12).is_err());
    assert!(validate_amount(100.0).is_ok());
    assert!(validate_amount(0.0).is_ok());
}
