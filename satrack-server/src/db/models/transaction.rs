//! Embedded Ledger Transactions
//!
//! Transactions are never independently addressable: they live inside the
//! owning Customer/Supplier/Expense document and are created only by the
//! append operation. Once appended they are never edited or removed.

use crate::ledger::LedgerKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Transaction kinds for Customer and Supplier ledgers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceEntryKind {
    Debt,
    Payment,
}

impl LedgerKind for BalanceEntryKind {
    fn increases_balance(&self) -> bool {
        matches!(self, BalanceEntryKind::Debt)
    }
}

/// Transaction kinds for Expense ledgers (semantics inverted relative to
/// the balance ledgers: an expense entry grows the total)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseEntryKind {
    Expense,
    Refund,
}

impl LedgerKind for ExpenseEntryKind {
    fn increases_balance(&self) -> bool {
        matches!(self, ExpenseEntryKind::Expense)
    }
}

/// One immutable ledger entry, embedded in its parent document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction<K> {
    #[serde(rename = "type")]
    pub kind: K,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date: DateTime<Utc>,
}

/// Append-transaction payload; `date` defaults to the append time
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionCreate<K> {
    #[serde(rename = "type")]
    pub kind: K,
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub date: Option<DateTime<Utc>>,
}

impl<K> TransactionCreate<K> {
    /// Materialize the entry that gets appended to the parent's ledger
    pub fn into_transaction(self) -> Transaction<K> {
        Transaction {
            kind: self.kind,
            amount: self.amount,
            description: self.description.unwrap_or_default(),
            date: self.date.unwrap_or_else(Utc::now),
        }
    }
}
