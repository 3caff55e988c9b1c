//! Expense Model
//!
//! An expense item is a named cost bucket (rent, electricity, materials)
//! whose running total grows with expense entries and shrinks with refunds.

use super::serde_helpers;
use super::transaction::{ExpenseEntryKind, Transaction};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Expense ID type
pub type ExpenseId = RecordId;

/// Expense document with its embedded transaction ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ExpenseId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub transactions: Vec<Transaction<ExpenseEntryKind>>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

/// Create expense payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl ExpenseCreate {
    pub fn into_expense(self, now: DateTime<Utc>) -> Expense {
        Expense {
            id: None,
            name: self.name,
            description: self.description,
            total_amount: 0.0,
            transactions: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Update expense payload (partial merge)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
