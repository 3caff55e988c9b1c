//! Customer Model

use super::serde_helpers;
use super::transaction::{BalanceEntryKind, Transaction};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Customer ID type
pub type CustomerId = RecordId;

/// Customer document with its embedded transaction ledger.
///
/// `current_balance` is a cached signed total maintained incrementally by
/// the append operation (debt adds, payment subtracts).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<CustomerId>,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub tax_office: Option<String>,
    #[serde(default)]
    pub tax_number: Option<String>,
    #[serde(default)]
    pub current_balance: f64,
    #[serde(default)]
    pub transactions: Vec<Transaction<BalanceEntryKind>>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

/// Create customer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerCreate {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub tax_office: Option<String>,
    #[serde(default)]
    pub tax_number: Option<String>,
}

impl CustomerCreate {
    /// Build the document persisted on create: fresh ledger, zero balance
    pub fn into_customer(self, now: DateTime<Utc>) -> Customer {
        Customer {
            id: None,
            name: self.name,
            phone: self.phone,
            email: self.email,
            address: self.address,
            tax_office: self.tax_office,
            tax_number: self.tax_number,
            current_balance: 0.0,
            transactions: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Update customer payload (partial merge; ledger fields are not
/// reachable from here)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_office: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_number: Option<String>,
}
