//! Supplier Model
//!
//! Structurally identical to Customer; suppliers track what the business
//! owes, so the same debt/payment ledger applies.

use super::serde_helpers;
use super::transaction::{BalanceEntryKind, Transaction};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Supplier ID type
pub type SupplierId = RecordId;

/// Supplier document with its embedded transaction ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<SupplierId>,
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

/// Create supplier payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierCreate {
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

impl SupplierCreate {
    pub fn into_supplier(self, now: DateTime<Utc>) -> Supplier {
        Supplier {
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

/// Update supplier payload (partial merge)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierUpdate {
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
