//! Order Model
//!
//! A fabrication order for a single glass/frame unit. Orders reference
//! their customer by record id; list and read responses resolve that
//! reference into a small projection for display.

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Order ID type
pub type OrderId = RecordId;

/// Order lifecycle status.
///
/// The shop floor walks orders forward one stage at a time, but the field
/// itself accepts direct assignment to any stage; `cancelled` is reachable
/// from everywhere. No transition table is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Received,
    Production,
    Assembly,
    Packaging,
    Ready,
    Installed,
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Received
    }
}

impl OrderStatus {
    /// Derived classification: an order still moving through the shop.
    /// Not stored; installed and cancelled are the two terminal stages.
    pub fn is_active(&self) -> bool {
        !matches!(self, OrderStatus::Installed | OrderStatus::Cancelled)
    }
}

/// Glass tint option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GlassColor {
    #[default]
    Clear,
    Smoked,
}

fn default_ral_code() -> String {
    "Standart".to_string()
}

/// Order document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<OrderId>,
    #[serde(with = "serde_helpers::record_id")]
    pub customer: RecordId,
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_ral_code")]
    pub ral_code: String,
    #[serde(default)]
    pub glass_color: GlassColor,
    pub cost: f64,
    pub price: f64,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

/// Customer projection embedded in order responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerBrief {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Deserialize the customer field leniently: a resolved customer document
/// becomes a projection, a dangling record link becomes None.
fn customer_brief<'de, D>(d: D) -> Result<Option<CustomerBrief>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Brief(CustomerBrief),
        Unresolved(serde::de::IgnoredAny),
    }

    Ok(match Option::<Lenient>::deserialize(d)? {
        Some(Lenient::Brief(b)) => Some(b),
        _ => None,
    })
}

/// Order with its customer reference resolved for display
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithCustomer {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<OrderId>,
    #[serde(default, deserialize_with = "customer_brief")]
    pub customer: Option<CustomerBrief>,
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_ral_code")]
    pub ral_code: String,
    #[serde(default)]
    pub glass_color: GlassColor,
    pub cost: f64,
    pub price: f64,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub customer: RecordId,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub ral_code: Option<String>,
    #[serde(default)]
    pub glass_color: Option<GlassColor>,
    pub cost: f64,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
}

impl OrderCreate {
    pub fn into_order(self, now: DateTime<Utc>) -> Order {
        Order {
            id: None,
            customer: self.customer,
            width: self.width,
            height: self.height,
            ral_code: self.ral_code.unwrap_or_else(default_ral_code),
            glass_color: self.glass_color.unwrap_or_default(),
            cost: self.cost,
            price: self.price,
            status: OrderStatus::default(),
            description: self.description,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Update order payload (partial merge)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub customer: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ral_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glass_color: Option<GlassColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Status-only update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_accepts_all_seven_stages() {
        for name in [
            "received",
            "production",
            "assembly",
            "packaging",
            "ready",
            "installed",
            "cancelled",
        ] {
            let parsed: OrderStatus =
                serde_json::from_value(serde_json::json!(name)).expect("known status");
            assert_eq!(serde_json::to_value(parsed).unwrap(), serde_json::json!(name));
        }
    }

    #[test]
    fn status_rejects_unknown_values() {
        assert!(serde_json::from_value::<OrderStatus>(serde_json::json!("shipped")).is_err());
        assert!(serde_json::from_value::<OrderStatus>(serde_json::json!("RECEIVED")).is_err());
    }

    #[test]
    fn active_is_everything_but_installed_and_cancelled() {
        assert!(OrderStatus::Received.is_active());
        assert!(OrderStatus::Production.is_active());
        assert!(OrderStatus::Assembly.is_active());
        assert!(OrderStatus::Packaging.is_active());
        assert!(OrderStatus::Ready.is_active());
        assert!(!OrderStatus::Installed.is_active());
        assert!(!OrderStatus::Cancelled.is_active());
    }
}
