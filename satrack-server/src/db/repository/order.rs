//! Order Repository
//!
//! Orders hold a non-owning record link to their customer; read paths
//! resolve it with FETCH and project it down to the display fields.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{
    Customer, Order, OrderCreate, OrderStatus, OrderUpdate, OrderWithCustomer,
};
use chrono::Utc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn parse_id(&self, id: &str) -> RepoResult<RecordId> {
        id.parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
    }

    /// All orders, newest first, with the customer reference resolved
    pub async fn find_all(&self) -> RepoResult<Vec<OrderWithCustomer>> {
        let orders: Vec<OrderWithCustomer> = self
            .base
            .db()
            .query("SELECT * FROM `order` ORDER BY created_at DESC FETCH customer")
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Find one order with its customer reference resolved
    pub async fn find_with_customer(&self, id: &str) -> RepoResult<Option<OrderWithCustomer>> {
        let thing = self.parse_id(id)?;
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM $thing FETCH customer")
            .bind(("thing", thing))
            .await?;
        let order: Option<OrderWithCustomer> = result.take(0)?;
        Ok(order)
    }

    /// Create a new order; the referenced customer must exist
    pub async fn create(&self, data: OrderCreate) -> RepoResult<OrderWithCustomer> {
        if data.customer.table() != "customer" {
            return Err(RepoError::Validation(format!(
                "Order customer must reference the customer table, got '{}'",
                data.customer.table()
            )));
        }

        let referenced: Option<Customer> = self.base.db().select(data.customer.clone()).await?;
        if referenced.is_none() {
            return Err(RepoError::Validation(format!(
                "Customer {} does not exist",
                data.customer
            )));
        }

        let order = data.into_order(Utc::now());
        let created: Option<Order> = self.base.db().create("order").content(order).await?;
        let created =
            created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))?;

        let id = created
            .id
            .as_ref()
            .map(|t| t.to_string())
            .unwrap_or_default();
        self.find_with_customer(&id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Partial update of order fields
    pub async fn update(&self, id: &str, data: OrderUpdate) -> RepoResult<OrderWithCustomer> {
        let thing = self.parse_id(id)?;

        if let Some(customer) = &data.customer {
            if customer.table() != "customer" {
                return Err(RepoError::Validation(format!(
                    "Order customer must reference the customer table, got '{}'",
                    customer.table()
                )));
            }
            let referenced: Option<Customer> = self.base.db().select(customer.clone()).await?;
            if referenced.is_none() {
                return Err(RepoError::Validation(format!(
                    "Customer {} does not exist",
                    customer
                )));
            }
        }

        let mut patch = serde_json::to_value(&data)
            .map_err(|e| RepoError::Database(format!("Failed to serialize update: {}", e)))?;
        patch["updatedAt"] = serde_json::json!(Utc::now().timestamp_millis());

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing MERGE $patch RETURN AFTER")
            .bind(("thing", thing))
            .bind(("patch", patch))
            .await?;

        let updated: Option<Order> = result.take(0)?;
        if updated.is_none() {
            return Err(RepoError::NotFound(format!("Order {} not found", id)));
        }

        self.find_with_customer(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Assign a new lifecycle status; no other field is touched
    pub async fn update_status(
        &self,
        id: &str,
        status: OrderStatus,
    ) -> RepoResult<OrderWithCustomer> {
        let thing = self.parse_id(id)?;

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = $status, updatedAt = $updated_at RETURN AFTER")
            .bind(("thing", thing))
            .bind(("status", status))
            .bind(("updated_at", Utc::now().timestamp_millis()))
            .await?;

        let updated: Option<Order> = result.take(0)?;
        if updated.is_none() {
            return Err(RepoError::NotFound(format!("Order {} not found", id)));
        }

        self.find_with_customer(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Hard delete an order
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let thing = self.parse_id(id)?;
        let deleted: Option<Order> = self.base.db().delete(thing).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Order {} not found", id)));
        }
        Ok(())
    }
}
