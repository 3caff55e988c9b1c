//! Supplier Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{
    BalanceEntryKind, Supplier, SupplierCreate, SupplierUpdate, TransactionCreate,
};
use crate::ledger;
use chrono::Utc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct SupplierRepository {
    base: BaseRepository,
}

impl SupplierRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn parse_id(&self, id: &str) -> RepoResult<RecordId> {
        id.parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
    }

    /// All suppliers, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Supplier>> {
        let suppliers: Vec<Supplier> = self
            .base
            .db()
            .query("SELECT * FROM supplier ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(suppliers)
    }

    /// Find supplier by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Supplier>> {
        let thing = self.parse_id(id)?;
        let supplier: Option<Supplier> = self.base.db().select(thing).await?;
        Ok(supplier)
    }

    /// Create a new supplier with an empty ledger
    pub async fn create(&self, data: SupplierCreate) -> RepoResult<Supplier> {
        let supplier = data.into_supplier(Utc::now());
        let created: Option<Supplier> = self.base.db().create("supplier").content(supplier).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create supplier".to_string()))
    }

    /// Partial update of contact/tax fields
    pub async fn update(&self, id: &str, data: SupplierUpdate) -> RepoResult<Supplier> {
        let thing = self.parse_id(id)?;

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

        result
            .take::<Option<Supplier>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Supplier {} not found", id)))
    }

    /// Hard delete a supplier and its embedded ledger
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let thing = self.parse_id(id)?;
        let deleted: Option<Supplier> = self.base.db().delete(thing).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Supplier {} not found", id)));
        }
        Ok(())
    }

    /// Append a ledger entry and apply its signed delta to the cached
    /// balance. Same last-write-wins read-modify-write as the customer
    /// ledger.
    pub async fn add_transaction(
        &self,
        id: &str,
        entry: TransactionCreate<BalanceEntryKind>,
    ) -> RepoResult<Supplier> {
        let thing = self.parse_id(id)?;

        let supplier: Option<Supplier> = self.base.db().select(thing.clone()).await?;
        let mut supplier =
            supplier.ok_or_else(|| RepoError::NotFound(format!("Supplier {} not found", id)))?;

        let entry = entry.into_transaction();
        supplier.current_balance =
            ledger::apply_entry(supplier.current_balance, &entry.kind, entry.amount);
        supplier.transactions.push(entry);
        supplier.updated_at = Utc::now();

        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET transactions = $transactions, currentBalance = $balance, updatedAt = $updated_at RETURN AFTER",
            )
            .bind(("thing", thing))
            .bind(("transactions", supplier.transactions))
            .bind(("balance", supplier.current_balance))
            .bind(("updated_at", supplier.updated_at.timestamp_millis()))
            .await?;

        result
            .take::<Option<Supplier>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Supplier {} not found", id)))
    }
}
