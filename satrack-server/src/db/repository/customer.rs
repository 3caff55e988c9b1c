//! Customer Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{
    BalanceEntryKind, Customer, CustomerCreate, CustomerUpdate, TransactionCreate,
};
use crate::ledger;
use chrono::Utc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct CustomerRepository {
    base: BaseRepository,
}

impl CustomerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn parse_id(&self, id: &str) -> RepoResult<RecordId> {
        id.parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
    }

    /// All customers, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Customer>> {
        let customers: Vec<Customer> = self
            .base
            .db()
            .query("SELECT * FROM customer ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(customers)
    }

    /// Find customer by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Customer>> {
        let thing = self.parse_id(id)?;
        let customer: Option<Customer> = self.base.db().select(thing).await?;
        Ok(customer)
    }

    /// Create a new customer with an empty ledger
    pub async fn create(&self, data: CustomerCreate) -> RepoResult<Customer> {
        let customer = data.into_customer(Utc::now());
        let created: Option<Customer> = self.base.db().create("customer").content(customer).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create customer".to_string()))
    }

    /// Partial update of contact/tax fields
    pub async fn update(&self, id: &str, data: CustomerUpdate) -> RepoResult<Customer> {
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
            .take::<Option<Customer>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", id)))
    }

    /// Hard delete a customer and its embedded ledger
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let thing = self.parse_id(id)?;
        let deleted: Option<Customer> = self.base.db().delete(thing).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Customer {} not found", id)));
        }
        Ok(())
    }

    /// Append a ledger entry and apply its signed delta to the cached
    /// balance (debt adds, payment subtracts).
    ///
    /// Read-modify-write on the whole document: the final UPDATE is one
    /// single-document write, and concurrent appends to the same customer
    /// are last-write-wins.
    pub async fn add_transaction(
        &self,
        id: &str,
        entry: TransactionCreate<BalanceEntryKind>,
    ) -> RepoResult<Customer> {
        let thing = self.parse_id(id)?;

        let customer: Option<Customer> = self.base.db().select(thing.clone()).await?;
        let mut customer =
            customer.ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", id)))?;

        let entry = entry.into_transaction();
        customer.current_balance =
            ledger::apply_entry(customer.current_balance, &entry.kind, entry.amount);
        customer.transactions.push(entry);
        customer.updated_at = Utc::now();

        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET transactions = $transactions, currentBalance = $balance, updatedAt = $updated_at RETURN AFTER",
            )
            .bind(("thing", thing))
            .bind(("transactions", customer.transactions))
            .bind(("balance", customer.current_balance))
            .bind(("updated_at", customer.updated_at.timestamp_millis()))
            .await?;

        result
            .take::<Option<Customer>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", id)))
    }
}
