//! Expense Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{
    Expense, ExpenseCreate, ExpenseEntryKind, ExpenseUpdate, TransactionCreate,
};
use crate::ledger;
use chrono::Utc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct ExpenseRepository {
    base: BaseRepository,
}

impl ExpenseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn parse_id(&self, id: &str) -> RepoResult<RecordId> {
        id.parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
    }

    /// All expense items, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Expense>> {
        let expenses: Vec<Expense> = self
            .base
            .db()
            .query("SELECT * FROM expense ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(expenses)
    }

    /// Find expense item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Expense>> {
        let thing = self.parse_id(id)?;
        let expense: Option<Expense> = self.base.db().select(thing).await?;
        Ok(expense)
    }

    /// Create a new expense item with an empty ledger
    pub async fn create(&self, data: ExpenseCreate) -> RepoResult<Expense> {
        let expense = data.into_expense(Utc::now());
        let created: Option<Expense> = self.base.db().create("expense").content(expense).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create expense".to_string()))
    }

    /// Partial update of name/description
    pub async fn update(&self, id: &str, data: ExpenseUpdate) -> RepoResult<Expense> {
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
            .take::<Option<Expense>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Expense {} not found", id)))
    }

    /// Hard delete an expense item and its embedded ledger
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let thing = self.parse_id(id)?;
        let deleted: Option<Expense> = self.base.db().delete(thing).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Expense {} not found", id)));
        }
        Ok(())
    }

    /// Append a ledger entry to the expense item; expense entries grow the
    /// running total, refunds shrink it. Same last-write-wins
    /// read-modify-write as the balance ledgers.
    pub async fn add_transaction(
        &self,
        id: &str,
        entry: TransactionCreate<ExpenseEntryKind>,
    ) -> RepoResult<Expense> {
        let thing = self.parse_id(id)?;

        let expense: Option<Expense> = self.base.db().select(thing.clone()).await?;
        let mut expense =
            expense.ok_or_else(|| RepoError::NotFound(format!("Expense {} not found", id)))?;

        let entry = entry.into_transaction();
        expense.total_amount =
            ledger::apply_entry(expense.total_amount, &entry.kind, entry.amount);
        expense.transactions.push(entry);
        expense.updated_at = Utc::now();

        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET transactions = $transactions, totalAmount = $total, updatedAt = $updated_at RETURN AFTER",
            )
            .bind(("thing", thing))
            .bind(("transactions", expense.transactions))
            .bind(("total", expense.total_amount))
            .bind(("updated_at", expense.updated_at.timestamp_millis()))
            .await?;

        result
            .take::<Option<Expense>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Expense {} not found", id)))
    }
}
