//! Database Module
//!
//! Embedded SurrealDB (RocksDB backend). Entities are whole documents;
//! tables stay schemaless apart from the uniqueness indexes below.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the database at the given path
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns("satrack")
            .use_db("main")
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_indexes(&db).await?;

        tracing::info!("Database ready (embedded SurrealDB at {db_path})");

        Ok(Self { db })
    }
}

/// Uniqueness constraints enforced at the storage layer in addition to the
/// repository-level duplicate checks
async fn define_indexes(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query("DEFINE INDEX IF NOT EXISTS user_username ON user FIELDS username UNIQUE")
        .await
        .map_err(|e| AppError::database(format!("Failed to define index: {e}")))?;
    db.query("DEFINE INDEX IF NOT EXISTS user_email ON user FIELDS email UNIQUE")
        .await
        .map_err(|e| AppError::database(format!("Failed to define index: {e}")))?;
    Ok(())
}
