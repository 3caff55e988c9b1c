//! Expense API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{
    Expense, ExpenseCreate, ExpenseEntryKind, ExpenseUpdate, TransactionCreate,
};
use crate::db::repository::ExpenseRepository;
use crate::ledger;
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};

/// List all expense items, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Expense>>> {
    let repo = ExpenseRepository::new(state.get_db());
    let expenses = repo.find_all().await?;
    Ok(Json(expenses))
}

/// Create a new expense item
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseCreate>,
) -> AppResult<Json<Expense>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let repo = ExpenseRepository::new(state.get_db());
    let expense = repo.create(payload).await?;
    Ok(Json(expense))
}

/// Update expense name/description
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ExpenseUpdate>,
) -> AppResult<Json<Expense>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let repo = ExpenseRepository::new(state.get_db());
    let expense = repo.update(&id, payload).await?;
    Ok(Json(expense))
}

/// Delete an expense item
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = ExpenseRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(Json(true))
}

/// Append a ledger transaction and return the updated expense item with
/// its full transaction history
pub async fn add_transaction(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TransactionCreate<ExpenseEntryKind>>,
) -> AppResult<Json<Expense>> {
    ledger::validate_amount(payload.amount)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let repo = ExpenseRepository::new(state.get_db());
    let expense = repo.add_transaction(&id, payload).await?;
    Ok(Json(expense))
}
