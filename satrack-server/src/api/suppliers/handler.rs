//! Supplier API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{
    BalanceEntryKind, Supplier, SupplierCreate, SupplierUpdate, TransactionCreate,
};
use crate::db::repository::SupplierRepository;
use crate::ledger;
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN,
    validate_optional_text, validate_required_text,
};

/// List all suppliers, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Supplier>>> {
    let repo = SupplierRepository::new(state.get_db());
    let suppliers = repo.find_all().await?;
    Ok(Json(suppliers))
}

/// Create a new supplier
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SupplierCreate>,
) -> AppResult<Json<Supplier>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.tax_office, "taxOffice", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.tax_number, "taxNumber", MAX_SHORT_TEXT_LEN)?;

    let repo = SupplierRepository::new(state.get_db());
    let supplier = repo.create(payload).await?;
    Ok(Json(supplier))
}

/// Update supplier contact/tax fields
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<SupplierUpdate>,
) -> AppResult<Json<Supplier>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(phone) = &payload.phone {
        validate_required_text(phone, "phone", MAX_SHORT_TEXT_LEN)?;
    }
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.tax_office, "taxOffice", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.tax_number, "taxNumber", MAX_SHORT_TEXT_LEN)?;

    let repo = SupplierRepository::new(state.get_db());
    let supplier = repo.update(&id, payload).await?;
    Ok(Json(supplier))
}

/// Delete a supplier
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = SupplierRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(Json(true))
}

/// Append a ledger transaction and return the updated supplier with its
/// full transaction history
pub async fn add_transaction(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TransactionCreate<BalanceEntryKind>>,
) -> AppResult<Json<Supplier>> {
    ledger::validate_amount(payload.amount)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let repo = SupplierRepository::new(state.get_db());
    let supplier = repo.add_transaction(&id, payload).await?;
    Ok(Json(supplier))
}
