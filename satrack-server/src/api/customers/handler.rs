//! Customer API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{
    BalanceEntryKind, Customer, CustomerCreate, CustomerUpdate, TransactionCreate,
};
use crate::db::repository::CustomerRepository;
use crate::ledger;
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN,
    validate_optional_text, validate_required_text,
};

/// List all customers, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Customer>>> {
    let repo = CustomerRepository::new(state.get_db());
    let customers = repo.find_all().await?;
    Ok(Json(customers))
}

/// Create a new customer
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CustomerCreate>,
) -> AppResult<Json<Customer>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.tax_office, "taxOffice", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.tax_number, "taxNumber", MAX_SHORT_TEXT_LEN)?;

    let repo = CustomerRepository::new(state.get_db());
    let customer = repo.create(payload).await?;
    Ok(Json(customer))
}

/// Update customer contact/tax fields
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CustomerUpdate>,
) -> AppResult<Json<Customer>> {
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

    let repo = CustomerRepository::new(state.get_db());
    let customer = repo.update(&id, payload).await?;
    Ok(Json(customer))
}

/// Delete a customer
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = CustomerRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(Json(true))
}

/// Append a ledger transaction and return the updated customer with its
/// full transaction history
pub async fn add_transaction(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TransactionCreate<BalanceEntryKind>>,
) -> AppResult<Json<Customer>> {
    ledger::validate_amount(payload.amount)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let repo = CustomerRepository::new(state.get_db());
    let customer = repo.add_transaction(&id, payload).await?;
    Ok(Json(customer))
}
