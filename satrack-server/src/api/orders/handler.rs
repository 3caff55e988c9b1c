//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{OrderCreate, OrderStatusUpdate, OrderUpdate, OrderWithCustomer};
use crate::db::repository::OrderRepository;
use crate::utils::validation::{MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult};

fn validate_dimension(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be a positive number, got {value}"
        )));
    }
    Ok(())
}

fn validate_money(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}

/// List all orders, newest first, with the customer projection resolved
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<OrderWithCustomer>>> {
    let repo = OrderRepository::new(state.get_db());
    let orders = repo.find_all().await?;
    Ok(Json(orders))
}

/// Create a new order for an existing customer
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<OrderWithCustomer>> {
    validate_dimension(payload.width, "width")?;
    validate_dimension(payload.height, "height")?;
    validate_money(payload.cost, "cost")?;
    validate_money(payload.price, "price")?;
    validate_optional_text(&payload.ral_code, "ralCode", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let repo = OrderRepository::new(state.get_db());
    let order = repo.create(payload).await?;
    Ok(Json(order))
}

/// Update order fields (partial merge)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<OrderWithCustomer>> {
    if let Some(width) = payload.width {
        validate_dimension(width, "width")?;
    }
    if let Some(height) = payload.height {
        validate_dimension(height, "height")?;
    }
    if let Some(cost) = payload.cost {
        validate_money(cost, "cost")?;
    }
    if let Some(price) = payload.price {
        validate_money(price, "price")?;
    }
    validate_optional_text(&payload.ral_code, "ralCode", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let repo = OrderRepository::new(state.get_db());
    let order = repo.update(&id, payload).await?;
    Ok(Json(order))
}

/// Assign a new lifecycle status (any of the seven stages; serde rejects
/// everything else before this handler runs)
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<OrderWithCustomer>> {
    let repo = OrderRepository::new(state.get_db());
    let order = repo.update_status(&id, payload.status).await?;
    Ok(Json(order))
}

/// Delete an order
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = OrderRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(Json(true))
}
