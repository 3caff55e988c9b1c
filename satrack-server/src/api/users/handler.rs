//! User API Handlers
//!
//! Handles personnel CRUD, the payroll summary, signin and the OTP-based
//! password reset flow.

use std::time::Duration;

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{UserCreate, UserResponse, UserUpdate};
use crate::db::repository::UserRepository;
use crate::payroll::{self, PersonnelStats};
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Reset codes expire after ten minutes
const RESET_CODE_TTL_MINUTES: i64 = 10;

// ========== Request / Response payloads ==========

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Generate a 6-digit numeric reset code
fn generate_reset_code() -> Result<String, AppError> {
    let rng = SystemRandom::new();
    let mut bytes = [0u8; 4];
    rng.fill(&mut bytes)
        .map_err(|_| AppError::internal("Failed to generate reset code"))?;
    let code = u32::from_be_bytes(bytes) % 1_000_000;
    Ok(format!("{:06}", code))
}

// ========== Personnel CRUD ==========

/// List all users, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<UserResponse>>> {
    let repo = UserRepository::new(state.get_db());
    let users = repo.find_all().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Aggregate payroll figures over the whole staff
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<PersonnelStats>> {
    let repo = UserRepository::new(state.get_db());
    let users = repo.find_all().await?;
    Ok(Json(payroll::aggregate(&users)))
}

/// Get user by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", id)))?;
    Ok(Json(user.into()))
}

/// Create a new user (public signup) and issue a session token
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<AuthResponse>> {
    validate_required_text(&payload.username, "username", MAX_NAME_LEN)?;
    validate_required_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&payload.password, "password", MAX_PASSWORD_LEN)?;
    if !payload.email.contains('@') {
        return Err(AppError::validation("email is not a valid address"));
    }

    let repo = UserRepository::new(state.get_db());
    let user = repo.create(payload).await?;

    let token = state
        .get_jwt_service()
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(username = %user.username, "User created");

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// Update a user; an empty password string leaves the credential unchanged
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<UserResponse>> {
    if let Some(username) = &payload.username {
        validate_required_text(username, "username", MAX_NAME_LEN)?;
    }
    if let Some(email) = &payload.email {
        validate_required_text(email, "email", MAX_EMAIL_LEN)?;
        if !email.contains('@') {
            return Err(AppError::validation("email is not a valid address"));
        }
    }
    if let Some(password) = &payload.password
        && password.len() > MAX_PASSWORD_LEN
    {
        return Err(AppError::validation("password is too long"));
    }

    let repo = UserRepository::new(state.get_db());
    let user = repo.update(&id, payload).await?;
    Ok(Json(user.into()))
}

/// Delete a user
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = UserRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(Json(true))
}

// ========== Credential lifecycle ==========

/// Signin with email + password; issues a session token
pub async fn signin(
    State(state): State<ServerState>,
    Json(payload): Json<SigninRequest>,
) -> AppResult<Json<AuthResponse>> {
    let repo = UserRepository::new(state.get_db());
    let user = repo.find_by_email(&payload.email).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent account enumeration
    let user = match user {
        Some(user) => {
            let password_valid = user.verify_password(&payload.password).map_err(|e| {
                AppError::internal(format!("Password verification failed: {}", e))
            })?;

            if !password_valid {
                tracing::warn!(email = %payload.email, "Signin failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            user
        }
        None => {
            tracing::warn!(email = %payload.email, "Signin failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let token = state
        .get_jwt_service()
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(username = %user.username, "User signed in");

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// Issue a one-time reset code and deliver it by email.
///
/// The response is the same whether or not the address exists, so the
/// endpoint cannot be used to probe for accounts.
pub async fn forgot_password(
    State(state): State<ServerState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let repo = UserRepository::new(state.get_db());

    if let Some(user) = repo.find_by_email(&payload.email).await? {
        let code = generate_reset_code()?;
        let expires = Utc::now() + chrono::Duration::minutes(RESET_CODE_TTL_MINUTES);

        let user_id = user
            .id
            .clone()
            .ok_or_else(|| AppError::internal("User record has no id"))?;
        repo.store_reset_code(&user_id, &code, expires).await?;

        state.mailer().send_reset_code(&user.email, &code).await?;

        tracing::info!(username = %user.username, "Password reset code issued");
    } else {
        tracing::warn!(email = %payload.email, "Password reset requested for unknown email");
    }

    Ok(Json(MessageResponse {
        message: "If the email is registered, a reset code has been sent".to_string(),
    }))
}

/// Check a reset code against the stored one and its expiry window
pub async fn verify_otp(
    State(state): State<ServerState>,
    Json(payload): Json<VerifyOtpRequest>,
) -> AppResult<Json<MessageResponse>> {
    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| AppError::auth_failed("Invalid or expired reset code"))?;

    if !user.reset_code_valid(&payload.otp, Utc::now()) {
        tracing::warn!(email = %payload.email, "Reset code rejected");
        return Err(AppError::auth_failed("Invalid or expired reset code"));
    }

    Ok(Json(MessageResponse {
        message: "Reset code verified".to_string(),
    }))
}

/// Replace the credential once a reset code is pending.
///
/// The code itself is not re-presented here; any pending (even expired)
/// verify step is what gates the call, matching the original flow.
pub async fn reset_password(
    State(state): State<ServerState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    validate_required_text(&payload.password, "password", MAX_PASSWORD_LEN)?;

    let repo = UserRepository::new(state.get_db());
    let user = repo
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| AppError::auth_failed("No pending password reset"))?;

    if user.reset_password_token.is_none() {
        return Err(AppError::auth_failed("No pending password reset"));
    }

    let user_id = user
        .id
        .clone()
        .ok_or_else(|| AppError::internal("User record has no id"))?;
    repo.reset_password(&user_id, &payload.password).await?;

    tracing::info!(username = %user.username, "Password reset");

    Ok(Json(MessageResponse {
        message: "Password reset successfully".to_string(),
    }))
}
