//! User / Personnel Model
//!
//! Users double as login accounts and payroll records: the embedded
//! `financials` block feeds the personnel cost aggregation.

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// User ID type
pub type UserId = RecordId;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    Personel,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Personel => "personel",
        }
    }
}

/// Pay period for the base salary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SalaryType {
    #[default]
    Monthly,
    Weekly,
}

/// Payroll figures embedded in the user document
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserFinancials {
    #[serde(default)]
    pub salary: f64,
    #[serde(default)]
    pub salary_type: SalaryType,
    #[serde(default)]
    pub insurance: f64,
    #[serde(default)]
    pub benefits: f64,
    #[serde(default)]
    pub transport: f64,
    #[serde(default)]
    pub overtime: f64,
}

/// User document. The password hash and reset fields never leave the
/// database layer; API responses go through [`UserResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<UserId>,
    pub username: String,
    pub email: String,
    pub hash_pass: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub financials: UserFinancials,
    #[serde(default)]
    pub reset_password_token: Option<String>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub reset_password_expires: Option<DateTime<Utc>>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }

    /// Whether a reset code is currently pending and unexpired
    pub fn reset_code_valid(&self, code: &str, now: DateTime<Utc>) -> bool {
        match (&self.reset_password_token, self.reset_password_expires) {
            (Some(token), Some(expires)) => token == code && expires > now,
            _ => false,
        }
    }
}

/// Create user payload (public signup / admin personnel entry)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub financials: Option<UserFinancials>,
}

/// Update user payload. An empty password string means "leave unchanged"
/// (the dashboard always submits the field).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financials: Option<UserFinancials>,
}

/// User as exposed by the API: no hash, no reset state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub financials: UserFinancials,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
            username: user.username,
            email: user.email,
            role: user.role,
            financials: user.financials,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
