//! User Repository
//!
//! Owns credential hashing on the write path and the password-reset
//! bookkeeping (one-time code + expiry window).

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{User, UserCreate, UserUpdate};
use chrono::{DateTime, Utc};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn parse_id(&self, id: &str) -> RepoResult<RecordId> {
        id.parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
    }

    /// All users, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(users)
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let thing = self.parse_id(id)?;
        let user: Option<User> = self.base.db().select(thing).await?;
        Ok(user)
    }

    /// Find user by username
    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let username_owned = username.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE username = $username LIMIT 1")
            .bind(("username", username_owned))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email_owned = email.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email_owned))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a new user; hashes the password before persisting
    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        // Check duplicate username/email
        if self.find_by_username(&data.username).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Username '{}' already exists",
                data.username
            )));
        }
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already exists",
                data.email
            )));
        }

        let hash_pass = User::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let now = Utc::now();
        let user = User {
            id: None,
            username: data.username,
            email: data.email,
            hash_pass,
            role: data.role.unwrap_or_default(),
            financials: data.financials.unwrap_or_default(),
            reset_password_token: None,
            reset_password_expires: None,
            created_at: now,
            updated_at: now,
        };

        let created: Option<User> = self.base.db().create("user").content(user).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Partial update. An empty password string leaves the credential
    /// unchanged; a non-empty one is re-hashed.
    pub async fn update(&self, id: &str, data: UserUpdate) -> RepoResult<User> {
        let thing = self.parse_id(id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))?;

        // Check duplicate username/email if changing
        if let Some(ref new_username) = data.username
            && new_username != &existing.username
            && self.find_by_username(new_username).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Username '{}' already exists",
                new_username
            )));
        }
        if let Some(ref new_email) = data.email
            && new_email != &existing.email
            && self.find_by_email(new_email).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already exists",
                new_email
            )));
        }

        let hash_pass = match data.password.as_deref() {
            Some(password) if !password.is_empty() => Some(
                User::hash_password(password)
                    .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?,
            ),
            _ => None,
        };

        let mut patch = serde_json::to_value(&data)
            .map_err(|e| RepoError::Database(format!("Failed to serialize update: {}", e)))?;
        if let Some(hash) = hash_pass {
            patch["hashPass"] = serde_json::json!(hash);
        }
        patch["updatedAt"] = serde_json::json!(Utc::now().timestamp_millis());

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing MERGE $patch RETURN AFTER")
            .bind(("thing", thing))
            .bind(("patch", patch))
            .await?;

        result
            .take::<Option<User>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Hard delete a user
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let thing = self.parse_id(id)?;
        let deleted: Option<User> = self.base.db().delete(thing).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("User {} not found", id)));
        }
        Ok(())
    }

    /// Store a fresh reset code and its expiry on the user record
    pub async fn store_reset_code(
        &self,
        user_id: &RecordId,
        code: &str,
        expires: DateTime<Utc>,
    ) -> RepoResult<()> {
        self.base
            .db()
            .query(
                "UPDATE $thing SET resetPasswordToken = $token, resetPasswordExpires = $expires, updatedAt = $updated_at",
            )
            .bind(("thing", user_id.clone()))
            .bind(("token", code.to_string()))
            .bind(("expires", expires.timestamp_millis()))
            .bind(("updated_at", Utc::now().timestamp_millis()))
            .await?;
        Ok(())
    }

    /// Replace the credential and clear any pending reset state
    pub async fn reset_password(&self, user_id: &RecordId, password: &str) -> RepoResult<()> {
        let hash_pass = User::hash_password(password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        self.base
            .db()
            .query(
                "UPDATE $thing SET hashPass = $hash, resetPasswordToken = NONE, resetPasswordExpires = NONE, updatedAt = $updated_at",
            )
            .bind(("thing", user_id.clone()))
            .bind(("hash", hash_pass))
            .bind(("updated_at", Utc::now().timestamp_millis()))
            .await?;
        Ok(())
    }
}
