//! User repository for WLD.
//!
//! This module provides CRUD operations for users and their granted
//! permission tags.

use tracing::debug;

use super::user::{NewUser, User};
use super::DbPool;
use crate::perm::{LinkOutcome, PermLinkRepository, PermTarget};
use crate::{Result, WldError};

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Returns the created user with the assigned ID. A taken username is an
    /// integrity violation.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let new_user = new_user.validated()?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (username, email, first_name, last_name)
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .fetch_one(self.pool)
        .await?;

        debug!("Created user {} ({})", id, new_user.username);
        self.get_by_id(id)
            .await?
            .ok_or_else(|| WldError::not_found("user"))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, first_name, last_name, created_at
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user by exact username.
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, first_name, last_name, created_at
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// List all users ordered by username.
    pub async fn list_all(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, username, email, first_name, last_name, created_at
             FROM users ORDER BY username",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    /// Count all users.
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;
        Ok(count.0)
    }

    /// Delete a user by ID.
    ///
    /// Returns true if a user was deleted, false if not found. Users who still
    /// own threads or messages cannot be deleted.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Grant the permission tag named `perm_name` to a user.
    pub async fn add_perm_by_name(&self, user_id: i64, perm_name: &str) -> Result<LinkOutcome> {
        PermLinkRepository::new(self.pool)
            .add_by_name(PermTarget::User(user_id), perm_name)
            .await
    }

    /// Revoke the permission tag named `perm_name` from a user.
    ///
    /// Returns whether a grant was actually removed.
    pub async fn remove_perm_by_name(&self, user_id: i64, perm_name: &str) -> Result<bool> {
        PermLinkRepository::new(self.pool)
            .remove_by_name(PermTarget::User(user_id), perm_name)
            .await
    }

    /// Names of the permission tags granted to a user, sorted.
    pub async fn list_perms(&self, user_id: i64) -> Result<Vec<String>> {
        PermLinkRepository::new(self.pool)
            .list(PermTarget::User(user_id))
            .await
    }
}
