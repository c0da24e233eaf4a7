//! Permission tag repository for WLD.

use tracing::debug;

use super::types::{BoardPerm, NewBoardPerm};
use crate::db::DbPool;
use crate::{Result, WldError};

/// Repository for permission tag CRUD operations.
pub struct BoardPermRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> BoardPermRepository<'a> {
    /// Create a new BoardPermRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new permission tag.
    ///
    /// A name that is already taken is an integrity violation.
    pub async fn create(&self, new_perm: &NewBoardPerm) -> Result<BoardPerm> {
        let new_perm = new_perm.validated()?;

        let id: i64 = sqlx::query_scalar("INSERT INTO board_perms (name) VALUES ($1) RETURNING id")
            .bind(&new_perm.name)
            .fetch_one(self.pool)
            .await?;

        debug!("Created board permission {} ({})", id, new_perm.name);
        self.get_by_id(id)
            .await?
            .ok_or_else(|| WldError::not_found("permission"))
    }

    /// Get a permission tag by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<BoardPerm>> {
        let perm = sqlx::query_as::<_, BoardPerm>(
            "SELECT id, name, created_at FROM board_perms WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(perm)
    }

    /// Get a permission tag by exact name.
    pub async fn get_by_name(&self, name: &str) -> Result<Option<BoardPerm>> {
        let perm = sqlx::query_as::<_, BoardPerm>(
            "SELECT id, name, created_at FROM board_perms WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(perm)
    }

    /// List all permission tags ordered by name.
    pub async fn list_all(&self) -> Result<Vec<BoardPerm>> {
        let perms = sqlx::query_as::<_, BoardPerm>(
            "SELECT id, name, created_at FROM board_perms ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(perms)
    }

    /// Delete a permission tag by ID.
    ///
    /// Every board requirement and user grant of the tag goes with it.
    /// Returns true if a tag was deleted, false if not found.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM board_perms WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
