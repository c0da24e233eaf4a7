//! Thread repository for WLD.
//!
//! This module provides CRUD operations for threads in the database.

use tracing::debug;

use super::thread::{NewThread, Thread};
use crate::db::{row_exists, DbPool};
use crate::validation::{validate, TextField};
use crate::{Result, WldError};

/// Repository for thread CRUD operations.
pub struct ThreadRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ThreadRepository<'a> {
    /// Create a new ThreadRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new thread in the database.
    ///
    /// The board and the creating user must exist.
    pub async fn create(&self, new_thread: &NewThread) -> Result<Thread> {
        let new_thread = new_thread.validated()?;

        if !row_exists(self.pool, "boards", new_thread.board_id).await? {
            return Err(WldError::not_found(format!("board {}", new_thread.board_id)));
        }
        if !row_exists(self.pool, "users", new_thread.user_id).await? {
            return Err(WldError::not_found(format!("user {}", new_thread.user_id)));
        }

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO threads (board_id, user_id, name) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(new_thread.board_id)
        .bind(new_thread.user_id)
        .bind(&new_thread.name)
        .fetch_one(self.pool)
        .await?;

        debug!("Created thread {} on board {}", id, new_thread.board_id);
        self.get_by_id(id)
            .await?
            .ok_or_else(|| WldError::not_found("thread"))
    }

    /// Get a thread by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Thread>> {
        let thread = sqlx::query_as::<_, Thread>(
            "SELECT id, board_id, user_id, name, created_at FROM threads WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(thread)
    }

    /// List threads on a board, newest first.
    pub async fn list_by_board(&self, board_id: i64) -> Result<Vec<Thread>> {
        let threads = sqlx::query_as::<_, Thread>(
            "SELECT id, board_id, user_id, name, created_at
             FROM threads WHERE board_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(board_id)
        .fetch_all(self.pool)
        .await?;

        Ok(threads)
    }

    /// List threads started by a user, newest first.
    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<Thread>> {
        let threads = sqlx::query_as::<_, Thread>(
            "SELECT id, board_id, user_id, name, created_at
             FROM threads WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(threads)
    }

    /// Change a thread's topic.
    ///
    /// Returns the updated thread, or None if not found.
    pub async fn rename(&self, id: i64, name: &str) -> Result<Option<Thread>> {
        let name = validate(TextField::Name, name)?;

        let result = sqlx::query("UPDATE threads SET name = $1 WHERE id = $2")
            .bind(&name)
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_id(id).await
    }

    /// Delete a thread by ID.
    ///
    /// Returns true if a thread was deleted, false if not found.
    /// This also deletes all messages in the thread.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM threads WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count threads on a board.
    pub async fn count_by_board(&self, board_id: i64) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM threads WHERE board_id = $1")
            .bind(board_id)
            .fetch_one(self.pool)
            .await?;
        Ok(count.0)
    }
}
