//! Message repository for WLD.

use tracing::debug;

use super::message::{Message, NewMessage};
use crate::db::{row_exists, DbPool, SQL_NOW};
use crate::validation::{validate, TextField};
use crate::{Result, WldError};

const MESSAGE_COLUMNS: &str = "id, thread_id, user_id, message, last_edited, created_at";

/// Repository for message CRUD operations.
pub struct MessageRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> MessageRepository<'a> {
    /// Create a new MessageRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Post a new message to a thread.
    ///
    /// The thread and the author must exist. The message starts unedited.
    pub async fn create(&self, new_message: &NewMessage) -> Result<Message> {
        let new_message = new_message.validated()?;

        if !row_exists(self.pool, "threads", new_message.thread_id).await? {
            return Err(WldError::not_found(format!(
                "thread {}",
                new_message.thread_id
            )));
        }
        if !row_exists(self.pool, "users", new_message.user_id).await? {
            return Err(WldError::not_found(format!("user {}", new_message.user_id)));
        }

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO messages (thread_id, user_id, message) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(new_message.thread_id)
        .bind(new_message.user_id)
        .bind(&new_message.message)
        .fetch_one(self.pool)
        .await?;

        debug!("Created message {} in thread {}", id, new_message.thread_id);
        self.get_by_id(id)
            .await?
            .ok_or_else(|| WldError::not_found("message"))
    }

    /// Get a message by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Message>> {
        let message = sqlx::query_as::<_, Message>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(message)
    }

    /// List messages in a thread, oldest first.
    pub async fn list_by_thread(&self, thread_id: i64) -> Result<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE thread_id = $1
             ORDER BY created_at, id"
        ))
        .bind(thread_id)
        .fetch_all(self.pool)
        .await?;

        Ok(messages)
    }

    /// Replace a message body and stamp it as edited.
    ///
    /// Returns the updated message, or None if not found.
    pub async fn edit(&self, id: i64, text: &str) -> Result<Option<Message>> {
        let text = validate(TextField::Message, text)?;

        let result = sqlx::query(&format!(
            "UPDATE messages SET message = $1, last_edited = {SQL_NOW} WHERE id = $2"
        ))
        .bind(&text)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        debug!("Edited message {}", id);
        self.get_by_id(id).await
    }

    /// Delete a message by ID.
    ///
    /// Returns true if a message was deleted, false if not found.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count messages in a thread.
    pub async fn count_by_thread(&self, thread_id: i64) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages WHERE thread_id = $1")
            .bind(thread_id)
            .fetch_one(self.pool)
            .await?;
        Ok(count.0)
    }

    /// Count messages across all threads of a board.
    pub async fn count_by_board(&self, board_id: i64) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM messages m
             JOIN threads t ON t.id = m.thread_id
             WHERE t.board_id = $1",
        )
        .bind(board_id)
        .fetch_one(self.pool)
        .await?;
        Ok(count.0)
    }
}
