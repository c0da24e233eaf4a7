//! Thread model for WLD.

use crate::validation::{validate, TextField};
use crate::Result;

/// A topic within a board, started by a user.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Thread {
    /// Unique thread ID.
    pub id: i64,
    /// ID of the board this thread belongs to.
    pub board_id: i64,
    /// ID of the user who created the thread.
    pub user_id: i64,
    /// Thread topic.
    pub name: String,
    /// Thread creation timestamp.
    pub created_at: String,
}

/// Data for creating a new thread.
#[derive(Debug, Clone)]
pub struct NewThread {
    /// ID of the board to create the thread in.
    pub board_id: i64,
    /// ID of the user creating the thread.
    pub user_id: i64,
    /// Thread topic.
    pub name: String,
}

impl NewThread {
    /// Create a new thread with required fields.
    pub fn new(board_id: i64, user_id: i64, name: impl Into<String>) -> Self {
        Self {
            board_id,
            user_id,
            name: name.into(),
        }
    }

    pub(crate) fn validated(&self) -> Result<Self> {
        Ok(Self {
            name: validate(TextField::Name, &self.name)?,
            ..self.clone()
        })
    }
}
