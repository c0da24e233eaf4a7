//! Message model for WLD.

use crate::validation::{validate, TextField};
use crate::Result;

/// A single post within a thread.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Message {
    /// Unique message ID.
    pub id: i64,
    /// ID of the thread this message belongs to.
    pub thread_id: i64,
    /// ID of the author.
    pub user_id: i64,
    /// Message body.
    pub message: String,
    /// When the body was last changed, if ever.
    pub last_edited: Option<String>,
    /// Message creation timestamp.
    pub created_at: String,
}

impl Message {
    /// Whether the message has been edited since it was posted.
    pub fn is_edited(&self) -> bool {
        self.last_edited.is_some()
    }
}

/// Data for creating a new message.
#[derive(Debug, Clone)]
pub struct NewMessage {
    /// ID of the thread to post in.
    pub thread_id: i64,
    /// ID of the author.
    pub user_id: i64,
    /// Message body.
    pub message: String,
}

impl NewMessage {
    /// Create a new message with required fields.
    pub fn new(thread_id: i64, user_id: i64, message: impl Into<String>) -> Self {
        Self {
            thread_id,
            user_id,
            message: message.into(),
        }
    }

    pub(crate) fn validated(&self) -> Result<Self> {
        Ok(Self {
            message: validate(TextField::Message, &self.message)?,
            ..self.clone()
        })
    }
}
