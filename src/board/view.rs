//! Display projections for boards, threads and messages.
//!
//! Projections are plain serialisable structs. Timestamps are always emitted
//! as RFC 3339 UTC strings; fields that only the detailed projection carries
//! are left out of the JSON when absent.

use serde::Serialize;

use super::message::Message;
use super::repository::BoardActivity;
use super::thread::Thread;
use super::types::Board;
use crate::datetime::to_rfc3339;

/// Board projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    /// Board ID.
    pub id: i64,
    /// Creation time.
    pub created: String,
    /// Board name.
    pub name: String,
    /// Board description.
    pub description: String,
    /// Number of threads (detailed projection only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<i64>,
    /// Number of messages across all threads (detailed projection only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<i64>,
}

impl BoardView {
    /// Add thread and message totals.
    pub fn with_activity(mut self, activity: BoardActivity) -> Self {
        self.topics = Some(activity.topics);
        self.messages = Some(activity.messages);
        self
    }
}

impl From<&Board> for BoardView {
    fn from(board: &Board) -> Self {
        Self {
            id: board.id,
            created: to_rfc3339(&board.created_at),
            name: board.name.clone(),
            description: board.description.clone(),
            topics: None,
            messages: None,
        }
    }
}

/// Thread projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadView {
    /// Thread ID.
    pub id: i64,
    /// Creation time.
    pub created: String,
    /// Thread topic.
    pub name: String,
    /// Creator's username (detailed projection only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl ThreadView {
    /// Add the creator's username.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

impl From<&Thread> for ThreadView {
    fn from(thread: &Thread) -> Self {
        Self {
            id: thread.id,
            created: to_rfc3339(&thread.created_at),
            name: thread.name.clone(),
            username: None,
        }
    }
}

/// Message projection.
///
/// `last_edited` is always present and serialises as `null` for a message
/// that was never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageView {
    /// Message ID.
    pub id: i64,
    /// Creation time.
    pub created: String,
    /// Last edit time.
    pub last_edited: Option<String>,
    /// Message body.
    pub message: String,
    /// Author's username (detailed projection only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl MessageView {
    /// Add the author's username.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

impl From<&Message> for MessageView {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id,
            created: to_rfc3339(&message.created_at),
            last_edited: message.last_edited.as_deref().map(to_rfc3339),
            message: message.message.clone(),
            username: None,
        }
    }
}
