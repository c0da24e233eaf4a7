//! Board service for WLD.
//!
//! This module provides visibility-checked browsing of boards, threads and
//! messages, returned as display projections.

use serde::Serialize;
use tracing::{debug, warn};

use crate::db::{row_exists, Database, UserRepository};
use crate::perm::{can_view, missing_perms};
use crate::{Result, WldError};

use super::message::Message;
use super::message_repository::MessageRepository;
use super::repository::BoardRepository;
use super::thread::Thread;
use super::thread_repository::ThreadRepository;
use super::types::Board;
use super::view::{BoardView, MessageView, ThreadView};

/// A board as shown to a user: the detailed board projection and its threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardPage {
    /// The board, with thread and message totals.
    pub board: BoardView,
    /// Threads on the board, newest first, with creator usernames.
    pub threads: Vec<ThreadView>,
}

/// A thread as shown to a user: the thread and its messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadPage {
    /// The thread, with the creator's username.
    pub thread: ThreadView,
    /// Messages in posting order, with author usernames.
    pub messages: Vec<MessageView>,
}

#[derive(sqlx::FromRow)]
struct ThreadRow {
    #[sqlx(flatten)]
    thread: Thread,
    username: String,
}

#[derive(sqlx::FromRow)]
struct MessageRow {
    #[sqlx(flatten)]
    message: Message,
    username: String,
}

/// Service for board operations with permission checking.
pub struct BoardService<'a> {
    db: &'a Database,
}

impl<'a> BoardService<'a> {
    /// Create a new BoardService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Check whether a user may view a board.
    ///
    /// A board is viewable when the user holds every permission tag the board
    /// requires. Boards requiring nothing are public.
    pub async fn can_view(&self, user_id: i64, board_id: i64) -> Result<bool> {
        let granted = UserRepository::new(self.db.pool())
            .list_perms(user_id)
            .await?;
        let required = BoardRepository::new(self.db.pool())
            .list_perms(board_id)
            .await?;

        let allowed = can_view(&granted, &required);
        if !allowed {
            debug!(
                "User {} lacks {:?} for board {}",
                user_id,
                missing_perms(&granted, &required),
                board_id
            );
        }
        Ok(allowed)
    }

    /// List all boards a user may view, ordered by name.
    pub async fn viewable_boards(&self, user_id: i64) -> Result<Vec<Board>> {
        if !row_exists(self.db.pool(), "users", user_id).await? {
            return Err(WldError::not_found(format!("user {user_id}")));
        }

        // Boards with no required tag the user is missing.
        let boards = sqlx::query_as::<_, Board>(
            "SELECT b.id, b.name, b.description, b.created_at
             FROM boards b
             WHERE NOT EXISTS (
                 SELECT 1 FROM board_perms_link bl
                 WHERE bl.board_id = b.id
                   AND NOT EXISTS (
                       SELECT 1 FROM user_board_perms up
                       WHERE up.user_id = $1 AND up.perm_id = bl.perm_id
                   )
             )
             ORDER BY b.name, b.id",
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(boards)
    }

    /// Project a board, adding thread and message totals when `extra` is set.
    pub async fn board_view(&self, board_id: i64, extra: bool) -> Result<BoardView> {
        let repo = BoardRepository::new(self.db.pool());
        let board = repo
            .get_by_id(board_id)
            .await?
            .ok_or_else(|| WldError::not_found(format!("board {board_id}")))?;

        let view = BoardView::from(&board);
        if extra {
            Ok(view.with_activity(repo.activity(board_id).await?))
        } else {
            Ok(view)
        }
    }

    /// Project a thread, adding the creator's username when `extra` is set.
    pub async fn thread_view(&self, thread_id: i64, extra: bool) -> Result<ThreadView> {
        let thread = ThreadRepository::new(self.db.pool())
            .get_by_id(thread_id)
            .await?
            .ok_or_else(|| WldError::not_found(format!("thread {thread_id}")))?;

        let view = ThreadView::from(&thread);
        if extra {
            Ok(view.with_username(self.username(thread.user_id).await?))
        } else {
            Ok(view)
        }
    }

    /// Project a message, adding the author's username when `extra` is set.
    pub async fn message_view(&self, message_id: i64, extra: bool) -> Result<MessageView> {
        let message = MessageRepository::new(self.db.pool())
            .get_by_id(message_id)
            .await?
            .ok_or_else(|| WldError::not_found(format!("message {message_id}")))?;

        let view = MessageView::from(&message);
        if extra {
            Ok(view.with_username(self.username(message.user_id).await?))
        } else {
            Ok(view)
        }
    }

    /// Open a board for a user.
    ///
    /// Returns a `Permission` error if the user may not view the board.
    pub async fn open_board(&self, user_id: i64, board_id: i64) -> Result<BoardPage> {
        self.ensure_viewable(user_id, board_id).await?;

        let board = self.board_view(board_id, true).await?;
        let rows = sqlx::query_as::<_, ThreadRow>(
            "SELECT t.id, t.board_id, t.user_id, t.name, t.created_at, u.username
             FROM threads t
             JOIN users u ON u.id = t.user_id
             WHERE t.board_id = $1
             ORDER BY t.created_at DESC, t.id DESC",
        )
        .bind(board_id)
        .fetch_all(self.db.pool())
        .await?;

        let threads = rows
            .into_iter()
            .map(|row| ThreadView::from(&row.thread).with_username(row.username))
            .collect();

        Ok(BoardPage { board, threads })
    }

    /// Open a thread for a user.
    ///
    /// The user must be able to view the board the thread belongs to.
    pub async fn open_thread(&self, user_id: i64, thread_id: i64) -> Result<ThreadPage> {
        let thread = ThreadRepository::new(self.db.pool())
            .get_by_id(thread_id)
            .await?
            .ok_or_else(|| WldError::not_found(format!("thread {thread_id}")))?;

        self.ensure_viewable(user_id, thread.board_id).await?;

        let rows = sqlx::query_as::<_, MessageRow>(
            "SELECT m.id, m.thread_id, m.user_id, m.message, m.last_edited, m.created_at,
                    u.username
             FROM messages m
             JOIN users u ON u.id = m.user_id
             WHERE m.thread_id = $1
             ORDER BY m.created_at, m.id",
        )
        .bind(thread_id)
        .fetch_all(self.db.pool())
        .await?;

        let messages = rows
            .into_iter()
            .map(|row| MessageView::from(&row.message).with_username(row.username))
            .collect();

        Ok(ThreadPage {
            thread: ThreadView::from(&thread).with_username(self.username(thread.user_id).await?),
            messages,
        })
    }

    async fn ensure_viewable(&self, user_id: i64, board_id: i64) -> Result<()> {
        if self.can_view(user_id, board_id).await? {
            return Ok(());
        }
        warn!("User {} denied access to board {}", user_id, board_id);
        Err(WldError::Permission(format!(
            "user {user_id} may not view board {board_id}"
        )))
    }

    async fn username(&self, user_id: i64) -> Result<String> {
        UserRepository::new(self.db.pool())
            .get_by_id(user_id)
            .await?
            .map(|user| user.username)
            .ok_or_else(|| WldError::not_found(format!("user {user_id}")))
    }
}
