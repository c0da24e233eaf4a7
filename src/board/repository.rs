//! Board repository for WLD.
//!
//! This module provides CRUD operations for boards and the permission tags
//! they require.

use tracing::{debug, info};

use super::types::{Board, BoardUpdate, NewBoard};
use crate::db::DbPool;
use crate::perm::{link_perm_by_name, LinkOutcome, PermLinkRepository, PermTarget};
use crate::{Result, WldError};

/// Thread and message totals of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardActivity {
    /// Number of threads on the board.
    pub topics: i64,
    /// Number of messages across all of the board's threads.
    pub messages: i64,
}

/// Repository for board CRUD operations.
pub struct BoardRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> BoardRepository<'a> {
    /// Create a new BoardRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new board and link its required permission tags.
    ///
    /// The board row and its links are written in one transaction: if any
    /// tag name is unknown the error is returned and no board is created.
    pub async fn create(&self, new_board: &NewBoard) -> Result<Board> {
        let new_board = new_board.validated()?;

        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO boards (name, description) VALUES ($1, $2) RETURNING id",
        )
        .bind(&new_board.name)
        .bind(&new_board.description)
        .fetch_one(&mut *tx)
        .await?;

        for perm_name in &new_board.perms {
            link_perm_by_name(&mut tx, PermTarget::Board(id), perm_name).await?;
        }

        tx.commit().await?;
        info!(
            "Created board {} ({}) requiring {:?}",
            id, new_board.name, new_board.perms
        );

        self.get_by_id(id)
            .await?
            .ok_or_else(|| WldError::not_found("board"))
    }

    /// Get a board by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Board>> {
        let board = sqlx::query_as::<_, Board>(
            "SELECT id, name, description, created_at FROM boards WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(board)
    }

    /// Get a board by name.
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Board>> {
        let board = sqlx::query_as::<_, Board>(
            "SELECT id, name, description, created_at FROM boards WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(board)
    }

    /// List all boards ordered by name.
    pub async fn list_all(&self) -> Result<Vec<Board>> {
        let boards = sqlx::query_as::<_, Board>(
            "SELECT id, name, description, created_at FROM boards ORDER BY name, id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(boards)
    }

    /// Update a board by ID.
    ///
    /// Only fields that are set in the update will be modified.
    /// Returns the updated board, or None if not found.
    pub async fn update(&self, id: i64, update: &BoardUpdate) -> Result<Option<Board>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }
        let update = update.validated()?;

        let result = sqlx::query(
            "UPDATE boards SET name = COALESCE($1, name), description = COALESCE($2, description)
             WHERE id = $3",
        )
        .bind(&update.name)
        .bind(&update.description)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        debug!("Updated board {}", id);
        self.get_by_id(id).await
    }

    /// Delete a board by ID.
    ///
    /// Returns true if a board was deleted, false if not found.
    /// Its threads, their messages and its permission links go with it.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM boards WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count threads and messages on a board in a single query.
    pub async fn activity(&self, id: i64) -> Result<BoardActivity> {
        let (topics, messages): (i64, i64) = sqlx::query_as(
            "SELECT
                (SELECT COUNT(*) FROM threads WHERE board_id = $1),
                (SELECT COUNT(*) FROM messages m
                 JOIN threads t ON t.id = m.thread_id
                 WHERE t.board_id = $1)",
        )
        .bind(id)
        .fetch_one(self.pool)
        .await?;

        Ok(BoardActivity { topics, messages })
    }

    /// Require the permission tag named `perm_name` to view a board.
    pub async fn add_perm_by_name(&self, board_id: i64, perm_name: &str) -> Result<LinkOutcome> {
        PermLinkRepository::new(self.pool)
            .add_by_name(PermTarget::Board(board_id), perm_name)
            .await
    }

    /// Stop requiring the permission tag named `perm_name`.
    ///
    /// Returns whether a requirement was actually removed.
    pub async fn remove_perm_by_name(&self, board_id: i64, perm_name: &str) -> Result<bool> {
        PermLinkRepository::new(self.pool)
            .remove_by_name(PermTarget::Board(board_id), perm_name)
            .await
    }

    /// Names of the permission tags a board requires, sorted.
    pub async fn list_perms(&self, board_id: i64) -> Result<Vec<String>> {
        PermLinkRepository::new(self.pool)
            .list(PermTarget::Board(board_id))
            .await
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;
    use crate::board::{MessageRepository, NewMessage, NewThread, ThreadRepository};
    use crate::db::{NewUser, UserRepository};
    use crate::perm::{BoardPermRepository, NewBoardPerm};
    use crate::Database;

    async fn setup_db() -> Database {
        let db = Database::open_in_memory().await.unwrap();
        let perms = BoardPermRepository::new(db.pool());
        perms.create(&NewBoardPerm::new("officers")).await.unwrap();
        perms.create(&NewBoardPerm::new("raiders")).await.unwrap();
        db
    }

    async fn board_count(db: &Database) -> i64 {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM boards")
            .fetch_one(db.pool())
            .await
            .unwrap();
        count.0
    }

    #[tokio::test]
    async fn test_create_board() {
        let db = setup_db().await;
        let repo = BoardRepository::new(db.pool());

        let board = repo
            .create(&NewBoard::new("General").with_description("Anything goes"))
            .await
            .unwrap();

        assert_eq!(board.id, 1);
        assert_eq!(board.name, "General");
        assert_eq!(board.description, "Anything goes");
        assert!(repo.list_perms(board.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_board_with_perms() {
        let db = setup_db().await;
        let repo = BoardRepository::new(db.pool());

        let board = repo
            .create(&NewBoard::new("Raids").with_perm("raiders").with_perm("officers"))
            .await
            .unwrap();

        assert_eq!(
            repo.list_perms(board.id).await.unwrap(),
            vec!["officers", "raiders"]
        );
    }

    #[tokio::test]
    async fn test_create_board_duplicate_perm_is_linked_once() {
        let db = setup_db().await;
        let repo = BoardRepository::new(db.pool());

        let board = repo
            .create(&NewBoard::new("Raids").with_perm("raiders").with_perm("raiders"))
            .await
            .unwrap();

        assert_eq!(repo.list_perms(board.id).await.unwrap(), vec!["raiders"]);
    }

    #[tokio::test]
    async fn test_create_board_unknown_perm_rolls_back() {
        let db = setup_db().await;
        let repo = BoardRepository::new(db.pool());

        let result = repo
            .create(&NewBoard::new("Secret").with_perm("officers").with_perm("ghosts"))
            .await;

        assert!(matches!(result, Err(WldError::NotFound(_))));
        assert_eq!(board_count(&db).await, 0);
        let links: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM board_perms_link")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(links.0, 0);
    }

    #[tokio::test]
    async fn test_create_board_invalid_name() {
        let db = setup_db().await;
        let repo = BoardRepository::new(db.pool());

        let result = repo.create(&NewBoard::new("bad\u{0}name")).await;
        assert!(matches!(result, Err(WldError::Validation(_))));
        assert_eq!(board_count(&db).await, 0);
    }

    #[tokio::test]
    async fn test_create_board_duplicate_name() {
        let db = setup_db().await;
        let repo = BoardRepository::new(db.pool());

        repo.create(&NewBoard::new("General")).await.unwrap();
        let result = repo.create(&NewBoard::new("General")).await;
        assert!(matches!(result, Err(WldError::Integrity(_))));
    }

    #[tokio::test]
    async fn test_get_by_name() {
        let db = setup_db().await;
        let repo = BoardRepository::new(db.pool());

        let created = repo.create(&NewBoard::new("General")).await.unwrap();
        assert_eq!(repo.get_by_name("General").await.unwrap(), Some(created));
        assert!(repo.get_by_name("Missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_board() {
        let db = setup_db().await;
        let repo = BoardRepository::new(db.pool());

        let board = repo
            .create(&NewBoard::new("General").with_description("old"))
            .await
            .unwrap();

        let updated = repo
            .update(board.id, &BoardUpdate::new().description("new"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "General");
        assert_eq!(updated.description, "new");

        let missing = repo
            .update(999, &BoardUpdate::new().name("Other"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_update_empty() {
        let db = setup_db().await;
        let repo = BoardRepository::new(db.pool());

        let board = repo.create(&NewBoard::new("General")).await.unwrap();
        let result = repo.update(board.id, &BoardUpdate::new()).await.unwrap();
        assert_eq!(result, Some(board));
    }

    #[tokio::test]
    async fn test_list_all_sorted() {
        let db = setup_db().await;
        let repo = BoardRepository::new(db.pool());

        repo.create(&NewBoard::new("Raids")).await.unwrap();
        repo.create(&NewBoard::new("General")).await.unwrap();

        let names: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, vec!["General", "Raids"]);
    }

    #[tokio::test]
    async fn test_perm_add_remove() {
        let db = setup_db().await;
        let repo = BoardRepository::new(db.pool());
        let board = repo.create(&NewBoard::new("Raids")).await.unwrap();

        assert_eq!(
            repo.add_perm_by_name(board.id, "raiders").await.unwrap(),
            LinkOutcome::Added
        );
        assert_eq!(
            repo.add_perm_by_name(board.id, "raiders").await.unwrap(),
            LinkOutcome::AlreadyLinked
        );
        assert_eq!(repo.list_perms(board.id).await.unwrap(), vec!["raiders"]);

        assert!(repo.remove_perm_by_name(board.id, "raiders").await.unwrap());
        assert!(!repo.remove_perm_by_name(board.id, "raiders").await.unwrap());
        assert!(repo.list_perms(board.id).await.unwrap().is_empty());

        let missing = repo.add_perm_by_name(board.id, "nonexistent").await;
        assert!(matches!(missing, Err(WldError::NotFound(_))));
        assert!(repo.list_perms(board.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_activity_counts() {
        let db = setup_db().await;
        let repo = BoardRepository::new(db.pool());
        let threads = ThreadRepository::new(db.pool());
        let messages = MessageRepository::new(db.pool());
        let user = UserRepository::new(db.pool())
            .create(&NewUser::new("alice"))
            .await
            .unwrap();

        let board = repo.create(&NewBoard::new("General")).await.unwrap();
        let other = repo.create(&NewBoard::new("Other")).await.unwrap();
        assert_eq!(repo.activity(board.id).await.unwrap(), BoardActivity::default());

        let first = threads
            .create(&NewThread::new(board.id, user.id, "First"))
            .await
            .unwrap();
        let second = threads
            .create(&NewThread::new(board.id, user.id, "Second"))
            .await
            .unwrap();
        let elsewhere = threads
            .create(&NewThread::new(other.id, user.id, "Elsewhere"))
            .await
            .unwrap();

        for (thread_id, n) in [(first.id, 3), (second.id, 5), (elsewhere.id, 2)] {
            for i in 0..n {
                messages
                    .create(&NewMessage::new(thread_id, user.id, format!("post {i}")))
                    .await
                    .unwrap();
            }
        }

        assert_eq!(
            repo.activity(board.id).await.unwrap(),
            BoardActivity {
                topics: 2,
                messages: 8
            }
        );
    }

    #[tokio::test]
    async fn test_delete_board_cascades() {
        let db = setup_db().await;
        let repo = BoardRepository::new(db.pool());
        let threads = ThreadRepository::new(db.pool());
        let messages = MessageRepository::new(db.pool());
        let user = UserRepository::new(db.pool())
            .create(&NewUser::new("alice"))
            .await
            .unwrap();

        let board = repo
            .create(&NewBoard::new("General").with_perm("officers"))
            .await
            .unwrap();
        let thread = threads
            .create(&NewThread::new(board.id, user.id, "Hello"))
            .await
            .unwrap();
        let message = messages
            .create(&NewMessage::new(thread.id, user.id, "hi"))
            .await
            .unwrap();

        assert!(repo.delete(board.id).await.unwrap());
        assert!(!repo.delete(board.id).await.unwrap());

        assert!(threads.get_by_id(thread.id).await.unwrap().is_none());
        assert!(messages.get_by_id(message.id).await.unwrap().is_none());
        let links: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM board_perms_link")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(links.0, 0);
    }
}
