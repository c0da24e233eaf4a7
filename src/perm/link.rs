//! Permission link tables for WLD.
//!
//! Boards and users are both joined to permission tags through a link table
//! (`board_perms_link` and `user_board_perms`). Links are addressed by tag
//! name; a pair is stored at most once.

use std::fmt;

use tracing::debug;

use crate::db::{DbConnection, DbPool};
use crate::{Result, WldError};

/// The owner side of a permission link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermTarget {
    /// A board requiring the tag.
    Board(i64),
    /// A user granted the tag.
    User(i64),
}

impl PermTarget {
    /// ID of the board or user.
    pub fn id(&self) -> i64 {
        match self {
            PermTarget::Board(id) | PermTarget::User(id) => *id,
        }
    }

    /// Entity name used in errors and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PermTarget::Board(_) => "board",
            PermTarget::User(_) => "user",
        }
    }

    fn owner_table(&self) -> &'static str {
        match self {
            PermTarget::Board(_) => "boards",
            PermTarget::User(_) => "users",
        }
    }

    fn link_table(&self) -> &'static str {
        match self {
            PermTarget::Board(_) => "board_perms_link",
            PermTarget::User(_) => "user_board_perms",
        }
    }

    fn owner_column(&self) -> &'static str {
        match self {
            PermTarget::Board(_) => "board_id",
            PermTarget::User(_) => "user_id",
        }
    }
}

impl fmt::Display for PermTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.id())
    }
}

/// Result of linking a tag to a board or user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// A new link row was written.
    Added,
    /// The link already existed; nothing changed.
    AlreadyLinked,
}

/// Repository for permission link operations.
pub struct PermLinkRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> PermLinkRepository<'a> {
    /// Create a new PermLinkRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Link the tag named `perm_name` to `target`.
    ///
    /// Fails with `NotFound` if the tag or the target does not exist.
    pub async fn add_by_name(&self, target: PermTarget, perm_name: &str) -> Result<LinkOutcome> {
        let mut conn = self.pool.acquire().await?;
        link_perm_by_name(&mut conn, target, perm_name).await
    }

    /// Unlink the tag named `perm_name` from `target`.
    ///
    /// Returns whether a link was removed; `Ok(false)` means the tag exists
    /// but was not linked. Fails with `NotFound` if the tag or the target
    /// does not exist.
    pub async fn remove_by_name(&self, target: PermTarget, perm_name: &str) -> Result<bool> {
        let mut conn = self.pool.acquire().await?;
        ensure_target_exists(&mut conn, target).await?;
        let perm_id = find_perm_id(&mut conn, perm_name).await?;

        let sql = format!(
            "DELETE FROM {} WHERE {} = $1 AND perm_id = $2",
            target.link_table(),
            target.owner_column()
        );
        let result = sqlx::query(&sql)
            .bind(target.id())
            .bind(perm_id)
            .execute(&mut *conn)
            .await?;

        let removed = result.rows_affected() > 0;
        debug!("Unlink '{}' from {}: removed={}", perm_name, target, removed);
        Ok(removed)
    }

    /// Names of the tags linked to `target`, sorted by name.
    pub async fn list(&self, target: PermTarget) -> Result<Vec<String>> {
        let mut conn = self.pool.acquire().await?;
        ensure_target_exists(&mut conn, target).await?;

        let sql = format!(
            "SELECT p.name FROM board_perms p
             JOIN {} l ON l.perm_id = p.id
             WHERE l.{} = $1
             ORDER BY p.name",
            target.link_table(),
            target.owner_column()
        );
        let names: Vec<String> = sqlx::query_scalar(&sql)
            .bind(target.id())
            .fetch_all(&mut *conn)
            .await?;

        Ok(names)
    }
}

/// Link a tag by name on an existing connection or transaction.
pub(crate) async fn link_perm_by_name(
    conn: &mut DbConnection,
    target: PermTarget,
    perm_name: &str,
) -> Result<LinkOutcome> {
    ensure_target_exists(conn, target).await?;
    let perm_id = find_perm_id(conn, perm_name).await?;

    let sql = format!(
        "INSERT INTO {table} ({owner}, perm_id) VALUES ($1, $2)
         ON CONFLICT ({owner}, perm_id) DO NOTHING",
        table = target.link_table(),
        owner = target.owner_column()
    );
    let result = sqlx::query(&sql)
        .bind(target.id())
        .bind(perm_id)
        .execute(&mut *conn)
        .await?;

    let outcome = if result.rows_affected() > 0 {
        LinkOutcome::Added
    } else {
        LinkOutcome::AlreadyLinked
    };
    debug!("Link '{}' to {}: {:?}", perm_name, target, outcome);
    Ok(outcome)
}

async fn find_perm_id(conn: &mut DbConnection, perm_name: &str) -> Result<i64> {
    let id: Option<i64> = sqlx::query_scalar("SELECT id FROM board_perms WHERE name = $1")
        .bind(perm_name)
        .fetch_optional(&mut *conn)
        .await?;

    id.ok_or_else(|| WldError::not_found(format!("permission '{perm_name}'")))
}

async fn ensure_target_exists(conn: &mut DbConnection, target: PermTarget) -> Result<()> {
    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)",
        target.owner_table()
    );
    let exists: (bool,) = sqlx::query_as(&sql)
        .bind(target.id())
        .fetch_one(&mut *conn)
        .await?;

    if exists.0 {
        Ok(())
    } else {
        Err(WldError::not_found(target.to_string()))
    }
}
