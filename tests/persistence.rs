//! File-backed database tests: migrations and data survive a reconnect.

#![cfg(feature = "sqlite")]

use tempfile::TempDir;

use wld::config::DatabaseConfig;
use wld::db::MIGRATIONS;
use wld::{BoardPermRepository, BoardRepository, Database, NewBoard, NewBoardPerm};

fn file_config(dir: &TempDir) -> DatabaseConfig {
    DatabaseConfig {
        url: format!("sqlite://{}", dir.path().join("wld.db").display()),
        max_connections: 2,
    }
}

#[tokio::test]
async fn test_reconnect_keeps_data() {
    let dir = TempDir::new().unwrap();
    let config = file_config(&dir);

    {
        let db = Database::connect(&config).await.unwrap();
        BoardPermRepository::new(db.pool())
            .create(&NewBoardPerm::new("officers"))
            .await
            .unwrap();
        BoardRepository::new(db.pool())
            .create(&NewBoard::new("Council").with_perm("officers"))
            .await
            .unwrap();
        db.pool().close().await;
    }

    let db = Database::connect(&config).await.unwrap();
    assert_eq!(db.schema_version().await.unwrap() as usize, MIGRATIONS.len());

    let repo = BoardRepository::new(db.pool());
    let board = repo.get_by_name("Council").await.unwrap().unwrap();
    assert_eq!(repo.list_perms(board.id).await.unwrap(), vec!["officers"]);
}

#[tokio::test]
async fn test_migrate_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let db = Database::connect(&file_config(&dir)).await.unwrap();

    db.migrate().await.unwrap();
    db.migrate().await.unwrap();
    assert_eq!(db.schema_version().await.unwrap() as usize, MIGRATIONS.len());
    assert!(db.table_exists("board_perms_link").await.unwrap());
}
