//! Test helpers for integration tests.
//!
//! Provides an in-memory database seeded with permission tags and helpers for
//! creating users, boards, threads and messages.

#![allow(dead_code)]

use wld::board::{MessageRepository, NewMessage, NewThread, ThreadRepository};
use wld::{
    BoardPermRepository, BoardRepository, Database, NewBoard, NewBoardPerm, NewUser, UserRepository,
};

/// Permission tags every test database starts with.
pub const TEST_PERMS: &[&str] = &["members", "officers", "raiders"];

/// Open an in-memory database with the test permission tags.
pub async fn setup_db() -> Database {
    let db = Database::open_in_memory().await.unwrap();
    let perms = BoardPermRepository::new(db.pool());
    for name in TEST_PERMS {
        perms.create(&NewBoardPerm::new(*name)).await.unwrap();
    }
    db
}

/// Create a user holding the given tags and return the user ID.
pub async fn create_test_user(db: &Database, username: &str, perms: &[&str]) -> i64 {
    let repo = UserRepository::new(db.pool());
    let user = repo
        .create(&NewUser::new(username).with_email(format!("{username}@example.com")))
        .await
        .unwrap();
    for perm in perms {
        repo.add_perm_by_name(user.id, perm).await.unwrap();
    }
    user.id
}

/// Create a board requiring the given tags and return the board ID.
pub async fn create_test_board(db: &Database, name: &str, perms: &[&str]) -> i64 {
    let new_board = perms
        .iter()
        .fold(NewBoard::new(name).with_description("A test board"), |b, p| {
            b.with_perm(*p)
        });
    BoardRepository::new(db.pool())
        .create(&new_board)
        .await
        .unwrap()
        .id
}

/// Create a thread with `message_count` messages and return the thread ID.
pub async fn create_test_thread(
    db: &Database,
    board_id: i64,
    user_id: i64,
    name: &str,
    message_count: usize,
) -> i64 {
    let thread = ThreadRepository::new(db.pool())
        .create(&NewThread::new(board_id, user_id, name))
        .await
        .unwrap();
    let messages = MessageRepository::new(db.pool());
    for i in 0..message_count {
        messages
            .create(&NewMessage::new(thread.id, user_id, format!("{name} #{i}")))
            .await
            .unwrap();
    }
    thread.id
}
