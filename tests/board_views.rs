//! Integration tests for board, thread and message projections.

#![cfg(feature = "sqlite")]

mod common;

use chrono::DateTime;
use common::{create_test_board, create_test_thread, create_test_user, setup_db};
use wld::board::BoardActivity;
use wld::{BoardRepository, BoardService, MessageRepository, NewMessage, WldError};

#[tokio::test]
async fn test_board_projection_counts_threads_and_messages() {
    let db = setup_db().await;
    let service = BoardService::new(&db);
    let alice = create_test_user(&db, "alice", &[]).await;
    let board = create_test_board(&db, "General", &[]).await;
    let other = create_test_board(&db, "Other", &[]).await;

    create_test_thread(&db, board, alice, "Three", 3).await;
    create_test_thread(&db, board, alice, "Five", 5).await;
    create_test_thread(&db, other, alice, "Elsewhere", 4).await;

    let view = service.board_view(board, true).await.unwrap();
    assert_eq!(view.topics, Some(2));
    assert_eq!(view.messages, Some(8));
    assert_eq!(
        BoardRepository::new(db.pool()).activity(board).await.unwrap(),
        BoardActivity {
            topics: 2,
            messages: 8
        }
    );

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["topics"], 2);
    assert_eq!(json["messages"], 8);

    let plain = serde_json::to_value(service.board_view(board, false).await.unwrap()).unwrap();
    assert!(plain.get("topics").is_none());
    assert!(plain.get("messages").is_none());
}

#[tokio::test]
async fn test_empty_board_projection() {
    let db = setup_db().await;
    let service = BoardService::new(&db);
    let board = create_test_board(&db, "Quiet", &[]).await;

    let view = service.board_view(board, true).await.unwrap();
    assert_eq!(view.topics, Some(0));
    assert_eq!(view.messages, Some(0));
}

#[tokio::test]
async fn test_thread_projection_includes_creator() {
    let db = setup_db().await;
    let service = BoardService::new(&db);
    let alice = create_test_user(&db, "alice", &[]).await;
    let board = create_test_board(&db, "General", &[]).await;
    let thread = create_test_thread(&db, board, alice, "Hello", 0).await;

    let view = service.thread_view(thread, true).await.unwrap();
    assert_eq!(view.username.as_deref(), Some("alice"));
    assert_eq!(view.name, "Hello");

    let json = serde_json::to_value(service.thread_view(thread, false).await.unwrap()).unwrap();
    assert!(json.get("username").is_none());
}

#[tokio::test]
async fn test_message_edit_round_trip() {
    let db = setup_db().await;
    let service = BoardService::new(&db);
    let messages = MessageRepository::new(db.pool());
    let alice = create_test_user(&db, "alice", &[]).await;
    let board = create_test_board(&db, "General", &[]).await;
    let thread = create_test_thread(&db, board, alice, "Hello", 0).await;

    let message = messages
        .create(&NewMessage::new(thread, alice, "first draft"))
        .await
        .unwrap();
    let stored = messages.get_by_id(message.id).await.unwrap().unwrap();
    assert!(stored.last_edited.is_none());

    let view = service.message_view(message.id, false).await.unwrap();
    let json = serde_json::to_value(&view).unwrap();
    assert!(json["last_edited"].is_null());

    messages.edit(message.id, "final").await.unwrap().unwrap();

    let view = service.message_view(message.id, true).await.unwrap();
    assert_eq!(view.message, "final");
    assert_eq!(view.username.as_deref(), Some("alice"));
    let created = DateTime::parse_from_rfc3339(&view.created).unwrap();
    let edited = DateTime::parse_from_rfc3339(view.last_edited.as_deref().unwrap()).unwrap();
    assert!(edited >= created);
}

#[tokio::test]
async fn test_all_projections_use_rfc3339() {
    let db = setup_db().await;
    let service = BoardService::new(&db);
    let alice = create_test_user(&db, "alice", &[]).await;
    let board = create_test_board(&db, "General", &[]).await;
    let thread = create_test_thread(&db, board, alice, "Hello", 1).await;
    let message = MessageRepository::new(db.pool())
        .list_by_thread(thread)
        .await
        .unwrap()[0]
        .id;

    let stamps = [
        service.board_view(board, false).await.unwrap().created,
        service.thread_view(thread, false).await.unwrap().created,
        service.message_view(message, false).await.unwrap().created,
    ];
    for stamp in &stamps {
        assert!(DateTime::parse_from_rfc3339(stamp).is_ok(), "{stamp}");
        assert!(stamp.ends_with('Z'));
    }
}

#[tokio::test]
async fn test_pages_respect_visibility() {
    let db = setup_db().await;
    let service = BoardService::new(&db);
    let officer = create_test_user(&db, "officer", &["officers"]).await;
    let member = create_test_user(&db, "member", &["members"]).await;
    let board = create_test_board(&db, "Council", &["officers"]).await;
    let thread = create_test_thread(&db, board, officer, "Agenda", 2).await;

    let page = service.open_board(officer, board).await.unwrap();
    assert_eq!(page.board.topics, Some(1));
    assert_eq!(page.board.messages, Some(2));
    assert_eq!(page.threads[0].username.as_deref(), Some("officer"));

    let page = service.open_thread(officer, thread).await.unwrap();
    assert_eq!(page.messages.len(), 2);
    assert_eq!(page.messages[0].message, "Agenda #0");
    assert!(page
        .messages
        .iter()
        .all(|m| m.username.as_deref() == Some("officer")));

    assert!(matches!(
        service.open_board(member, board).await,
        Err(WldError::Permission(_))
    ));
    assert!(matches!(
        service.open_thread(member, thread).await,
        Err(WldError::Permission(_))
    ));
}
