//! WLD - forum data model
//!
//! Boards, threads and messages, with permission tags that gate which users
//! may view which boards.

pub mod board;
pub mod config;
pub mod datetime;
pub mod db;
pub mod error;
pub mod logging;
pub mod perm;
pub mod validation;

pub use board::{
    Board, BoardPage, BoardRepository, BoardService, BoardView, Message, MessageRepository,
    MessageView, NewBoard, NewMessage, NewThread, Thread, ThreadPage, ThreadRepository, ThreadView,
};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository};
pub use error::{Result, WldError};
pub use perm::{can_view, BoardPerm, BoardPermRepository, LinkOutcome, NewBoardPerm};
