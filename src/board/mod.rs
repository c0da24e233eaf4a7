//! Board module for WLD.
//!
//! This module provides discussion board functionality including:
//! - Board management (create, read, update, delete) and required permission tags
//! - Thread management within boards
//! - Message management within threads
//! - Display projections and visibility-checked browsing

mod message;
mod message_repository;
mod repository;
mod service;
mod thread;
mod thread_repository;
mod types;
mod view;

pub use message::{Message, NewMessage};
pub use message_repository::MessageRepository;
pub use repository::{BoardActivity, BoardRepository};
pub use service::{BoardPage, BoardService, ThreadPage};
pub use thread::{NewThread, Thread};
pub use thread_repository::ThreadRepository;
pub use types::{Board, BoardUpdate, NewBoard};
pub use view::{BoardView, MessageView, ThreadView};
