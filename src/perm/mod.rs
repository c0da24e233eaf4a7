//! Board permission module for WLD.
//!
//! This module provides:
//! - Permission tags (`BoardPerm`) and their repository
//! - The two link tables joining tags to boards (required) and users (granted)
//! - The visibility predicate deciding whether a user may view a board

mod link;
mod repository;
mod types;
mod visibility;

pub use link::{LinkOutcome, PermLinkRepository, PermTarget};
pub(crate) use link::link_perm_by_name;
pub use repository::BoardPermRepository;
pub use types::{BoardPerm, NewBoardPerm};
pub use visibility::{can_view, missing_perms};
