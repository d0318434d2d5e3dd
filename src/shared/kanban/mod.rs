//! Kanban Module
//!
//! Data structures for the demand board:
//!
//! - `User` / `PublicUser` - Credential record and its response-safe projection
//! - `Team` - Organizational unit with an optional parent team
//! - `Board`, `Column`, `Card` - The board hierarchy
//! - `ChecklistItem` - Ordered checklist entry on a card
//! - `Comment` - Card comment with single-level replies
//!
//! # Usage
//!
//! ```rust
//! use ponta_solta::shared::kanban::{Card, ChecklistItem, Comment};
//! ```

pub mod user;
pub mod team;
pub mod board;
pub mod checklist;
pub mod comment;

// Re-export all types
pub use user::{PublicUser, Role, User};
pub use team::{Team, TeamWithMembers};
pub use board::{assemble_boards, Board, BoardGraph, Card, CardGraph, Column, ColumnGraph, Priority, Urgency};
pub use checklist::{next_position, ChecklistItem, ChecklistItemChanges};
pub use comment::{Comment, CommentAuthor, CommentWithAuthor};

/// Generate a collision-resistant identifier for a new record.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
