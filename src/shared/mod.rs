//! Shared Module
//!
//! Domain types used by the HTTP handlers, the repository implementations and
//! the synchronizer. JSON field names follow the camelCase convention the web
//! client expects.

/// Shared error types
pub mod error;

/// Kanban domain model
pub mod kanban;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use kanban::{
    Board, BoardGraph, Card, CardGraph, ChecklistItem, Column, ColumnGraph, Comment,
    CommentAuthor, CommentWithAuthor, Priority, PublicUser, Role, Team, TeamWithMembers,
    Urgency, User,
};
