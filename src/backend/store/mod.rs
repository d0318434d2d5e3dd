//! Primary Store
//!
//! Repository traits for the relational store, with two implementations:
//!
//! - **`postgres`** - `PostgresStore`, backed by a `sqlx::PgPool`
//! - **`memory`** - `MemoryStore`, an in-process store backing the tests
//!
//! Handlers only see the traits, through `Arc<dyn …>` handles held by
//! `AppState`.
//!
//! # Concurrency
//!
//! None of the multi-step sequences are serialized. In particular
//! "read max checklist position, then insert at max + 1" can hand the same
//! position to two concurrent inserts on one card; the schema does not carry a
//! unique `(card_id, position)` constraint.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

use crate::shared::kanban::{
    BoardGraph, ChecklistItem, ChecklistItemChanges, Comment, CommentWithAuthor, TeamWithMembers,
    User,
};

pub mod postgres;
pub mod memory;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Errors raised by the primary store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored value could not be mapped onto the domain model
    #[error("corrupt row in {table}: {message}")]
    CorruptRow {
        table: &'static str,
        message: String,
    },
}

impl StoreError {
    pub fn corrupt(table: &'static str, message: impl Into<String>) -> Self {
        Self::CorruptRow {
            table,
            message: message.into(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Credential lookups
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Exact email match
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>>;
}

/// Card-level operations
#[async_trait]
pub trait CardRepository: Send + Sync {
    async fn card_exists(&self, card_id: &str) -> StoreResult<bool>;

    /// Delete a card with its checklist and comments (replies first).
    /// Returns `false` when the card does not exist.
    async fn delete_card_cascade(&self, card_id: &str) -> StoreResult<bool>;
}

/// Checklist items of a card
#[async_trait]
pub trait ChecklistRepository: Send + Sync {
    /// Items ordered ascending by position
    async fn list_items(&self, card_id: &str) -> StoreResult<Vec<ChecklistItem>>;

    async fn max_position(&self, card_id: &str) -> StoreResult<Option<i32>>;

    async fn insert_item(&self, item: &ChecklistItem) -> StoreResult<()>;

    /// Returns `None` when the item does not exist
    async fn update_item(
        &self,
        id: &str,
        changes: &ChecklistItemChanges,
    ) -> StoreResult<Option<ChecklistItem>>;

    /// Returns `false` when the item does not exist
    async fn delete_item(&self, id: &str) -> StoreResult<bool>;
}

/// Card comments
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Comments of a card ordered by creation time, joined with their author
    async fn list_for_card(&self, card_id: &str) -> StoreResult<Vec<CommentWithAuthor>>;

    async fn find(&self, id: &str) -> StoreResult<Option<Comment>>;

    async fn find_with_author(&self, id: &str) -> StoreResult<Option<CommentWithAuthor>>;

    async fn insert(&self, comment: &Comment) -> StoreResult<()>;

    /// Returns `None` when the comment does not exist
    async fn update_content(
        &self,
        id: &str,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<CommentWithAuthor>>;

    async fn count_replies(&self, parent_id: &str) -> StoreResult<u64>;

    /// Delete every comment whose parent is `parent_id`; returns how many
    async fn delete_replies(&self, parent_id: &str) -> StoreResult<u64>;

    /// Returns `false` when the comment does not exist
    async fn delete(&self, id: &str) -> StoreResult<bool>;
}

/// Full reads used by the synchronizer
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    async fn load_users(&self) -> StoreResult<Vec<User>>;

    async fn load_teams(&self) -> StoreResult<Vec<TeamWithMembers>>;

    async fn load_boards(&self) -> StoreResult<Vec<BoardGraph>>;
}

pub type DynUserRepository = Arc<dyn UserRepository>;
pub type DynCardRepository = Arc<dyn CardRepository>;
pub type DynChecklistRepository = Arc<dyn ChecklistRepository>;
pub type DynCommentRepository = Arc<dyn CommentRepository>;
pub type DynSnapshotRepository = Arc<dyn SnapshotRepository>;

/// One handle per repository trait, all pointing at the same store
#[derive(Clone)]
pub struct Repositories {
    pub users: DynUserRepository,
    pub cards: DynCardRepository,
    pub checklist: DynChecklistRepository,
    pub comments: DynCommentRepository,
    pub snapshot: DynSnapshotRepository,
}

impl Repositories {
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: UserRepository
            + CardRepository
            + ChecklistRepository
            + CommentRepository
            + SnapshotRepository
            + 'static,
    {
        Self {
            users: store.clone(),
            cards: store.clone(),
            checklist: store.clone(),
            comments: store.clone(),
            snapshot: store,
        }
    }
}
