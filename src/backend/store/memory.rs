//! In-memory store
//!
//! Implements every repository trait over maps guarded by a `tokio::sync::RwLock`.
//! Test fixture store: the HTTP tests build `AppState` on it instead of
//! PostgreSQL. Seeding methods (`insert_user`, `insert_card`, …) stand in for
//! the administrative seed scripts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

use crate::backend::store::{
    CardRepository, ChecklistRepository, CommentRepository, SnapshotRepository, StoreResult,
    UserRepository,
};
use crate::shared::kanban::{
    assemble_boards, Board, BoardGraph, Card, ChecklistItem, ChecklistItemChanges, Column,
    Comment, CommentAuthor, CommentWithAuthor, Team, TeamWithMembers, User,
};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<String, User>,
    teams: BTreeMap<String, Team>,
    memberships: BTreeSet<(String, String)>,
    boards: BTreeMap<String, Board>,
    columns: BTreeMap<String, Column>,
    cards: BTreeMap<String, Card>,
    checklist_items: BTreeMap<String, ChecklistItem>,
    comments: BTreeMap<String, Comment>,
}

impl Tables {
    fn with_author(&self, comment: &Comment) -> CommentWithAuthor {
        let author = match self.users.get(&comment.author_id) {
            Some(user) => CommentAuthor {
                id: user.id.clone(),
                name: user.name.clone(),
                email: user.email.clone(),
            },
            None => CommentAuthor {
                id: comment.author_id.clone(),
                name: String::new(),
                email: String::new(),
            },
        };
        CommentWithAuthor {
            comment: comment.clone(),
            author,
        }
    }
}

/// Repositories held in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_user(&self, user: User) {
        self.tables.write().await.users.insert(user.id.clone(), user);
    }

    pub async fn insert_team(&self, team: Team, member_ids: &[&str]) {
        let mut tables = self.tables.write().await;
        for member in member_ids {
            tables.memberships.insert((team.id.clone(), member.to_string()));
        }
        tables.teams.insert(team.id.clone(), team);
    }

    pub async fn insert_board(&self, board: Board) {
        self.tables.write().await.boards.insert(board.id.clone(), board);
    }

    pub async fn insert_column(&self, column: Column) {
        self.tables.write().await.columns.insert(column.id.clone(), column);
    }

    pub async fn insert_card(&self, card: Card) {
        self.tables.write().await.cards.insert(card.id.clone(), card);
    }

    pub async fn comment_count(&self, card_id: &str) -> usize {
        self.tables
            .read()
            .await
            .comments
            .values()
            .filter(|c| c.card_id == card_id)
            .count()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(id).cloned())
    }
}

#[async_trait]
impl CardRepository for MemoryStore {
    async fn card_exists(&self, card_id: &str) -> StoreResult<bool> {
        Ok(self.tables.read().await.cards.contains_key(card_id))
    }

    async fn delete_card_cascade(&self, card_id: &str) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.cards.remove(card_id).is_none() {
            return Ok(false);
        }
        tables.checklist_items.retain(|_, item| item.card_id != card_id);
        tables.comments.retain(|_, comment| comment.card_id != card_id);
        Ok(true)
    }
}

#[async_trait]
impl ChecklistRepository for MemoryStore {
    async fn list_items(&self, card_id: &str) -> StoreResult<Vec<ChecklistItem>> {
        let tables = self.tables.read().await;
        let mut items: Vec<ChecklistItem> = tables
            .checklist_items
            .values()
            .filter(|item| item.card_id == card_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(items)
    }

    async fn max_position(&self, card_id: &str) -> StoreResult<Option<i32>> {
        let tables = self.tables.read().await;
        Ok(tables
            .checklist_items
            .values()
            .filter(|item| item.card_id == card_id)
            .map(|item| item.position)
            .max())
    }

    async fn insert_item(&self, item: &ChecklistItem) -> StoreResult<()> {
        self.tables
            .write()
            .await
            .checklist_items
            .insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn update_item(
        &self,
        id: &str,
        changes: &ChecklistItemChanges,
    ) -> StoreResult<Option<ChecklistItem>> {
        let mut tables = self.tables.write().await;
        Ok(tables.checklist_items.get_mut(id).map(|item| {
            item.apply(changes);
            item.clone()
        }))
    }

    async fn delete_item(&self, id: &str) -> StoreResult<bool> {
        Ok(self.tables.write().await.checklist_items.remove(id).is_some())
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn list_for_card(&self, card_id: &str) -> StoreResult<Vec<CommentWithAuthor>> {
        let tables = self.tables.read().await;
        let mut comments: Vec<&Comment> = tables
            .comments
            .values()
            .filter(|c| c.card_id == card_id)
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(comments.into_iter().map(|c| tables.with_author(c)).collect())
    }

    async fn find(&self, id: &str) -> StoreResult<Option<Comment>> {
        Ok(self.tables.read().await.comments.get(id).cloned())
    }

    async fn find_with_author(&self, id: &str) -> StoreResult<Option<CommentWithAuthor>> {
        let tables = self.tables.read().await;
        Ok(tables.comments.get(id).map(|c| tables.with_author(c)))
    }

    async fn insert(&self, comment: &Comment) -> StoreResult<()> {
        self.tables
            .write()
            .await
            .comments
            .insert(comment.id.clone(), comment.clone());
        Ok(())
    }

    async fn update_content(
        &self,
        id: &str,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<CommentWithAuthor>> {
        let mut tables = self.tables.write().await;
        let updated = match tables.comments.get_mut(id) {
            Some(comment) => {
                comment.content = content.to_string();
                comment.updated_at = updated_at;
                comment.clone()
            }
            None => return Ok(None),
        };
        Ok(Some(tables.with_author(&updated)))
    }

    async fn count_replies(&self, parent_id: &str) -> StoreResult<u64> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .values()
            .filter(|c| c.parent_id.as_deref() == Some(parent_id))
            .count() as u64)
    }

    async fn delete_replies(&self, parent_id: &str) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        let before = tables.comments.len();
        tables
            .comments
            .retain(|_, c| c.parent_id.as_deref() != Some(parent_id));
        Ok((before - tables.comments.len()) as u64)
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        Ok(self.tables.write().await.comments.remove(id).is_some())
    }
}

#[async_trait]
impl SnapshotRepository for MemoryStore {
    async fn load_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn load_teams(&self) -> StoreResult<Vec<TeamWithMembers>> {
        let tables = self.tables.read().await;
        Ok(tables
            .teams
            .values()
            .map(|team| TeamWithMembers {
                team: team.clone(),
                member_ids: tables
                    .memberships
                    .iter()
                    .filter(|(team_id, _)| team_id == &team.id)
                    .map(|(_, user_id)| user_id.clone())
                    .collect(),
            })
            .collect())
    }

    async fn load_boards(&self) -> StoreResult<Vec<BoardGraph>> {
        let tables = self.tables.read().await;
        Ok(assemble_boards(
            tables.boards.values().cloned().collect(),
            tables.columns.values().cloned().collect(),
            tables.cards.values().cloned().collect(),
            tables.checklist_items.values().cloned().collect(),
        ))
    }
}
