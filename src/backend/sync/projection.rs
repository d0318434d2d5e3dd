//! Mirror Row Projections
//!
//! Flat, snake_case rows as they are stored in the mirror. The user row has
//! no password hash: credentials stay in the primary store.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::mirror::MirrorError;
use crate::shared::kanban::{
    BoardGraph, Priority, Role, TeamWithMembers, Urgency, User,
};

#[derive(Debug, Serialize)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub sector: Option<String>,
    pub branch: Option<String>,
    pub phone: Option<String>,
    pub bpm_username: Option<String>,
    pub can_open_tickets_for_others: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            sector: user.sector.clone(),
            branch: user.branch.clone(),
            phone: user.phone.clone(),
            bpm_username: user.bpm_username.clone(),
            can_open_tickets_for_others: user.can_open_tickets_for_others,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TeamRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct TeamMemberRow {
    pub team_id: String,
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct BoardRow {
    pub id: String,
    pub team_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ColumnRow {
    pub id: String,
    pub board_id: String,
    pub title: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CardRow {
    pub id: String,
    pub column_id: String,
    pub title: String,
    pub description: Option<String>,
    pub position: i32,
    pub creator_id: String,
    pub assignee_id: Option<String>,
    pub priority: Priority,
    pub urgency: Urgency,
    pub high_impact: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ChecklistItemRow {
    pub id: String,
    pub card_id: String,
    pub title: String,
    pub completed: bool,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Every mirrored row set, built from one snapshot
#[derive(Debug, Default)]
pub struct Projection {
    pub users: Vec<UserRow>,
    pub teams: Vec<TeamRow>,
    pub team_members: Vec<TeamMemberRow>,
    pub boards: Vec<BoardRow>,
    pub columns: Vec<ColumnRow>,
    pub cards: Vec<CardRow>,
    pub checklist_items: Vec<ChecklistItemRow>,
}

impl Projection {
    /// Flatten the snapshot. `teams` should already be parents-first.
    pub fn build(users: &[User], teams: &[TeamWithMembers], boards: &[BoardGraph]) -> Self {
        let mut projection = Projection {
            users: users.iter().map(UserRow::from).collect(),
            ..Default::default()
        };

        for entry in teams {
            let team = &entry.team;
            projection.teams.push(TeamRow {
                id: team.id.clone(),
                name: team.name.clone(),
                description: team.description.clone(),
                parent_id: team.parent_id.clone(),
                created_at: team.created_at,
                updated_at: team.updated_at,
            });
            projection
                .team_members
                .extend(entry.member_ids.iter().map(|user_id| TeamMemberRow {
                    team_id: team.id.clone(),
                    user_id: user_id.clone(),
                }));
        }

        for graph in boards {
            let board = &graph.board;
            projection.boards.push(BoardRow {
                id: board.id.clone(),
                team_id: board.team_id.clone(),
                name: board.name.clone(),
                created_at: board.created_at,
                updated_at: board.updated_at,
            });

            for column_graph in &graph.columns {
                let column = &column_graph.column;
                projection.columns.push(ColumnRow {
                    id: column.id.clone(),
                    board_id: column.board_id.clone(),
                    title: column.title.clone(),
                    position: column.position,
                    created_at: column.created_at,
                    updated_at: column.updated_at,
                });
            }

            for card_graph in graph.cards() {
                let card = &card_graph.card;
                projection.cards.push(CardRow {
                    id: card.id.clone(),
                    column_id: card.column_id.clone(),
                    title: card.title.clone(),
                    description: card.description.clone(),
                    position: card.position,
                    creator_id: card.creator_id.clone(),
                    assignee_id: card.assignee_id.clone(),
                    priority: card.priority,
                    urgency: card.urgency,
                    high_impact: card.high_impact,
                    created_at: card.created_at,
                    updated_at: card.updated_at,
                });
                projection
                    .checklist_items
                    .extend(card_graph.checklist.iter().map(|item| ChecklistItemRow {
                        id: item.id.clone(),
                        card_id: item.card_id.clone(),
                        title: item.title.clone(),
                        completed: item.completed,
                        position: item.position,
                        created_at: item.created_at,
                        updated_at: item.updated_at,
                    }));
            }
        }

        projection
    }
}

/// Encode rows as JSON objects for the mirror
pub fn to_values<T: Serialize>(rows: &[T]) -> Result<Vec<Value>, MirrorError> {
    rows.iter()
        .map(|row| serde_json::to_value(row).map_err(MirrorError::from))
        .collect()
}

/// Order teams so every parent precedes its children.
///
/// A parent outside the set counts as already placed. Teams that can never be
/// placed (their ancestry loops) are appended at the end and their ids
/// returned alongside.
pub fn order_parents_first(teams: Vec<TeamWithMembers>) -> (Vec<TeamWithMembers>, Vec<String>) {
    let known: HashSet<String> = teams.iter().map(|t| t.team.id.clone()).collect();
    let mut placed: HashSet<String> = HashSet::new();
    let mut ordered = Vec::with_capacity(teams.len());
    let mut remaining = teams;

    loop {
        let (ready, blocked): (Vec<_>, Vec<_>) =
            remaining.into_iter().partition(|t| match &t.team.parent_id {
                Some(parent) => !known.contains(parent) || placed.contains(parent),
                None => true,
            });
        remaining = blocked;

        if ready.is_empty() {
            break;
        }
        placed.extend(ready.iter().map(|t| t.team.id.clone()));
        ordered.extend(ready);
    }

    let unresolved = remaining.iter().map(|t| t.team.id.clone()).collect();
    ordered.extend(remaining);
    (ordered, unresolved)
}
