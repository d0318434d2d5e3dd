//! Board Hierarchy
//!
//! Boards own columns, columns own cards. Columns and cards carry an integer
//! `position`; every read returns them in ascending position order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::checklist::ChecklistItem;

/// Card priority
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "LOW" => Some(Priority::Low),
            "MEDIUM" => Some(Priority::Medium),
            "HIGH" => Some(Priority::High),
            _ => None,
        }
    }
}

/// Card urgency
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Urgency {
    Normal,
    Urgent,
}

impl Urgency {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "NORMAL" => Some(Urgency::Normal),
            "URGENT" => Some(Urgency::Urgent),
            _ => None,
        }
    }
}

/// A board owned by a team
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub team_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A column on a board
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: String,
    pub board_id: String,
    pub title: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A demand card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
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

/// A card with its ordered checklist
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardGraph {
    pub card: Card,
    pub checklist: Vec<ChecklistItem>,
}

/// A column with its ordered cards
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnGraph {
    pub column: Column,
    pub cards: Vec<CardGraph>,
}

/// A board with its full, ordered object graph
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardGraph {
    pub board: Board,
    pub columns: Vec<ColumnGraph>,
}

impl BoardGraph {
    pub fn cards(&self) -> impl Iterator<Item = &CardGraph> {
        self.columns.iter().flat_map(|column| column.cards.iter())
    }
}

/// Build board graphs from flat row sets.
///
/// Children are sorted by position (ties broken by id) regardless of input
/// order. Rows whose parent is not present are dropped.
pub fn assemble_boards(
    boards: Vec<Board>,
    columns: Vec<Column>,
    cards: Vec<Card>,
    items: Vec<ChecklistItem>,
) -> Vec<BoardGraph> {
    let mut items_by_card: HashMap<String, Vec<ChecklistItem>> = HashMap::new();
    for item in items {
        items_by_card.entry(item.card_id.clone()).or_default().push(item);
    }

    let mut cards_by_column: HashMap<String, Vec<CardGraph>> = HashMap::new();
    for card in cards {
        let mut checklist = items_by_card.remove(&card.id).unwrap_or_default();
        checklist.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));
        cards_by_column
            .entry(card.column_id.clone())
            .or_default()
            .push(CardGraph { card, checklist });
    }

    let mut columns_by_board: HashMap<String, Vec<ColumnGraph>> = HashMap::new();
    for column in columns {
        let mut cards = cards_by_column.remove(&column.id).unwrap_or_default();
        cards.sort_by(|a, b| {
            a.card
                .position
                .cmp(&b.card.position)
                .then_with(|| a.card.id.cmp(&b.card.id))
        });
        columns_by_board
            .entry(column.board_id.clone())
            .or_default()
            .push(ColumnGraph { column, cards });
    }

    boards
        .into_iter()
        .map(|board| {
            let mut columns = columns_by_board.remove(&board.id).unwrap_or_default();
            columns.sort_by(|a, b| {
                a.column
                    .position
                    .cmp(&b.column.position)
                    .then_with(|| a.column.id.cmp(&b.column.id))
            });
            BoardGraph { board, columns }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(id: &str) -> Board {
        let now = Utc::now();
        Board {
            id: id.to_string(),
            team_id: "t-1".to_string(),
            name: "Demandas".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn column(id: &str, board_id: &str, position: i32) -> Column {
        let now = Utc::now();
        Column {
            id: id.to_string(),
            board_id: board_id.to_string(),
            title: id.to_uppercase(),
            position,
            created_at: now,
            updated_at: now,
        }
    }

    fn card(id: &str, column_id: &str, position: i32) -> Card {
        let now = Utc::now();
        Card {
            id: id.to_string(),
            column_id: column_id.to_string(),
            title: id.to_string(),
            description: None,
            position,
            creator_id: "u-1".to_string(),
            assignee_id: None,
            priority: Priority::High,
            urgency: Urgency::Urgent,
            high_impact: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_assemble_orders_children_by_position() {
        let graphs = assemble_boards(
            vec![board("b-1")],
            vec![column("done", "b-1", 2), column("todo", "b-1", 0), column("doing", "b-1", 1)],
            vec![card("c-2", "todo", 1), card("c-1", "todo", 0), card("c-3", "done", 0)],
            vec![
                ChecklistItem::new("c-1", "second", 1),
                ChecklistItem::new("c-1", "first", 0),
            ],
        );

        assert_eq!(graphs.len(), 1);
        let titles: Vec<_> = graphs[0].columns.iter().map(|c| c.column.id.as_str()).collect();
        assert_eq!(titles, vec!["todo", "doing", "done"]);

        let todo = &graphs[0].columns[0];
        let card_ids: Vec<_> = todo.cards.iter().map(|c| c.card.id.as_str()).collect();
        assert_eq!(card_ids, vec!["c-1", "c-2"]);

        let checklist: Vec<_> = todo.cards[0].checklist.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(checklist, vec!["first", "second"]);
        assert_eq!(graphs[0].cards().count(), 3);
    }

    #[test]
    fn test_assemble_drops_orphans() {
        let graphs = assemble_boards(
            vec![board("b-1")],
            vec![column("todo", "b-missing", 0)],
            vec![card("c-1", "col-missing", 0)],
            Vec::new(),
        );
        assert!(graphs[0].columns.is_empty());
    }

    #[test]
    fn test_enum_wire_format() {
        assert_eq!(serde_json::to_value(Priority::High).unwrap(), "HIGH");
        assert_eq!(serde_json::to_value(Urgency::Urgent).unwrap(), "URGENT");
        assert_eq!(Priority::parse("high"), Some(Priority::High));
        assert_eq!(Urgency::parse("whenever"), None);
    }
}
