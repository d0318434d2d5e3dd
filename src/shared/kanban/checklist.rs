//! Checklist Item Data Structure
//!
//! Items are ordered by `position`. New items are appended after the current
//! maximum; deleting an item leaves a gap, so positions are ordered but not
//! necessarily contiguous.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A checklist entry attached to a card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,
    pub card_id: String,
    pub title: String,
    pub completed: bool,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChecklistItem {
    /// Create a new, not yet completed item
    pub fn new(card_id: impl Into<String>, title: impl Into<String>, position: i32) -> Self {
        let now = Utc::now();
        Self {
            id: super::new_id(),
            card_id: card_id.into(),
            title: title.into(),
            completed: false,
            position,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, changes: &ChecklistItemChanges) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(completed) = changes.completed {
            self.completed = completed;
        }
        self.updated_at = changes.updated_at;
    }
}

/// Partial update for a checklist item. `None` fields are left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItemChanges {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

/// Position for an item appended after `max_existing`.
///
/// `None` when the highest position is already `i32::MAX` and nothing can
/// sort after it.
pub fn next_position(max_existing: Option<i32>) -> Option<i32> {
    match max_existing {
        Some(max) => max.checked_add(1),
        None => Some(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_position_empty_card() {
        assert_eq!(next_position(None), Some(0));
    }

    #[test]
    fn test_next_position_after_max() {
        assert_eq!(next_position(Some(4)), Some(5));
        assert_eq!(next_position(Some(0)), Some(1));
        assert_eq!(next_position(Some(-3)), Some(-2));
    }

    #[test]
    fn test_next_position_at_upper_bound() {
        assert_eq!(next_position(Some(i32::MAX - 1)), Some(i32::MAX));
        assert_eq!(next_position(Some(i32::MAX)), None);
    }

    #[test]
    fn test_apply_keeps_missing_fields() {
        let mut item = ChecklistItem::new("card-1", "Revisar contrato", 0);
        let changes = ChecklistItemChanges {
            title: None,
            completed: Some(true),
            updated_at: Utc::now(),
        };
        item.apply(&changes);
        assert_eq!(item.title, "Revisar contrato");
        assert!(item.completed);
    }

    #[test]
    fn test_new_item_defaults() {
        let a = ChecklistItem::new("card-1", "a", 3);
        let b = ChecklistItem::new("card-1", "b", 4);
        assert!(!a.completed);
        assert_eq!(a.position, 3);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_wire_format() {
        let item = ChecklistItem::new("card-1", "a", 0);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["cardId"], "card-1");
        assert_eq!(json["completed"], false);
        assert!(json.get("createdAt").is_some());
    }
}
