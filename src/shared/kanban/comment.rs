//! Comment Data Structure
//!
//! Comments belong to a card. A comment may reply to another comment on the
//! same card; replies are one level deep.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment as stored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub card_id: String,
    pub author_id: String,
    pub content: String,
    pub parent_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(
        card_id: impl Into<String>,
        author_id: impl Into<String>,
        content: impl Into<String>,
        parent_id: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: super::new_id(),
            card_id: card_id.into(),
            author_id: author_id.into(),
            content: content.into(),
            parent_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}

/// Author fields joined onto a comment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommentAuthor {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// A comment joined with its author
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommentWithAuthor {
    #[serde(flatten)]
    pub comment: Comment,
    pub author: CommentAuthor,
}
