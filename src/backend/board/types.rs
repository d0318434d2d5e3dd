/**
 * Board Resource Types
 *
 * Request and response bodies for the checklist, comment and card endpoints.
 * Text fields default to empty so a missing field gets the same 400 as a
 * blank one.
 */

use serde::{Deserialize, Serialize};

use crate::shared::kanban::{ChecklistItem, CommentWithAuthor};

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct CreateChecklistItemRequest {
    #[serde(default)]
    pub title: String,
}

/// Partial update; absent fields are left as they are
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct UpdateChecklistItemRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub parent_id: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct UpdateCommentRequest {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChecklistResponse {
    pub checklist: Vec<ChecklistItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChecklistItemResponse {
    pub item: ChecklistItem,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentsResponse {
    pub comments: Vec<CommentWithAuthor>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentResponse {
    pub comment: CommentWithAuthor,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
