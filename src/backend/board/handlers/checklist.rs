/**
 * Checklist Handlers
 *
 * - GET    /api/cards/{id}/checklist
 * - POST   /api/cards/{id}/checklist
 * - PUT    /api/checklist/{id}
 * - DELETE /api/checklist/{id}
 *
 * New items go after the card's highest position, or at 0 on an empty card.
 * A card whose highest position is `i32::MAX` accepts no further items.
 * The max-then-insert sequence is not serialized: two concurrent creates on
 * the same card can receive the same position. Deleting an item does not
 * renumber the rest.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;

use crate::backend::board::types::{
    ChecklistItemResponse, ChecklistResponse, CreateChecklistItemRequest, SuccessResponse,
    UpdateChecklistItemRequest,
};
use crate::backend::error::{ApiError, ApiJson};
use crate::backend::store::{DynCardRepository, DynChecklistRepository};
use crate::shared::kanban::{next_position, ChecklistItem, ChecklistItemChanges};
use crate::shared::SharedError;

const TITLE_REQUIRED: &str = "Title is required";
const POSITION_EXHAUSTED: &str = "Checklist cannot hold more items";

pub async fn list_checklist(
    State(checklist): State<DynChecklistRepository>,
    Path(card_id): Path<String>,
) -> Result<Json<ChecklistResponse>, ApiError> {
    let items = checklist.list_items(&card_id).await?;
    Ok(Json(ChecklistResponse { checklist: items }))
}

/// Append an item to a card's checklist
///
/// # Errors
///
/// * `400 Bad Request` - title missing or blank (nothing is written)
/// * `404 Not Found` - card does not exist
/// * `400 Bad Request` - the card's highest position is already `i32::MAX`
pub async fn create_checklist_item(
    State(checklist): State<DynChecklistRepository>,
    State(cards): State<DynCardRepository>,
    Path(card_id): Path<String>,
    ApiJson(request): ApiJson<CreateChecklistItemRequest>,
) -> Result<(StatusCode, Json<ChecklistItemResponse>), ApiError> {
    let title = SharedError::require_text("title", &request.title, TITLE_REQUIRED)?;

    if !cards.card_exists(&card_id).await? {
        return Err(ApiError::not_found("Card not found"));
    }

    let max_position = checklist.max_position(&card_id).await?;
    let position = next_position(max_position).ok_or_else(|| {
        tracing::warn!("Card {} has no checklist position left after {:?}", card_id, max_position);
        ApiError::validation(POSITION_EXHAUSTED)
    })?;
    let item = ChecklistItem::new(card_id, title, position);
    checklist.insert_item(&item).await?;

    tracing::debug!("Checklist item {} created at position {}", item.id, item.position);

    Ok((StatusCode::CREATED, Json(ChecklistItemResponse { item })))
}

/// Partial update: only the supplied fields change
pub async fn update_checklist_item(
    State(checklist): State<DynChecklistRepository>,
    Path(item_id): Path<String>,
    ApiJson(request): ApiJson<UpdateChecklistItemRequest>,
) -> Result<Json<ChecklistItemResponse>, ApiError> {
    let title = match request.title.as_deref() {
        Some(title) => Some(SharedError::require_text("title", title, TITLE_REQUIRED)?),
        None => None,
    };

    let changes = ChecklistItemChanges {
        title,
        completed: request.completed,
        updated_at: Utc::now(),
    };

    let item = checklist
        .update_item(&item_id, &changes)
        .await?
        .ok_or_else(|| ApiError::not_found("Checklist item not found"))?;

    Ok(Json(ChecklistItemResponse { item }))
}

pub async fn delete_checklist_item(
    State(checklist): State<DynChecklistRepository>,
    Path(item_id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if !checklist.delete_item(&item_id).await? {
        return Err(ApiError::not_found("Checklist item not found"));
    }
    Ok(Json(SuccessResponse { success: true }))
}
