//! DELETE /api/cards/{id}
//!
//! Removes the card together with its checklist items and comments.

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::backend::board::types::SuccessResponse;
use crate::backend::error::ApiError;
use crate::backend::store::DynCardRepository;

pub async fn delete_card(
    State(cards): State<DynCardRepository>,
    Path(card_id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if !cards.delete_card_cascade(&card_id).await? {
        return Err(ApiError::not_found("Card not found"));
    }

    tracing::info!("Card {} deleted", card_id);
    Ok(Json(SuccessResponse { success: true }))
}
