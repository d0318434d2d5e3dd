/**
 * Comment Handlers
 *
 * - GET    /api/cards/{id}/comments
 * - POST   /api/cards/{id}/comments   (authenticated)
 * - PUT    /api/comments/{id}
 * - DELETE /api/comments/{id}
 *
 * Threading is one level deep: a reply points at a top-level comment on the
 * same card. Deleting a comment removes its replies first, best effort.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;

use crate::backend::board::types::{
    CommentResponse, CommentsResponse, CreateCommentRequest, MessageResponse,
    UpdateCommentRequest,
};
use crate::backend::error::{ApiError, ApiJson};
use crate::backend::middleware::AuthUser;
use crate::backend::store::{CommentRepository, DynCardRepository, DynCommentRepository};
use crate::shared::kanban::Comment;
use crate::shared::SharedError;

const CONTENT_REQUIRED: &str = "Content is required";

pub async fn list_comments(
    State(comments): State<DynCommentRepository>,
    Path(card_id): Path<String>,
) -> Result<Json<CommentsResponse>, ApiError> {
    let comments = comments.list_for_card(&card_id).await?;
    Ok(Json(CommentsResponse { comments }))
}

/// Post a comment (or a reply) as the authenticated caller
pub async fn create_comment(
    AuthUser(claims): AuthUser,
    State(comments): State<DynCommentRepository>,
    State(cards): State<DynCardRepository>,
    Path(card_id): Path<String>,
    ApiJson(request): ApiJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let content = SharedError::require_text("content", &request.content, CONTENT_REQUIRED)?;

    if !cards.card_exists(&card_id).await? {
        return Err(ApiError::not_found("Card not found"));
    }

    if let Some(parent_id) = request.parent_id.as_deref() {
        let parent = comments
            .find(parent_id)
            .await?
            .filter(|parent| parent.card_id == card_id)
            .ok_or_else(|| ApiError::validation("Parent comment not found on this card"))?;
        if parent.is_reply() {
            return Err(ApiError::validation("Cannot reply to a reply"));
        }
    }

    let comment = Comment::new(card_id, claims.user_id, content, request.parent_id);
    comments.insert(&comment).await?;

    let comment = comments
        .find_with_author(&comment.id)
        .await?
        .ok_or_else(|| ApiError::internal(format!("comment {} vanished after insert", comment.id)))?;

    Ok((StatusCode::CREATED, Json(CommentResponse { comment })))
}

/// Replace a comment's content and refresh its `updated_at`
pub async fn update_comment(
    State(comments): State<DynCommentRepository>,
    Path(comment_id): Path<String>,
    ApiJson(request): ApiJson<UpdateCommentRequest>,
) -> Result<Json<CommentResponse>, ApiError> {
    let content = SharedError::require_text("content", &request.content, CONTENT_REQUIRED)?;

    let comment = comments
        .update_content(&comment_id, &content, Utc::now())
        .await?
        .ok_or_else(|| ApiError::not_found("Comment not found"))?;

    Ok(Json(CommentResponse { comment }))
}

pub async fn delete_comment(
    State(comments): State<DynCommentRepository>,
    Path(comment_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    remove_comment(comments.as_ref(), &comment_id).await?;
    Ok(Json(MessageResponse {
        message: "Comment deleted".to_string(),
    }))
}

/// Delete a comment after its replies
///
/// The reply cascade is skipped when the comment has no replies. Cascade
/// failures are logged and the primary deletion still runs; a failure there
/// is returned to the caller.
pub async fn remove_comment(repo: &dyn CommentRepository, comment_id: &str) -> Result<(), ApiError> {
    let replies = match repo.count_replies(comment_id).await {
        Ok(count) => Some(count),
        Err(e) => {
            tracing::warn!("Could not count replies of comment {}: {}", comment_id, e);
            None
        }
    };

    if replies != Some(0) {
        match repo.delete_replies(comment_id).await {
            Ok(deleted) => tracing::debug!("Deleted {} replies of comment {}", deleted, comment_id),
            Err(e) => tracing::error!("Failed to delete replies of comment {}: {}", comment_id, e),
        }
    }

    if !repo.delete(comment_id).await? {
        return Err(ApiError::not_found("Comment not found"));
    }
    Ok(())
}
