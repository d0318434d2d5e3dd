/**
 * API Routes
 *
 * Attaches every `/api` endpoint to the router.
 *
 * # Authentication
 *
 * - `/api/auth/me` and `POST /api/cards/{id}/comments` need a session cookie
 *   or Bearer token
 * - `/api/sync` needs a Bearer token
 * - Everything else is public: checklist, comment update/delete and card
 *   deletion do not check the caller
 */

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::backend::auth::{get_me, login, logout};
use crate::backend::board::{
    create_checklist_item, create_comment, delete_card, delete_checklist_item, delete_comment,
    list_checklist, list_comments, update_checklist_item, update_comment,
};
use crate::backend::server::state::AppState;
use crate::backend::sync::run_sync;

pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Authentication
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(get_me))
        // Cards
        .route("/api/cards/{id}", delete(delete_card))
        .route(
            "/api/cards/{id}/checklist",
            get(list_checklist).post(create_checklist_item),
        )
        .route(
            "/api/cards/{id}/comments",
            get(list_comments).post(create_comment),
        )
        // Checklist items
        .route(
            "/api/checklist/{id}",
            put(update_checklist_item).delete(delete_checklist_item),
        )
        // Comments
        .route(
            "/api/comments/{id}",
            put(update_comment).delete(delete_comment),
        )
        // Synchronization
        .route("/api/sync", post(run_sync))
}
