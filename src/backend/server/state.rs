/**
 * Application State
 *
 * `AppState` holds one injected handle per collaborator: repositories, the
 * token issuer, the cookie policy and the synchronizer. Handlers extract only
 * what they use through the `FromRef` implementations below, e.g.
 * `State<DynChecklistRepository>`.
 *
 * All handles are `Arc`s or small `Clone` values, so cloning the state per
 * request is cheap.
 */

use axum::extract::FromRef;

use crate::backend::auth::{CookiePolicy, TokenIssuer};
use crate::backend::store::{
    DynCardRepository, DynChecklistRepository, DynCommentRepository, DynUserRepository,
    Repositories,
};
use crate::backend::sync::{DynMirrorStore, Synchronizer};

#[derive(Clone)]
pub struct AppState {
    pub users: DynUserRepository,
    pub cards: DynCardRepository,
    pub checklist: DynChecklistRepository,
    pub comments: DynCommentRepository,
    pub tokens: TokenIssuer,
    pub cookies: CookiePolicy,
    pub synchronizer: Synchronizer,
}

impl AppState {
    pub fn new(
        repositories: Repositories,
        mirror: DynMirrorStore,
        tokens: TokenIssuer,
        cookies: CookiePolicy,
    ) -> Self {
        let synchronizer = Synchronizer::new(repositories.snapshot, mirror);
        Self {
            users: repositories.users,
            cards: repositories.cards,
            checklist: repositories.checklist,
            comments: repositories.comments,
            tokens,
            cookies,
            synchronizer,
        }
    }
}

impl FromRef<AppState> for DynUserRepository {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}

impl FromRef<AppState> for DynCardRepository {
    fn from_ref(state: &AppState) -> Self {
        state.cards.clone()
    }
}

impl FromRef<AppState> for DynChecklistRepository {
    fn from_ref(state: &AppState) -> Self {
        state.checklist.clone()
    }
}

impl FromRef<AppState> for DynCommentRepository {
    fn from_ref(state: &AppState) -> Self {
        state.comments.clone()
    }
}

impl FromRef<AppState> for TokenIssuer {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

impl FromRef<AppState> for CookiePolicy {
    fn from_ref(state: &AppState) -> Self {
        state.cookies
    }
}

impl FromRef<AppState> for Synchronizer {
    fn from_ref(state: &AppState) -> Self {
        state.synchronizer.clone()
    }
}
