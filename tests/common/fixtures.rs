//! In-memory application fixture

use axum_test::TestServer;
use chrono::Utc;
use ponta_solta::backend::auth::{CookiePolicy, TokenIssuer};
use ponta_solta::backend::create_app;
use ponta_solta::backend::server::AppState;
use ponta_solta::backend::store::{MemoryStore, Repositories};
use ponta_solta::backend::sync::MemoryMirror;
use ponta_solta::shared::kanban::{Board, Card, Column, Priority, Role, Team, Urgency, User};
use secrecy::SecretString;
use std::sync::Arc;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const ANA_ID: &str = "u-ana";
pub const ANA_EMAIL: &str = "ana@pontasolta.test";
pub const ANA_PASSWORD: &str = "password123";
pub const BRUNO_ID: &str = "u-bruno";
pub const CARD_ID: &str = "123";
pub const OTHER_CARD_ID: &str = "456";

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
    pub mirror: Arc<MemoryMirror>,
    pub tokens: TokenIssuer,
}

pub fn test_issuer() -> TokenIssuer {
    TokenIssuer::new(&SecretString::from(TEST_SECRET)).unwrap()
}

pub fn user(id: &str, email: &str, name: &str, password: &str, role: Role) -> User {
    let now = Utc::now();
    User {
        id: id.to_string(),
        email: email.to_string(),
        name: name.to_string(),
        // Minimum cost keeps the suite fast
        password_hash: bcrypt::hash(password, 4).unwrap(),
        role,
        sector: Some("TI".to_string()),
        branch: Some("Matriz".to_string()),
        phone: None,
        bpm_username: None,
        can_open_tickets_for_others: false,
        created_at: now,
        updated_at: now,
    }
}

fn card(id: &str, position: i32) -> Card {
    let now = Utc::now();
    Card {
        id: id.to_string(),
        column_id: "col-todo".to_string(),
        title: format!("Card {}", id),
        description: None,
        position,
        creator_id: ANA_ID.to_string(),
        assignee_id: Some(BRUNO_ID.to_string()),
        priority: Priority::High,
        urgency: Urgency::Normal,
        high_impact: false,
        created_at: now,
        updated_at: now,
    }
}

/// Store seeded with two users, one team, one board and two cards
pub async fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    let now = Utc::now();

    store
        .insert_user(user(ANA_ID, ANA_EMAIL, "Ana", ANA_PASSWORD, Role::Manager))
        .await;
    store
        .insert_user(user(BRUNO_ID, "bruno@pontasolta.test", "Bruno", "hunter22", Role::User))
        .await;
    store
        .insert_team(
            Team {
                id: "t-ti".to_string(),
                name: "TI".to_string(),
                description: Some("Tecnologia".to_string()),
                parent_id: None,
                created_at: now,
                updated_at: now,
            },
            &[ANA_ID, BRUNO_ID],
        )
        .await;
    store
        .insert_board(Board {
            id: "b-1".to_string(),
            team_id: "t-ti".to_string(),
            name: "Demandas".to_string(),
            created_at: now,
            updated_at: now,
        })
        .await;
    store
        .insert_column(Column {
            id: "col-todo".to_string(),
            board_id: "b-1".to_string(),
            title: "A fazer".to_string(),
            position: 0,
            created_at: now,
            updated_at: now,
        })
        .await;
    store.insert_card(card(CARD_ID, 0)).await;
    store.insert_card(card(OTHER_CARD_ID, 1)).await;

    store
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(MemoryMirror::new(), false).await
}

pub async fn spawn_app_with(mirror: MemoryMirror, secure_cookies: bool) -> TestApp {
    let store = seeded_store().await;
    let mirror = Arc::new(mirror);
    let tokens = test_issuer();

    let state = AppState::new(
        Repositories::from_store(store.clone()),
        mirror.clone(),
        tokens.clone(),
        CookiePolicy::new(secure_cookies),
    );

    TestApp {
        server: TestServer::new(create_app(state)).unwrap(),
        store,
        mirror,
        tokens,
    }
}
