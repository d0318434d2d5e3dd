//! PostgreSQL store tests
//!
//! Need a reachable database: `DATABASE_URL=... cargo test -- --ignored`.

mod common;

use chrono::Utc;
use common::database::TestDatabase;
use common::user;
use ponta_solta::backend::store::{
    CardRepository, ChecklistRepository, CommentRepository, SnapshotRepository, UserRepository,
};
use ponta_solta::shared::kanban::{ChecklistItem, ChecklistItemChanges, Comment, Role};
use serial_test::serial;

async fn seed_card(db: &TestDatabase) {
    let pool = db.store.pool();
    let author = user("u-1", "ana@example.com", "Ana", "password123", Role::User);
    sqlx::query(
        "INSERT INTO users (id, email, name, password_hash, role) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(&author.id)
    .bind(&author.email)
    .bind(&author.name)
    .bind(&author.password_hash)
    .bind(author.role.as_str())
    .execute(pool)
    .await
    .unwrap();
    sqlx::query("INSERT INTO teams (id, name) VALUES ('t-1', 'TI')")
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO boards (id, team_id, name) VALUES ('b-1', 't-1', 'Demandas')")
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO board_columns (id, board_id, title) VALUES ('col-1', 'b-1', 'A fazer')")
        .execute(pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO cards (id, column_id, title, creator_id, priority, urgency) \
         VALUES ('c-1', 'col-1', 'Servidor', 'u-1', 'HIGH', 'URGENT')",
    )
    .execute(pool)
    .await
    .unwrap();
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_user_lookup() {
    let db = TestDatabase::new().await;
    seed_card(&db).await;

    let found = db.store.find_by_email("ana@example.com").await.unwrap().unwrap();
    assert_eq!(found.id, "u-1");
    assert_eq!(found.role, Role::User);
    assert!(db.store.find_by_email("ANA@example.com").await.unwrap().is_none());
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_checklist_roundtrip() {
    let db = TestDatabase::new().await;
    seed_card(&db).await;

    assert_eq!(db.store.max_position("c-1").await.unwrap(), None);
    db.store.insert_item(&ChecklistItem::new("c-1", "a", 0)).await.unwrap();
    let item = ChecklistItem::new("c-1", "b", 4);
    db.store.insert_item(&item).await.unwrap();
    assert_eq!(db.store.max_position("c-1").await.unwrap(), Some(4));

    let changes = ChecklistItemChanges {
        title: None,
        completed: Some(true),
        updated_at: Utc::now(),
    };
    let updated = db.store.update_item(&item.id, &changes).await.unwrap().unwrap();
    assert_eq!(updated.title, "b");
    assert!(updated.completed);
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_comment_cascade_and_card_delete() {
    let db = TestDatabase::new().await;
    seed_card(&db).await;

    let parent = Comment::new("c-1", "u-1", "parent", None);
    let reply = Comment::new("c-1", "u-1", "reply", Some(parent.id.clone()));
    db.store.insert(&parent).await.unwrap();
    db.store.insert(&reply).await.unwrap();

    assert_eq!(db.store.count_replies(&parent.id).await.unwrap(), 1);
    let with_author = db.store.find_with_author(&parent.id).await.unwrap().unwrap();
    assert_eq!(with_author.author.email, "ana@example.com");

    db.store.insert_item(&ChecklistItem::new("c-1", "a", 0)).await.unwrap();
    assert!(db.store.delete_card_cascade("c-1").await.unwrap());
    assert!(!db.store.card_exists("c-1").await.unwrap());
    assert!(db.store.find(&reply.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_snapshot_reads() {
    let db = TestDatabase::new().await;
    seed_card(&db).await;

    let boards = db.store.load_boards().await.unwrap();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0].cards().count(), 1);
    assert_eq!(db.store.load_users().await.unwrap().len(), 1);
    assert_eq!(db.store.load_teams().await.unwrap()[0].member_ids.len(), 0);
}
