//! Comment API tests

mod common;

use axum::http::StatusCode;
use common::*;
use ponta_solta::backend::store::CommentRepository;
use ponta_solta::shared::kanban::Comment;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

async fn post_comment(app: &TestApp, card_id: &str, body: Value) -> axum_test::TestResponse {
    let token = token_for(&app.tokens, ANA_ID, ANA_EMAIL);
    let (name, value) = session_cookie(&token);
    app.server
        .post(&format!("/api/cards/{}/comments", card_id))
        .add_header(name, value)
        .json(&body)
        .await
}

#[tokio::test]
async fn test_create_comment_uses_caller_as_author() {
    let app = spawn_app().await;

    let response = post_comment(&app, CARD_ID, json!({ "content": "  Olhar o log  " })).await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let comment = &response.json::<Value>()["comment"];
    assert_eq!(comment["content"], "Olhar o log");
    assert_eq!(comment["authorId"], ANA_ID);
    assert_eq!(comment["author"], json!({ "id": ANA_ID, "name": "Ana", "email": ANA_EMAIL }));
}

#[tokio::test]
async fn test_create_comment_requires_authentication() {
    let app = spawn_app().await;

    let response = app
        .server
        .post(&format!("/api/cards/{}/comments", CARD_ID))
        .json(&json!({ "content": "hello" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.store.comment_count(CARD_ID).await, 0);
}

#[tokio::test]
async fn test_reply_rules() {
    let app = spawn_app().await;
    let parent = Comment::new(CARD_ID, BRUNO_ID, "parent", None);
    let reply = Comment::new(CARD_ID, BRUNO_ID, "reply", Some(parent.id.clone()));
    let elsewhere = Comment::new(OTHER_CARD_ID, BRUNO_ID, "elsewhere", None);
    for comment in [&parent, &reply, &elsewhere] {
        app.store.insert(comment).await.unwrap();
    }

    let ok = post_comment(&app, CARD_ID, json!({ "content": "sure", "parentId": parent.id })).await;
    assert_eq!(ok.status_code(), StatusCode::CREATED);
    assert_eq!(ok.json::<Value>()["comment"]["parentId"], parent.id.as_str());

    let nested = post_comment(&app, CARD_ID, json!({ "content": "no", "parentId": reply.id })).await;
    assert_eq!(nested.status_code(), StatusCode::BAD_REQUEST);

    let cross_card =
        post_comment(&app, CARD_ID, json!({ "content": "no", "parentId": elsewhere.id })).await;
    assert_eq!(cross_card.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_comments_in_creation_order() {
    let app = spawn_app().await;
    for content in ["one", "two"] {
        post_comment(&app, CARD_ID, json!({ "content": content })).await;
    }

    let list = app
        .server
        .get(&format!("/api/cards/{}/comments", CARD_ID))
        .await
        .json::<Value>();
    let contents: Vec<&str> = list["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["one", "two"]);
}

#[tokio::test]
async fn test_update_comment_trims_and_joins_author() {
    let app = spawn_app().await;
    let comment = Comment::new(CARD_ID, BRUNO_ID, "old", None);
    app.store.insert(&comment).await.unwrap();

    let response = app
        .server
        .put(&format!("/api/comments/{}", comment.id))
        .json(&json!({ "content": "  new text " }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["comment"]["content"], "new text");
    assert_eq!(body["comment"]["author"]["name"], "Bruno");
}

#[tokio::test]
async fn test_update_comment_whitespace_rejected() {
    let app = spawn_app().await;
    let comment = Comment::new(CARD_ID, BRUNO_ID, "keep me", None);
    app.store.insert(&comment).await.unwrap();

    let response = app
        .server
        .put(&format!("/api/comments/{}", comment.id))
        .json(&json!({ "content": " \n\t " }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "Content is required");
    let stored = app.store.find(&comment.id).await.unwrap().unwrap();
    assert_eq!(stored.content, "keep me");
}

#[tokio::test]
async fn test_update_unknown_comment_is_404() {
    let app = spawn_app().await;

    let response = app
        .server
        .put("/api/comments/missing")
        .json(&json!({ "content": "x" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_comment_removes_replies() {
    let app = spawn_app().await;
    let parent = Comment::new(CARD_ID, ANA_ID, "parent", None);
    let reply = Comment::new(CARD_ID, BRUNO_ID, "reply", Some(parent.id.clone()));
    let sibling = Comment::new(CARD_ID, BRUNO_ID, "sibling", None);
    for comment in [&parent, &reply, &sibling] {
        app.store.insert(comment).await.unwrap();
    }

    let response = app.server.delete(&format!("/api/comments/{}", parent.id)).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "message": "Comment deleted" }));
    assert!(app.store.find(&reply.id).await.unwrap().is_none());
    assert!(app.store.find(&sibling.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_card_cascades() {
    let app = spawn_app().await;
    post_comment(&app, CARD_ID, json!({ "content": "bye" })).await;
    app.server
        .post(&format!("/api/cards/{}/checklist", CARD_ID))
        .json(&json!({ "title": "item" }))
        .await;

    let response = app.server.delete(&format!("/api/cards/{}", CARD_ID)).await;

    assert_eq!(response.json::<Value>(), json!({ "success": true }));
    assert_eq!(app.store.comment_count(CARD_ID).await, 0);
    let checklist = app
        .server
        .get(&format!("/api/cards/{}/checklist", CARD_ID))
        .await
        .json::<Value>();
    assert_eq!(checklist["checklist"], json!([]));

    let again = app.server.delete(&format!("/api/cards/{}", CARD_ID)).await;
    assert_eq!(again.status_code(), StatusCode::NOT_FOUND);
}
