/// HTTP tests for the user endpoints
///
/// User PATCH/DELETE are covered in both modes: the default one, where any
/// caller may administer any account by name, and the hardened one
/// (`users_require_auth`), where the target's password is required.

mod common;

use axum::http::StatusCode;
use common::TestContext;
use serde_json::json;
use todoboard_api::config::PolicyConfig;

fn hardened() -> TestContext {
    TestContext::with_policy(PolicyConfig {
        todos_require_auth: true,
        users_require_auth: true,
    })
}

#[tokio::test]
async fn test_listing_is_empty() {
    let ctx = TestContext::new();

    let res = ctx.send("GET", "/users", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.content_type.as_deref(), Some("application/json"));
    assert_eq!(res.body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_new_resource() {
    let ctx = TestContext::new();

    let res = ctx
        .send("POST", "/users", Some(json!({ "name": "ademir", "password": "123456" })))
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["user"]["name"], "ademir");
    assert!(res.body["user"].get("password_hash").is_none());
    assert_eq!(ctx.state.users.count().await.unwrap(), 1);

    let stored = ctx.state.users.find_by_name("ademir").await.unwrap();
    assert_ne!(stored.password_hash, "123456");
}

#[tokio::test]
async fn test_listing_hides_hashes() {
    let ctx = TestContext::new();
    ctx.register("ademir", "123456").await;

    let res = ctx.send("GET", "/users", None).await;
    let users = res.body.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["name"], "ademir");
    assert!(users[0].get("password_hash").is_none());
}

#[tokio::test]
async fn test_create_missing_fields() {
    let ctx = TestContext::new();

    for body in [
        json!({ "password": "123456" }),
        json!({ "name": "ademir" }),
        json!({ "name": "", "password": "123456" }),
    ] {
        let res = ctx.send("POST", "/users", Some(body)).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
    }
    assert_eq!(ctx.state.users.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_duplicate_name_rejected() {
    let ctx = TestContext::new();
    ctx.register("ademir", "123456").await;

    let res = ctx
        .send("POST", "/users", Some(json!({ "name": "ademir", "password": "other" })))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(ctx.state.users.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_edit_resource() {
    let ctx = TestContext::new();
    let before = ctx.register("ademir", "123456").await;

    let res = ctx
        .send("PATCH", "/users/ademir", Some(json!({ "password": "654321" })))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["user"]["name"], "ademir");

    let after = ctx.state.users.find_by_name("ademir").await.unwrap();
    assert_ne!(after.password_hash, before.password_hash);
    assert!(ctx.state.hasher.verify(&after.password_hash, "654321").await);
    assert!(!ctx.state.hasher.verify(&after.password_hash, "123456").await);
}

#[tokio::test]
async fn test_edit_without_password_still_saves() {
    let ctx = TestContext::new();
    let before = ctx.register("ademir", "123456").await;
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let res = ctx.send("PATCH", "/users/ademir", Some(json!({}))).await;
    assert_eq!(res.status, StatusCode::OK);

    let after = ctx.state.users.find_by_id(before.id).await.unwrap();
    assert_eq!(after.password_hash, before.password_hash);
    assert!(after.updated_at > before.updated_at);
    assert!(ctx.state.auth.authenticate("ademir", "123456").await.is_ok());
}

#[tokio::test]
async fn test_edit_unknown_name() {
    let ctx = TestContext::new();

    let res = ctx
        .send("PATCH", "/users/nobody", Some(json!({ "password": "654321" })))
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_resource() {
    let ctx = TestContext::new();
    ctx.register("ademir", "123456").await;

    let res = ctx.send("DELETE", "/users/ademir", None).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    assert_eq!(ctx.state.users.count().await.unwrap(), 0);

    let res = ctx.send("DELETE", "/users/ademir", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_user_keeps_their_todos() {
    let ctx = TestContext::new();
    let user = ctx.register("ademir", "123456").await;
    ctx.state.todos.create("Be awesome", Some(user.id)).await.unwrap();

    let res = ctx.send("DELETE", "/users/ademir", None).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    assert_eq!(ctx.state.todos.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_hardened_edit_requires_current_password() {
    let ctx = hardened();
    ctx.register("ademir", "123456").await;

    let res = ctx
        .send("PATCH", "/users/ademir", Some(json!({ "password": "654321" })))
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = ctx
        .send(
            "PATCH",
            "/users/ademir",
            Some(json!({ "password": "654321", "current_password": "wrong" })),
        )
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = ctx
        .send(
            "PATCH",
            "/users/ademir",
            Some(json!({ "password": "654321", "current_password": "123456" })),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(ctx.state.auth.authenticate("ademir", "654321").await.is_ok());
}

#[tokio::test]
async fn test_hardened_delete_requires_password() {
    let ctx = hardened();
    ctx.register("ademir", "123456").await;

    let res = ctx.send("DELETE", "/users/ademir", None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(ctx.state.users.count().await.unwrap(), 1);

    let res = ctx
        .send("DELETE", "/users/ademir", Some(json!({ "password": "123456" })))
        .await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    assert_eq!(ctx.state.users.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_hardened_unknown_name_does_not_leak() {
    let ctx = hardened();

    let res = ctx
        .send("DELETE", "/users/nobody", Some(json!({ "password": "123456" })))
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}
