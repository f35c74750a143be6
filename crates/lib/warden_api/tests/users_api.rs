//! User endpoints over HTTP, including the ownership rules.

mod common;

use axum::http::StatusCode;
use common::{PASSWORD, TestApp};
use serde_json::json;

#[tokio::test]
async fn registration_returns_public_view() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            "POST",
            "/users",
            None,
            Some(json!({ "email": "a@x.com", "password": PASSWORD })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["role"], "USER");
    assert!(body["userId"].is_string());
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = TestApp::new();
    app.register("a@x.com").await;

    let (status, body) = app
        .send(
            "POST",
            "/users",
            None,
            Some(json!({ "email": "a@x.com", "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email already registered");
}

#[tokio::test]
async fn weak_password_is_rejected() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            "POST",
            "/users",
            None,
            Some(json!({ "email": "a@x.com", "password": "password" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn get_user_by_id() {
    let app = TestApp::new();
    let id = app.register("a@x.com").await;
    let token = app.token_for("a@x.com").await;

    let (status, body) = app.send("GET", &format!("/users/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userId"], id.as_str());

    let missing = "00000000-0000-0000-0000-000000000000";
    let (status, body) = app
        .send("GET", &format!("/users/{missing}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");

    let (status, _) = app.send("GET", "/users/not-a-uuid", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_is_paginated() {
    let app = TestApp::new();
    for email in ["a@x.com", "b@x.com", "c@x.com"] {
        app.register(email).await;
    }
    let token = app.token_for("a@x.com").await;

    let (status, body) = app
        .send("GET", "/users?page=2&limit=2", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["total"], 3);
    assert_eq!(body["page"], 2);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["hasNextPage"], false);
    assert_eq!(body["hasPrevPage"], true);
    assert_eq!(body["prevPage"], 1);

    let (status, body) = app.send("GET", "/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["limit"], 10);
    assert_eq!(body["page"], 1);
}

#[tokio::test]
async fn list_rejects_out_of_range_queries() {
    let app = TestApp::new();
    app.register("a@x.com").await;
    let token = app.token_for("a@x.com").await;

    for uri in ["/users?limit=101", "/users?limit=0", "/users?page=0", "/users?page=x", "/users?sort=email"] {
        let (status, _) = app.send("GET", uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn user_cannot_modify_or_delete_someone_else() {
    let app = TestApp::new();
    app.register("alice@x.com").await;
    let bob = app.register("bob@x.com").await;
    let alice_token = app.token_for("alice@x.com").await;

    let (status, body) = app
        .send(
            "PATCH",
            &format!("/users/{bob}"),
            Some(&alice_token),
            Some(json!({ "targetId": bob, "email": "evil@x.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "You can only modify your own profile");

    let (status, body) = app
        .send(
            "DELETE",
            &format!("/users/{bob}"),
            Some(&alice_token),
            Some(json!({ "targetId": bob })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "You can only remove your own profile");
}

#[tokio::test]
async fn user_updates_own_email_and_logs_in_with_it() {
    let app = TestApp::new();
    let id = app.register("alice@x.com").await;
    let token = app.token_for("alice@x.com").await;

    let (status, body) = app
        .send(
            "PATCH",
            &format!("/users/{id}"),
            Some(&token),
            Some(json!({ "targetId": id, "email": "alice2@x.com", "role": "USER" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "alice2@x.com");
    assert_eq!(body["role"], "USER");

    let (status, _) = app.login("alice2@x.com", PASSWORD).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn user_cannot_escalate_to_admin() {
    let app = TestApp::new();
    let id = app.register("alice@x.com").await;
    let token = app.token_for("alice@x.com").await;

    let (status, body) = app
        .send(
            "PATCH",
            &format!("/users/{id}"),
            Some(&token),
            Some(json!({ "targetId": id, "role": "ADMIN" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "You cannot change your own role");
}

#[tokio::test]
async fn admin_manages_other_accounts() {
    let app = TestApp::new();
    let admin = app.register("admin@x.com").await;
    let bob = app.register("bob@x.com").await;
    let carol = app.register("carol@x.com").await;
    app.make_admin(&admin).await;
    let token = app.token_for("admin@x.com").await;

    let (status, body) = app
        .send(
            "PATCH",
            &format!("/users/{bob}"),
            Some(&token),
            Some(json!({ "targetId": bob, "role": "ADMIN" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "ADMIN");

    let (status, body) = app
        .send(
            "DELETE",
            &format!("/users/{carol}"),
            Some(&token),
            Some(json!({ "targetId": carol })),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = app
        .send("GET", &format!("/users/{carol}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_deletes_own_account() {
    let app = TestApp::new();
    let id = app.register("alice@x.com").await;
    let token = app.token_for("alice@x.com").await;

    let (status, _) = app
        .send(
            "DELETE",
            &format!("/users/{id}"),
            Some(&token),
            Some(json!({ "targetId": id })),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.login("alice@x.com", PASSWORD).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn target_id_must_match_path() {
    let app = TestApp::new();
    let alice = app.register("alice@x.com").await;
    let bob = app.register("bob@x.com").await;
    let token = app.token_for("alice@x.com").await;

    let (status, body) = app
        .send(
            "PATCH",
            &format!("/users/{alice}"),
            Some(&token),
            Some(json!({ "targetId": bob, "email": "z@x.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "targetId must match the id in the path");

    let (status, _) = app
        .send(
            "DELETE",
            &format!("/users/{alice}"),
            Some(&token),
            Some(json!({ "targetId": bob })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn email_collision_on_update_conflicts() {
    let app = TestApp::new();
    let alice = app.register("alice@x.com").await;
    app.register("bob@x.com").await;
    let token = app.token_for("alice@x.com").await;

    let (status, body) = app
        .send(
            "PATCH",
            &format!("/users/{alice}"),
            Some(&token),
            Some(json!({ "targetId": alice, "email": "bob@x.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email already registered");
}

#[tokio::test]
async fn mutations_require_a_token() {
    let app = TestApp::new();
    let id = app.register("alice@x.com").await;

    let (status, _) = app
        .send(
            "PATCH",
            &format!("/users/{id}"),
            None,
            Some(json!({ "targetId": id, "email": "z@x.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(
            "DELETE",
            &format!("/users/{id}"),
            None,
            Some(json!({ "targetId": id })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
