//! Shared helpers for the HTTP integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;
use warden_api::config::ApiConfig;
use warden_api::{AppState, router};
use warden_core::models::account::{AccountChanges, Role};

pub const PASSWORD: &str = "Aa1@xyz9";

pub fn test_config() -> ApiConfig {
    ApiConfig::from_lookup(|key| match key {
        "JWT_SECRET" => Some("integration-secret".into()),
        _ => None,
    })
    .expect("test config")
}

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_state(AppState::in_memory(test_config()))
    }

    pub fn with_state(state: AppState) -> Self {
        let router = router(state.clone());
        Self { state, router }
    }

    /// Send one request; returns status and parsed JSON body (`Null` if empty).
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let resp = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("response");

        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("parse JSON")
        };
        (status, json)
    }

    /// Register an account and return its id.
    pub async fn register(&self, email: &str) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/users",
                None,
                Some(json!({ "email": email, "password": PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register {email}: {body}");
        body["userId"].as_str().expect("userId").to_string()
    }

    pub async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    /// Log in with the shared test password and return the access token.
    pub async fn token_for(&self, email: &str) -> String {
        let (status, body) = self.login(email, PASSWORD).await;
        assert_eq!(status, StatusCode::CREATED, "login {email}: {body}");
        body["access_token"].as_str().expect("access_token").to_string()
    }

    /// Promote an account straight through the store.
    pub async fn make_admin(&self, id: &str) {
        let id = id.parse().expect("uuid");
        self.state
            .accounts
            .update(
                id,
                AccountChanges {
                    role: Some(Role::Admin),
                    ..Default::default()
                },
            )
            .await
            .expect("promote");
    }
}
