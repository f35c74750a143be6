//! # warden_api
//!
//! HTTP API library for Warden.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod validation;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use warden_core::accounts::memory::MemoryAccountStore;
use warden_core::accounts::store::AccountStore;
use warden_core::auth::revocation::{MemoryRevocationStore, RevocationStore};

use crate::config::ApiConfig;
use crate::handlers::{auth, health, users};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Account persistence.
    pub accounts: Arc<dyn AccountStore>,
    /// Revoked access tokens.
    pub revocations: Arc<dyn RevocationStore>,
    /// API configuration.
    pub config: ApiConfig,
}

impl AppState {
    /// State backed entirely by in-process stores.
    pub fn in_memory(config: ApiConfig) -> Self {
        Self {
            accounts: Arc::new(MemoryAccountStore::new()),
            revocations: Arc::new(MemoryRevocationStore::new()),
            config,
        }
    }
}

/// Run embedded database migrations.
///
/// Delegates to `warden_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    warden_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
///
/// Every route passes through the guard chain; public operations are let
/// through by the access table in [`routes`].
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(routes::GET_HEALTH_LIVE, get(health::live_handler))
        .route(routes::GET_HEALTH_READY, get(health::ready_handler))
        .route(routes::POST_AUTH_LOGIN, post(auth::login_handler))
        .route(routes::POST_AUTH_LOGOUT, post(auth::logout_handler))
        .route(
            routes::USERS,
            post(users::create_user_handler).get(users::list_users_handler),
        )
        .route(
            routes::USERS_ID,
            get(users::get_user_handler)
                .patch(users::update_user_handler)
                .delete(users::delete_user_handler),
        )
        // Layers run outermost-last: authentication, then the role gate.
        .route_layer(axum::middleware::from_fn(middleware::roles::require_role))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
