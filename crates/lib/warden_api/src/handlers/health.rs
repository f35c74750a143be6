//! Liveness and readiness probes.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use crate::AppState;
use crate::models::HealthResponse;

/// `GET /health/live`: the process is serving requests.
pub async fn live_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "up".into(),
        store: None,
    })
}

/// `GET /health/ready`: the account store answers.
pub async fn ready_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.accounts.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "up".into(),
                store: Some("up".into()),
            }),
        ),
        Err(e) => {
            warn!(error = %e, "account store not ready");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "down".into(),
                    store: Some("down".into()),
                }),
            )
        }
    }
}
