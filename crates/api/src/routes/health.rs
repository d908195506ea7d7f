//! Liveness probe for load balancers and the dev client.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"`, or `"degraded"` when the employee store is unreachable.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

/// Always answers 200; a broken store only downgrades `status`.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = roster_db::health_check(&state.pool).await.is_ok();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// `/health` lives at the root, outside the `/api` prefix.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
