use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::database::DatabaseManager;
use crate::state::AppState;

/// GET /health - Liveness plus a store round-trip when PostgreSQL is configured
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    let Some(pool) = state.db.as_ref() else {
        return (
            StatusCode::OK,
            Json(json!({
                "result": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "memory"
                }
            })),
        );
    };

    match DatabaseManager::health_check(pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "result": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "error": true,
                    "message": "database unavailable",
                    "code": "SERVICE_UNAVAILABLE"
                })),
            )
        }
    }
}
