use std::time::Duration;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::app::AppState;

const PING_TIMEOUT: Duration = Duration::from_secs(5);

/// GET /
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "service": state.config.api.project_name,
        "version": state.config.api.version,
        "environment": state.config.environment.as_str(),
    }))
}

/// GET /health
///
/// `ok` with 200 when `SELECT 1` succeeds, `degraded` with 503 otherwise.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let database = match tokio::time::timeout(PING_TIMEOUT, state.invoker.ping()).await {
        Ok(Ok(())) => "ok",
        Ok(Err(err)) => {
            tracing::warn!(error = %err, "database health check failed");
            "error"
        }
        Err(_) => {
            tracing::warn!("database health check timed out");
            "error"
        }
    };

    let (status, overall) = if database == "ok" {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status,
        Json(json!({
            "status": overall,
            "checks": {
                "api": "ok",
                "database": database,
            },
            "timestamp": Utc::now().to_rfc3339(),
        })),
    )
}
