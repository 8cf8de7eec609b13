//! Liveness of the job store: GET /health
//!
//! Healthy means the database answers within [`PING_TIMEOUT`] and the
//! `jobs` table exists. Anything else is a 503.

use std::time::Duration;

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::domains::jobs::PoolStats;
use crate::server::app::AppState;

const PING_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaState {
    Ready,
    Missing,
    Unknown,
}

#[derive(Serialize)]
pub struct DatabaseHealth {
    status: &'static str,
    schema: SchemaState,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    database: DatabaseHealth,
    connection_pool: PoolStats,
}

pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let database = match tokio::time::timeout(PING_TIMEOUT, state.job_store.ping()).await {
        Ok(Ok(true)) => DatabaseHealth {
            status: "ok",
            schema: SchemaState::Ready,
            error: None,
        },
        Ok(Ok(false)) => DatabaseHealth {
            status: "error",
            schema: SchemaState::Missing,
            error: Some("jobs table does not exist".to_string()),
        },
        Ok(Err(e)) => DatabaseHealth {
            status: "error",
            schema: SchemaState::Unknown,
            error: Some(format!("{:#}", e)),
        },
        Err(_) => DatabaseHealth {
            status: "error",
            schema: SchemaState::Unknown,
            error: Some(format!("Ping timed out after {}s", PING_TIMEOUT.as_secs())),
        },
    };

    let healthy = database.schema == SchemaState::Ready;
    if !healthy {
        tracing::warn!(error = ?database.error, "Health check failed");
    }

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthResponse {
            status: if healthy { "healthy" } else { "unhealthy" },
            database,
            connection_pool: state.job_store.pool_stats(),
        }),
    )
}
