//! Health check endpoint
//!
//! Reports liveness plus a snapshot of the listing tables, so a probe
//! also confirms the database is reachable.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::warn;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok" when the database answers, "degraded" otherwise
    pub status: String,
    pub module: String,
    pub version: String,
    /// Row counts per listing table; absent when the database is down
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<RecordCounts>,
}

/// Row counts for the three listing tables
#[derive(Debug, Serialize)]
pub struct RecordCounts {
    pub venues: i64,
    pub artists: i64,
    pub shows: i64,
}

async fn record_counts(db: &SqlitePool) -> sqlx::Result<RecordCounts> {
    Ok(RecordCounts {
        venues: sqlx::query_scalar("SELECT COUNT(*) FROM venues").fetch_one(db).await?,
        artists: sqlx::query_scalar("SELECT COUNT(*) FROM artists").fetch_one(db).await?,
        shows: sqlx::query_scalar("SELECT COUNT(*) FROM shows").fetch_one(db).await?,
    })
}

/// GET /health
///
/// Never errors: an unreachable database degrades the status instead of
/// failing the probe.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let records = match record_counts(&state.db).await {
        Ok(counts) => Some(counts),
        Err(e) => {
            warn!("Health probe could not read the database: {}", e);
            None
        }
    };

    Json(HealthResponse {
        status: if records.is_some() { "ok" } else { "degraded" }.to_string(),
        module: "gigboard-web".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        records,
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
