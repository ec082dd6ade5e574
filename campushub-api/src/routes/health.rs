/// Health check endpoint
///
/// ```text
/// GET /health
/// GET /test-db
/// ```
///
/// `/health` always answers `200` and reports a dead database as `degraded`.
/// `/test-db` answers `503` in that case.
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected",
///   "connections": { "active": 1, "idle": 4 }
/// }
/// ```

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Json};
use campushub_shared::db::pool;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: String,

    pub version: String,

    /// `connected` or `disconnected`
    pub database: String,

    pub connections: ConnectionStats,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConnectionStats {
    pub active: usize,
    pub idle: usize,
}

pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let connected = match pool::health_check(&state.db).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };

    let stats = pool::get_pool_stats(&state.db);

    Ok(Json(HealthResponse {
        status: if connected { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
        connections: ConnectionStats {
            active: stats.active_connections,
            idle: stats.idle_connections,
        },
    }))
}

pub async fn test_db(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    if let Err(e) = pool::health_check(&state.db).await {
        tracing::warn!(error = %e, "Database connectivity test failed");
        return Err(ApiError::ServiceUnavailable("Database is unreachable".to_string()));
    }

    health_check(State(state)).await
}
