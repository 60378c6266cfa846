use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use super::AppState;
use crate::db::queries;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status ("ok" when healthy, "degraded" when the store is unreachable)
    pub status: String,
    /// API version
    pub version: String,
    /// Whether the dataset is readable
    pub database: bool,
    /// Number of stations in the dataset, when readable
    pub stations: Option<i64>,
}

/// Health check endpoint.
///
/// Verifies the dataset is readable by counting stations. Returns status
/// "degraded" (still 200) if it is not, so load balancers can distinguish
/// partial failures.
#[utoipa::path(
    get,
    path = "/api/v1.0/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service health", body = HealthResponse),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let stations = match state.pool.acquire().await {
        Ok(mut conn) => queries::count_stations(&mut conn).await.ok(),
        Err(e) => {
            tracing::warn!("Health check could not acquire a connection: {}", e);
            None
        }
    };
    let db_ok = stations.is_some();

    Json(HealthResponse {
        status: if db_ok {
            "ok".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_ok,
        stations,
    })
}
