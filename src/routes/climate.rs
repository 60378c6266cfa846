//! Dataset listing endpoints.
//!
//! - GET /api/v1.0/precipitation
//! - GET /api/v1.0/stations
//! - GET /api/v1.0/tobs

use axum::extract::State;
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use super::AppState;
use crate::db::{models, queries};
use crate::errors::{AppError, ErrorResponse};

/// One day's precipitation reading.
#[derive(Debug, Serialize, ToSchema)]
pub struct PrecipitationEntry {
    /// Measurement date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Precipitation in inches; null when not reported
    pub prcp: Option<f64>,
}

impl From<models::Measurement> for PrecipitationEntry {
    fn from(m: models::Measurement) -> Self {
        Self {
            date: m.date,
            prcp: m.prcp,
        }
    }
}

/// One day's temperature observation.
#[derive(Debug, Serialize, ToSchema)]
pub struct TobsEntry {
    /// Measurement date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Observed temperature
    pub tobs: f64,
}

impl From<models::Measurement> for TobsEntry {
    fn from(m: models::Measurement) -> Self {
        Self {
            date: m.date,
            tobs: m.tobs,
        }
    }
}

/// Precipitation for the twelve months before the dataset's reference date.
#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    tag = "Climate",
    responses(
        (status = 200, description = "Precipitation by date, in storage order", body = Vec<PrecipitationEntry>),
        (status = 500, description = "Dataset unavailable", body = ErrorResponse),
    )
)]
pub async fn precipitation(
    State(state): State<AppState>,
) -> Result<Json<Vec<PrecipitationEntry>>, AppError> {
    let since = state.dataset.precipitation_since();
    let mut conn = state.pool.acquire().await?;
    let rows = queries::precipitation_since(&mut conn, since).await?;
    tracing::debug!("precipitation since {}: {} rows", since, rows.len());
    Ok(Json(rows.into_iter().map(PrecipitationEntry::from).collect()))
}

/// Codes of every station in the dataset.
#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    tag = "Climate",
    responses(
        (status = 200, description = "Station codes", body = Vec<String>),
        (status = 500, description = "Dataset unavailable", body = ErrorResponse),
    )
)]
pub async fn stations(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let mut conn = state.pool.acquire().await?;
    let codes = queries::list_station_codes(&mut conn).await?;
    Ok(Json(codes))
}

/// Temperature observations of the configured station for the twelve months
/// before its last observation.
#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    tag = "Climate",
    responses(
        (status = 200, description = "Temperature observations by date", body = Vec<TobsEntry>),
        (status = 500, description = "Dataset unavailable", body = ErrorResponse),
    )
)]
pub async fn tobs(State(state): State<AppState>) -> Result<Json<Vec<TobsEntry>>, AppError> {
    let station_id = state.dataset.tobs_station_id;
    let since = state.dataset.tobs_since();
    let mut conn = state.pool.acquire().await?;

    let Some(station) = queries::get_station(&mut conn, station_id).await? else {
        tracing::warn!("No station with id {}, tobs is empty", station_id);
        return Ok(Json(Vec::new()));
    };

    let rows = queries::temperature_observations_since(&mut conn, &station.station, since).await?;
    tracing::debug!(
        "tobs for {} ({}) since {}: {} rows",
        station.station,
        station.name,
        since,
        rows.len()
    );
    Ok(Json(rows.into_iter().map(TobsEntry::from).collect()))
}
