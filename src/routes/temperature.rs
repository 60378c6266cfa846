//! Temperature summary endpoints.
//!
//! - GET /api/v1.0/:start
//! - GET /api/v1.0/:start/:end
//!
//! Both answer formatted text by default, or JSON with `?format=json`.

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::AppState;
use crate::db::{models, queries};
use crate::errors::{AppError, ErrorResponse};
use crate::helpers::{display_1dp, opt_round_1dp, parse_iso_date};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SummaryFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SummaryQuery {
    /// Response format: "text" (default) or "json"
    #[serde(default)]
    pub format: SummaryFormat,
}

/// Min/avg/max temperature over a date range, rounded to 1 decimal place.
///
/// Each value is null when no measurement falls in the range.
#[derive(Debug, Serialize, ToSchema)]
pub struct TemperatureSummary {
    /// First date included (YYYY-MM-DD)
    pub start: NaiveDate,
    /// Last date included; null for open-ended queries
    pub end: Option<NaiveDate>,
    /// Minimum observed temperature
    pub min: Option<f64>,
    /// Average observed temperature
    pub avg: Option<f64>,
    /// Maximum observed temperature
    pub max: Option<f64>,
}

impl TemperatureSummary {
    fn new(start: NaiveDate, end: Option<NaiveDate>, stats: models::TemperatureStats) -> Self {
        Self {
            start,
            end,
            min: opt_round_1dp(stats.min),
            avg: opt_round_1dp(stats.avg),
            max: opt_round_1dp(stats.max),
        }
    }
}

/// Text body for a summary. `upper` is the end date, or the dataset's last
/// date for open-ended queries.
fn render_text(start: NaiveDate, upper: NaiveDate, stats: &models::TemperatureStats) -> String {
    format!(
        "Temperature data from {} to {}:<br/>\
         Minimum temperature: {} °F<br/>\
         Average temperature: {} °F<br/>\
         Maximum temperature: {} °F",
        start,
        upper,
        display_1dp(stats.min),
        display_1dp(stats.avg),
        display_1dp(stats.max),
    )
}

async fn summarize(
    state: &AppState,
    start: NaiveDate,
    end: Option<NaiveDate>,
    format: SummaryFormat,
) -> Result<Response, AppError> {
    let stats = {
        let mut conn = state.pool.acquire().await?;
        queries::temperature_stats(&mut conn, start, end).await?
    };
    tracing::debug!("temperature stats {}..{:?}: {:?}", start, end, stats);

    Ok(match format {
        SummaryFormat::Json => Json(TemperatureSummary::new(start, end, stats)).into_response(),
        SummaryFormat::Text => {
            let upper = end.unwrap_or(state.dataset.reference_date);
            Html(render_text(start, upper, &stats)).into_response()
        }
    })
}

/// Temperature summary from a start date through the end of the dataset.
#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    tag = "Temperature",
    params(
        ("start" = String, Path, description = "Start date, YYYY-MM-DD"),
        SummaryQuery,
    ),
    responses(
        (status = 200, description = "Summary as text, or JSON with format=json", body = TemperatureSummary),
        (status = 400, description = "Malformed date", body = ErrorResponse),
        (status = 500, description = "Dataset unavailable", body = ErrorResponse),
    )
)]
pub async fn summary_from(
    State(state): State<AppState>,
    Path(start): Path<String>,
    Query(query): Query<SummaryQuery>,
) -> Result<Response, AppError> {
    let start = parse_iso_date(&start)?;
    summarize(&state, start, None, query.format).await
}

/// Temperature summary between two dates, both inclusive.
///
/// A start after the end is an empty range, not an error.
#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    tag = "Temperature",
    params(
        ("start" = String, Path, description = "Start date, YYYY-MM-DD"),
        ("end" = String, Path, description = "End date, YYYY-MM-DD"),
        SummaryQuery,
    ),
    responses(
        (status = 200, description = "Summary as text, or JSON with format=json", body = TemperatureSummary),
        (status = 400, description = "Malformed date", body = ErrorResponse),
        (status = 500, description = "Dataset unavailable", body = ErrorResponse),
    )
)]
pub async fn summary_between(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
    Query(query): Query<SummaryQuery>,
) -> Result<Response, AppError> {
    let start = parse_iso_date(&start)?;
    let end = parse_iso_date(&end)?;
    summarize(&state, start, Some(end), query.format).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_render_text_labels_match_values() {
        let stats = models::TemperatureStats {
            min: Some(56.0),
            avg: Some(74.59058295964125),
            max: Some(87.0),
        };

        let text = render_text(date(2016, 8, 23), date(2017, 8, 23), &stats);

        assert!(text.starts_with("Temperature data from 2016-08-23 to 2017-08-23:"));
        assert!(text.contains("Minimum temperature: 56.0 °F"));
        assert!(text.contains("Average temperature: 74.6 °F"));
        assert!(text.contains("Maximum temperature: 87.0 °F"));
    }

    #[test]
    fn test_render_text_empty_range() {
        let stats = models::TemperatureStats {
            min: None,
            avg: None,
            max: None,
        };

        let text = render_text(date(2017, 8, 23), date(2017, 1, 1), &stats);

        assert!(text.contains("Minimum temperature: null"));
        assert!(text.contains("Average temperature: null"));
        assert!(text.contains("Maximum temperature: null"));
    }

    #[test]
    fn test_summary_rounds_values() {
        let stats = models::TemperatureStats {
            min: Some(61.04),
            avg: Some(70.2666),
            max: Some(79.96),
        };

        let summary = TemperatureSummary::new(date(2017, 1, 1), None, stats);

        assert_eq!(summary.min, Some(61.0));
        assert_eq!(summary.avg, Some(70.3));
        assert_eq!(summary.max, Some(80.0));
        assert_eq!(summary.end, None);
    }

    #[test]
    fn test_summary_format_defaults_to_text() {
        assert_eq!(SummaryQuery::default().format, SummaryFormat::Text);
    }
}
