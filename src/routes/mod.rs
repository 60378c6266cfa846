pub mod climate;
pub mod health;
pub mod index;
pub mod temperature;

use axum::http::Uri;
use axum::{routing::get, Router};
use sqlx::SqlitePool;

use crate::config::DatasetConfig;
use crate::errors::AppError;

/// Shared application state. The pool is the only shared resource; each
/// request borrows its own connection from it.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) pool: SqlitePool,
    pub(crate) dataset: DatasetConfig,
}

/// Build the API router. Static segments take priority over `:start`.
pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::welcome))
        .route("/api/v1.0/health", get(health::health_check))
        .route("/api/v1.0/precipitation", get(climate::precipitation))
        .route("/api/v1.0/stations", get(climate::stations))
        .route("/api/v1.0/tobs", get(climate::tobs))
        .route("/api/v1.0/:start", get(temperature::summary_from))
        .route("/api/v1.0/:start/:end", get(temperature::summary_between))
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt; // for oneshot

    use crate::db::fixtures::{empty_pool, seeded_pool};

    async fn app() -> Router {
        router(AppState {
            pool: seeded_pool().await,
            dataset: DatasetConfig::default(),
        })
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = get_body(app, uri).await;
        let json = serde_json::from_str(&body)
            .unwrap_or_else(|e| panic!("{uri}: body is not JSON ({e}): {body}"));
        (status, json)
    }

    #[tokio::test]
    async fn test_index() {
        let (status, body) = get_body(app().await, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with("Available Routes:"));
    }

    #[tokio::test]
    async fn test_precipitation_json_shape() {
        let (status, json) = get_json(app().await, "/api/v1.0/precipitation").await;

        assert_eq!(status, StatusCode::OK);
        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0]["date"], "2016-08-23");
        assert_eq!(rows[0]["prcp"], 0.08);
        assert!(rows.iter().any(|r| r["prcp"].is_null()));
    }

    #[tokio::test]
    async fn test_stations_route() {
        let (status, json) = get_json(app().await, "/api/v1.0/stations").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!(["USC00519397", "USC00519281", "USC00513117"])
        );
    }

    #[tokio::test]
    async fn test_tobs_route() {
        let (status, json) = get_json(app().await, "/api/v1.0/tobs").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!([
                { "date": "2016-08-20", "tobs": 79.0 },
                { "date": "2017-01-15", "tobs": 65.0 },
                { "date": "2017-08-18", "tobs": 79.0 },
            ])
        );
    }

    #[tokio::test]
    async fn test_static_routes_win_over_start_param() {
        // "stations" would be a malformed date if it reached the :start route.
        let (status, _) = get_body(app().await, "/api/v1.0/stations").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_start_summary_text() {
        let (status, body) = get_body(app().await, "/api/v1.0/2017-08-18").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Temperature data from 2017-08-18 to 2017-08-23:"));
        assert!(body.contains("Minimum temperature: 76.0"));
        assert!(body.contains("Average temperature: 78.7"));
        assert!(body.contains("Maximum temperature: 81.0"));
    }

    #[tokio::test]
    async fn test_start_summary_json() {
        let (status, json) = get_json(app().await, "/api/v1.0/2017-08-18?format=json").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!({
                "start": "2017-08-18",
                "end": null,
                "min": 76.0,
                "avg": 78.7,
                "max": 81.0,
            })
        );
    }

    #[tokio::test]
    async fn test_single_day_range() {
        let (status, json) = get_json(
            app().await,
            "/api/v1.0/2017-08-23/2017-08-23?format=json",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["min"], 76.0);
        assert_eq!(json["avg"], 78.5);
        assert_eq!(json["max"], 81.0);
    }

    #[tokio::test]
    async fn test_single_reading_day_is_flat() {
        let (_, json) = get_json(
            app().await,
            "/api/v1.0/2017-04-02/2017-04-02?format=json",
        )
        .await;

        assert_eq!(json["min"], 70.0);
        assert_eq!(json["avg"], 70.0);
        assert_eq!(json["max"], 70.0);
    }

    #[tokio::test]
    async fn test_start_after_end_is_null_not_error() {
        let app = app().await;

        let (status, body) = get_body(app.clone(), "/api/v1.0/2017-08-23/2017-01-01").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Minimum temperature: null"));

        let (status, json) = get_json(app, "/api/v1.0/2017-08-23/2017-01-01?format=json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["min"].is_null());
        assert!(json["avg"].is_null());
        assert!(json["max"].is_null());
    }

    #[tokio::test]
    async fn test_start_on_empty_dataset() {
        let app = router(AppState {
            pool: empty_pool().await,
            dataset: DatasetConfig::default(),
        });

        let (status, body) = get_body(app, "/api/v1.0/2010-01-01").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Average temperature: null"));
    }

    #[tokio::test]
    async fn test_malformed_start_is_bad_request() {
        let (status, json) = get_json(app().await, "/api/v1.0/2017.08.23").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("2017.08.23"));
    }

    #[tokio::test]
    async fn test_malformed_end_is_bad_request() {
        let (status, _) = get_body(app().await, "/api/v1.0/2017-01-01/2017-02-30").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_slash_separated_date_is_client_error() {
        let app = app().await;

        // Two segments: matches :start/:end, and "2017" alone is not a date.
        let (status, _) = get_body(app.clone(), "/api/v1.0/2017/08").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // Three segments: no route.
        let (status, json) = get_json(app, "/api/v1.0/2017/08/23").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_format_is_rejected() {
        let (status, _) = get_body(app().await, "/api/v1.0/2017-08-18?format=xml").await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_health_route() {
        let (status, json) = get_json(app().await, "/api/v1.0/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["stations"], 3);
    }
}
