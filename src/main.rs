// Climate API v0.1
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod db;
mod errors;
mod helpers;
mod routes;

use config::AppConfig;
use routes::AppState;

/// Climate API — OpenAPI specification.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Climate API",
        version = "0.1.0",
        description = "Read-only climate analysis over a historical weather station dataset. \
            Serves the last year of precipitation, the station list, the most active \
            station's temperature observations, and min/avg/max temperature summaries \
            for arbitrary date ranges.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Index", description = "Route listing"),
        (name = "Health", description = "Service health check"),
        (name = "Climate", description = "Precipitation, stations and temperature observations"),
        (name = "Temperature", description = "Temperature summaries over date ranges"),
    ),
    paths(
        routes::index::welcome,
        routes::health::health_check,
        routes::climate::precipitation,
        routes::climate::stations,
        routes::climate::tobs,
        routes::temperature::summary_from,
        routes::temperature::summary_between,
    ),
    components(
        schemas(
            routes::health::HealthResponse,
            routes::climate::PrecipitationEntry,
            routes::climate::TobsEntry,
            routes::temperature::TemperatureSummary,
            routes::temperature::SummaryFormat,
            errors::ErrorResponse,
        )
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "climate_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    tracing::info!(
        "Dataset window: precipitation since {}, tobs since {} for station id {}",
        config.dataset.precipitation_since(),
        config.dataset.tobs_since(),
        config.dataset.tobs_station_id
    );

    // Read-only pool; each request checks out its own connection
    let pool = db::connect(&config.database_url, config.db_max_connections)
        .await
        .expect("Failed to open dataset");

    tracing::info!("Opened dataset at {}", config.database_url);

    let state = AppState {
        pool,
        dataset: config.dataset,
    };

    // CORS — read-only API, restrict methods to GET
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET])
        .allow_headers(Any);

    let app = routes::router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("API server listening on {}", addr);
    tracing::info!(
        "Swagger UI available at http://localhost:{}/swagger-ui/",
        config.port
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind TCP listener");
    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}
