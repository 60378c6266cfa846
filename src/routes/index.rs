use axum::response::Html;

/// Route listing shown at the root.
pub(crate) const ROUTES: [&str; 5] = [
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
    "/api/v1.0/start",
    "/api/v1.0/start/end",
];

/// List all available API routes.
#[utoipa::path(
    get,
    path = "/",
    tag = "Index",
    responses(
        (status = 200, description = "HTML listing of the available routes", body = String, content_type = "text/html"),
    )
)]
pub async fn welcome() -> Html<String> {
    let mut body = String::from("Available Routes:<br/>");
    for route in ROUTES {
        body.push_str(route);
        body.push_str("<br/>");
    }
    body.push_str("Please note: Enter dates in the appropriate format: YYYY-MM-DD/YYYY-MM-DD");
    Html(body)
}
