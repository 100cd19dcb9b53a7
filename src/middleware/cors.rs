use axum::http::header;
use tower_http::cors::{Any, CorsLayer};

/// Open CORS for the dashboard front-end. `Content-Disposition` is exposed so
/// the browser can read the report filename.
pub fn dashboard_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any)
        .expose_headers([header::CONTENT_DISPOSITION])
}
