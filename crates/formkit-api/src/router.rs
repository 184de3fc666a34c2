//! Route table and middleware stack.

use axum::body::Body;
use axum::http::{HeaderValue, Request};
use axum::routing::get;
use axum::Router;
use formkit_core::logging::request_span;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the application router with CORS and request tracing applied.
///
/// An empty `cors_origins` list allows any origin.
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/form-schema", get(handlers::form_schema))
        .route(
            "/api/submissions",
            get(handlers::list_submissions).post(handlers::create_submission),
        )
        .route("/api/submissions/export", get(handlers::export_submissions))
        .route(
            "/api/submissions/{id}",
            get(handlers::get_submission)
                .put(handlers::update_submission)
                .delete(handlers::delete_submission),
        )
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                request_span(req.method().as_str(), req.uri().path())
            }),
        )
        .layer(cors_layer(cors_origins))
}

/// Builds the CORS layer. Origins that are not valid header values are
/// skipped with a warning.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}
