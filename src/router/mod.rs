//! Routing module for the product catalog application

use crate::catalog::state::SharedState;
use axum::{
    body::Body,
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::Instrument;
use uuid::Uuid;

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Creates and configures the application router with all routes and middleware
pub fn create_app_router(state: SharedState) -> Router {
    // Middleware: Log requests inside a span tagged with a request id
    let log_layer = axum::middleware::from_fn(|req: Request<Body>, next: Next| async move {
        let request_id = req
            .headers()
            .get(&REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string());

        let span = tracing::info_span!(
            "request",
            id = %request_id,
            method = %req.method(),
            uri = %req.uri(),
        );

        async move {
            tracing::info!("REQ");
            let mut res = next.run(req).await;
            if !res.status().is_success() {
                tracing::warn!(status = %res.status(), "RES (Error)");
            }
            if let Ok(value) = HeaderValue::from_str(&request_id) {
                res.headers_mut().insert(REQUEST_ID_HEADER, value);
            }
            res
        }
        .instrument(span)
        .await
    });

    // Middleware: CORS (any origin, method and header)
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Routes
    Router::new()
        .merge(crate::catalog::routes(&state))
        .layer(log_layer)
        .layer(cors_layer)
        .with_state(state)
}
