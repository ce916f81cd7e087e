//! Catalog error type and its HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures a product provider or the list handler can report
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    #[error("failed to serialize catalog: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CatalogError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            CatalogError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "catalog_unavailable"),
            CatalogError::Serialization(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "serialization_error")
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        tracing::error!(error = %self, "product list request failed");

        (
            status,
            Json(json!({
                "error": code,
                "message": self.to_string(),
            })),
        )
            .into_response()
    }
}
