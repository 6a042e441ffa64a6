//! Centralized error-to-status translation.
//!
//! Every handler returns `Result<_, ApiError>`; the single
//! `IntoResponse` impl below decides the status code and the JSON
//! body, so no handler builds error responses by hand.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use storefront_core::StorefrontError;
use tracing::error;

/// JSON error body: `{"error": "<message>"}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Transport-layer wrapper around the domain error.
#[derive(Debug)]
pub struct ApiError(pub StorefrontError);

impl From<StorefrontError> for ApiError {
    fn from(err: StorefrontError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            StorefrontError::Validation { message } => (StatusCode::BAD_REQUEST, message),
            // Duplicate slug/SKU/email surface as 400, not 409.
            StorefrontError::AlreadyExists { entity } => (
                StatusCode::BAD_REQUEST,
                format!("{entity} already exists"),
            ),
            StorefrontError::TenantContext => (
                StatusCode::BAD_REQUEST,
                format!("{} header is required", crate::tenant::TENANT_HEADER),
            ),
            StorefrontError::NotFound { entity, id } => (
                StatusCode::NOT_FOUND,
                format!("{entity} not found: {id}"),
            ),
            other => {
                // Log the detail; the client gets a generic message.
                error!(error = %other, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let response =
            ApiError(StorefrontError::validation("Price must be greater than zero"))
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = ApiError(StorefrontError::not_found("product", "abc")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn database_maps_to_500() {
        let response =
            ApiError(StorefrontError::Database("connection refused".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
