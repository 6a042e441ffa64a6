//! Tenant ingress guard and request-scoped tenant identity.
//!
//! The guard validates the tenant header on every inbound request and
//! attaches the parsed [`TenantId`] to the request as an extension.
//! Handlers receive it through the extractor and pass the id
//! explicitly down the call chain — there is no ambient thread-local
//! to clear, so the binding cannot outlive its request.

use std::sync::Arc;

use axum::Json;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use storefront_core::StorefrontError;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{ApiError, ErrorBody};
use crate::path_pattern;

/// Header carrying the tenant identifier, as a canonical UUID string.
pub const TENANT_HEADER: &str = "X-Tenant-ID";

/// Paths that bypass tenant validation by default: API documentation
/// and health endpoints.
const DEFAULT_EXCLUDED_PATHS: &[&str] = &[
    "/v3/api-docs/**",
    "/swagger-ui/**",
    "/swagger-ui.html",
    "/swagger-resources/**",
    "/v2/api-docs",
    "/webjars/**",
    "/public/**",
    "/health",
];

/// The current request's tenant, extracted by the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantId(pub Uuid);

impl<S> FromRequestParts<S> for TenantId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantId>()
            .copied()
            // Reachable only if a tenant-scoped route was wired
            // outside the guard; surfaces as the same 400 contract.
            .ok_or(ApiError(StorefrontError::TenantContext))
    }
}

/// Guard configuration: exclusion patterns plus an optional context
/// path stripped before matching.
#[derive(Debug, Clone)]
pub struct TenantGuardConfig {
    excluded_paths: Vec<String>,
    context_path: String,
}

impl Default for TenantGuardConfig {
    fn default() -> Self {
        Self {
            excluded_paths: DEFAULT_EXCLUDED_PATHS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            context_path: String::new(),
        }
    }
}

impl TenantGuardConfig {
    /// Add an exclusion pattern (Ant-style) on top of the defaults.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let pattern = pattern.trim();
        if !pattern.is_empty() && !self.excluded_paths.iter().any(|p| p == pattern) {
            self.excluded_paths.push(pattern.to_string());
        }
        self
    }

    /// Set the deployment context path stripped before matching.
    pub fn with_context_path(mut self, context_path: impl Into<String>) -> Self {
        self.context_path = context_path.into();
        self
    }

    fn is_excluded(&self, path: &str) -> bool {
        let path = path_pattern::strip_context_path(path, &self.context_path);
        self.excluded_paths
            .iter()
            .any(|pattern| path_pattern::matches(pattern, path))
    }
}

/// The tenant guard middleware.
///
/// Excluded paths and CORS preflights pass through untouched. All
/// other requests must carry a valid UUID in the tenant header or are
/// rejected with 400 before any handler runs.
pub async fn require_tenant(
    State(config): State<Arc<TenantGuardConfig>>,
    mut request: Request,
    next: Next,
) -> Response {
    if config.is_excluded(request.uri().path()) || request.method() == Method::OPTIONS {
        debug!(
            method = %request.method(),
            path = %request.uri().path(),
            "Skipping tenant validation for excluded path"
        );
        return next.run(request).await;
    }

    let header = request
        .headers()
        .get(TENANT_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .unwrap_or("");

    if header.is_empty() {
        warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "Missing tenant header"
        );
        return bad_request(format!("{TENANT_HEADER} header is required"));
    }

    match Uuid::parse_str(header) {
        Ok(tenant_id) => {
            request.extensions_mut().insert(TenantId(tenant_id));
            next.run(request).await
        }
        Err(_) => {
            warn!(
                method = %request.method(),
                path = %request.uri().path(),
                header,
                "Invalid tenant header"
            );
            bad_request(format!("{TENANT_HEADER} header is invalid"))
        }
    }
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorBody { error: message })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_exclusions_cover_docs_and_health() {
        let config = TenantGuardConfig::default();
        assert!(config.is_excluded("/swagger-ui/index.html"));
        assert!(config.is_excluded("/v3/api-docs"));
        assert!(config.is_excluded("/v3/api-docs/catalog"));
        assert!(config.is_excluded("/health"));
        assert!(config.is_excluded("/public/banner.png"));
        assert!(!config.is_excluded("/api/v1/brands"));
    }

    #[test]
    fn extra_exclusions_are_appended_once() {
        let config = TenantGuardConfig::default()
            .exclude("/metrics")
            .exclude("  /metrics  ")
            .exclude("");
        assert!(config.is_excluded("/metrics"));
        assert_eq!(
            config
                .excluded_paths
                .iter()
                .filter(|p| p.as_str() == "/metrics")
                .count(),
            1
        );
    }

    #[test]
    fn context_path_is_stripped_before_matching() {
        let config = TenantGuardConfig::default().with_context_path("/catalog");
        assert!(config.is_excluded("/catalog/swagger-ui/index.html"));
        assert!(!config.is_excluded("/catalog/api/v1/brands"));
    }
}
