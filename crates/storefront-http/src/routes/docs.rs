//! API documentation endpoints, served on the tenant-guard exclusion
//! list so clients can discover the API without a tenant header.

use axum::Json;
use axum::response::Html;
use serde_json::json;

/// `GET /v3/api-docs` — a minimal OpenAPI 3 document describing the
/// REST surface.
pub async fn api_docs() -> Json<serde_json::Value> {
    Json(json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Storefront API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Multi-tenant e-commerce backend. Every request \
                outside the documented public paths must carry an \
                X-Tenant-ID header with a canonical UUID."
        },
        "paths": {
            "/api/v1/brands": {},
            "/api/v1/brands/{id}": {},
            "/api/v1/categories": {},
            "/api/v1/categories/{id}": {},
            "/api/v1/categories/{id}/children": {},
            "/api/v1/products": {},
            "/api/v1/products/{id}": {},
            "/api/v1/products/{id}/variants": {},
            "/api/v1/variants/{id}": {},
            "/api/v1/showcase/products": {},
            "/api/v1/showcase/products/{id}": {},
            "/api/v1/carts": {},
            "/api/v1/carts/{id}": {},
            "/api/v1/carts/{id}/items": {},
            "/api/v1/carts/{id}/items/{itemId}": {},
            "/api/v1/orders": {},
            "/api/v1/orders/{id}": {},
            "/api/v1/orders/{id}/confirm": {},
            "/api/v1/orders/{id}/cancel": {},
            "/api/v1/orders/{id}/finalize": {},
            "/api/v1/customers": {},
            "/api/v1/customers/{id}": {},
            "/api/v1/stock": {},
            "/api/v1/stock/{variantId}": {},
            "/api/v1/stock/{variantId}/adjust": {},
            "/health": {}
        }
    }))
}

/// `GET /swagger-ui/index.html` — a tiny static page pointing at the
/// OpenAPI document.
pub async fn swagger_ui() -> Html<&'static str> {
    Html(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><title>Storefront API</title></head>\n\
         <body>\n\
         <h1>Storefront API</h1>\n\
         <p>The OpenAPI document is served at \
         <a href=\"/v3/api-docs\">/v3/api-docs</a>.</p>\n\
         </body>\n\
         </html>\n",
    )
}
