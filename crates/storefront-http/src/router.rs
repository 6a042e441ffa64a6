//! Router assembly.

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post, put};
use surrealdb::Connection;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::routes;
use crate::state::AppState;
use crate::tenant::{self, TenantGuardConfig};

/// Build the full API router.
///
/// The tenant guard wraps the whole router (including the fallback),
/// so unmatched paths still go through header validation unless they
/// are on the exclusion list. Documentation and health endpoints are
/// excluded by default.
pub fn api_router<C: Connection>(state: AppState<C>, guard: TenantGuardConfig) -> Router {
    let guard = Arc::new(guard);

    Router::new()
        .route(
            "/api/v1/brands",
            post(routes::brands::create::<C>).get(routes::brands::list::<C>),
        )
        .route(
            "/api/v1/brands/{id}",
            get(routes::brands::get::<C>)
                .put(routes::brands::update::<C>)
                .delete(routes::brands::delete::<C>),
        )
        .route(
            "/api/v1/categories",
            post(routes::categories::create::<C>).get(routes::categories::list::<C>),
        )
        .route(
            "/api/v1/categories/{id}",
            get(routes::categories::get::<C>)
                .put(routes::categories::update::<C>)
                .delete(routes::categories::delete::<C>),
        )
        .route(
            "/api/v1/categories/{id}/children",
            get(routes::categories::children::<C>),
        )
        .route(
            "/api/v1/products",
            post(routes::products::create::<C>).get(routes::products::list::<C>),
        )
        .route(
            "/api/v1/products/{id}",
            get(routes::products::get::<C>)
                .put(routes::products::update::<C>)
                .delete(routes::products::delete::<C>),
        )
        .route(
            "/api/v1/products/{id}/variants",
            post(routes::products::create_variant::<C>).get(routes::products::list_variants::<C>),
        )
        .route(
            "/api/v1/variants/{id}",
            get(routes::products::get_variant::<C>)
                .put(routes::products::update_variant::<C>)
                .delete(routes::products::delete_variant::<C>),
        )
        .route("/api/v1/showcase/products", get(routes::showcase::list::<C>))
        .route(
            "/api/v1/showcase/products/{id}",
            get(routes::showcase::details::<C>),
        )
        .route(
            "/api/v1/carts",
            post(routes::carts::create::<C>).get(routes::carts::list::<C>),
        )
        .route(
            "/api/v1/carts/{id}",
            get(routes::carts::get::<C>).delete(routes::carts::delete::<C>),
        )
        .route(
            "/api/v1/carts/{id}/items",
            post(routes::carts::add_item::<C>).delete(routes::carts::clear::<C>),
        )
        .route(
            "/api/v1/carts/{id}/items/{itemId}",
            put(routes::carts::update_item::<C>).delete(routes::carts::remove_item::<C>),
        )
        .route(
            "/api/v1/orders",
            post(routes::orders::create::<C>).get(routes::orders::list::<C>),
        )
        .route("/api/v1/orders/{id}", get(routes::orders::get::<C>))
        .route("/api/v1/orders/{id}/confirm", post(routes::orders::confirm::<C>))
        .route("/api/v1/orders/{id}/cancel", post(routes::orders::cancel::<C>))
        .route(
            "/api/v1/orders/{id}/finalize",
            post(routes::orders::finalize::<C>),
        )
        .route(
            "/api/v1/customers",
            post(routes::customers::create::<C>).get(routes::customers::list::<C>),
        )
        .route(
            "/api/v1/customers/{id}",
            get(routes::customers::get::<C>)
                .put(routes::customers::update::<C>)
                .delete(routes::customers::delete::<C>),
        )
        .route("/api/v1/stock", get(routes::stock::list::<C>))
        .route(
            "/api/v1/stock/{variantId}",
            get(routes::stock::get::<C>).put(routes::stock::set::<C>),
        )
        .route(
            "/api/v1/stock/{variantId}/adjust",
            post(routes::stock::adjust::<C>),
        )
        .route("/health", get(health))
        .route("/v3/api-docs", get(routes::docs::api_docs))
        .route("/swagger-ui/index.html", get(routes::docs::swagger_ui))
        .layer(middleware::from_fn_with_state(guard, tenant::require_tenant))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}
