//! Tenant guard contract tests: header validation, exclusion paths,
//! and CORS preflight behavior, driven through the real router.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use storefront_http::{AppState, TenantGuardConfig, api_router, TENANT_HEADER};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use tower::ServiceExt;
use uuid::Uuid;

async fn app() -> Router {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    storefront_db::run_migrations(&db).await.unwrap();
    api_router(AppState::new(db, None), TenantGuardConfig::default())
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn missing_tenant_header_is_rejected_with_400() {
    let response = app()
        .await
        .oneshot(
            Request::builder()
                .uri("/api/v1/brands")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "X-Tenant-ID header is required");
}

#[tokio::test]
async fn blank_tenant_header_is_rejected_with_400() {
    let response = app()
        .await
        .oneshot(
            Request::builder()
                .uri("/api/v1/brands")
                .header(TENANT_HEADER, "   ")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "X-Tenant-ID header is required");
}

#[tokio::test]
async fn non_uuid_tenant_header_is_rejected_with_400() {
    let response = app()
        .await
        .oneshot(
            Request::builder()
                .uri("/api/v1/brands")
                .header(TENANT_HEADER, "not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "X-Tenant-ID header is invalid");
}

#[tokio::test]
async fn valid_tenant_header_reaches_the_handler() {
    let response = app()
        .await
        .oneshot(
            Request::builder()
                .uri("/api/v1/brands")
                .header(TENANT_HEADER, Uuid::new_v4().to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 0);
}

#[tokio::test]
async fn swagger_ui_bypasses_tenant_validation() {
    let response = app()
        .await
        .oneshot(
            Request::builder()
                .uri("/swagger-ui/index.html")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // No tenant header, still not a 400.
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn api_docs_and_health_bypass_tenant_validation() {
    let app = app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/v3/api-docs")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn cors_preflight_bypasses_tenant_validation() {
    let response = app()
        .await
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/v1/brands")
                .header("Origin", "https://shop.example.com")
                .header("Access-Control-Request-Method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_ne!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unmatched_excluded_path_falls_through_without_400() {
    let response = app()
        .await
        .oneshot(
            Request::builder()
                .uri("/public/banner.png")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Nothing serves /public/** here; the point is the guard does not
    // turn it into a tenant error.
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn extra_exclusions_from_config_are_honored() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    storefront_db::run_migrations(&db).await.unwrap();
    let app = api_router(
        AppState::new(db, None),
        TenantGuardConfig::default().exclude("/api/v1/showcase/**"),
    );

    // Showcase becomes publicly listable without a tenant header —
    // and then fails with 400 in the handler because the tenant
    // extension is absent, which keeps the error contract.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/showcase/products")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "X-Tenant-ID header is required");
}
