//! End-to-end API tests over the real router with in-memory SurrealDB.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
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

fn request(method: Method, uri: &str, tenant: Uuid, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(TENANT_HEADER, tenant.to_string());
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn brand_crud_over_http() {
    let app = app().await;
    let tenant = Uuid::new_v4();

    let (status, brand) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/brands",
            tenant,
            Some(json!({"name": "Dell", "description": "Computers"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = brand["id"].as_str().unwrap().to_string();

    let (status, fetched) = send(
        &app,
        request(Method::GET, &format!("/api/v1/brands/{id}"), tenant, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Dell");

    let (status, updated) = send(
        &app,
        request(
            Method::PUT,
            &format!("/api/v1/brands/{id}"),
            tenant,
            Some(json!({"name": "Dell Inc"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Dell Inc");

    let (status, _) = send(
        &app,
        request(Method::DELETE, &format!("/api/v1/brands/{id}"), tenant, None),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        request(Method::GET, &format!("/api/v1/brands/{id}"), tenant, None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_brand_name_is_a_400() {
    let app = app().await;
    let tenant = Uuid::new_v4();

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/brands",
            tenant,
            Some(json!({"name": "  "})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Brand name"));
}

#[tokio::test]
async fn duplicate_slug_fails_the_second_time_with_400() {
    let app = app().await;
    let tenant = Uuid::new_v4();
    let product = json!({"name": "Notebook Dell XPS 13", "slug": "notebook-dell"});

    let (status, _) = send(
        &app,
        request(Method::POST, "/api/v1/products", tenant, Some(product.clone())),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        request(Method::POST, "/api/v1/products", tenant, Some(product)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("notebook-dell"));
}

#[tokio::test]
async fn variant_with_promo_above_price_is_rejected_and_not_persisted() {
    let app = app().await;
    let tenant = Uuid::new_v4();

    let (_, product) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/products",
            tenant,
            Some(json!({"name": "Notebook Dell XPS 13", "slug": "notebook-dell"})),
        ),
    )
    .await;
    let product_id = product["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            &format!("/api/v1/products/{product_id}/variants"),
            tenant,
            Some(json!({
                "skuCode": "XPS13-16GB-BLK",
                "price": "99.99",
                "promotionalPrice": "199.99",
                "currency": "BRL"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Promotional price"));

    // Nothing reached persistence.
    let (status, variants) = send(
        &app,
        request(
            Method::GET,
            &format!("/api/v1/products/{product_id}/variants"),
            tenant,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(variants.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn showcase_page_size_above_100_is_a_400() {
    let app = app().await;
    let tenant = Uuid::new_v4();

    let (status, _) = send(
        &app,
        request(
            Method::GET,
            "/api/v1/showcase/products?page=0&size=150",
            tenant,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        request(
            Method::GET,
            "/api/v1/showcase/products?page=0&size=100",
            tenant,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn tenants_do_not_see_each_other() {
    let app = app().await;
    let tenant_a = Uuid::new_v4();
    let tenant_b = Uuid::new_v4();

    let (_, brand) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/brands",
            tenant_a,
            Some(json!({"name": "Dell"})),
        ),
    )
    .await;
    let id = brand["id"].as_str().unwrap().to_string();

    let (status, listing) = send(
        &app,
        request(Method::GET, "/api/v1/brands", tenant_b, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["total"], 0);

    let (status, _) = send(
        &app,
        request(Method::GET, &format!("/api/v1/brands/{id}"), tenant_b, None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn customer_response_never_exposes_the_password_hash() {
    let app = app().await;
    let tenant = Uuid::new_v4();

    let (status, customer) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/customers",
            tenant,
            Some(json!({
                "name": "Alice",
                "email": "alice@example.com",
                "password": "SuperSecret123!"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(customer["email"], "alice@example.com");
    assert!(customer.get("passwordHash").is_none());
    assert!(customer.get("password").is_none());

    // Duplicate email within the tenant is a 400.
    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/customers",
            tenant,
            Some(json!({
                "name": "Alice Again",
                "email": "alice@example.com",
                "password": "OtherSecret123!"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cart_to_order_flow_over_http() {
    let app = app().await;
    let tenant = Uuid::new_v4();
    let customer_id = Uuid::new_v4();

    let (status, cart) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/carts",
            tenant,
            Some(json!({"customerId": customer_id})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let cart_id = cart["id"].as_str().unwrap().to_string();

    let (status, cart) = send(
        &app,
        request(
            Method::POST,
            &format!("/api/v1/carts/{cart_id}/items"),
            tenant,
            Some(json!({
                "productId": Uuid::new_v4(),
                "variantId": Uuid::new_v4(),
                "quantity": 2,
                "unitPrice": "99.90",
                "currency": "BRL"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);

    let (status, order) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/orders",
            tenant,
            Some(json!({"cartId": cart_id, "customerId": customer_id})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["status"], "Pending");
    assert_eq!(order["total"], "199.80");
    let order_id = order["id"].as_str().unwrap().to_string();

    // The cart is consumed.
    let (_, cart) = send(
        &app,
        request(Method::GET, &format!("/api/v1/carts/{cart_id}"), tenant, None),
    )
    .await;
    assert_eq!(cart["status"], "Converted");

    let (status, order) = send(
        &app,
        request(
            Method::POST,
            &format!("/api/v1/orders/{order_id}/confirm"),
            tenant,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], "Confirmed");

    let (status, listing) = send(
        &app,
        request(
            Method::GET,
            "/api/v1/orders?status=confirmed",
            tenant,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["total"], 1);

    // An empty cart cannot become an order.
    let (_, empty_cart) = send(
        &app,
        request(Method::POST, "/api/v1/carts", tenant, Some(json!({}))),
    )
    .await;
    let empty_id = empty_cart["id"].as_str().unwrap();
    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/orders",
            tenant,
            Some(json!({"cartId": empty_id, "customerId": customer_id})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Cart is empty");
}

#[tokio::test]
async fn stock_endpoints_round_trip() {
    let app = app().await;
    let tenant = Uuid::new_v4();
    let variant_id = Uuid::new_v4();

    let (status, level) = send(
        &app,
        request(
            Method::PUT,
            &format!("/api/v1/stock/{variant_id}"),
            tenant,
            Some(json!({"quantity": 10})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(level["quantity"], 10);

    let (status, level) = send(
        &app,
        request(
            Method::POST,
            &format!("/api/v1/stock/{variant_id}/adjust"),
            tenant,
            Some(json!({"delta": -4})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(level["quantity"], 6);

    // Overdraw is a 400.
    let (status, _) = send(
        &app,
        request(
            Method::POST,
            &format!("/api/v1/stock/{variant_id}/adjust"),
            tenant,
            Some(json!({"delta": -100})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
