//! Tenant isolation tests: aggregates created under tenant A must
//! never be visible to, or mutable by, calls scoped to tenant B.
//! Quantified over every tenant-scoped resource type.

use rust_decimal::Decimal;
use storefront_core::models::brand::CreateBrand;
use storefront_core::models::cart::CreateCart;
use storefront_core::models::customer::CreateCustomer;
use storefront_core::models::product::CreateProduct;
use storefront_core::models::stock::CreateStockLevel;
use storefront_core::repository::{
    BrandRepository, CartRepository, CustomerRepository, OrderDraft, OrderDraftItem,
    OrderRepository, Pagination, ProductRepository, StockRepository,
};
use storefront_core::StorefrontError;
use storefront_db::repository::{
    SurrealBrandRepository, SurrealCartRepository, SurrealCustomerRepository,
    SurrealOrderRepository, SurrealProductRepository, SurrealStockRepository,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

/// Helper: spin up in-memory DB, run migrations, and mint two tenants.
async fn setup() -> (Surreal<surrealdb::engine::local::Db>, Uuid, Uuid) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    storefront_db::run_migrations(&db).await.unwrap();
    (db, Uuid::new_v4(), Uuid::new_v4())
}

#[tokio::test]
async fn brands_are_isolated_between_tenants() {
    let (db, tenant_a, tenant_b) = setup().await;
    let repo = SurrealBrandRepository::new(db);

    let brand = repo
        .create(CreateBrand {
            tenant_id: tenant_a,
            name: "Dell".into(),
            description: None,
        })
        .await
        .unwrap();

    // Tenant B sees nothing: not in lists, not by id, not mutable.
    let page = repo.list(tenant_b, Pagination::default()).await.unwrap();
    assert_eq!(page.total, 0);

    let err = repo.get_by_id(tenant_b, brand.id).await.unwrap_err();
    assert!(matches!(err, StorefrontError::NotFound { .. }));

    repo.delete(tenant_b, brand.id).await.unwrap();
    // Still present for tenant A — the cross-tenant delete matched nothing.
    assert_eq!(repo.get_by_id(tenant_a, brand.id).await.unwrap().id, brand.id);
}

#[tokio::test]
async fn products_and_slugs_are_isolated_between_tenants() {
    let (db, tenant_a, tenant_b) = setup().await;
    let repo = SurrealProductRepository::new(db);

    repo.create(CreateProduct {
        tenant_id: tenant_a,
        name: "Notebook Dell".into(),
        slug: "notebook-dell".into(),
        description: None,
        brand_id: None,
        category_id: None,
        tags: vec![],
    })
    .await
    .unwrap();

    assert!(repo.slug_exists(tenant_a, "notebook-dell").await.unwrap());
    // The same slug is free under another tenant.
    assert!(!repo.slug_exists(tenant_b, "notebook-dell").await.unwrap());
    assert!(repo.get_by_slug(tenant_b, "notebook-dell").await.is_err());
}

#[tokio::test]
async fn carts_and_orders_are_isolated_between_tenants() {
    let (db, tenant_a, tenant_b) = setup().await;
    let cart_repo = SurrealCartRepository::new(db.clone());
    let order_repo = SurrealOrderRepository::new(db);

    let cart = cart_repo
        .create(CreateCart {
            tenant_id: tenant_a,
            customer_id: None,
        })
        .await
        .unwrap();
    assert!(cart_repo.get_by_id(tenant_b, cart.id).await.is_err());

    let order = order_repo
        .create(OrderDraft {
            tenant_id: tenant_a,
            cart_id: cart.id,
            customer_id: Uuid::new_v4(),
            items: vec![OrderDraftItem {
                product_id: Uuid::new_v4(),
                variant_id: Uuid::new_v4(),
                quantity: 1,
                unit_price: Decimal::new(9999, 2),
                currency: "BRL".into(),
            }],
            total: Decimal::new(9999, 2),
            currency: "BRL".into(),
        })
        .await
        .unwrap();

    assert!(order_repo.get_by_id(tenant_b, order.id).await.is_err());
    let page = order_repo.list(tenant_b, Pagination::default()).await.unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn customers_and_stock_are_isolated_between_tenants() {
    let (db, tenant_a, tenant_b) = setup().await;
    let customer_repo = SurrealCustomerRepository::new(db.clone());
    let stock_repo = SurrealStockRepository::new(db);

    let customer = customer_repo
        .create(CreateCustomer {
            tenant_id: tenant_a,
            name: "Alice".into(),
            email: "alice@example.com".into(),
            password: "SuperSecret123!".into(),
        })
        .await
        .unwrap();

    assert!(customer_repo.get_by_id(tenant_b, customer.id).await.is_err());
    // Same email is free under another tenant.
    assert!(
        !customer_repo
            .email_exists(tenant_b, "alice@example.com")
            .await
            .unwrap()
    );

    let variant_id = Uuid::new_v4();
    stock_repo
        .upsert(CreateStockLevel {
            tenant_id: tenant_a,
            variant_id,
            quantity: 10,
        })
        .await
        .unwrap();

    assert!(stock_repo.get_by_variant(tenant_b, variant_id).await.is_err());
}
