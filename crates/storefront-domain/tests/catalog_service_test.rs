//! Integration tests for the catalog service over in-memory SurrealDB
//! repositories.

use rust_decimal::Decimal;
use storefront_core::models::brand::CreateBrand;
use storefront_core::models::category::CreateCategory;
use storefront_core::models::product::{CreateProduct, CreateProductVariant};
use storefront_core::StorefrontError;
use storefront_db::repository::{
    SurrealBrandRepository, SurrealCategoryRepository, SurrealProductRepository,
};
use storefront_domain::CatalogService;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

type Db = surrealdb::engine::local::Db;
type Service = CatalogService<
    SurrealBrandRepository<Db>,
    SurrealCategoryRepository<Db>,
    SurrealProductRepository<Db>,
>;

/// Spin up in-memory DB, run migrations, build the service.
async fn setup() -> (Service, Uuid) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    storefront_db::run_migrations(&db).await.unwrap();

    let service = CatalogService::new(
        SurrealBrandRepository::new(db.clone()),
        SurrealCategoryRepository::new(db.clone()),
        SurrealProductRepository::new(db),
    );
    (service, Uuid::new_v4())
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn product_input(tenant_id: Uuid, slug: &str) -> CreateProduct {
    CreateProduct {
        tenant_id,
        name: "Notebook Dell XPS 13".into(),
        slug: slug.into(),
        description: None,
        brand_id: None,
        category_id: None,
        tags: vec![],
    }
}

fn variant_input(tenant_id: Uuid, product_id: Uuid) -> CreateProductVariant {
    CreateProductVariant {
        tenant_id,
        product_id,
        sku_code: "XPS13-16GB-BLK".into(),
        barcode: None,
        price: dec("4999.90"),
        promotional_price: None,
        currency: "BRL".into(),
        weight_kg: None,
        height_cm: None,
        width_cm: None,
        depth_cm: None,
    }
}

fn assert_validation(err: StorefrontError) {
    assert!(
        matches!(err, StorefrontError::Validation { .. }),
        "expected validation error, got: {err:?}"
    );
}

#[tokio::test]
async fn brand_name_rules_are_enforced() {
    let (service, tenant_id) = setup().await;

    let err = service
        .create_brand(CreateBrand {
            tenant_id,
            name: " ".into(),
            description: None,
        })
        .await
        .unwrap_err();
    assert_validation(err);

    let brand = service
        .create_brand(CreateBrand {
            tenant_id,
            name: "Dell".into(),
            description: None,
        })
        .await
        .unwrap();
    assert_eq!(brand.name, "Dell");
}

#[tokio::test]
async fn subcategory_requires_existing_parent() {
    let (service, tenant_id) = setup().await;

    let err = service
        .create_category(CreateCategory {
            tenant_id,
            name: "Notebooks".into(),
            description: None,
            parent_id: Some(Uuid::new_v4()),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StorefrontError::NotFound { .. }));
}

#[tokio::test]
async fn duplicate_slug_is_rejected() {
    let (service, tenant_id) = setup().await;

    service
        .create_product(product_input(tenant_id, "notebook-dell"))
        .await
        .unwrap();

    // Creating the same slug twice must fail the second time.
    let err = service
        .create_product(product_input(tenant_id, "notebook-dell"))
        .await
        .unwrap_err();
    assert_validation(err);
}

#[tokio::test]
async fn malformed_slug_is_rejected() {
    let (service, tenant_id) = setup().await;

    for slug in ["-notebook", "notebook-", "Notebook-Dell", "ab"] {
        let err = service
            .create_product(product_input(tenant_id, slug))
            .await
            .unwrap_err();
        assert_validation(err);
    }
}

#[tokio::test]
async fn variant_promotional_price_must_not_exceed_price() {
    let (service, tenant_id) = setup().await;
    let product = service
        .create_product(product_input(tenant_id, "notebook-dell"))
        .await
        .unwrap();

    // price 99.99 with promotional price 199.99 never reaches
    // persistence.
    let mut input = variant_input(tenant_id, product.id);
    input.price = dec("99.99");
    input.promotional_price = Some(dec("199.99"));
    let err = service.create_variant(input).await.unwrap_err();
    assert_validation(err);

    // The rejected attempt persisted nothing: the same SKU is still
    // free and a valid creation goes through.
    let variant = service
        .create_variant(variant_input(tenant_id, product.id))
        .await
        .unwrap();
    assert_eq!(variant.sku_code, "XPS13-16GB-BLK");

    // promo <= price is accepted.
    let mut ok = variant_input(tenant_id, product.id);
    ok.sku_code = "XPS13-32GB-BLK".into();
    ok.price = dec("199.99");
    ok.promotional_price = Some(dec("99.99"));
    let variant = service.create_variant(ok).await.unwrap();
    assert_eq!(variant.promotional_price, Some(dec("99.99")));
}

#[tokio::test]
async fn variant_sku_rules_are_enforced() {
    let (service, tenant_id) = setup().await;
    let product = service
        .create_product(product_input(tenant_id, "notebook-dell"))
        .await
        .unwrap();

    for sku in ["-XPS13", "XPS13-", "xps13-16gb"] {
        let mut input = variant_input(tenant_id, product.id);
        input.sku_code = sku.into();
        let err = service.create_variant(input).await.unwrap_err();
        assert_validation(err);
    }

    // Valid SKU goes through; a duplicate is then rejected.
    service
        .create_variant(variant_input(tenant_id, product.id))
        .await
        .unwrap();
    let err = service
        .create_variant(variant_input(tenant_id, product.id))
        .await
        .unwrap_err();
    assert_validation(err);
}

#[tokio::test]
async fn variant_dimensions_must_not_be_negative() {
    let (service, tenant_id) = setup().await;
    let product = service
        .create_product(product_input(tenant_id, "notebook-dell"))
        .await
        .unwrap();

    let mut input = variant_input(tenant_id, product.id);
    input.weight_kg = Some(-1.0);
    let err = service.create_variant(input).await.unwrap_err();
    assert_validation(err);
}

#[tokio::test]
async fn product_with_unknown_brand_is_rejected() {
    let (service, tenant_id) = setup().await;

    let mut input = product_input(tenant_id, "notebook-dell");
    input.brand_id = Some(Uuid::new_v4());
    let err = service.create_product(input).await.unwrap_err();
    assert!(matches!(err, StorefrontError::NotFound { .. }));
}
