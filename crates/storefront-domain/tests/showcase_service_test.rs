//! Integration tests for the showcase service over in-memory
//! SurrealDB repositories.

use storefront_core::models::product::{CreateProduct, CreateProductVariant};
use storefront_core::repository::ProductRepository;
use storefront_core::StorefrontError;
use storefront_db::repository::SurrealProductRepository;
use storefront_domain::{ShowcaseQuery, ShowcaseService, MAX_PAGE_SIZE};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

type Db = surrealdb::engine::local::Db;

async fn setup() -> (ShowcaseService<SurrealProductRepository<Db>>, SurrealProductRepository<Db>, Uuid)
{
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    storefront_db::run_migrations(&db).await.unwrap();

    let repo = SurrealProductRepository::new(db);
    (ShowcaseService::new(repo.clone()), repo, Uuid::new_v4())
}

fn product(tenant_id: Uuid, name: &str, slug: &str) -> CreateProduct {
    CreateProduct {
        tenant_id,
        name: name.into(),
        slug: slug.into(),
        description: None,
        brand_id: None,
        category_id: None,
        tags: vec![],
    }
}

#[tokio::test]
async fn page_size_cap_is_enforced() {
    let (service, _repo, tenant_id) = setup().await;

    // size above the cap is a validation error.
    let err = service
        .list_products(
            tenant_id,
            ShowcaseQuery {
                page: 0,
                size: 150,
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StorefrontError::Validation { .. }));

    // size zero as well.
    let err = service
        .list_products(
            tenant_id,
            ShowcaseQuery {
                page: 0,
                size: 0,
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StorefrontError::Validation { .. }));

    // the cap itself is accepted.
    let page = service
        .list_products(
            tenant_id,
            ShowcaseQuery {
                page: 0,
                size: MAX_PAGE_SIZE,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn listing_paginates_and_searches() {
    let (service, repo, tenant_id) = setup().await;

    repo.create(product(tenant_id, "Notebook Dell XPS 13", "notebook-dell"))
        .await
        .unwrap();
    repo.create(product(tenant_id, "Mouse sem fio", "mouse-sem-fio"))
        .await
        .unwrap();
    repo.create(product(tenant_id, "Teclado mecânico", "teclado-mecanico"))
        .await
        .unwrap();

    let first_page = service
        .list_products(
            tenant_id,
            ShowcaseQuery {
                page: 0,
                size: 2,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(first_page.total, 3);
    assert_eq!(first_page.items.len(), 2);

    let second_page = service
        .list_products(
            tenant_id,
            ShowcaseQuery {
                page: 1,
                size: 2,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(second_page.items.len(), 1);

    let search = service
        .list_products(
            tenant_id,
            ShowcaseQuery {
                page: 0,
                size: 20,
                search: Some("dell".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(search.total, 1);
    assert_eq!(search.items[0].slug, "notebook-dell");
}

#[tokio::test]
async fn product_details_include_variants() {
    let (service, repo, tenant_id) = setup().await;

    let created = repo
        .create(product(tenant_id, "Notebook Dell XPS 13", "notebook-dell"))
        .await
        .unwrap();
    repo.create_variant(CreateProductVariant {
        tenant_id,
        product_id: created.id,
        sku_code: "XPS13-16GB-BLK".into(),
        barcode: None,
        price: "4999.90".parse().unwrap(),
        promotional_price: Some("4499.00".parse().unwrap()),
        currency: "BRL".into(),
        weight_kg: None,
        height_cm: None,
        width_cm: None,
        depth_cm: None,
    })
    .await
    .unwrap();

    let (product, variants) = service
        .get_product_details(tenant_id, created.id)
        .await
        .unwrap();
    assert_eq!(product.id, created.id);
    assert_eq!(variants.len(), 1);
    assert_eq!(variants[0].sku_code, "XPS13-16GB-BLK");

    let err = service
        .get_product_details(tenant_id, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, StorefrontError::NotFound { .. }));
}
