//! Integration tests for cart and order repositories using in-memory
//! SurrealDB.

use rust_decimal::Decimal;
use storefront_core::models::cart::{CartStatus, CreateCart, CreateCartItem};
use storefront_core::models::order::OrderStatus;
use storefront_core::repository::{
    CartRepository, OrderDraft, OrderDraftItem, OrderRepository, Pagination,
};
use storefront_core::StorefrontError;
use storefront_db::repository::{SurrealCartRepository, SurrealOrderRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

async fn setup() -> (Surreal<surrealdb::engine::local::Db>, Uuid) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    storefront_db::run_migrations(&db).await.unwrap();
    (db, Uuid::new_v4())
}

fn item(price: &str) -> CreateCartItem {
    CreateCartItem {
        product_id: Uuid::new_v4(),
        variant_id: Uuid::new_v4(),
        quantity: 2,
        unit_price: price.parse().unwrap(),
        currency: "BRL".into(),
    }
}

#[tokio::test]
async fn cart_item_operations() {
    let (db, tenant_id) = setup().await;
    let repo = SurrealCartRepository::new(db);

    let customer_id = Uuid::new_v4();
    let cart = repo
        .create(CreateCart {
            tenant_id,
            customer_id: Some(customer_id),
        })
        .await
        .unwrap();
    assert_eq!(cart.status, CartStatus::Active);
    assert!(cart.items.is_empty());

    let cart = repo.add_item(tenant_id, cart.id, item("99.90")).await.unwrap();
    let cart = repo.add_item(tenant_id, cart.id, item("10.00")).await.unwrap();
    assert_eq!(cart.items.len(), 2);

    let first_item = cart.items[0].id;
    let cart = repo
        .update_item_quantity(tenant_id, cart.id, first_item, 5)
        .await
        .unwrap();
    assert_eq!(cart.items[0].quantity, 5);

    let cart = repo.remove_item(tenant_id, cart.id, first_item).await.unwrap();
    assert_eq!(cart.items.len(), 1);

    // Removing a non-existent item is a NotFound, not a silent no-op.
    let err = repo
        .remove_item(tenant_id, cart.id, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, StorefrontError::NotFound { .. }));

    let cart = repo.clear_items(tenant_id, cart.id).await.unwrap();
    assert!(cart.items.is_empty());

    let by_customer = repo
        .list_by_customer(tenant_id, customer_id, Pagination::default())
        .await
        .unwrap();
    assert_eq!(by_customer.total, 1);

    repo.delete(tenant_id, cart.id).await.unwrap();
    assert!(repo.get_by_id(tenant_id, cart.id).await.is_err());
}

#[tokio::test]
async fn cart_status_transitions() {
    let (db, tenant_id) = setup().await;
    let repo = SurrealCartRepository::new(db);

    let cart = repo
        .create(CreateCart {
            tenant_id,
            customer_id: None,
        })
        .await
        .unwrap();

    let converted = repo
        .set_status(tenant_id, cart.id, CartStatus::Converted)
        .await
        .unwrap();
    assert_eq!(converted.status, CartStatus::Converted);
}

#[tokio::test]
async fn order_creation_and_status_flow() {
    let (db, tenant_id) = setup().await;
    let repo = SurrealOrderRepository::new(db);

    let customer_id = Uuid::new_v4();
    let draft = OrderDraft {
        tenant_id,
        cart_id: Uuid::new_v4(),
        customer_id,
        items: vec![
            OrderDraftItem {
                product_id: Uuid::new_v4(),
                variant_id: Uuid::new_v4(),
                quantity: 2,
                unit_price: "99.90".parse().unwrap(),
                currency: "BRL".into(),
            },
            OrderDraftItem {
                product_id: Uuid::new_v4(),
                variant_id: Uuid::new_v4(),
                quantity: 1,
                unit_price: "10.00".parse().unwrap(),
                currency: "BRL".into(),
            },
        ],
        total: "209.80".parse().unwrap(),
        currency: "BRL".into(),
    };

    let order = repo.create(draft).await.unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.total, "209.80".parse::<Decimal>().unwrap());
    assert_eq!(order.customer_id, customer_id);

    let confirmed = repo
        .set_status(tenant_id, order.id, OrderStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(confirmed.status, OrderStatus::Confirmed);

    let by_status = repo
        .list_by_status(tenant_id, OrderStatus::Confirmed, Pagination::default())
        .await
        .unwrap();
    assert_eq!(by_status.total, 1);

    let none_pending = repo
        .list_by_status(tenant_id, OrderStatus::Pending, Pagination::default())
        .await
        .unwrap();
    assert_eq!(none_pending.total, 0);

    let by_customer = repo
        .list_by_customer(tenant_id, customer_id, Pagination::default())
        .await
        .unwrap();
    assert_eq!(by_customer.total, 1);
}
