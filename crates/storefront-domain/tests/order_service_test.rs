//! Integration tests for the order service over in-memory SurrealDB
//! repositories.

use storefront_core::models::cart::{CartStatus, CreateCart, CreateCartItem};
use storefront_core::models::order::{CreateOrder, OrderStatus};
use storefront_core::repository::{CartRepository, OutboxRepository, Pagination};
use storefront_core::StorefrontError;
use storefront_db::repository::{
    SurrealCartRepository, SurrealOrderRepository, SurrealOutboxRepository,
};
use storefront_domain::OrderService;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

type Db = surrealdb::engine::local::Db;
type Service =
    OrderService<SurrealOrderRepository<Db>, SurrealCartRepository<Db>, SurrealOutboxRepository<Db>>;

async fn setup() -> (Service, SurrealCartRepository<Db>, SurrealOutboxRepository<Db>, Uuid) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    storefront_db::run_migrations(&db).await.unwrap();

    let cart_repo = SurrealCartRepository::new(db.clone());
    let outbox_repo = SurrealOutboxRepository::new(db.clone());
    let service = OrderService::new(
        SurrealOrderRepository::new(db.clone()),
        cart_repo.clone(),
        outbox_repo.clone(),
    );
    (service, cart_repo, outbox_repo, Uuid::new_v4())
}

async fn cart_with_items(repo: &SurrealCartRepository<Db>, tenant_id: Uuid) -> Uuid {
    let cart = repo
        .create(CreateCart {
            tenant_id,
            customer_id: None,
        })
        .await
        .unwrap();
    repo.add_item(
        tenant_id,
        cart.id,
        CreateCartItem {
            product_id: Uuid::new_v4(),
            variant_id: Uuid::new_v4(),
            quantity: 2,
            unit_price: "99.90".parse().unwrap(),
            currency: "BRL".into(),
        },
    )
    .await
    .unwrap();
    repo.add_item(
        tenant_id,
        cart.id,
        CreateCartItem {
            product_id: Uuid::new_v4(),
            variant_id: Uuid::new_v4(),
            quantity: 1,
            unit_price: "10.00".parse().unwrap(),
            currency: "BRL".into(),
        },
    )
    .await
    .unwrap();
    cart.id
}

#[tokio::test]
async fn create_order_copies_items_and_converts_cart() {
    let (service, cart_repo, outbox_repo, tenant_id) = setup().await;
    let cart_id = cart_with_items(&cart_repo, tenant_id).await;
    let customer_id = Uuid::new_v4();

    let order = service
        .create_order(CreateOrder {
            tenant_id,
            cart_id,
            customer_id,
        })
        .await
        .unwrap();

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.items.len(), 2);
    // total = 2 * 99.90 + 1 * 10.00
    assert_eq!(order.total, "209.80".parse().unwrap());
    assert_eq!(order.currency, "BRL");

    // The cart is consumed.
    let cart = cart_repo.get_by_id(tenant_id, cart_id).await.unwrap();
    assert_eq!(cart.status, CartStatus::Converted);

    // An order.created outbox row was appended.
    let pending = outbox_repo.list_unpublished(100).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].event_type, "order.created");
    assert!(pending[0].payload.contains(&order.id.to_string()));
}

#[tokio::test]
async fn empty_cart_cannot_become_an_order() {
    let (service, cart_repo, _outbox, tenant_id) = setup().await;
    let cart = cart_repo
        .create(CreateCart {
            tenant_id,
            customer_id: None,
        })
        .await
        .unwrap();

    let err = service
        .create_order(CreateOrder {
            tenant_id,
            cart_id: cart.id,
            customer_id: Uuid::new_v4(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StorefrontError::Validation { .. }));
}

#[tokio::test]
async fn missing_cart_is_not_found() {
    let (service, _cart_repo, _outbox, tenant_id) = setup().await;

    let err = service
        .create_order(CreateOrder {
            tenant_id,
            cart_id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StorefrontError::NotFound { .. }));
}

#[tokio::test]
async fn status_transitions() {
    let (service, cart_repo, _outbox, tenant_id) = setup().await;
    let cart_id = cart_with_items(&cart_repo, tenant_id).await;

    let order = service
        .create_order(CreateOrder {
            tenant_id,
            cart_id,
            customer_id: Uuid::new_v4(),
        })
        .await
        .unwrap();

    let confirmed = service.confirm_order(tenant_id, order.id).await.unwrap();
    assert_eq!(confirmed.status, OrderStatus::Confirmed);

    let cancelled = service.cancel_order(tenant_id, order.id).await.unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
}

#[tokio::test]
async fn finalize_appends_outbox_event() {
    let (service, cart_repo, outbox_repo, tenant_id) = setup().await;
    let cart_id = cart_with_items(&cart_repo, tenant_id).await;

    let order = service
        .create_order(CreateOrder {
            tenant_id,
            cart_id,
            customer_id: Uuid::new_v4(),
        })
        .await
        .unwrap();

    let finalized = service.finalize_order(tenant_id, order.id).await.unwrap();
    assert_eq!(finalized.status, OrderStatus::Processing);

    let pending = outbox_repo.list_unpublished(100).await.unwrap();
    let types: Vec<&str> = pending.iter().map(|e| e.event_type.as_str()).collect();
    assert!(types.contains(&"order.created"));
    assert!(types.contains(&"order.finalized"));
}

#[tokio::test]
async fn list_orders_filters_by_customer_and_status() {
    let (service, cart_repo, _outbox, tenant_id) = setup().await;
    let customer_a = Uuid::new_v4();
    let customer_b = Uuid::new_v4();

    for customer_id in [customer_a, customer_b] {
        let cart_id = cart_with_items(&cart_repo, tenant_id).await;
        service
            .create_order(CreateOrder {
                tenant_id,
                cart_id,
                customer_id,
            })
            .await
            .unwrap();
    }

    let all = service
        .list_orders(tenant_id, None, None, Pagination::default())
        .await
        .unwrap();
    assert_eq!(all.total, 2);

    let for_a = service
        .list_orders(tenant_id, Some(customer_a), None, Pagination::default())
        .await
        .unwrap();
    assert_eq!(for_a.total, 1);

    let pending = service
        .list_orders(
            tenant_id,
            None,
            Some(OrderStatus::Pending),
            Pagination::default(),
        )
        .await
        .unwrap();
    assert_eq!(pending.total, 2);

    let shipped = service
        .list_orders(
            tenant_id,
            None,
            Some(OrderStatus::Shipped),
            Pagination::default(),
        )
        .await
        .unwrap();
    assert_eq!(shipped.total, 0);
}
