//! Order service — order creation from carts and status transitions.
//!
//! Order creation writes an `order.created` outbox row in the same
//! flow as the business change; the outbox poller publishes it
//! asynchronously (at-least-once).

use rust_decimal::Decimal;
use storefront_core::error::{StorefrontError, StorefrontResult};
use storefront_core::models::cart::CartStatus;
use storefront_core::models::order::{CreateOrder, Order, OrderStatus};
use storefront_core::models::outbox::CreateOutboxEvent;
use storefront_core::repository::{
    CartRepository, OrderDraft, OrderDraftItem, OrderRepository, OutboxRepository,
    PaginatedResult, Pagination,
};
use tracing::{info, warn};
use uuid::Uuid;

/// Order service.
pub struct OrderService<O, C, X>
where
    O: OrderRepository,
    C: CartRepository,
    X: OutboxRepository,
{
    order_repo: O,
    cart_repo: C,
    outbox_repo: X,
}

impl<O, C, X> OrderService<O, C, X>
where
    O: OrderRepository,
    C: CartRepository,
    X: OutboxRepository,
{
    pub fn new(order_repo: O, cart_repo: C, outbox_repo: X) -> Self {
        Self {
            order_repo,
            cart_repo,
            outbox_repo,
        }
    }

    /// Create an order from an existing cart.
    ///
    /// The cart must belong to the tenant and contain at least one
    /// item. Its items are copied into the order, the total is
    /// computed, and the cart is marked `Converted`.
    pub async fn create_order(&self, input: CreateOrder) -> StorefrontResult<Order> {
        // 1. Load the cart.
        let cart = self
            .cart_repo
            .get_by_id(input.tenant_id, input.cart_id)
            .await?;

        if cart.items.is_empty() {
            return Err(StorefrontError::validation("Cart is empty"));
        }

        // 2. Copy items and compute the total.
        let items: Vec<OrderDraftItem> = cart
            .items
            .iter()
            .map(|item| OrderDraftItem {
                product_id: item.product_id,
                variant_id: item.variant_id,
                quantity: item.quantity,
                unit_price: item.unit_price,
                currency: item.currency.clone(),
            })
            .collect();

        let total: Decimal = items
            .iter()
            .map(|item| item.unit_price * Decimal::from(item.quantity))
            .sum();
        let currency = items[0].currency.clone();

        // 3. Persist the order.
        let order = self
            .order_repo
            .create(OrderDraft {
                tenant_id: input.tenant_id,
                cart_id: input.cart_id,
                customer_id: input.customer_id,
                items,
                total,
                currency,
            })
            .await?;

        // 4. The cart is consumed.
        self.cart_repo
            .set_status(input.tenant_id, input.cart_id, CartStatus::Converted)
            .await?;

        // 5. Record the event for asynchronous publishing.
        self.append_event("order.created", &order).await;

        info!(
            tenant_id = %order.tenant_id,
            order_id = %order.id,
            total = %order.total,
            "Order created"
        );
        Ok(order)
    }

    pub async fn get_order(&self, tenant_id: Uuid, order_id: Uuid) -> StorefrontResult<Order> {
        self.order_repo.get_by_id(tenant_id, order_id).await
    }

    pub async fn list_orders(
        &self,
        tenant_id: Uuid,
        customer_id: Option<Uuid>,
        status: Option<OrderStatus>,
        pagination: Pagination,
    ) -> StorefrontResult<PaginatedResult<Order>> {
        match (customer_id, status) {
            (Some(customer_id), _) => {
                self.order_repo
                    .list_by_customer(tenant_id, customer_id, pagination)
                    .await
            }
            (None, Some(status)) => {
                self.order_repo
                    .list_by_status(tenant_id, status, pagination)
                    .await
            }
            (None, None) => self.order_repo.list(tenant_id, pagination).await,
        }
    }

    pub async fn confirm_order(&self, tenant_id: Uuid, order_id: Uuid) -> StorefrontResult<Order> {
        // Ensure the order exists under this tenant before updating.
        self.order_repo.get_by_id(tenant_id, order_id).await?;
        let order = self
            .order_repo
            .set_status(tenant_id, order_id, OrderStatus::Confirmed)
            .await?;
        info!(tenant_id = %tenant_id, order_id = %order_id, "Order confirmed");
        Ok(order)
    }

    pub async fn cancel_order(&self, tenant_id: Uuid, order_id: Uuid) -> StorefrontResult<Order> {
        let current = self.order_repo.get_by_id(tenant_id, order_id).await?;
        if current.status == OrderStatus::Delivered {
            return Err(StorefrontError::validation(
                "Delivered orders cannot be cancelled",
            ));
        }
        let order = self
            .order_repo
            .set_status(tenant_id, order_id, OrderStatus::Cancelled)
            .await?;
        info!(tenant_id = %tenant_id, order_id = %order_id, "Order cancelled");
        Ok(order)
    }

    /// Move the order to `Processing` and hand it to downstream
    /// consumers via the outbox.
    pub async fn finalize_order(&self, tenant_id: Uuid, order_id: Uuid) -> StorefrontResult<Order> {
        self.order_repo.get_by_id(tenant_id, order_id).await?;
        let order = self
            .order_repo
            .set_status(tenant_id, order_id, OrderStatus::Processing)
            .await?;

        self.append_event("order.finalized", &order).await;

        info!(tenant_id = %tenant_id, order_id = %order_id, "Order finalized");
        Ok(order)
    }

    /// Append an outbox row describing `order`. Failure to record the
    /// event is logged but does not fail the business operation.
    async fn append_event(&self, event_type: &str, order: &Order) {
        let payload = serde_json::json!({
            "orderId": order.id,
            "customerId": order.customer_id,
            "tenantId": order.tenant_id,
            "status": order.status,
            "totalAmount": order.total,
            "totalCurrency": order.currency,
            "items": order.items.iter().map(|item| {
                serde_json::json!({
                    "productId": item.product_id,
                    "productVariantId": item.variant_id,
                    "quantity": item.quantity,
                    "unitPrice": item.unit_price,
                })
            }).collect::<Vec<_>>(),
        });

        let result = self
            .outbox_repo
            .append(CreateOutboxEvent {
                tenant_id: order.tenant_id,
                event_type: event_type.into(),
                payload: payload.to_string(),
            })
            .await;

        if let Err(e) = result {
            warn!(
                order_id = %order.id,
                event_type,
                error = %e,
                "Failed to append outbox event"
            );
        }
    }
}
