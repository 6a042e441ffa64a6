//! Cart service — shopping cart lifecycle and item management.

use storefront_core::error::StorefrontResult;
use storefront_core::models::cart::{Cart, CreateCart, CreateCartItem};
use storefront_core::repository::{CartRepository, PaginatedResult, Pagination};
use storefront_core::validation;
use tracing::info;
use uuid::Uuid;

/// Cart service.
pub struct CartService<R: CartRepository> {
    cart_repo: R,
}

impl<R: CartRepository> CartService<R> {
    pub fn new(cart_repo: R) -> Self {
        Self { cart_repo }
    }

    pub async fn create_cart(&self, input: CreateCart) -> StorefrontResult<Cart> {
        let cart = self.cart_repo.create(input).await?;
        info!(tenant_id = %cart.tenant_id, cart_id = %cart.id, "Cart created");
        Ok(cart)
    }

    pub async fn get_cart(&self, tenant_id: Uuid, cart_id: Uuid) -> StorefrontResult<Cart> {
        self.cart_repo.get_by_id(tenant_id, cart_id).await
    }

    pub async fn list_carts(
        &self,
        tenant_id: Uuid,
        customer_id: Option<Uuid>,
        pagination: Pagination,
    ) -> StorefrontResult<PaginatedResult<Cart>> {
        match customer_id {
            Some(customer_id) => {
                self.cart_repo
                    .list_by_customer(tenant_id, customer_id, pagination)
                    .await
            }
            None => self.cart_repo.list(tenant_id, pagination).await,
        }
    }

    pub async fn add_item(
        &self,
        tenant_id: Uuid,
        cart_id: Uuid,
        item: CreateCartItem,
    ) -> StorefrontResult<Cart> {
        validation::validate_quantity(item.quantity)?;
        validation::validate_variant_prices(item.unit_price, None)?;

        let cart = self.cart_repo.add_item(tenant_id, cart_id, item).await?;
        info!(tenant_id = %tenant_id, cart_id = %cart_id, "Item added to cart");
        Ok(cart)
    }

    pub async fn remove_item(
        &self,
        tenant_id: Uuid,
        cart_id: Uuid,
        item_id: Uuid,
    ) -> StorefrontResult<Cart> {
        self.cart_repo.remove_item(tenant_id, cart_id, item_id).await
    }

    pub async fn update_item_quantity(
        &self,
        tenant_id: Uuid,
        cart_id: Uuid,
        item_id: Uuid,
        quantity: u32,
    ) -> StorefrontResult<Cart> {
        validation::validate_quantity(quantity)?;
        self.cart_repo
            .update_item_quantity(tenant_id, cart_id, item_id, quantity)
            .await
    }

    pub async fn clear_cart(&self, tenant_id: Uuid, cart_id: Uuid) -> StorefrontResult<Cart> {
        self.cart_repo.clear_items(tenant_id, cart_id).await
    }

    pub async fn delete_cart(&self, tenant_id: Uuid, cart_id: Uuid) -> StorefrontResult<()> {
        // Surface 404 for an unknown id instead of silently succeeding.
        self.cart_repo.get_by_id(tenant_id, cart_id).await?;
        self.cart_repo.delete(tenant_id, cart_id).await?;
        info!(tenant_id = %tenant_id, cart_id = %cart_id, "Cart deleted");
        Ok(())
    }
}
