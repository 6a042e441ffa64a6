//! SurrealDB implementation of [`CartRepository`].
//!
//! Cart items are embedded in the cart row as an array of objects —
//! the cart is the aggregate root and items are never addressed
//! outside it. Item mutations load the row, modify the array, and
//! write it back in one UPDATE.

use chrono::{DateTime, Utc};
use storefront_core::error::StorefrontResult;
use storefront_core::models::cart::{Cart, CartItem, CartStatus, CreateCart, CreateCartItem};
use storefront_core::repository::{CartRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

fn parse_uuid(value: &str, what: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(value).map_err(|e| DbError::Decode(format!("invalid {what} UUID: {e}")))
}

fn parse_status(s: &str) -> Result<CartStatus, DbError> {
    match s {
        "Active" => Ok(CartStatus::Active),
        "Abandoned" => Ok(CartStatus::Abandoned),
        "Converted" => Ok(CartStatus::Converted),
        other => Err(DbError::Decode(format!("unknown cart status: {other}"))),
    }
}

fn status_to_string(s: CartStatus) -> &'static str {
    match s {
        CartStatus::Active => "Active",
        CartStatus::Abandoned => "Abandoned",
        CartStatus::Converted => "Converted",
    }
}

/// Embedded item object as stored in the `items` array field.
#[derive(Debug, Clone, SurrealValue)]
struct CartItemRow {
    id: String,
    product_id: String,
    variant_id: String,
    quantity: u32,
    unit_price: String,
    currency: String,
}

impl CartItemRow {
    fn try_into_item(self) -> Result<CartItem, DbError> {
        Ok(CartItem {
            id: parse_uuid(&self.id, "item")?,
            product_id: parse_uuid(&self.product_id, "product")?,
            variant_id: parse_uuid(&self.variant_id, "variant")?,
            quantity: self.quantity,
            unit_price: self
                .unit_price
                .parse()
                .map_err(|e| DbError::Decode(format!("invalid unit price: {e}")))?,
            currency: self.currency,
        })
    }

    fn from_item(item: &CartItem) -> Self {
        Self {
            id: item.id.to_string(),
            product_id: item.product_id.to_string(),
            variant_id: item.variant_id.to_string(),
            quantity: item.quantity,
            unit_price: item.unit_price.to_string(),
            currency: item.currency.clone(),
        }
    }
}

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct CartRow {
    tenant_id: String,
    customer_id: Option<String>,
    status: String,
    items: Vec<CartItemRow>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CartRow {
    fn into_cart(self, id: Uuid) -> Result<Cart, DbError> {
        Ok(Cart {
            id,
            tenant_id: parse_uuid(&self.tenant_id, "tenant")?,
            customer_id: self
                .customer_id
                .as_deref()
                .map(|c| parse_uuid(c, "customer"))
                .transpose()?,
            status: parse_status(&self.status)?,
            items: self
                .items
                .into_iter()
                .map(CartItemRow::try_into_item)
                .collect::<Result<Vec<_>, _>>()?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct CartRowWithId {
    record_id: String,
    tenant_id: String,
    customer_id: Option<String>,
    status: String,
    items: Vec<CartItemRow>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CartRowWithId {
    fn try_into_cart(self) -> Result<Cart, DbError> {
        let id = parse_uuid(&self.record_id, "cart")?;
        CartRow {
            tenant_id: self.tenant_id,
            customer_id: self.customer_id,
            status: self.status,
            items: self.items,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_cart(id)
    }
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the Cart repository.
#[derive(Clone)]
pub struct SurrealCartRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealCartRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    /// Write the full items array back to the cart row.
    async fn save_items(
        &self,
        tenant_id: Uuid,
        cart_id: Uuid,
        items: &[CartItem],
    ) -> Result<Cart, DbError> {
        let id_str = cart_id.to_string();
        let item_rows: Vec<CartItemRow> = items.iter().map(CartItemRow::from_item).collect();

        let result = self
            .db
            .query(
                "UPDATE type::record('cart', $id) SET \
                 items = $items, updated_at = time::now() \
                 WHERE tenant_id = $tenant_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("items", item_rows))
            .await?;

        let mut result = result.check().map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<CartRow> = result.take(0)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "cart".into(),
            id: id_str,
        })?;

        row.into_cart(cart_id)
    }
}

impl<C: Connection> CartRepository for SurrealCartRepository<C> {
    async fn create(&self, input: CreateCart) -> StorefrontResult<Cart> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('cart', $id) SET \
                 tenant_id = $tenant_id, \
                 customer_id = $customer_id, \
                 status = 'Active', \
                 items = []",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", input.tenant_id.to_string()))
            .bind(("customer_id", input.customer_id.map(|c| c.to_string())))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<CartRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "cart".into(),
            id: id_str,
        })?;

        Ok(row.into_cart(id)?)
    }

    async fn get_by_id(&self, tenant_id: Uuid, id: Uuid) -> StorefrontResult<Cart> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT * FROM type::record('cart', $id) \
                 WHERE tenant_id = $tenant_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CartRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "cart".into(),
            id: id_str,
        })?;

        Ok(row.into_cart(id)?)
    }

    async fn list(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> StorefrontResult<PaginatedResult<Cart>> {
        let tenant_id_str = tenant_id.to_string();

        let mut count_result = self
            .db
            .query(
                "SELECT count() AS total FROM cart \
                 WHERE tenant_id = $tenant_id GROUP ALL",
            )
            .bind(("tenant_id", tenant_id_str.clone()))
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM cart \
                 WHERE tenant_id = $tenant_id \
                 ORDER BY created_at ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("tenant_id", tenant_id_str))
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CartRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_cart())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    async fn list_by_customer(
        &self,
        tenant_id: Uuid,
        customer_id: Uuid,
        pagination: Pagination,
    ) -> StorefrontResult<PaginatedResult<Cart>> {
        let tenant_id_str = tenant_id.to_string();
        let customer_id_str = customer_id.to_string();

        let mut count_result = self
            .db
            .query(
                "SELECT count() AS total FROM cart \
                 WHERE tenant_id = $tenant_id AND customer_id = $customer_id \
                 GROUP ALL",
            )
            .bind(("tenant_id", tenant_id_str.clone()))
            .bind(("customer_id", customer_id_str.clone()))
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM cart \
                 WHERE tenant_id = $tenant_id AND customer_id = $customer_id \
                 ORDER BY created_at ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("tenant_id", tenant_id_str))
            .bind(("customer_id", customer_id_str))
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CartRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_cart())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    async fn add_item(
        &self,
        tenant_id: Uuid,
        cart_id: Uuid,
        item: CreateCartItem,
    ) -> StorefrontResult<Cart> {
        let mut cart = self.get_by_id(tenant_id, cart_id).await?;

        cart.items.push(CartItem {
            id: Uuid::new_v4(),
            product_id: item.product_id,
            variant_id: item.variant_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
            currency: item.currency,
        });

        Ok(self.save_items(tenant_id, cart_id, &cart.items).await?)
    }

    async fn remove_item(
        &self,
        tenant_id: Uuid,
        cart_id: Uuid,
        item_id: Uuid,
    ) -> StorefrontResult<Cart> {
        let mut cart = self.get_by_id(tenant_id, cart_id).await?;

        let before = cart.items.len();
        cart.items.retain(|i| i.id != item_id);
        if cart.items.len() == before {
            return Err(DbError::NotFound {
                entity: "cart_item".into(),
                id: item_id.to_string(),
            }
            .into());
        }

        Ok(self.save_items(tenant_id, cart_id, &cart.items).await?)
    }

    async fn update_item_quantity(
        &self,
        tenant_id: Uuid,
        cart_id: Uuid,
        item_id: Uuid,
        quantity: u32,
    ) -> StorefrontResult<Cart> {
        let mut cart = self.get_by_id(tenant_id, cart_id).await?;

        let item = cart
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| DbError::NotFound {
                entity: "cart_item".into(),
                id: item_id.to_string(),
            })?;
        item.quantity = quantity;

        Ok(self.save_items(tenant_id, cart_id, &cart.items).await?)
    }

    async fn clear_items(&self, tenant_id: Uuid, cart_id: Uuid) -> StorefrontResult<Cart> {
        // Verify the cart exists under this tenant before clearing.
        self.get_by_id(tenant_id, cart_id).await?;
        Ok(self.save_items(tenant_id, cart_id, &[]).await?)
    }

    async fn set_status(
        &self,
        tenant_id: Uuid,
        cart_id: Uuid,
        status: CartStatus,
    ) -> StorefrontResult<Cart> {
        let id_str = cart_id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('cart', $id) SET \
                 status = $status, updated_at = time::now() \
                 WHERE tenant_id = $tenant_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("status", status_to_string(status).to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<CartRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "cart".into(),
            id: id_str,
        })?;

        Ok(row.into_cart(cart_id)?)
    }

    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> StorefrontResult<()> {
        self.db
            .query(
                "DELETE type::record('cart', $id) \
                 WHERE tenant_id = $tenant_id",
            )
            .bind(("id", id.to_string()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }
}
