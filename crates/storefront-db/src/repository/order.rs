//! SurrealDB implementation of [`OrderRepository`].
//!
//! The table is named `orders` because `order` collides with the
//! ORDER BY keyword in SurrealQL. Items are embedded like cart items;
//! orders are immutable after creation except for their status.

use chrono::{DateTime, Utc};
use storefront_core::error::StorefrontResult;
use storefront_core::models::order::{Order, OrderItem, OrderStatus};
use storefront_core::repository::{OrderDraft, OrderRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

fn parse_uuid(value: &str, what: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(value).map_err(|e| DbError::Decode(format!("invalid {what} UUID: {e}")))
}

fn parse_status(s: &str) -> Result<OrderStatus, DbError> {
    OrderStatus::parse(s).ok_or_else(|| DbError::Decode(format!("unknown order status: {s}")))
}

fn status_to_string(s: OrderStatus) -> &'static str {
    match s {
        OrderStatus::Pending => "Pending",
        OrderStatus::Confirmed => "Confirmed",
        OrderStatus::Processing => "Processing",
        OrderStatus::Shipped => "Shipped",
        OrderStatus::Delivered => "Delivered",
        OrderStatus::Cancelled => "Cancelled",
    }
}

/// Embedded item object as stored in the `items` array field.
#[derive(Debug, Clone, SurrealValue)]
struct OrderItemRow {
    id: String,
    product_id: String,
    variant_id: String,
    quantity: u32,
    unit_price: String,
    currency: String,
}

impl OrderItemRow {
    fn try_into_item(self) -> Result<OrderItem, DbError> {
        Ok(OrderItem {
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
}

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct OrderRow {
    tenant_id: String,
    cart_id: String,
    customer_id: String,
    status: String,
    items: Vec<OrderItemRow>,
    total: String,
    currency: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, id: Uuid) -> Result<Order, DbError> {
        Ok(Order {
            id,
            tenant_id: parse_uuid(&self.tenant_id, "tenant")?,
            cart_id: parse_uuid(&self.cart_id, "cart")?,
            customer_id: parse_uuid(&self.customer_id, "customer")?,
            status: parse_status(&self.status)?,
            items: self
                .items
                .into_iter()
                .map(OrderItemRow::try_into_item)
                .collect::<Result<Vec<_>, _>>()?,
            total: self
                .total
                .parse()
                .map_err(|e| DbError::Decode(format!("invalid total: {e}")))?,
            currency: self.currency,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct OrderRowWithId {
    record_id: String,
    tenant_id: String,
    cart_id: String,
    customer_id: String,
    status: String,
    items: Vec<OrderItemRow>,
    total: String,
    currency: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRowWithId {
    fn try_into_order(self) -> Result<Order, DbError> {
        let id = parse_uuid(&self.record_id, "order")?;
        OrderRow {
            tenant_id: self.tenant_id,
            cart_id: self.cart_id,
            customer_id: self.customer_id,
            status: self.status,
            items: self.items,
            total: self.total,
            currency: self.currency,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_order(id)
    }
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the Order repository.
#[derive(Clone)]
pub struct SurrealOrderRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealOrderRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn list_page(
        &self,
        where_clause: &str,
        binds: Vec<(&'static str, String)>,
        pagination: Pagination,
    ) -> Result<PaginatedResult<Order>, DbError> {
        let count_query =
            format!("SELECT count() AS total FROM orders WHERE {where_clause} GROUP ALL");
        let page_query = format!(
            "SELECT meta::id(id) AS record_id, * FROM orders \
             WHERE {where_clause} \
             ORDER BY created_at ASC \
             LIMIT $limit START $offset"
        );

        let mut count_builder = self.db.query(&count_query);
        for (name, value) in &binds {
            count_builder = count_builder.bind((*name, value.clone()));
        }
        let mut count_result = count_builder.await?;
        let count_rows: Vec<CountRow> = count_result.take(0)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut page_builder = self
            .db
            .query(&page_query)
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset));
        for (name, value) in binds {
            page_builder = page_builder.bind((name, value));
        }
        let mut result = page_builder.await?;

        let rows: Vec<OrderRowWithId> = result.take(0)?;
        let items = rows
            .into_iter()
            .map(|row| row.try_into_order())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}

impl<C: Connection> OrderRepository for SurrealOrderRepository<C> {
    async fn create(&self, draft: OrderDraft) -> StorefrontResult<Order> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let item_rows: Vec<OrderItemRow> = draft
            .items
            .iter()
            .map(|item| OrderItemRow {
                id: Uuid::new_v4().to_string(),
                product_id: item.product_id.to_string(),
                variant_id: item.variant_id.to_string(),
                quantity: item.quantity,
                unit_price: item.unit_price.to_string(),
                currency: item.currency.clone(),
            })
            .collect();

        let result = self
            .db
            .query(
                "CREATE type::record('orders', $id) SET \
                 tenant_id = $tenant_id, \
                 cart_id = $cart_id, \
                 customer_id = $customer_id, \
                 status = 'Pending', \
                 items = $items, \
                 total = $total, \
                 currency = $currency",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", draft.tenant_id.to_string()))
            .bind(("cart_id", draft.cart_id.to_string()))
            .bind(("customer_id", draft.customer_id.to_string()))
            .bind(("items", item_rows))
            .bind(("total", draft.total.to_string()))
            .bind(("currency", draft.currency))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<OrderRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "order".into(),
            id: id_str,
        })?;

        Ok(row.into_order(id)?)
    }

    async fn get_by_id(&self, tenant_id: Uuid, id: Uuid) -> StorefrontResult<Order> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT * FROM type::record('orders', $id) \
                 WHERE tenant_id = $tenant_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OrderRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "order".into(),
            id: id_str,
        })?;

        Ok(row.into_order(id)?)
    }

    async fn list(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> StorefrontResult<PaginatedResult<Order>> {
        Ok(self
            .list_page(
                "tenant_id = $tenant_id",
                vec![("tenant_id", tenant_id.to_string())],
                pagination,
            )
            .await?)
    }

    async fn list_by_customer(
        &self,
        tenant_id: Uuid,
        customer_id: Uuid,
        pagination: Pagination,
    ) -> StorefrontResult<PaginatedResult<Order>> {
        Ok(self
            .list_page(
                "tenant_id = $tenant_id AND customer_id = $customer_id",
                vec![
                    ("tenant_id", tenant_id.to_string()),
                    ("customer_id", customer_id.to_string()),
                ],
                pagination,
            )
            .await?)
    }

    async fn list_by_status(
        &self,
        tenant_id: Uuid,
        status: OrderStatus,
        pagination: Pagination,
    ) -> StorefrontResult<PaginatedResult<Order>> {
        Ok(self
            .list_page(
                "tenant_id = $tenant_id AND status = $status",
                vec![
                    ("tenant_id", tenant_id.to_string()),
                    ("status", status_to_string(status).to_string()),
                ],
                pagination,
            )
            .await?)
    }

    async fn set_status(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        status: OrderStatus,
    ) -> StorefrontResult<Order> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('orders', $id) SET \
                 status = $status, updated_at = time::now() \
                 WHERE tenant_id = $tenant_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("status", status_to_string(status).to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<OrderRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "order".into(),
            id: id_str,
        })?;

        Ok(row.into_order(id)?)
    }
}
