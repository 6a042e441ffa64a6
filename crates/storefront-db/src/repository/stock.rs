//! SurrealDB implementation of [`StockRepository`].

use chrono::{DateTime, Utc};
use storefront_core::error::StorefrontResult;
use storefront_core::models::stock::{CreateStockLevel, StockLevel};
use storefront_core::repository::{PaginatedResult, Pagination, StockRepository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

fn parse_uuid(value: &str, what: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(value).map_err(|e| DbError::Decode(format!("invalid {what} UUID: {e}")))
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct StockRowWithId {
    record_id: String,
    tenant_id: String,
    variant_id: String,
    quantity: i64,
    updated_at: DateTime<Utc>,
}

impl StockRowWithId {
    fn try_into_level(self) -> Result<StockLevel, DbError> {
        Ok(StockLevel {
            id: parse_uuid(&self.record_id, "stock level")?,
            tenant_id: parse_uuid(&self.tenant_id, "tenant")?,
            variant_id: parse_uuid(&self.variant_id, "variant")?,
            quantity: self.quantity,
            updated_at: self.updated_at,
        })
    }
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the Stock repository.
#[derive(Clone)]
pub struct SurrealStockRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealStockRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> StockRepository for SurrealStockRepository<C> {
    async fn upsert(&self, input: CreateStockLevel) -> StorefrontResult<StockLevel> {
        let tenant_id_str = input.tenant_id.to_string();
        let variant_id_str = input.variant_id.to_string();

        // Update the existing row if one exists for this variant;
        // otherwise create a fresh one. The unique index on
        // (tenant_id, variant_id) backstops the check-then-act window.
        let mut existing = self
            .db
            .query(
                "SELECT count() AS total FROM stock_level \
                 WHERE tenant_id = $tenant_id AND variant_id = $variant_id \
                 GROUP ALL",
            )
            .bind(("tenant_id", tenant_id_str.clone()))
            .bind(("variant_id", variant_id_str.clone()))
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = existing.take(0).map_err(DbError::from)?;
        let exists = count_rows.first().map(|r| r.total).unwrap_or(0) > 0;

        if exists {
            self.db
                .query(
                    "UPDATE stock_level SET \
                     quantity = $quantity, updated_at = time::now() \
                     WHERE tenant_id = $tenant_id AND variant_id = $variant_id",
                )
                .bind(("tenant_id", tenant_id_str))
                .bind(("variant_id", variant_id_str))
                .bind(("quantity", input.quantity))
                .await
                .map_err(DbError::from)?
                .check()
                .map_err(|e| DbError::Decode(e.to_string()))?;
        } else {
            let id = Uuid::new_v4();
            self.db
                .query(
                    "CREATE type::record('stock_level', $id) SET \
                     tenant_id = $tenant_id, \
                     variant_id = $variant_id, \
                     quantity = $quantity",
                )
                .bind(("id", id.to_string()))
                .bind(("tenant_id", tenant_id_str))
                .bind(("variant_id", variant_id_str))
                .bind(("quantity", input.quantity))
                .await
                .map_err(DbError::from)?
                .check()
                .map_err(|e| DbError::Decode(e.to_string()))?;
        }

        Ok(self
            .get_by_variant(input.tenant_id, input.variant_id)
            .await?)
    }

    async fn get_by_variant(
        &self,
        tenant_id: Uuid,
        variant_id: Uuid,
    ) -> StorefrontResult<StockLevel> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM stock_level \
                 WHERE tenant_id = $tenant_id AND variant_id = $variant_id",
            )
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("variant_id", variant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<StockRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "stock_level".into(),
            id: format!("variant={variant_id}"),
        })?;

        Ok(row.try_into_level()?)
    }

    async fn list(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> StorefrontResult<PaginatedResult<StockLevel>> {
        let tenant_id_str = tenant_id.to_string();

        let mut count_result = self
            .db
            .query(
                "SELECT count() AS total FROM stock_level \
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
                "SELECT meta::id(id) AS record_id, * FROM stock_level \
                 WHERE tenant_id = $tenant_id \
                 ORDER BY updated_at ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("tenant_id", tenant_id_str))
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<StockRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_level())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
