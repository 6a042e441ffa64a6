//! Stock service — per-variant stock levels.
//!
//! Quantities never go negative. Adjustments are read-modify-write
//! with no locking; concurrent adjustments to the same variant have
//! no ordering guarantee, matching the rest of the platform.

use storefront_core::error::{StorefrontError, StorefrontResult};
use storefront_core::models::stock::{CreateStockLevel, StockLevel};
use storefront_core::repository::{PaginatedResult, Pagination, StockRepository};
use tracing::info;
use uuid::Uuid;

/// Stock service.
pub struct StockService<S: StockRepository> {
    stock_repo: S,
}

impl<S: StockRepository> StockService<S> {
    pub fn new(stock_repo: S) -> Self {
        Self { stock_repo }
    }

    pub async fn get_level(
        &self,
        tenant_id: Uuid,
        variant_id: Uuid,
    ) -> StorefrontResult<StockLevel> {
        self.stock_repo.get_by_variant(tenant_id, variant_id).await
    }

    /// Set the absolute quantity for a variant, creating the level row
    /// if it does not exist yet.
    pub async fn set_level(
        &self,
        tenant_id: Uuid,
        variant_id: Uuid,
        quantity: i64,
    ) -> StorefrontResult<StockLevel> {
        if quantity < 0 {
            return Err(StorefrontError::validation("Quantity must not be negative"));
        }
        let level = self
            .stock_repo
            .upsert(CreateStockLevel {
                tenant_id,
                variant_id,
                quantity,
            })
            .await?;
        info!(tenant_id = %tenant_id, variant_id = %variant_id, quantity, "Stock level set");
        Ok(level)
    }

    /// Apply a relative adjustment (positive or negative). A variant
    /// without a level row starts from zero. Overdrawing is rejected.
    pub async fn adjust(
        &self,
        tenant_id: Uuid,
        variant_id: Uuid,
        delta: i64,
    ) -> StorefrontResult<StockLevel> {
        let current = match self.stock_repo.get_by_variant(tenant_id, variant_id).await {
            Ok(level) => level.quantity,
            Err(StorefrontError::NotFound { .. }) => 0,
            Err(e) => return Err(e),
        };

        let next = current + delta;
        if next < 0 {
            return Err(StorefrontError::validation(format!(
                "Stock cannot go negative: {current} available, adjustment {delta}"
            )));
        }

        self.set_level(tenant_id, variant_id, next).await
    }

    pub async fn list_levels(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> StorefrontResult<PaginatedResult<StockLevel>> {
        self.stock_repo.list(tenant_id, pagination).await
    }
}
