//! Stock level domain model.
//!
//! One row per (tenant, variant). Quantity never goes negative.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockLevel {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub variant_id: Uuid,
    pub quantity: i64,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to record a stock level for a variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStockLevel {
    pub tenant_id: Uuid,
    pub variant_id: Uuid,
    pub quantity: i64,
}
