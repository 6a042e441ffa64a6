//! Brand domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brand {
    pub id: Uuid,
    pub tenant_id: Uuid,
    /// Human-readable name (2–100 characters).
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new brand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBrand {
    pub tenant_id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

/// Fields that can be updated on an existing brand.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateBrand {
    pub name: Option<String>,
    pub description: Option<String>,
}
