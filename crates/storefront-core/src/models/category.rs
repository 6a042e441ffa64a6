//! Category domain model.
//!
//! Categories form a tree via `parent_id`. The tree is navigated by id
//! reference only — external representations never embed the parent or
//! children recursively, so serialization cannot cycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub tenant_id: Uuid,
    /// Human-readable name (2–100 characters).
    pub name: String,
    pub description: Option<String>,
    /// Parent category, if this is a subcategory.
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategory {
    pub tenant_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
}

/// Fields that can be updated on an existing category.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub description: Option<String>,
    /// `Some(Some(id))` = reparent, `Some(None)` = make root, `None` = no change.
    pub parent_id: Option<Option<Uuid>>,
}
