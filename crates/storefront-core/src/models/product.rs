//! Product and product variant domain models.
//!
//! A product and its variants form one aggregate: variants are created
//! and listed through the owning product, and the variant SKU code is
//! unique across the tenant's whole catalog.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub tenant_id: Uuid,
    /// Human-readable name (3–255 characters).
    pub name: String,
    /// URL-safe unique identifier within the tenant's catalog
    /// (e.g. `notebook-dell-xps-13`).
    pub slug: String,
    pub description: Option<String>,
    pub brand_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProduct {
    pub tenant_id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub brand_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub tags: Vec<String>,
}

/// Fields that can be updated on an existing product.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    /// `Some(Some(id))` = set, `Some(None)` = clear, `None` = no change.
    pub brand_id: Option<Option<Uuid>>,
    pub category_id: Option<Option<Uuid>>,
    pub tags: Option<Vec<String>>,
}

/// A sellable variation of a product (size, color, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub product_id: Uuid,
    /// Stock keeping unit code, unique within the tenant's catalog
    /// (uppercase alphanumeric + hyphen, e.g. `XPS13-16GB-BLK`).
    pub sku_code: String,
    pub barcode: Option<String>,
    pub price: Decimal,
    /// Must not exceed `price` when present.
    pub promotional_price: Option<Decimal>,
    /// ISO 4217 currency code (e.g. `BRL`).
    pub currency: String,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub width_cm: Option<f64>,
    pub depth_cm: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new product variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductVariant {
    pub tenant_id: Uuid,
    pub product_id: Uuid,
    pub sku_code: String,
    pub barcode: Option<String>,
    pub price: Decimal,
    pub promotional_price: Option<Decimal>,
    pub currency: String,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub width_cm: Option<f64>,
    pub depth_cm: Option<f64>,
}

/// Fields that can be updated on an existing product variant.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateProductVariant {
    pub barcode: Option<Option<String>>,
    pub price: Option<Decimal>,
    /// `Some(Some(p))` = set, `Some(None)` = clear, `None` = no change.
    pub promotional_price: Option<Option<Decimal>>,
    pub weight_kg: Option<Option<f64>>,
    pub height_cm: Option<Option<f64>>,
    pub width_cm: Option<Option<f64>>,
    pub depth_cm: Option<Option<f64>>,
}
