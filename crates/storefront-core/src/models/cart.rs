//! Shopping cart domain model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CartStatus {
    /// Open for item changes.
    Active,
    /// Left behind without checkout.
    Abandoned,
    /// Turned into an order; no further item changes.
    Converted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub id: Uuid,
    pub product_id: Uuid,
    pub variant_id: Uuid,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub customer_id: Option<Uuid>,
    pub status: CartStatus,
    pub items: Vec<CartItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCart {
    pub tenant_id: Uuid,
    pub customer_id: Option<Uuid>,
}

/// Fields required to add an item to a cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCartItem {
    pub product_id: Uuid,
    pub variant_id: Uuid,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub currency: String,
}
