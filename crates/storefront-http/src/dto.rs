//! Request and response DTOs.
//!
//! The wire format is camelCase JSON. Responses are shaped explicitly
//! from domain models — notably the customer response, which never
//! carries the password hash, and the category response, which
//! references its parent by id only (no recursive embedding).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use storefront_core::models::brand::Brand;
use storefront_core::models::cart::{Cart, CartItem, CartStatus};
use storefront_core::models::category::Category;
use storefront_core::models::customer::Customer;
use storefront_core::models::order::{Order, OrderItem, OrderStatus};
use storefront_core::models::product::{Product, ProductVariant};
use storefront_core::models::stock::StockLevel;
use storefront_core::repository::{PaginatedResult, Pagination};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

fn default_page_size() -> u64 {
    20
}

/// Common `?page=&size=` query parameters (zero-based page).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub size: u64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: default_page_size(),
        }
    }
}

impl PageQuery {
    pub fn to_pagination(&self) -> Pagination {
        Pagination {
            offset: self.page * self.size,
            limit: self.size,
        }
    }
}

/// Paginated response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub size: u64,
}

impl<T> PageResponse<T> {
    pub fn from_result<U>(result: PaginatedResult<U>, map: impl FnMut(U) -> T) -> Self {
        let page = if result.limit == 0 {
            0
        } else {
            result.offset / result.limit
        };
        Self {
            page,
            size: result.limit,
            total: result.total,
            items: result.items.into_iter().map(map).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Brands
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBrandRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBrandRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Brand> for BrandResponse {
    fn from(brand: Brand) -> Self {
        Self {
            id: brand.id,
            name: brand.name,
            description: brand.description,
            created_at: brand.created_at,
            updated_at: brand.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Present-and-null reparents to root; absent leaves unchanged.
    #[serde(default, with = "double_option")]
    pub parent_id: Option<Option<Uuid>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Id-only parent reference; children are fetched separately.
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            parent_id: category.parent_id,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Products & variants
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub brand_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, with = "double_option")]
    pub brand_id: Option<Option<Uuid>>,
    #[serde(default, with = "double_option")]
    pub category_id: Option<Option<Uuid>>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub brand_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            slug: product.slug,
            description: product.description,
            brand_id: product.brand_id,
            category_id: product.category_id,
            tags: product.tags,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVariantRequest {
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

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVariantRequest {
    #[serde(default, with = "double_option")]
    pub barcode: Option<Option<String>>,
    pub price: Option<Decimal>,
    #[serde(default, with = "double_option")]
    pub promotional_price: Option<Option<Decimal>>,
    #[serde(default, with = "double_option")]
    pub weight_kg: Option<Option<f64>>,
    #[serde(default, with = "double_option")]
    pub height_cm: Option<Option<f64>>,
    #[serde(default, with = "double_option")]
    pub width_cm: Option<Option<f64>>,
    #[serde(default, with = "double_option")]
    pub depth_cm: Option<Option<f64>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantResponse {
    pub id: Uuid,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductVariant> for VariantResponse {
    fn from(variant: ProductVariant) -> Self {
        Self {
            id: variant.id,
            product_id: variant.product_id,
            sku_code: variant.sku_code,
            barcode: variant.barcode,
            price: variant.price,
            promotional_price: variant.promotional_price,
            currency: variant.currency,
            weight_kg: variant.weight_kg,
            height_cm: variant.height_cm,
            width_cm: variant.width_cm,
            depth_cm: variant.depth_cm,
            created_at: variant.created_at,
            updated_at: variant.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Showcase
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ShowcaseListQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub size: u64,
    pub search: Option<String>,
    pub brand_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
}

/// Showcase product with its variants inlined — the read model for
/// storefront detail pages.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowcaseProductResponse {
    #[serde(flatten)]
    pub product: ProductResponse,
    pub variants: Vec<VariantResponse>,
}

// ---------------------------------------------------------------------------
// Carts
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateCartRequest {
    pub customer_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemRequest {
    pub product_id: Uuid,
    pub variant_id: Uuid,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub currency: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemQuantityRequest {
    pub quantity: u32,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CartListQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub size: u64,
    pub customer_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub variant_id: Uuid,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub currency: String,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            id: item.id,
            product_id: item.product_id,
            variant_id: item.variant_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
            currency: item.currency,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub id: Uuid,
    pub customer_id: Option<Uuid>,
    pub status: CartStatus,
    pub items: Vec<CartItemResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            id: cart.id,
            customer_id: cart.customer_id,
            status: cart.status,
            items: cart.items.into_iter().map(Into::into).collect(),
            created_at: cart.created_at,
            updated_at: cart.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub cart_id: Uuid,
    pub customer_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderListQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub size: u64,
    pub customer_id: Option<Uuid>,
    /// Status name, case-insensitive (e.g. `pending`, `SHIPPED`).
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub variant_id: Uuid,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub currency: String,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            id: item.id,
            product_id: item.product_id,
            variant_id: item.variant_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
            currency: item.currency,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub customer_id: Uuid,
    pub status: OrderStatus,
    pub items: Vec<OrderItemResponse>,
    pub total: Decimal,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            cart_id: order.cart_id,
            customer_id: order.customer_id,
            status: order.status,
            items: order.items.into_iter().map(Into::into).collect(),
            total: order.total,
            currency: order.currency,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Customer as exposed on the wire. The password hash stays inside.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            email: customer.email,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Stock
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetStockRequest {
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustStockRequest {
    pub delta: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockResponse {
    pub variant_id: Uuid,
    pub quantity: i64,
    pub updated_at: DateTime<Utc>,
}

impl From<StockLevel> for StockResponse {
    fn from(level: StockLevel) -> Self {
        Self {
            variant_id: level.variant_id,
            quantity: level.quantity,
            updated_at: level.updated_at,
        }
    }
}

/// Serde helper distinguishing "field absent" from "field null" for
/// PATCH-style updates: absent means no change, null means clear.
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
