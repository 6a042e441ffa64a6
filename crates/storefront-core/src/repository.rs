//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Tenant-scoped repositories
//! require a `tenant_id` parameter to enforce data isolation: an
//! aggregate created under tenant A must never be returned to, or
//! mutated by, a call scoped to tenant B.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::StorefrontResult;
use crate::models::{
    brand::{Brand, CreateBrand, UpdateBrand},
    cart::{Cart, CartStatus, CreateCart, CreateCartItem},
    category::{Category, CreateCategory, UpdateCategory},
    customer::{CreateCustomer, Customer, UpdateCustomer},
    order::{Order, OrderStatus},
    outbox::{CreateOutboxEvent, OutboxEvent},
    product::{
        CreateProduct, CreateProductVariant, Product, ProductVariant, UpdateProduct,
        UpdateProductVariant,
    },
    stock::{CreateStockLevel, StockLevel},
};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

impl<T> PaginatedResult<T> {
    /// Map the items to another type, keeping the page envelope.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            offset: self.offset,
            limit: self.limit,
        }
    }
}

/// Query filters for the showcase product listing.
#[derive(Debug, Clone, Default)]
pub struct ShowcaseFilter {
    /// Case-insensitive term matched against product name and description.
    pub search: Option<String>,
    pub brand_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

pub trait BrandRepository: Send + Sync {
    fn create(&self, input: CreateBrand) -> impl Future<Output = StorefrontResult<Brand>> + Send;
    fn get_by_id(&self, tenant_id: Uuid, id: Uuid)
    -> impl Future<Output = StorefrontResult<Brand>> + Send;
    fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        input: UpdateBrand,
    ) -> impl Future<Output = StorefrontResult<Brand>> + Send;
    fn delete(&self, tenant_id: Uuid, id: Uuid) -> impl Future<Output = StorefrontResult<()>> + Send;
    fn list(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = StorefrontResult<PaginatedResult<Brand>>> + Send;
}

pub trait CategoryRepository: Send + Sync {
    fn create(&self, input: CreateCategory) -> impl Future<Output = StorefrontResult<Category>> + Send;
    fn get_by_id(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = StorefrontResult<Category>> + Send;
    fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        input: UpdateCategory,
    ) -> impl Future<Output = StorefrontResult<Category>> + Send;
    fn delete(&self, tenant_id: Uuid, id: Uuid) -> impl Future<Output = StorefrontResult<()>> + Send;
    fn list(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = StorefrontResult<PaginatedResult<Category>>> + Send;
    /// Direct children of a category.
    fn list_children(
        &self,
        tenant_id: Uuid,
        parent_id: Uuid,
    ) -> impl Future<Output = StorefrontResult<Vec<Category>>> + Send;
}

pub trait ProductRepository: Send + Sync {
    fn create(&self, input: CreateProduct) -> impl Future<Output = StorefrontResult<Product>> + Send;
    fn get_by_id(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = StorefrontResult<Product>> + Send;
    fn get_by_slug(
        &self,
        tenant_id: Uuid,
        slug: &str,
    ) -> impl Future<Output = StorefrontResult<Product>> + Send;
    /// Existence query used by slug-uniqueness validation.
    /// Check-then-act: the unique index is the backstop against races.
    fn slug_exists(
        &self,
        tenant_id: Uuid,
        slug: &str,
    ) -> impl Future<Output = StorefrontResult<bool>> + Send;
    fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        input: UpdateProduct,
    ) -> impl Future<Output = StorefrontResult<Product>> + Send;
    fn delete(&self, tenant_id: Uuid, id: Uuid) -> impl Future<Output = StorefrontResult<()>> + Send;
    fn list(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = StorefrontResult<PaginatedResult<Product>>> + Send;
    /// Showcase listing: optional search term / brand / category filters.
    fn search(
        &self,
        tenant_id: Uuid,
        filter: ShowcaseFilter,
        pagination: Pagination,
    ) -> impl Future<Output = StorefrontResult<PaginatedResult<Product>>> + Send;

    fn create_variant(
        &self,
        input: CreateProductVariant,
    ) -> impl Future<Output = StorefrontResult<ProductVariant>> + Send;
    fn get_variant(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = StorefrontResult<ProductVariant>> + Send;
    /// Existence query used by SKU-uniqueness validation.
    fn sku_exists(
        &self,
        tenant_id: Uuid,
        sku_code: &str,
    ) -> impl Future<Output = StorefrontResult<bool>> + Send;
    fn list_variants(
        &self,
        tenant_id: Uuid,
        product_id: Uuid,
    ) -> impl Future<Output = StorefrontResult<Vec<ProductVariant>>> + Send;
    fn update_variant(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        input: UpdateProductVariant,
    ) -> impl Future<Output = StorefrontResult<ProductVariant>> + Send;
    fn delete_variant(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = StorefrontResult<()>> + Send;
}

// ---------------------------------------------------------------------------
// Carts & Orders
// ---------------------------------------------------------------------------

pub trait CartRepository: Send + Sync {
    fn create(&self, input: CreateCart) -> impl Future<Output = StorefrontResult<Cart>> + Send;
    fn get_by_id(&self, tenant_id: Uuid, id: Uuid) -> impl Future<Output = StorefrontResult<Cart>> + Send;
    fn list(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = StorefrontResult<PaginatedResult<Cart>>> + Send;
    fn list_by_customer(
        &self,
        tenant_id: Uuid,
        customer_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = StorefrontResult<PaginatedResult<Cart>>> + Send;
    fn add_item(
        &self,
        tenant_id: Uuid,
        cart_id: Uuid,
        item: CreateCartItem,
    ) -> impl Future<Output = StorefrontResult<Cart>> + Send;
    fn remove_item(
        &self,
        tenant_id: Uuid,
        cart_id: Uuid,
        item_id: Uuid,
    ) -> impl Future<Output = StorefrontResult<Cart>> + Send;
    fn update_item_quantity(
        &self,
        tenant_id: Uuid,
        cart_id: Uuid,
        item_id: Uuid,
        quantity: u32,
    ) -> impl Future<Output = StorefrontResult<Cart>> + Send;
    fn clear_items(
        &self,
        tenant_id: Uuid,
        cart_id: Uuid,
    ) -> impl Future<Output = StorefrontResult<Cart>> + Send;
    fn set_status(
        &self,
        tenant_id: Uuid,
        cart_id: Uuid,
        status: CartStatus,
    ) -> impl Future<Output = StorefrontResult<Cart>> + Send;
    fn delete(&self, tenant_id: Uuid, id: Uuid) -> impl Future<Output = StorefrontResult<()>> + Send;
}

/// Persisted shape of an order at creation time. Item ids and the order
/// id are assigned by the repository; the caller computes the total.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub tenant_id: Uuid,
    pub cart_id: Uuid,
    pub customer_id: Uuid,
    pub items: Vec<OrderDraftItem>,
    pub total: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone)]
pub struct OrderDraftItem {
    pub product_id: Uuid,
    pub variant_id: Uuid,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub currency: String,
}

pub trait OrderRepository: Send + Sync {
    /// Persist a new order with status `Pending`.
    fn create(&self, draft: OrderDraft) -> impl Future<Output = StorefrontResult<Order>> + Send;
    fn get_by_id(&self, tenant_id: Uuid, id: Uuid)
    -> impl Future<Output = StorefrontResult<Order>> + Send;
    fn list(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = StorefrontResult<PaginatedResult<Order>>> + Send;
    fn list_by_customer(
        &self,
        tenant_id: Uuid,
        customer_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = StorefrontResult<PaginatedResult<Order>>> + Send;
    fn list_by_status(
        &self,
        tenant_id: Uuid,
        status: OrderStatus,
        pagination: Pagination,
    ) -> impl Future<Output = StorefrontResult<PaginatedResult<Order>>> + Send;
    fn set_status(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        status: OrderStatus,
    ) -> impl Future<Output = StorefrontResult<Order>> + Send;
}

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

pub trait CustomerRepository: Send + Sync {
    fn create(&self, input: CreateCustomer) -> impl Future<Output = StorefrontResult<Customer>> + Send;
    fn get_by_id(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = StorefrontResult<Customer>> + Send;
    fn get_by_email(
        &self,
        tenant_id: Uuid,
        email: &str,
    ) -> impl Future<Output = StorefrontResult<Customer>> + Send;
    /// Existence query used by email-uniqueness validation.
    fn email_exists(
        &self,
        tenant_id: Uuid,
        email: &str,
    ) -> impl Future<Output = StorefrontResult<bool>> + Send;
    fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        input: UpdateCustomer,
    ) -> impl Future<Output = StorefrontResult<Customer>> + Send;
    /// Soft-delete: sets status to Inactive.
    fn delete(&self, tenant_id: Uuid, id: Uuid) -> impl Future<Output = StorefrontResult<()>> + Send;
    fn list(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = StorefrontResult<PaginatedResult<Customer>>> + Send;
}

// ---------------------------------------------------------------------------
// Stock
// ---------------------------------------------------------------------------

pub trait StockRepository: Send + Sync {
    /// Create or replace the stock level for a variant.
    fn upsert(&self, input: CreateStockLevel)
    -> impl Future<Output = StorefrontResult<StockLevel>> + Send;
    fn get_by_variant(
        &self,
        tenant_id: Uuid,
        variant_id: Uuid,
    ) -> impl Future<Output = StorefrontResult<StockLevel>> + Send;
    fn list(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = StorefrontResult<PaginatedResult<StockLevel>>> + Send;
}

// ---------------------------------------------------------------------------
// Outbox (append + poll; not tenant-filtered on read)
// ---------------------------------------------------------------------------

pub trait OutboxRepository: Send + Sync {
    /// Append a new unpublished event row.
    fn append(
        &self,
        input: CreateOutboxEvent,
    ) -> impl Future<Output = StorefrontResult<OutboxEvent>> + Send;
    /// Unpublished rows across all tenants, oldest first.
    fn list_unpublished(
        &self,
        limit: u64,
    ) -> impl Future<Output = StorefrontResult<Vec<OutboxEvent>>> + Send;
    fn mark_published(&self, id: Uuid) -> impl Future<Output = StorefrontResult<()>> + Send;
}
