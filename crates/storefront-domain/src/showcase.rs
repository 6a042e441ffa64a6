//! Showcase service — the public, read-only, paginated product listing
//! for storefront consumption.

use storefront_core::error::{StorefrontError, StorefrontResult};
use storefront_core::models::product::{Product, ProductVariant};
use storefront_core::repository::{
    PaginatedResult, Pagination, ProductRepository, ShowcaseFilter,
};
use uuid::Uuid;

/// Hard cap on the page size accepted by the showcase listing.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Listing query: page/size plus optional filters.
#[derive(Debug, Clone, Default)]
pub struct ShowcaseQuery {
    /// Zero-based page number.
    pub page: u64,
    /// Page size; must be in `1..=MAX_PAGE_SIZE`. Zero means "use the
    /// default" at the HTTP layer, which never forwards it here.
    pub size: u64,
    pub search: Option<String>,
    pub brand_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
}

/// Showcase service.
pub struct ShowcaseService<P: ProductRepository> {
    product_repo: P,
}

impl<P: ProductRepository> ShowcaseService<P> {
    pub fn new(product_repo: P) -> Self {
        Self { product_repo }
    }

    /// List products for the storefront, paginated and optionally
    /// filtered by search term, brand, or category.
    ///
    /// Rejects `size == 0` and `size > MAX_PAGE_SIZE` with a
    /// validation error before touching the repository.
    pub async fn list_products(
        &self,
        tenant_id: Uuid,
        query: ShowcaseQuery,
    ) -> StorefrontResult<PaginatedResult<Product>> {
        if query.size == 0 || query.size > MAX_PAGE_SIZE {
            return Err(StorefrontError::validation(format!(
                "Page size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }

        let pagination = Pagination {
            offset: query.page * query.size,
            limit: query.size,
        };
        let filter = ShowcaseFilter {
            search: query.search,
            brand_id: query.brand_id,
            category_id: query.category_id,
        };

        self.product_repo.search(tenant_id, filter, pagination).await
    }

    /// Full product details for one showcase entry: the product plus
    /// all of its variants with prices.
    pub async fn get_product_details(
        &self,
        tenant_id: Uuid,
        product_id: Uuid,
    ) -> StorefrontResult<(Product, Vec<ProductVariant>)> {
        let product = self.product_repo.get_by_id(tenant_id, product_id).await?;
        let variants = self
            .product_repo
            .list_variants(tenant_id, product_id)
            .await?;
        Ok((product, variants))
    }
}
