//! Catalog domain service — business rules for brands, categories,
//! products, and variants.
//!
//! Creation flows validate field formats first, then run the
//! check-then-act uniqueness queries (slug, SKU) against the
//! repository. The unique database indexes are the backstop for the
//! race window between check and insert.

use storefront_core::error::{StorefrontError, StorefrontResult};
use storefront_core::models::brand::{Brand, CreateBrand, UpdateBrand};
use storefront_core::models::category::{Category, CreateCategory, UpdateCategory};
use storefront_core::models::product::{
    CreateProduct, CreateProductVariant, Product, ProductVariant, UpdateProduct,
    UpdateProductVariant,
};
use storefront_core::repository::{
    BrandRepository, CategoryRepository, PaginatedResult, Pagination, ProductRepository,
};
use storefront_core::validation;
use tracing::info;
use uuid::Uuid;

/// Catalog service.
///
/// Generic over repository implementations so that the domain layer
/// has no dependency on the database crate.
pub struct CatalogService<B, C, P>
where
    B: BrandRepository,
    C: CategoryRepository,
    P: ProductRepository,
{
    brand_repo: B,
    category_repo: C,
    product_repo: P,
}

impl<B, C, P> CatalogService<B, C, P>
where
    B: BrandRepository,
    C: CategoryRepository,
    P: ProductRepository,
{
    pub fn new(brand_repo: B, category_repo: C, product_repo: P) -> Self {
        Self {
            brand_repo,
            category_repo,
            product_repo,
        }
    }

    // -------------------------------------------------------------------
    // Brands
    // -------------------------------------------------------------------

    pub async fn create_brand(&self, input: CreateBrand) -> StorefrontResult<Brand> {
        validation::validate_brand_name(&input.name)?;

        let brand = self.brand_repo.create(input).await?;
        info!(tenant_id = %brand.tenant_id, brand_id = %brand.id, "Brand created");
        Ok(brand)
    }

    pub async fn update_brand(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        input: UpdateBrand,
    ) -> StorefrontResult<Brand> {
        if let Some(ref name) = input.name {
            validation::validate_brand_name(name)?;
        }
        self.brand_repo.update(tenant_id, id, input).await
    }

    pub async fn get_brand(&self, tenant_id: Uuid, id: Uuid) -> StorefrontResult<Brand> {
        self.brand_repo.get_by_id(tenant_id, id).await
    }

    pub async fn delete_brand(&self, tenant_id: Uuid, id: Uuid) -> StorefrontResult<()> {
        self.brand_repo.get_by_id(tenant_id, id).await?;
        self.brand_repo.delete(tenant_id, id).await
    }

    pub async fn list_brands(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> StorefrontResult<PaginatedResult<Brand>> {
        self.brand_repo.list(tenant_id, pagination).await
    }

    // -------------------------------------------------------------------
    // Categories
    // -------------------------------------------------------------------

    pub async fn create_category(&self, input: CreateCategory) -> StorefrontResult<Category> {
        validation::validate_category_name(&input.name)?;

        // A subcategory must point at an existing parent of the same
        // tenant; the not-found error propagates as-is.
        if let Some(parent_id) = input.parent_id {
            self.category_repo
                .get_by_id(input.tenant_id, parent_id)
                .await?;
        }

        let category = self.category_repo.create(input).await?;
        info!(
            tenant_id = %category.tenant_id,
            category_id = %category.id,
            "Category created"
        );
        Ok(category)
    }

    pub async fn update_category(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        input: UpdateCategory,
    ) -> StorefrontResult<Category> {
        if let Some(ref name) = input.name {
            validation::validate_category_name(name)?;
        }
        if let Some(Some(parent_id)) = input.parent_id {
            if parent_id == id {
                return Err(StorefrontError::validation(
                    "Category cannot be its own parent",
                ));
            }
            self.category_repo.get_by_id(tenant_id, parent_id).await?;
        }
        self.category_repo.update(tenant_id, id, input).await
    }

    pub async fn get_category(&self, tenant_id: Uuid, id: Uuid) -> StorefrontResult<Category> {
        self.category_repo.get_by_id(tenant_id, id).await
    }

    pub async fn delete_category(&self, tenant_id: Uuid, id: Uuid) -> StorefrontResult<()> {
        self.category_repo.get_by_id(tenant_id, id).await?;
        self.category_repo.delete(tenant_id, id).await
    }

    pub async fn list_categories(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> StorefrontResult<PaginatedResult<Category>> {
        self.category_repo.list(tenant_id, pagination).await
    }

    pub async fn list_subcategories(
        &self,
        tenant_id: Uuid,
        parent_id: Uuid,
    ) -> StorefrontResult<Vec<Category>> {
        self.category_repo.get_by_id(tenant_id, parent_id).await?;
        self.category_repo.list_children(tenant_id, parent_id).await
    }

    // -------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------

    pub async fn create_product(&self, input: CreateProduct) -> StorefrontResult<Product> {
        // 1. Field formats.
        validation::validate_product_name(&input.name)?;
        validation::validate_slug(&input.slug)?;

        // 2. Slug uniqueness within the tenant's catalog.
        if self
            .product_repo
            .slug_exists(input.tenant_id, &input.slug)
            .await?
        {
            return Err(StorefrontError::validation(format!(
                "Slug already exists in the catalog: {}",
                input.slug
            )));
        }

        // 3. Referenced brand/category must exist under the same tenant.
        if let Some(brand_id) = input.brand_id {
            self.brand_repo.get_by_id(input.tenant_id, brand_id).await?;
        }
        if let Some(category_id) = input.category_id {
            self.category_repo
                .get_by_id(input.tenant_id, category_id)
                .await?;
        }

        let product = self.product_repo.create(input).await?;
        info!(
            tenant_id = %product.tenant_id,
            product_id = %product.id,
            slug = %product.slug,
            "Product created"
        );
        Ok(product)
    }

    pub async fn update_product(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        input: UpdateProduct,
    ) -> StorefrontResult<Product> {
        if let Some(ref name) = input.name {
            validation::validate_product_name(name)?;
        }
        if let Some(Some(brand_id)) = input.brand_id {
            self.brand_repo.get_by_id(tenant_id, brand_id).await?;
        }
        if let Some(Some(category_id)) = input.category_id {
            self.category_repo.get_by_id(tenant_id, category_id).await?;
        }
        self.product_repo.update(tenant_id, id, input).await
    }

    pub async fn get_product(&self, tenant_id: Uuid, id: Uuid) -> StorefrontResult<Product> {
        self.product_repo.get_by_id(tenant_id, id).await
    }

    pub async fn delete_product(&self, tenant_id: Uuid, id: Uuid) -> StorefrontResult<()> {
        // Surface 404 for an unknown id instead of silently succeeding.
        self.product_repo.get_by_id(tenant_id, id).await?;
        self.product_repo.delete(tenant_id, id).await
    }

    pub async fn list_products(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> StorefrontResult<PaginatedResult<Product>> {
        self.product_repo.list(tenant_id, pagination).await
    }

    pub async fn list_variants(
        &self,
        tenant_id: Uuid,
        product_id: Uuid,
    ) -> StorefrontResult<Vec<ProductVariant>> {
        self.product_repo.get_by_id(tenant_id, product_id).await?;
        self.product_repo.list_variants(tenant_id, product_id).await
    }

    // -------------------------------------------------------------------
    // Variants
    // -------------------------------------------------------------------

    pub async fn create_variant(
        &self,
        input: CreateProductVariant,
    ) -> StorefrontResult<ProductVariant> {
        // 1. Owning product must exist under this tenant.
        self.product_repo
            .get_by_id(input.tenant_id, input.product_id)
            .await?;

        // 2. SKU format, prices, dimensions.
        validation::validate_sku_code(&input.sku_code)?;
        validation::validate_variant_prices(input.price, input.promotional_price)?;
        validation::validate_dimensions(
            input.weight_kg,
            input.height_cm,
            input.width_cm,
            input.depth_cm,
        )?;

        // 3. SKU uniqueness within the tenant's catalog.
        if self
            .product_repo
            .sku_exists(input.tenant_id, &input.sku_code)
            .await?
        {
            return Err(StorefrontError::validation(format!(
                "SKU code already exists in the catalog: {}",
                input.sku_code
            )));
        }

        let variant = self.product_repo.create_variant(input).await?;
        info!(
            tenant_id = %variant.tenant_id,
            variant_id = %variant.id,
            sku_code = %variant.sku_code,
            "Product variant created"
        );
        Ok(variant)
    }

    pub async fn update_variant(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        input: UpdateProductVariant,
    ) -> StorefrontResult<ProductVariant> {
        // The effective price pair after the update must still satisfy
        // the price rules, so load the current variant to fill gaps.
        let current = self.product_repo.get_variant(tenant_id, id).await?;

        let price = input.price.unwrap_or(current.price);
        let promotional_price = match input.promotional_price {
            Some(promo) => promo,
            None => current.promotional_price,
        };
        validation::validate_variant_prices(price, promotional_price)?;

        validation::validate_dimensions(
            input.weight_kg.unwrap_or(current.weight_kg),
            input.height_cm.unwrap_or(current.height_cm),
            input.width_cm.unwrap_or(current.width_cm),
            input.depth_cm.unwrap_or(current.depth_cm),
        )?;

        self.product_repo.update_variant(tenant_id, id, input).await
    }

    pub async fn get_variant(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> StorefrontResult<ProductVariant> {
        self.product_repo.get_variant(tenant_id, id).await
    }

    pub async fn delete_variant(&self, tenant_id: Uuid, id: Uuid) -> StorefrontResult<()> {
        self.product_repo.get_variant(tenant_id, id).await?;
        self.product_repo.delete_variant(tenant_id, id).await
    }
}
