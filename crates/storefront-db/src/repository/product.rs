//! SurrealDB implementation of [`ProductRepository`].
//!
//! Monetary amounts are stored as decimal strings to avoid float
//! drift; they are parsed back into `rust_decimal::Decimal` on read.
//! The showcase search builds its WHERE clause from the optional
//! filters; all clauses are ANDed with the tenant filter.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use storefront_core::error::StorefrontResult;
use storefront_core::models::product::{
    CreateProduct, CreateProductVariant, Product, ProductVariant, UpdateProduct,
    UpdateProductVariant,
};
use storefront_core::repository::{PaginatedResult, Pagination, ProductRepository, ShowcaseFilter};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

fn parse_uuid(value: &str, what: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(value).map_err(|e| DbError::Decode(format!("invalid {what} UUID: {e}")))
}

fn parse_opt_uuid(value: Option<&str>, what: &str) -> Result<Option<Uuid>, DbError> {
    value.map(|s| parse_uuid(s, what)).transpose()
}

fn parse_decimal(value: &str, what: &str) -> Result<Decimal, DbError> {
    value
        .parse()
        .map_err(|e| DbError::Decode(format!("invalid {what} amount: {e}")))
}

// ---------------------------------------------------------------------------
// Product rows
// ---------------------------------------------------------------------------

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct ProductRow {
    tenant_id: String,
    name: String,
    slug: String,
    description: Option<String>,
    brand_id: Option<String>,
    category_id: Option<String>,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self, id: Uuid) -> Result<Product, DbError> {
        Ok(Product {
            id,
            tenant_id: parse_uuid(&self.tenant_id, "tenant")?,
            name: self.name,
            slug: self.slug,
            description: self.description,
            brand_id: parse_opt_uuid(self.brand_id.as_deref(), "brand")?,
            category_id: parse_opt_uuid(self.category_id.as_deref(), "category")?,
            tags: self.tags,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct ProductRowWithId {
    record_id: String,
    tenant_id: String,
    name: String,
    slug: String,
    description: Option<String>,
    brand_id: Option<String>,
    category_id: Option<String>,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRowWithId {
    fn try_into_product(self) -> Result<Product, DbError> {
        let id = parse_uuid(&self.record_id, "product")?;
        Ok(Product {
            id,
            tenant_id: parse_uuid(&self.tenant_id, "tenant")?,
            name: self.name,
            slug: self.slug,
            description: self.description,
            brand_id: parse_opt_uuid(self.brand_id.as_deref(), "brand")?,
            category_id: parse_opt_uuid(self.category_id.as_deref(), "category")?,
            tags: self.tags,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Variant rows
// ---------------------------------------------------------------------------

#[derive(Debug, SurrealValue)]
struct VariantRow {
    tenant_id: String,
    product_id: String,
    sku_code: String,
    barcode: Option<String>,
    price: String,
    promotional_price: Option<String>,
    currency: String,
    weight_kg: Option<f64>,
    height_cm: Option<f64>,
    width_cm: Option<f64>,
    depth_cm: Option<f64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl VariantRow {
    fn into_variant(self, id: Uuid) -> Result<ProductVariant, DbError> {
        Ok(ProductVariant {
            id,
            tenant_id: parse_uuid(&self.tenant_id, "tenant")?,
            product_id: parse_uuid(&self.product_id, "product")?,
            sku_code: self.sku_code,
            barcode: self.barcode,
            price: parse_decimal(&self.price, "price")?,
            promotional_price: self
                .promotional_price
                .as_deref()
                .map(|p| parse_decimal(p, "promotional price"))
                .transpose()?,
            currency: self.currency,
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            width_cm: self.width_cm,
            depth_cm: self.depth_cm,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, SurrealValue)]
struct VariantRowWithId {
    record_id: String,
    tenant_id: String,
    product_id: String,
    sku_code: String,
    barcode: Option<String>,
    price: String,
    promotional_price: Option<String>,
    currency: String,
    weight_kg: Option<f64>,
    height_cm: Option<f64>,
    width_cm: Option<f64>,
    depth_cm: Option<f64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl VariantRowWithId {
    fn try_into_variant(self) -> Result<ProductVariant, DbError> {
        let id = parse_uuid(&self.record_id, "variant")?;
        Ok(ProductVariant {
            id,
            tenant_id: parse_uuid(&self.tenant_id, "tenant")?,
            product_id: parse_uuid(&self.product_id, "product")?,
            sku_code: self.sku_code,
            barcode: self.barcode,
            price: parse_decimal(&self.price, "price")?,
            promotional_price: self
                .promotional_price
                .as_deref()
                .map(|p| parse_decimal(p, "promotional price"))
                .transpose()?,
            currency: self.currency,
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            width_cm: self.width_cm,
            depth_cm: self.depth_cm,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the Product repository.
#[derive(Clone)]
pub struct SurrealProductRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealProductRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ProductRepository for SurrealProductRepository<C> {
    async fn create(&self, input: CreateProduct) -> StorefrontResult<Product> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('product', $id) SET \
                 tenant_id = $tenant_id, \
                 name = $name, slug = $slug, \
                 description = $description, \
                 brand_id = $brand_id, \
                 category_id = $category_id, \
                 tags = $tags",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", input.tenant_id.to_string()))
            .bind(("name", input.name))
            .bind(("slug", input.slug))
            .bind(("description", input.description))
            .bind(("brand_id", input.brand_id.map(|b| b.to_string())))
            .bind(("category_id", input.category_id.map(|c| c.to_string())))
            .bind(("tags", input.tags))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<ProductRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "product".into(),
            id: id_str,
        })?;

        Ok(row.into_product(id)?)
    }

    async fn get_by_id(&self, tenant_id: Uuid, id: Uuid) -> StorefrontResult<Product> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT * FROM type::record('product', $id) \
                 WHERE tenant_id = $tenant_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ProductRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "product".into(),
            id: id_str,
        })?;

        Ok(row.into_product(id)?)
    }

    async fn get_by_slug(&self, tenant_id: Uuid, slug: &str) -> StorefrontResult<Product> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM product \
                 WHERE tenant_id = $tenant_id AND slug = $slug",
            )
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("slug", slug.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ProductRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "product".into(),
            id: format!("slug={slug}"),
        })?;

        Ok(row.try_into_product()?)
    }

    async fn slug_exists(&self, tenant_id: Uuid, slug: &str) -> StorefrontResult<bool> {
        let mut result = self
            .db
            .query(
                "SELECT count() AS total FROM product \
                 WHERE tenant_id = $tenant_id AND slug = $slug GROUP ALL",
            )
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("slug", slug.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0) > 0)
    }

    async fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        input: UpdateProduct,
    ) -> StorefrontResult<Product> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.description.is_some() {
            sets.push("description = $description");
        }
        if input.brand_id.is_some() {
            sets.push("brand_id = $brand_id");
        }
        if input.category_id.is_some() {
            sets.push("category_id = $category_id");
        }
        if input.tags.is_some() {
            sets.push("tags = $tags");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('product', $id) SET {} \
             WHERE tenant_id = $tenant_id",
            sets.join(", ")
        );

        let mut builder = self
            .db
            .query(&query)
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()));

        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(description) = input.description {
            builder = builder.bind(("description", description));
        }
        if let Some(brand_id) = input.brand_id {
            builder = builder.bind(("brand_id", brand_id.map(|b| b.to_string())));
        }
        if let Some(category_id) = input.category_id {
            builder = builder.bind(("category_id", category_id.map(|c| c.to_string())));
        }
        if let Some(tags) = input.tags {
            builder = builder.bind(("tags", tags));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<ProductRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "product".into(),
            id: id_str,
        })?;

        Ok(row.into_product(id)?)
    }

    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> StorefrontResult<()> {
        // Variants belong to the product aggregate and go with it.
        self.db
            .query(
                "DELETE product_variant \
                 WHERE tenant_id = $tenant_id AND product_id = $product_id; \
                 DELETE type::record('product', $id) \
                 WHERE tenant_id = $tenant_id;",
            )
            .bind(("id", id.to_string()))
            .bind(("product_id", id.to_string()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn list(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> StorefrontResult<PaginatedResult<Product>> {
        self.search(tenant_id, ShowcaseFilter::default(), pagination)
            .await
    }

    async fn search(
        &self,
        tenant_id: Uuid,
        filter: ShowcaseFilter,
        pagination: Pagination,
    ) -> StorefrontResult<PaginatedResult<Product>> {
        let tenant_id_str = tenant_id.to_string();

        let mut clauses = vec!["tenant_id = $tenant_id"];
        if filter.search.is_some() {
            clauses.push(
                "(string::contains(string::lowercase(name), $term) \
                 OR string::contains(string::lowercase(description ?? ''), $term))",
            );
        }
        if filter.brand_id.is_some() {
            clauses.push("brand_id = $brand_id");
        }
        if filter.category_id.is_some() {
            clauses.push("category_id = $category_id");
        }
        let where_clause = clauses.join(" AND ");

        let count_query = format!(
            "SELECT count() AS total FROM product WHERE {where_clause} GROUP ALL"
        );
        let page_query = format!(
            "SELECT meta::id(id) AS record_id, * FROM product \
             WHERE {where_clause} \
             ORDER BY created_at ASC \
             LIMIT $limit START $offset"
        );

        let term = filter.search.map(|s| s.to_lowercase());

        let mut count_builder = self
            .db
            .query(&count_query)
            .bind(("tenant_id", tenant_id_str.clone()));
        if let Some(ref term) = term {
            count_builder = count_builder.bind(("term", term.clone()));
        }
        if let Some(brand_id) = filter.brand_id {
            count_builder = count_builder.bind(("brand_id", brand_id.to_string()));
        }
        if let Some(category_id) = filter.category_id {
            count_builder = count_builder.bind(("category_id", category_id.to_string()));
        }
        let mut count_result = count_builder.await.map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut page_builder = self
            .db
            .query(&page_query)
            .bind(("tenant_id", tenant_id_str))
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset));
        if let Some(term) = term {
            page_builder = page_builder.bind(("term", term));
        }
        if let Some(brand_id) = filter.brand_id {
            page_builder = page_builder.bind(("brand_id", brand_id.to_string()));
        }
        if let Some(category_id) = filter.category_id {
            page_builder = page_builder.bind(("category_id", category_id.to_string()));
        }
        let mut result = page_builder.await.map_err(DbError::from)?;

        let rows: Vec<ProductRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_product())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    async fn create_variant(
        &self,
        input: CreateProductVariant,
    ) -> StorefrontResult<ProductVariant> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('product_variant', $id) SET \
                 tenant_id = $tenant_id, \
                 product_id = $product_id, \
                 sku_code = $sku_code, \
                 barcode = $barcode, \
                 price = $price, \
                 promotional_price = $promotional_price, \
                 currency = $currency, \
                 weight_kg = $weight_kg, \
                 height_cm = $height_cm, \
                 width_cm = $width_cm, \
                 depth_cm = $depth_cm",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", input.tenant_id.to_string()))
            .bind(("product_id", input.product_id.to_string()))
            .bind(("sku_code", input.sku_code))
            .bind(("barcode", input.barcode))
            .bind(("price", input.price.to_string()))
            .bind((
                "promotional_price",
                input.promotional_price.map(|p| p.to_string()),
            ))
            .bind(("currency", input.currency))
            .bind(("weight_kg", input.weight_kg))
            .bind(("height_cm", input.height_cm))
            .bind(("width_cm", input.width_cm))
            .bind(("depth_cm", input.depth_cm))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<VariantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "product_variant".into(),
            id: id_str,
        })?;

        Ok(row.into_variant(id)?)
    }

    async fn get_variant(&self, tenant_id: Uuid, id: Uuid) -> StorefrontResult<ProductVariant> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT * FROM type::record('product_variant', $id) \
                 WHERE tenant_id = $tenant_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<VariantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "product_variant".into(),
            id: id_str,
        })?;

        Ok(row.into_variant(id)?)
    }

    async fn sku_exists(&self, tenant_id: Uuid, sku_code: &str) -> StorefrontResult<bool> {
        let mut result = self
            .db
            .query(
                "SELECT count() AS total FROM product_variant \
                 WHERE tenant_id = $tenant_id AND sku_code = $sku_code GROUP ALL",
            )
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("sku_code", sku_code.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0) > 0)
    }

    async fn list_variants(
        &self,
        tenant_id: Uuid,
        product_id: Uuid,
    ) -> StorefrontResult<Vec<ProductVariant>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM product_variant \
                 WHERE tenant_id = $tenant_id AND product_id = $product_id \
                 ORDER BY created_at ASC",
            )
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("product_id", product_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<VariantRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_variant())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(items)
    }

    async fn update_variant(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        input: UpdateProductVariant,
    ) -> StorefrontResult<ProductVariant> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.barcode.is_some() {
            sets.push("barcode = $barcode");
        }
        if input.price.is_some() {
            sets.push("price = $price");
        }
        if input.promotional_price.is_some() {
            sets.push("promotional_price = $promotional_price");
        }
        if input.weight_kg.is_some() {
            sets.push("weight_kg = $weight_kg");
        }
        if input.height_cm.is_some() {
            sets.push("height_cm = $height_cm");
        }
        if input.width_cm.is_some() {
            sets.push("width_cm = $width_cm");
        }
        if input.depth_cm.is_some() {
            sets.push("depth_cm = $depth_cm");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('product_variant', $id) SET {} \
             WHERE tenant_id = $tenant_id",
            sets.join(", ")
        );

        let mut builder = self
            .db
            .query(&query)
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()));

        if let Some(barcode) = input.barcode {
            builder = builder.bind(("barcode", barcode));
        }
        if let Some(price) = input.price {
            builder = builder.bind(("price", price.to_string()));
        }
        if let Some(promotional_price) = input.promotional_price {
            builder = builder.bind((
                "promotional_price",
                promotional_price.map(|p| p.to_string()),
            ));
        }
        if let Some(weight_kg) = input.weight_kg {
            builder = builder.bind(("weight_kg", weight_kg));
        }
        if let Some(height_cm) = input.height_cm {
            builder = builder.bind(("height_cm", height_cm));
        }
        if let Some(width_cm) = input.width_cm {
            builder = builder.bind(("width_cm", width_cm));
        }
        if let Some(depth_cm) = input.depth_cm {
            builder = builder.bind(("depth_cm", depth_cm));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<VariantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "product_variant".into(),
            id: id_str,
        })?;

        Ok(row.into_variant(id)?)
    }

    async fn delete_variant(&self, tenant_id: Uuid, id: Uuid) -> StorefrontResult<()> {
        self.db
            .query(
                "DELETE type::record('product_variant', $id) \
                 WHERE tenant_id = $tenant_id",
            )
            .bind(("id", id.to_string()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }
}
