//! Product and variant endpoints.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use storefront_core::models::product::{
    CreateProduct, CreateProductVariant, UpdateProduct, UpdateProductVariant,
};
use surrealdb::Connection;
use uuid::Uuid;

use crate::dto::{
    CreateProductRequest, CreateVariantRequest, PageQuery, PageResponse, ProductResponse,
    UpdateProductRequest, UpdateVariantRequest, VariantResponse,
};
use crate::error::ApiError;
use crate::state::AppState;
use crate::tenant::TenantId;

pub async fn create<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Json(body): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    let product = state
        .catalog
        .create_product(CreateProduct {
            tenant_id,
            name: body.name,
            slug: body.slug,
            description: body.description,
            brand_id: body.brand_id,
            category_id: body.category_id,
            tags: body.tags,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

pub async fn list<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse<ProductResponse>>, ApiError> {
    let page = state
        .catalog
        .list_products(tenant_id, query.to_pagination())
        .await?;
    Ok(Json(PageResponse::from_result(page, Into::into)))
}

pub async fn get<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state.catalog.get_product(tenant_id, id).await?;
    Ok(Json(product.into()))
}

pub async fn update<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state
        .catalog
        .update_product(
            tenant_id,
            id,
            UpdateProduct {
                name: body.name,
                description: body.description,
                brand_id: body.brand_id,
                category_id: body.category_id,
                tags: body.tags,
            },
        )
        .await?;
    Ok(Json(product.into()))
}

pub async fn delete<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.catalog.delete_product(tenant_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Variants
// ---------------------------------------------------------------------------

pub async fn create_variant<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(product_id): Path<Uuid>,
    Json(body): Json<CreateVariantRequest>,
) -> Result<(StatusCode, Json<VariantResponse>), ApiError> {
    let variant = state
        .catalog
        .create_variant(CreateProductVariant {
            tenant_id,
            product_id,
            sku_code: body.sku_code,
            barcode: body.barcode,
            price: body.price,
            promotional_price: body.promotional_price,
            currency: body.currency,
            weight_kg: body.weight_kg,
            height_cm: body.height_cm,
            width_cm: body.width_cm,
            depth_cm: body.depth_cm,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(variant.into())))
}

pub async fn list_variants<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(product_id): Path<Uuid>,
) -> Result<Json<Vec<VariantResponse>>, ApiError> {
    let variants = state.catalog.list_variants(tenant_id, product_id).await?;
    Ok(Json(variants.into_iter().map(Into::into).collect()))
}

pub async fn get_variant<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(id): Path<Uuid>,
) -> Result<Json<VariantResponse>, ApiError> {
    let variant = state.catalog.get_variant(tenant_id, id).await?;
    Ok(Json(variant.into()))
}

pub async fn update_variant<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateVariantRequest>,
) -> Result<Json<VariantResponse>, ApiError> {
    let variant = state
        .catalog
        .update_variant(
            tenant_id,
            id,
            UpdateProductVariant {
                barcode: body.barcode,
                price: body.price,
                promotional_price: body.promotional_price,
                weight_kg: body.weight_kg,
                height_cm: body.height_cm,
                width_cm: body.width_cm,
                depth_cm: body.depth_cm,
            },
        )
        .await?;
    Ok(Json(variant.into()))
}

pub async fn delete_variant<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.catalog.delete_variant(tenant_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
