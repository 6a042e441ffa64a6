//! Brand endpoints.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use storefront_core::models::brand::{CreateBrand, UpdateBrand};
use surrealdb::Connection;
use uuid::Uuid;

use crate::dto::{
    BrandResponse, CreateBrandRequest, PageQuery, PageResponse, UpdateBrandRequest,
};
use crate::error::ApiError;
use crate::state::AppState;
use crate::tenant::TenantId;

pub async fn create<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Json(body): Json<CreateBrandRequest>,
) -> Result<(StatusCode, Json<BrandResponse>), ApiError> {
    let brand = state
        .catalog
        .create_brand(CreateBrand {
            tenant_id,
            name: body.name,
            description: body.description,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(brand.into())))
}

pub async fn list<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse<BrandResponse>>, ApiError> {
    let page = state
        .catalog
        .list_brands(tenant_id, query.to_pagination())
        .await?;
    Ok(Json(PageResponse::from_result(page, Into::into)))
}

pub async fn get<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(id): Path<Uuid>,
) -> Result<Json<BrandResponse>, ApiError> {
    let brand = state.catalog.get_brand(tenant_id, id).await?;
    Ok(Json(brand.into()))
}

pub async fn update<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateBrandRequest>,
) -> Result<Json<BrandResponse>, ApiError> {
    let brand = state
        .catalog
        .update_brand(
            tenant_id,
            id,
            UpdateBrand {
                name: body.name,
                description: body.description,
            },
        )
        .await?;
    Ok(Json(brand.into()))
}

pub async fn delete<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.catalog.delete_brand(tenant_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
