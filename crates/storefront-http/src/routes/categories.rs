//! Category endpoints.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use storefront_core::models::category::{CreateCategory, UpdateCategory};
use surrealdb::Connection;
use uuid::Uuid;

use crate::dto::{
    CategoryResponse, CreateCategoryRequest, PageQuery, PageResponse, UpdateCategoryRequest,
};
use crate::error::ApiError;
use crate::state::AppState;
use crate::tenant::TenantId;

pub async fn create<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Json(body): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    let category = state
        .catalog
        .create_category(CreateCategory {
            tenant_id,
            name: body.name,
            description: body.description,
            parent_id: body.parent_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

pub async fn list<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse<CategoryResponse>>, ApiError> {
    let page = state
        .catalog
        .list_categories(tenant_id, query.to_pagination())
        .await?;
    Ok(Json(PageResponse::from_result(page, Into::into)))
}

pub async fn get<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(id): Path<Uuid>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let category = state.catalog.get_category(tenant_id, id).await?;
    Ok(Json(category.into()))
}

/// Direct children of a category, id-linked (never embedded).
pub async fn children<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let children = state.catalog.list_subcategories(tenant_id, id).await?;
    Ok(Json(children.into_iter().map(Into::into).collect()))
}

pub async fn update<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let category = state
        .catalog
        .update_category(
            tenant_id,
            id,
            UpdateCategory {
                name: body.name,
                description: body.description,
                parent_id: body.parent_id,
            },
        )
        .await?;
    Ok(Json(category.into()))
}

pub async fn delete<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.catalog.delete_category(tenant_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
