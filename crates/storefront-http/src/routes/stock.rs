//! Stock level endpoints.

use axum::Json;
use axum::extract::{Path, Query, State};
use surrealdb::Connection;
use uuid::Uuid;

use crate::dto::{AdjustStockRequest, PageQuery, PageResponse, SetStockRequest, StockResponse};
use crate::error::ApiError;
use crate::state::AppState;
use crate::tenant::TenantId;

pub async fn list<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse<StockResponse>>, ApiError> {
    let page = state
        .stock
        .list_levels(tenant_id, query.to_pagination())
        .await?;
    Ok(Json(PageResponse::from_result(page, Into::into)))
}

pub async fn get<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(variant_id): Path<Uuid>,
) -> Result<Json<StockResponse>, ApiError> {
    let level = state.stock.get_level(tenant_id, variant_id).await?;
    Ok(Json(level.into()))
}

pub async fn set<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(variant_id): Path<Uuid>,
    Json(body): Json<SetStockRequest>,
) -> Result<Json<StockResponse>, ApiError> {
    let level = state
        .stock
        .set_level(tenant_id, variant_id, body.quantity)
        .await?;
    Ok(Json(level.into()))
}

pub async fn adjust<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(variant_id): Path<Uuid>,
    Json(body): Json<AdjustStockRequest>,
) -> Result<Json<StockResponse>, ApiError> {
    let level = state
        .stock
        .adjust(tenant_id, variant_id, body.delta)
        .await?;
    Ok(Json(level.into()))
}
