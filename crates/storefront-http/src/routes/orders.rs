//! Order endpoints.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use storefront_core::StorefrontError;
use storefront_core::models::order::{CreateOrder, OrderStatus};
use storefront_core::repository::Pagination;
use surrealdb::Connection;
use uuid::Uuid;

use crate::dto::{CreateOrderRequest, OrderListQuery, OrderResponse, PageResponse};
use crate::error::ApiError;
use crate::state::AppState;
use crate::tenant::TenantId;

pub async fn create<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Json(body): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let order = state
        .orders
        .create_order(CreateOrder {
            tenant_id,
            cart_id: body.cart_id,
            customer_id: body.customer_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

pub async fn list<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<PageResponse<OrderResponse>>, ApiError> {
    let status = query
        .status
        .as_deref()
        .map(|s| {
            OrderStatus::parse(s).ok_or_else(|| {
                StorefrontError::validation(format!("Unknown order status: {s}"))
            })
        })
        .transpose()?;

    let pagination = Pagination {
        offset: query.page * query.size,
        limit: query.size,
    };
    let page = state
        .orders
        .list_orders(tenant_id, query.customer_id, status, pagination)
        .await?;
    Ok(Json(PageResponse::from_result(page, Into::into)))
}

pub async fn get<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state.orders.get_order(tenant_id, id).await?;
    Ok(Json(order.into()))
}

pub async fn confirm<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state.orders.confirm_order(tenant_id, id).await?;
    Ok(Json(order.into()))
}

pub async fn cancel<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state.orders.cancel_order(tenant_id, id).await?;
    Ok(Json(order.into()))
}

pub async fn finalize<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state.orders.finalize_order(tenant_id, id).await?;
    Ok(Json(order.into()))
}
