//! Cart endpoints.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use storefront_core::models::cart::{CreateCart, CreateCartItem};
use storefront_core::repository::Pagination;
use surrealdb::Connection;
use uuid::Uuid;

use crate::dto::{
    AddCartItemRequest, CartListQuery, CartResponse, CreateCartRequest, PageResponse,
    UpdateItemQuantityRequest,
};
use crate::error::ApiError;
use crate::state::AppState;
use crate::tenant::TenantId;

pub async fn create<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Json(body): Json<CreateCartRequest>,
) -> Result<(StatusCode, Json<CartResponse>), ApiError> {
    let cart = state
        .carts
        .create_cart(CreateCart {
            tenant_id,
            customer_id: body.customer_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(cart.into())))
}

pub async fn list<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Query(query): Query<CartListQuery>,
) -> Result<Json<PageResponse<CartResponse>>, ApiError> {
    let pagination = Pagination {
        offset: query.page * query.size,
        limit: query.size,
    };
    let page = state
        .carts
        .list_carts(tenant_id, query.customer_id, pagination)
        .await?;
    Ok(Json(PageResponse::from_result(page, Into::into)))
}

pub async fn get<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(id): Path<Uuid>,
) -> Result<Json<CartResponse>, ApiError> {
    let cart = state.carts.get_cart(tenant_id, id).await?;
    Ok(Json(cart.into()))
}

pub async fn delete<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.carts.delete_cart(tenant_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_item<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(cart_id): Path<Uuid>,
    Json(body): Json<AddCartItemRequest>,
) -> Result<(StatusCode, Json<CartResponse>), ApiError> {
    let cart = state
        .carts
        .add_item(
            tenant_id,
            cart_id,
            CreateCartItem {
                product_id: body.product_id,
                variant_id: body.variant_id,
                quantity: body.quantity,
                unit_price: body.unit_price,
                currency: body.currency,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(cart.into())))
}

pub async fn update_item<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path((cart_id, item_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<UpdateItemQuantityRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let cart = state
        .carts
        .update_item_quantity(tenant_id, cart_id, item_id, body.quantity)
        .await?;
    Ok(Json(cart.into()))
}

pub async fn remove_item<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path((cart_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<CartResponse>, ApiError> {
    let cart = state.carts.remove_item(tenant_id, cart_id, item_id).await?;
    Ok(Json(cart.into()))
}

pub async fn clear<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(cart_id): Path<Uuid>,
) -> Result<Json<CartResponse>, ApiError> {
    let cart = state.carts.clear_cart(tenant_id, cart_id).await?;
    Ok(Json(cart.into()))
}
