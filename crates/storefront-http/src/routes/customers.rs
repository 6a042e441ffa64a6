//! Customer endpoints.
//!
//! These carry the operations of the registration service
//! (create / get / list / update / deactivate) over the JSON API.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use storefront_core::models::customer::{CreateCustomer, UpdateCustomer};
use surrealdb::Connection;
use uuid::Uuid;

use crate::dto::{
    CreateCustomerRequest, CustomerResponse, PageQuery, PageResponse, UpdateCustomerRequest,
};
use crate::error::ApiError;
use crate::state::AppState;
use crate::tenant::TenantId;

pub async fn create<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Json(body): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>), ApiError> {
    let customer = state
        .customers
        .create_customer(CreateCustomer {
            tenant_id,
            name: body.name,
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(customer.into())))
}

pub async fn list<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse<CustomerResponse>>, ApiError> {
    let page = state
        .customers
        .list_customers(tenant_id, query.to_pagination())
        .await?;
    Ok(Json(PageResponse::from_result(page, Into::into)))
}

pub async fn get<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(id): Path<Uuid>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let customer = state.customers.get_customer(tenant_id, id).await?;
    Ok(Json(customer.into()))
}

pub async fn update<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateCustomerRequest>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let customer = state
        .customers
        .update_customer(
            tenant_id,
            id,
            UpdateCustomer {
                name: body.name,
                email: body.email,
                status: None,
            },
        )
        .await?;
    Ok(Json(customer.into()))
}

pub async fn delete<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.customers.deactivate_customer(tenant_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
