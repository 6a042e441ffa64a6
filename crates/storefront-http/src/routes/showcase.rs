//! Showcase endpoints — public, read-only product listing for
//! storefront and mobile clients.

use axum::Json;
use axum::extract::{Path, Query, State};
use storefront_domain::ShowcaseQuery;
use surrealdb::Connection;
use uuid::Uuid;

use crate::dto::{PageResponse, ProductResponse, ShowcaseListQuery, ShowcaseProductResponse};
use crate::error::ApiError;
use crate::state::AppState;
use crate::tenant::TenantId;

/// `GET /api/v1/showcase/products` — paginated listing with optional
/// search term, brand, and category filters. Page size is capped at
/// 100 by the showcase service.
pub async fn list<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Query(query): Query<ShowcaseListQuery>,
) -> Result<Json<PageResponse<ProductResponse>>, ApiError> {
    let page = state
        .showcase
        .list_products(
            tenant_id,
            ShowcaseQuery {
                page: query.page,
                size: query.size,
                search: query.search,
                brand_id: query.brand_id,
                category_id: query.category_id,
            },
        )
        .await?;
    Ok(Json(PageResponse::from_result(page, Into::into)))
}

/// `GET /api/v1/showcase/products/{id}` — full product details with
/// all variants and prices.
pub async fn details<C: Connection>(
    State(state): State<AppState<C>>,
    TenantId(tenant_id): TenantId,
    Path(id): Path<Uuid>,
) -> Result<Json<ShowcaseProductResponse>, ApiError> {
    let (product, variants) = state.showcase.get_product_details(tenant_id, id).await?;
    Ok(Json(ShowcaseProductResponse {
        product: product.into(),
        variants: variants.into_iter().map(Into::into).collect(),
    }))
}
