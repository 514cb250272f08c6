use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    cart::ProductId,
    dto::products::{ProductDetail, ProductList},
    error::AppResult,
    response::ApiResponse,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/{id}", get(get_product))
}

#[utoipa::path(
    get,
    path = "/store",
    responses(
        (status = 200, description = "All products", body = ApiResponse<ProductList>)
    ),
    tag = "Store"
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_products(&state.pool).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/store/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "One product", body = ApiResponse<ProductDetail>),
        (status = 404, description = "Product not found")
    ),
    tag = "Store"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> AppResult<Json<ApiResponse<ProductDetail>>> {
    let resp = product_service::get_product(&state.pool, id).await?;
    Ok(Json(resp))
}
