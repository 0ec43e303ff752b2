use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::sales::{RecordSaleRequest, SaleList, SaleWithItems},
    error::AppResult,
    models::SalesSummary,
    response::ApiResponse,
    services::sale_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(record_sale))
        .route("/", get(list_sales))
        .route("/{seller}", get(seller_sales))
}

#[utoipa::path(
    post,
    path = "/sales",
    request_body = RecordSaleRequest,
    responses(
        (status = 200, description = "Sale recorded and stock decremented", body = ApiResponse<SaleWithItems>),
        (status = 404, description = "A line item references an unknown product"),
        (status = 409, description = "A line item exceeds the available stock"),
    ),
    tag = "Sales"
)]
pub async fn record_sale(
    State(state): State<AppState>,
    Json(payload): Json<RecordSaleRequest>,
) -> AppResult<Json<ApiResponse<SaleWithItems>>> {
    Ok(Json(sale_service::record_sale(&state, payload).await?))
}

#[utoipa::path(
    get,
    path = "/sales",
    responses(
        (status = 200, description = "All sales, newest first", body = ApiResponse<SaleList>),
    ),
    tag = "Sales"
)]
pub async fn list_sales(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<SaleList>>> {
    Ok(Json(sale_service::list_sales(&state, None).await?))
}

#[utoipa::path(
    get,
    path = "/sales/{seller}",
    params(
        ("seller" = String, Path, description = "Seller email")
    ),
    responses(
        (status = 200, description = "The seller's sales, newest first", body = ApiResponse<SaleList>),
    ),
    tag = "Sales"
)]
pub async fn seller_sales(
    State(state): State<AppState>,
    Path(seller): Path<String>,
) -> AppResult<Json<ApiResponse<SaleList>>> {
    Ok(Json(sale_service::list_sales(&state, Some(&seller)).await?))
}

#[utoipa::path(
    get,
    path = "/sales-summary/{seller}",
    params(
        ("seller" = String, Path, description = "Seller email")
    ),
    responses(
        (status = 200, description = "Aggregate figures for the seller", body = ApiResponse<SalesSummary>),
    ),
    tag = "Sales"
)]
pub async fn sales_summary(
    State(state): State<AppState>,
    Path(seller): Path<String>,
) -> AppResult<Json<ApiResponse<SalesSummary>>> {
    Ok(Json(sale_service::sales_summary(&state, &seller).await?))
}
