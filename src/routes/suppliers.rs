use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::suppliers::{CreateSupplierRequest, SupplierList, UpdateSupplierRequest},
    error::AppResult,
    models::Supplier,
    response::ApiResponse,
    routes::params::CreatedByQuery,
    services::supplier_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_supplier))
        .route("/", get(list_suppliers))
        .route("/{id}", get(get_supplier))
        .route("/{id}", put(update_supplier))
        .route("/{id}", delete(delete_supplier))
}

#[utoipa::path(
    get,
    path = "/suppliers",
    params(
        ("created_by" = Option<String>, Query, description = "Scope to suppliers created by this email"),
    ),
    responses(
        (status = 200, description = "List suppliers", body = ApiResponse<SupplierList>)
    ),
    tag = "Suppliers"
)]
pub async fn list_suppliers(
    State(state): State<AppState>,
    Query(query): Query<CreatedByQuery>,
) -> AppResult<Json<ApiResponse<SupplierList>>> {
    Ok(Json(
        supplier_service::list_suppliers(&state, query.created_by.as_deref()).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/suppliers/{id}",
    params(
        ("id" = Uuid, Path, description = "Supplier ID")
    ),
    responses(
        (status = 200, description = "Get supplier", body = ApiResponse<Supplier>),
        (status = 404, description = "Supplier not found"),
    ),
    tag = "Suppliers"
)]
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Supplier>>> {
    Ok(Json(supplier_service::get_supplier(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/suppliers",
    request_body = CreateSupplierRequest,
    responses(
        (status = 200, description = "Create supplier", body = ApiResponse<Supplier>),
        (status = 400, description = "Missing fields"),
    ),
    tag = "Suppliers"
)]
pub async fn create_supplier(
    State(state): State<AppState>,
    Json(payload): Json<CreateSupplierRequest>,
) -> AppResult<Json<ApiResponse<Supplier>>> {
    Ok(Json(
        supplier_service::create_supplier(&state, payload).await?,
    ))
}

#[utoipa::path(
    put,
    path = "/suppliers/{id}",
    params(
        ("id" = Uuid, Path, description = "Supplier ID")
    ),
    request_body = UpdateSupplierRequest,
    responses(
        (status = 200, description = "Updated supplier", body = ApiResponse<Supplier>),
        (status = 404, description = "Supplier not found"),
    ),
    tag = "Suppliers"
)]
pub async fn update_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSupplierRequest>,
) -> AppResult<Json<ApiResponse<Supplier>>> {
    Ok(Json(
        supplier_service::update_supplier(&state, id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/suppliers/{id}",
    params(
        ("id" = Uuid, Path, description = "Supplier ID")
    ),
    responses(
        (status = 200, description = "Deleted supplier"),
        (status = 404, description = "Supplier not found"),
    ),
    tag = "Suppliers"
)]
pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(supplier_service::delete_supplier(&state, id).await?))
}
