use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::employees::{CreateEmployeeRequest, EmployeeList, UpdateEmployeeRequest},
    error::AppResult,
    models::Employee,
    response::ApiResponse,
    routes::params::ManagedByQuery,
    services::employee_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_employee))
        .route("/", get(list_employees))
        .route("/{id}", get(get_employee))
        .route("/{id}", put(update_employee))
        .route("/{id}", delete(delete_employee))
}

#[utoipa::path(
    get,
    path = "/employees",
    params(
        ("managed_by" = Option<String>, Query, description = "Scope to employees managed by this email"),
    ),
    responses(
        (status = 200, description = "List employees", body = ApiResponse<EmployeeList>)
    ),
    tag = "Employees"
)]
pub async fn list_employees(
    State(state): State<AppState>,
    Query(query): Query<ManagedByQuery>,
) -> AppResult<Json<ApiResponse<EmployeeList>>> {
    Ok(Json(
        employee_service::list_employees(&state, query.managed_by.as_deref()).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/employees/{id}",
    params(
        ("id" = Uuid, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Get employee", body = ApiResponse<Employee>),
        (status = 404, description = "Employee not found"),
    ),
    tag = "Employees"
)]
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    Ok(Json(employee_service::get_employee(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/employees",
    request_body = CreateEmployeeRequest,
    responses(
        (status = 200, description = "Create employee", body = ApiResponse<Employee>),
        (status = 400, description = "Missing fields"),
    ),
    tag = "Employees"
)]
pub async fn create_employee(
    State(state): State<AppState>,
    Json(payload): Json<CreateEmployeeRequest>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    Ok(Json(
        employee_service::create_employee(&state, payload).await?,
    ))
}

#[utoipa::path(
    put,
    path = "/employees/{id}",
    params(
        ("id" = Uuid, Path, description = "Employee ID")
    ),
    request_body = UpdateEmployeeRequest,
    responses(
        (status = 200, description = "Updated employee", body = ApiResponse<Employee>),
        (status = 404, description = "Employee not found"),
    ),
    tag = "Employees"
)]
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEmployeeRequest>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    Ok(Json(
        employee_service::update_employee(&state, id, payload).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/employees/{id}",
    params(
        ("id" = Uuid, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Deleted employee"),
        (status = 404, description = "Employee not found"),
    ),
    tag = "Employees"
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(employee_service::delete_employee(&state, id).await?))
}
