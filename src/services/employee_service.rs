use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::employees::{CreateEmployeeRequest, EmployeeList, UpdateEmployeeRequest},
    entity::employees::{ActiveModel, Column, Entity as Employees, Model as EmployeeModel},
    error::{AppError, AppResult},
    models::Employee,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_employees(
    state: &AppState,
    managed_by: Option<&str>,
) -> AppResult<ApiResponse<EmployeeList>> {
    let mut finder = Employees::find();
    if let Some(manager) = managed_by.filter(|m| !m.is_empty()) {
        finder = finder.filter(Column::ManagedBy.eq(manager));
    }
    let employees = finder
        .order_by_desc(Column::CreatedAt)
        .all(&state.orm)
        .await?;
    let total = employees.len() as i64;
    let items = employees.into_iter().map(employee_from_entity).collect();
    Ok(ApiResponse::success(
        "Employees",
        EmployeeList { items },
        Some(Meta::new(1, total, total)),
    ))
}

pub async fn get_employee(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Employee>> {
    let employee = Employees::find_by_id(id).one(&state.orm).await?;
    let employee = match employee {
        Some(e) => e,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success(
        "Employee",
        employee_from_entity(employee),
        None,
    ))
}

pub async fn create_employee(
    state: &AppState,
    payload: CreateEmployeeRequest,
) -> AppResult<ApiResponse<Employee>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".into()));
    }
    if payload.managed_by.trim().is_empty() {
        return Err(AppError::BadRequest("managed_by is required".into()));
    }

    let employee = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        email: Set(payload.email),
        phone: Set(payload.phone),
        designation: Set(payload.designation),
        managed_by: Set(payload.managed_by),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(employee.managed_by.as_str()),
        "employee_create",
        Some("employees"),
        Some(serde_json::json!({ "employee_id": employee.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Employee created",
        employee_from_entity(employee),
        Some(Meta::empty()),
    ))
}

pub async fn update_employee(
    state: &AppState,
    id: Uuid,
    payload: UpdateEmployeeRequest,
) -> AppResult<ApiResponse<Employee>> {
    let existing = Employees::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(e) => e,
        None => return Err(AppError::NotFound),
    };

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(email) = payload.email {
        active.email = Set(email);
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(designation) = payload.designation {
        active.designation = Set(Some(designation));
    }
    let employee = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(employee.managed_by.as_str()),
        "employee_update",
        Some("employees"),
        Some(serde_json::json!({ "employee_id": employee.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        employee_from_entity(employee),
        Some(Meta::empty()),
    ))
}

pub async fn delete_employee(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Employees::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.pool,
        None,
        "employee_delete",
        Some("employees"),
        Some(serde_json::json!({ "employee_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

fn employee_from_entity(model: EmployeeModel) -> Employee {
    Employee {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        designation: model.designation,
        managed_by: model.managed_by,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
