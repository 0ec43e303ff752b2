use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::suppliers::{CreateSupplierRequest, SupplierList, UpdateSupplierRequest},
    entity::suppliers::{ActiveModel, Column, Entity as Suppliers, Model as SupplierModel},
    error::{AppError, AppResult},
    models::Supplier,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_suppliers(
    state: &AppState,
    created_by: Option<&str>,
) -> AppResult<ApiResponse<SupplierList>> {
    let mut finder = Suppliers::find();
    if let Some(creator) = created_by.filter(|c| !c.is_empty()) {
        finder = finder.filter(Column::CreatedBy.eq(creator));
    }
    let suppliers = finder
        .order_by_desc(Column::CreatedAt)
        .all(&state.orm)
        .await?;
    let total = suppliers.len() as i64;
    let items = suppliers.into_iter().map(supplier_from_entity).collect();
    Ok(ApiResponse::success(
        "Suppliers",
        SupplierList { items },
        Some(Meta::new(1, total, total)),
    ))
}

pub async fn get_supplier(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Supplier>> {
    let supplier = Suppliers::find_by_id(id).one(&state.orm).await?;
    let supplier = match supplier {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success(
        "Supplier",
        supplier_from_entity(supplier),
        None,
    ))
}

pub async fn create_supplier(
    state: &AppState,
    payload: CreateSupplierRequest,
) -> AppResult<ApiResponse<Supplier>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".into()));
    }
    if payload.created_by.trim().is_empty() {
        return Err(AppError::BadRequest("created_by is required".into()));
    }

    let supplier = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        email: Set(payload.email),
        phone: Set(payload.phone),
        company: Set(payload.company),
        created_by: Set(payload.created_by),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(supplier.created_by.as_str()),
        "supplier_create",
        Some("suppliers"),
        Some(serde_json::json!({ "supplier_id": supplier.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Supplier created",
        supplier_from_entity(supplier),
        Some(Meta::empty()),
    ))
}

pub async fn update_supplier(
    state: &AppState,
    id: Uuid,
    payload: UpdateSupplierRequest,
) -> AppResult<ApiResponse<Supplier>> {
    let existing = Suppliers::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(s) => s,
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
    if let Some(company) = payload.company {
        active.company = Set(Some(company));
    }
    let supplier = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(supplier.created_by.as_str()),
        "supplier_update",
        Some("suppliers"),
        Some(serde_json::json!({ "supplier_id": supplier.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        supplier_from_entity(supplier),
        Some(Meta::empty()),
    ))
}

pub async fn delete_supplier(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Suppliers::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.pool,
        None,
        "supplier_delete",
        Some("suppliers"),
        Some(serde_json::json!({ "supplier_id": id })),
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

fn supplier_from_entity(model: SupplierModel) -> Supplier {
    Supplier {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        company: model.company,
        created_by: model.created_by,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
