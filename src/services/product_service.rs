use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{Set, TransactionTrait};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::products::{CreateProductRequest, ProductList, SetStockRequest, UpdateProductRequest},
    entity::products::{ActiveModel, Model as ProductModel},
    error::{AppError, AppResult},
    models::Product,
    repository::inventory,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_products(
    state: &AppState,
    owner: Option<&str>,
) -> AppResult<ApiResponse<ProductList>> {
    let products = inventory::products_by_owner(&state.orm, owner).await?;
    let total = products.len() as i64;
    let items = products.into_iter().map(product_from_entity).collect();
    Ok(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(Meta::new(1, total, total)),
    ))
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let product = inventory::product_by_id(&state.orm, id)
        .await?
        .map(product_from_entity);
    let product = match product {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Product", product, None))
}

pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".into()));
    }
    if payload.owner_email.trim().is_empty() {
        return Err(AppError::BadRequest("owner_email is required".into()));
    }
    if payload.buying_price < 0 || payload.selling_price < 0 {
        return Err(AppError::BadRequest("prices must not be negative".into()));
    }
    if payload.stock < 0 {
        return Err(AppError::BadRequest("stock must not be negative".into()));
    }

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        owner_email: Set(payload.owner_email),
        name: Set(payload.name),
        description: Set(payload.description),
        buying_price: Set(payload.buying_price),
        selling_price: Set(payload.selling_price),
        stock: Set(payload.stock),
        category: Set(payload.category),
        image_url: Set(payload.image_url),
        created_at: NotSet,
        updated_at: NotSet,
    };
    let product = inventory::insert_product(&state.orm, active).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(product.owner_email.as_str()),
        "product_create",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Product created",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let existing = inventory::product_by_id(&state.orm, id).await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(buying_price) = payload.buying_price {
        active.buying_price = Set(buying_price);
    }
    if let Some(selling_price) = payload.selling_price {
        active.selling_price = Set(selling_price);
    }
    if let Some(category) = payload.category {
        active.category = Set(Some(category));
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(Some(image_url));
    }
    active.updated_at = Set(Utc::now().into());

    let product = inventory::update_product(&state.orm, active).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(product.owner_email.as_str()),
        "product_update",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    inventory::delete_product(&state.orm, id).await?;

    if let Err(err) = log_audit(
        &state.pool,
        None,
        "product_delete",
        Some("products"),
        Some(serde_json::json!({ "product_id": id })),
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

/// Set the absolute stock level. This is the only write path for stock
/// outside a sale, and it takes the same row lock a sale takes.
pub async fn set_stock(
    state: &AppState,
    id: Uuid,
    payload: SetStockRequest,
) -> AppResult<ApiResponse<Product>> {
    if payload.stock < 0 {
        return Err(AppError::BadRequest("stock must not be negative".into()));
    }

    let txn = state.orm.begin().await?;
    let product = inventory::product_for_update(&txn, id).await?;
    let product = match product {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let mut active: ActiveModel = product.into();
    active.stock = Set(payload.stock);
    active.updated_at = Set(Utc::now().into());
    let updated = inventory::update_product(&txn, active).await?;

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(updated.owner_email.as_str()),
        "stock_set",
        Some("products"),
        Some(serde_json::json!({ "product_id": updated.id, "stock": updated.stock })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Stock updated",
        product_from_entity(updated),
        Some(Meta::empty()),
    ))
}

fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        owner_email: model.owner_email,
        name: model.name,
        description: model.description,
        buying_price: model.buying_price,
        selling_price: model.selling_price,
        stock: model.stock,
        category: model.category,
        image_url: model.image_url,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
