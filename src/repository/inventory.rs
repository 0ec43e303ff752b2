//! Product accessors. Every function takes its connection explicitly, so a
//! caller inside a sale transaction passes the transaction and plain CRUD
//! passes the shared connection; the two can never mix state.

use sea_orm::sea_query::{Expr, LockType};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use crate::{
    entity::products::{ActiveModel, Column, Entity as Products, Model},
    error::{AppError, AppResult},
};

pub async fn product_by_id<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<Option<Model>> {
    Ok(Products::find_by_id(id).one(conn).await?)
}

/// Read a product under a row lock. Inside a transaction this serializes
/// concurrent sales touching the same product: the second reader blocks until
/// the first commits, then sees the committed stock.
pub async fn product_for_update<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> AppResult<Option<Model>> {
    Ok(Products::find_by_id(id)
        .lock(LockType::Update)
        .one(conn)
        .await?)
}

pub async fn products_by_owner<C: ConnectionTrait>(
    conn: &C,
    owner: Option<&str>,
) -> AppResult<Vec<Model>> {
    let mut finder = Products::find();
    if let Some(owner) = owner.filter(|o| !o.is_empty()) {
        finder = finder.filter(Column::OwnerEmail.eq(owner));
    }
    Ok(finder.order_by_desc(Column::CreatedAt).all(conn).await?)
}

pub async fn insert_product<C: ConnectionTrait>(
    conn: &C,
    product: ActiveModel,
) -> AppResult<Model> {
    Ok(product.insert(conn).await?)
}

pub async fn update_product<C: ConnectionTrait>(
    conn: &C,
    product: ActiveModel,
) -> AppResult<Model> {
    Ok(product.update(conn).await?)
}

pub async fn delete_product<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<()> {
    let result = Products::delete_by_id(id).exec(conn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// Apply a relative stock adjustment (`stock = stock + delta`).
pub async fn adjust_stock<C: ConnectionTrait>(conn: &C, id: Uuid, delta: i32) -> AppResult<()> {
    let result = Products::update_many()
        .col_expr(Column::Stock, Expr::col(Column::Stock).add(delta))
        .filter(Column::Id.eq(id))
        .exec(conn)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}
