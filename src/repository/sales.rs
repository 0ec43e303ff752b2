//! Sale record accessors, same explicit-connection convention as
//! `repository::inventory`.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    entity::{
        sale_items::{ActiveModel as SaleItemActive, Column as SaleItemCol, Entity as SaleItems},
        sales::{ActiveModel as SaleActive, Column as SaleCol, Entity as Sales},
    },
    error::AppResult,
};

pub async fn insert_sale<C: ConnectionTrait>(
    conn: &C,
    sale: SaleActive,
) -> AppResult<crate::entity::sales::Model> {
    Ok(sale.insert(conn).await?)
}

pub async fn insert_sale_item<C: ConnectionTrait>(
    conn: &C,
    item: SaleItemActive,
) -> AppResult<crate::entity::sale_items::Model> {
    Ok(item.insert(conn).await?)
}

/// Sales, newest sale date first, optionally scoped to one seller email.
/// The scoping is advisory string equality, not an access-control check.
pub async fn sales_by_seller<C: ConnectionTrait>(
    conn: &C,
    seller: Option<&str>,
) -> AppResult<Vec<crate::entity::sales::Model>> {
    let mut finder = Sales::find();
    if let Some(seller) = seller.filter(|s| !s.is_empty()) {
        finder = finder.filter(SaleCol::SoldBy.eq(seller));
    }
    Ok(finder.order_by_desc(SaleCol::SaleDate).all(conn).await?)
}

pub async fn items_for_sales<C: ConnectionTrait>(
    conn: &C,
    sale_ids: Vec<Uuid>,
) -> AppResult<Vec<crate::entity::sale_items::Model>> {
    if sale_ids.is_empty() {
        return Ok(Vec::new());
    }
    Ok(SaleItems::find()
        .filter(SaleItemCol::SaleId.is_in(sale_ids))
        .all(conn)
        .await?)
}
