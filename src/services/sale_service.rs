use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{Set, TransactionTrait};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::sales::{RecordSaleRequest, SaleList, SaleWithItems},
    entity::{
        sale_items::{ActiveModel as SaleItemActive, Model as SaleItemModel},
        sales::{ActiveModel as SaleActive, Model as SaleModel},
    },
    error::{AppError, AppResult},
    models::{Sale, SaleItem, SalesSummary},
    repository::{inventory, sales as sales_repo},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Record a sale: validate every line item against current stock, then insert
/// the sale and decrement each product, all inside one transaction.
///
/// Every failure path returns before the commit, which drops the transaction
/// and rolls the whole unit back; no sale row or stock change is observable
/// unless all of it is.
pub async fn record_sale(
    state: &AppState,
    payload: RecordSaleRequest,
) -> AppResult<ApiResponse<SaleWithItems>> {
    if payload.sold_by.trim().is_empty() {
        return Err(AppError::BadRequest("sold_by is required".into()));
    }

    let txn = state.orm.begin().await?;

    // Validation pass, in the order the client supplied. Each read takes a
    // row lock that holds until commit or rollback, so a concurrent sale on
    // the same product waits here and then sees the committed stock.
    let mut validated = Vec::with_capacity(payload.items.len());
    let mut total_amount: i64 = 0;
    for item in &payload.items {
        if item.quantity <= 0 {
            return Err(AppError::BadRequest(format!(
                "Invalid quantity for {}",
                item.name
            )));
        }
        let product = inventory::product_for_update(&txn, item.product_id)
            .await?
            .ok_or_else(|| AppError::ProductNotFound(item.name.clone()))?;
        if product.stock < item.quantity {
            return Err(AppError::InsufficientStock {
                product: product.name,
                available: product.stock,
                requested: item.quantity,
            });
        }
        total_amount += product.selling_price * i64::from(item.quantity);
        validated.push((product, item.quantity));
    }

    // Mutation pass only starts once every line has passed.
    let sale = sales_repo::insert_sale(
        &txn,
        SaleActive {
            id: Set(Uuid::new_v4()),
            sold_by: Set(payload.sold_by),
            sale_date: Set(payload.sale_date.unwrap_or_else(Utc::now).into()),
            total_amount: Set(total_amount),
            created_at: NotSet,
        },
    )
    .await?;

    let mut items = Vec::with_capacity(validated.len());
    for (product, quantity) in &validated {
        let item = sales_repo::insert_sale_item(
            &txn,
            SaleItemActive {
                id: Set(Uuid::new_v4()),
                sale_id: Set(sale.id),
                product_id: Set(product.id),
                product_name: Set(product.name.clone()),
                quantity: Set(*quantity),
                unit_price: Set(product.selling_price),
            },
        )
        .await?;
        items.push(sale_item_from_entity(item));

        inventory::adjust_stock(&txn, product.id, -*quantity).await?;
    }

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(sale.sold_by.as_str()),
        "sale_recorded",
        Some("sales"),
        Some(serde_json::json!({
            "sale_id": sale.id,
            "total_amount": sale.total_amount,
            "line_items": items.len(),
        })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Sale recorded",
        SaleWithItems {
            sale: sale_from_entity(sale),
            items,
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_sales(
    state: &AppState,
    seller: Option<&str>,
) -> AppResult<ApiResponse<SaleList>> {
    let sales = sales_repo::sales_by_seller(&state.orm, seller).await?;
    let total = sales.len() as i64;
    let items = sales.into_iter().map(sale_from_entity).collect();
    Ok(ApiResponse::success(
        "Sales",
        SaleList { items },
        Some(Meta::new(1, total, total)),
    ))
}

/// Fold over the seller's full result set: count, revenue, quantity sold and
/// a zero-safe average.
pub async fn sales_summary(
    state: &AppState,
    seller: &str,
) -> AppResult<ApiResponse<SalesSummary>> {
    let sales = sales_repo::sales_by_seller(&state.orm, Some(seller)).await?;
    let sale_ids: Vec<Uuid> = sales.iter().map(|s| s.id).collect();
    let item_rows = sales_repo::items_for_sales(&state.orm, sale_ids).await?;

    let total_sales = sales.len() as i64;
    let total_revenue: i64 = sales.iter().map(|s| s.total_amount).sum();
    let total_quantity_sold: i64 = item_rows.iter().map(|i| i64::from(i.quantity)).sum();
    let average_sale_value = if total_sales > 0 {
        total_revenue as f64 / total_sales as f64
    } else {
        0.0
    };

    Ok(ApiResponse::success(
        "Sales summary",
        SalesSummary {
            total_sales,
            total_revenue,
            total_quantity_sold,
            average_sale_value,
        },
        Some(Meta::empty()),
    ))
}

fn sale_from_entity(model: SaleModel) -> Sale {
    Sale {
        id: model.id,
        sold_by: model.sold_by,
        sale_date: model.sale_date.with_timezone(&Utc),
        total_amount: model.total_amount,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn sale_item_from_entity(model: SaleItemModel) -> SaleItem {
    SaleItem {
        id: model.id,
        sale_id: model.sale_id,
        product_id: model.product_id,
        product_name: model.product_name,
        quantity: model.quantity,
        unit_price: model.unit_price,
    }
}
