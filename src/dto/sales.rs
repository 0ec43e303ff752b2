use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Sale, SaleItem};

/// One product-quantity pair as supplied by the client. `name` is only used
/// to label error messages; the committed record snapshots the stored name.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SaleLineItem {
    pub product_id: Uuid,
    pub name: String,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordSaleRequest {
    pub sold_by: String,
    pub sale_date: Option<DateTime<Utc>>,
    pub items: Vec<SaleLineItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SaleWithItems {
    pub sale: Sale,
    pub items: Vec<SaleItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SaleList {
    pub items: Vec<Sale>,
}
