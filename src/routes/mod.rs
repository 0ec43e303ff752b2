use axum::{Router, routing::get};

use crate::state::AppState;

pub mod doc;
pub mod employees;
pub mod health;
pub mod params;
pub mod products;
pub mod sales;
pub mod suppliers;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/products", products::router())
        .nest("/employees", employees::router())
        .nest("/suppliers", suppliers::router())
        .nest("/sales", sales::router())
        .route("/sales-summary/{seller}", get(sales::sales_summary))
}
