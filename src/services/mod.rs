pub mod employee_service;
pub mod product_service;
pub mod sale_service;
pub mod supplier_service;
pub mod user_service;
