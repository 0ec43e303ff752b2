pub mod employees;
pub mod products;
pub mod sales;
pub mod suppliers;
pub mod users;
