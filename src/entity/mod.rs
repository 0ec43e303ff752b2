pub mod audit_logs;
pub mod employees;
pub mod products;
pub mod sale_items;
pub mod sales;
pub mod suppliers;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use employees::Entity as Employees;
pub use products::Entity as Products;
pub use sale_items::Entity as SaleItems;
pub use sales::Entity as Sales;
pub use suppliers::Entity as Suppliers;
pub use users::Entity as Users;
