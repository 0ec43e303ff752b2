use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        employees::{CreateEmployeeRequest, EmployeeList, UpdateEmployeeRequest},
        products::{CreateProductRequest, ProductList, SetStockRequest, UpdateProductRequest},
        sales::{RecordSaleRequest, SaleLineItem, SaleList, SaleWithItems},
        suppliers::{CreateSupplierRequest, SupplierList, UpdateSupplierRequest},
        users::{CreateUserRequest, UpdateUserRequest, UserList},
    },
    models::{Employee, Product, Sale, SaleItem, SalesSummary, Supplier, User},
    response::{ApiResponse, Meta},
    routes::{employees, health, products, sales, suppliers, users},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        users::create_user,
        users::list_users,
        users::get_user,
        users::update_user,
        products::list_products,
        products::create_product,
        products::get_product,
        products::update_product,
        products::delete_product,
        products::set_stock,
        employees::list_employees,
        employees::create_employee,
        employees::get_employee,
        employees::update_employee,
        employees::delete_employee,
        suppliers::list_suppliers,
        suppliers::create_supplier,
        suppliers::get_supplier,
        suppliers::update_supplier,
        suppliers::delete_supplier,
        sales::record_sale,
        sales::list_sales,
        sales::seller_sales,
        sales::sales_summary
    ),
    components(
        schemas(
            User,
            Product,
            Employee,
            Supplier,
            Sale,
            SaleItem,
            SalesSummary,
            CreateUserRequest,
            UpdateUserRequest,
            UserList,
            CreateProductRequest,
            UpdateProductRequest,
            SetStockRequest,
            ProductList,
            CreateEmployeeRequest,
            UpdateEmployeeRequest,
            EmployeeList,
            CreateSupplierRequest,
            UpdateSupplierRequest,
            SupplierList,
            RecordSaleRequest,
            SaleLineItem,
            SaleList,
            SaleWithItems,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<SaleWithItems>,
            ApiResponse<SaleList>,
            ApiResponse<SalesSummary>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Users", description = "User endpoints"),
        (name = "Products", description = "Product and stock endpoints"),
        (name = "Employees", description = "Employee endpoints"),
        (name = "Suppliers", description = "Supplier endpoints"),
        (name = "Sales", description = "Sale recording and summary endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
