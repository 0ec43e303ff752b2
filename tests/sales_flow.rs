use axum_inventory_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::sales::{RecordSaleRequest, SaleLineItem},
    entity::{
        products::{ActiveModel as ProductActive, Entity as Products},
        sales::{Column as SaleCol, Entity as Sales},
    },
    error::AppError,
    services::sale_service,
    state::AppState,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set, Statement};
use uuid::Uuid;

// Integration flow for the sale processor: successful decrement, every
// rollback path, the sell-to-zero race and the seller summary.
#[tokio::test]
async fn record_sale_and_summary_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;
    let seller = "seller@example.com";

    // Seed products
    let p1 = create_product(&state, "Thermal Printer", 1000, 10).await?;
    let p2 = create_product(&state, "Barcode Scanner", 500, 3).await?;

    // Valid multi-item sale decrements each product by its quantity.
    let resp = sale_service::record_sale(
        &state,
        request(seller, vec![line(&p1, 2), line(&p2, 1)]),
    )
    .await?;
    let recorded = resp.data.unwrap();
    assert_eq!(recorded.sale.total_amount, 2 * 1000 + 500);
    assert_eq!(recorded.items.len(), 2);
    assert_eq!(stock_of(&state, p1.id).await?, 8);
    assert_eq!(stock_of(&state, p2.id).await?, 2);

    // Non-positive quantity is rejected before anything is read.
    let err = sale_service::record_sale(&state, request(seller, vec![line(&p1, 0)]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // Insufficient stock fails the whole sale and changes nothing.
    let err = sale_service::record_sale(&state, request(seller, vec![line(&p1, 100)]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InsufficientStock { available: 8, requested: 100, .. }));
    assert_eq!(stock_of(&state, p1.id).await?, 8);
    assert_eq!(sales_count(&state, seller).await?, 1);

    // Replaying the same failed request produces the same failure and no
    // cumulative effects.
    let err = sale_service::record_sale(&state, request(seller, vec![line(&p1, 100)]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InsufficientStock { .. }));
    assert_eq!(stock_of(&state, p1.id).await?, 8);
    assert_eq!(sales_count(&state, seller).await?, 1);

    // Unknown product id: not-found, no side effects.
    let ghost = SaleLineItem {
        product_id: Uuid::new_v4(),
        name: "Ghost Item".into(),
        quantity: 1,
    };
    let err = sale_service::record_sale(&state, request(seller, vec![ghost]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ProductNotFound(_)));
    assert_eq!(sales_count(&state, seller).await?, 1);

    // First line valid, second invalid: full rollback, first product's stock
    // untouched.
    let err = sale_service::record_sale(
        &state,
        request(seller, vec![line(&p1, 1), line(&p2, 99)]),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InsufficientStock { .. }));
    assert_eq!(stock_of(&state, p1.id).await?, 8);
    assert_eq!(stock_of(&state, p2.id).await?, 2);
    assert_eq!(sales_count(&state, seller).await?, 1);

    // Selling the exact remaining stock drains it to zero; an identical
    // follow-up names the shortfall.
    let p3 = create_product(&state, "Cash Drawer", 700, 5).await?;
    sale_service::record_sale(&state, request(seller, vec![line(&p3, 5)])).await?;
    assert_eq!(stock_of(&state, p3.id).await?, 0);

    let err = sale_service::record_sale(&state, request(seller, vec![line(&p3, 5)]))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Insufficient stock for Cash Drawer. Available: 0, Requested: 5"
    );

    // An empty line-item list is a valid degenerate sale.
    let resp = sale_service::record_sale(&state, request(seller, vec![])).await?;
    assert_eq!(resp.data.unwrap().sale.total_amount, 0);

    // Two concurrent sales racing for the last units: exactly one wins.
    let p4 = create_product(&state, "Label Roll", 100, 4).await?;
    let (a, b) = tokio::join!(
        sale_service::record_sale(&state, request(seller, vec![line(&p4, 4)])),
        sale_service::record_sale(&state, request(seller, vec![line(&p4, 4)])),
    );
    let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1, "exactly one of two racing sales must commit");
    let loser = if a.is_err() { a.unwrap_err() } else { b.unwrap_err() };
    assert!(matches!(loser, AppError::InsufficientStock { available: 0, requested: 4, .. }));
    assert_eq!(stock_of(&state, p4.id).await?, 0);

    // Summary folds the seller's full result set.
    let summary_seller = "summary@example.com";
    let q = create_product(&state, "Receipt Paper", 25, 100).await?;
    for quantity in [4, 2, 1] {
        sale_service::record_sale(&state, request(summary_seller, vec![line(&q, quantity)]))
            .await?;
    }
    let summary = sale_service::sales_summary(&state, summary_seller)
        .await?
        .data
        .unwrap();
    assert_eq!(summary.total_sales, 3);
    assert_eq!(summary.total_revenue, 175);
    assert_eq!(summary.total_quantity_sold, 7);
    assert!((summary.average_sale_value - 175.0 / 3.0).abs() < 1e-9);

    // A seller with no sales gets zeros, not a division fault.
    let empty = sale_service::sales_summary(&state, "nobody@example.com")
        .await?
        .data
        .unwrap();
    assert_eq!(empty.total_sales, 0);
    assert_eq!(empty.total_revenue, 0);
    assert_eq!(empty.total_quantity_sold, 0);
    assert_eq!(empty.average_sale_value, 0.0);

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE sale_items, sales, audit_logs, products, employees, suppliers, users RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState { pool, orm })
}

async fn create_product(
    state: &AppState,
    name: &str,
    selling_price: i64,
    stock: i32,
) -> anyhow::Result<axum_inventory_api::entity::products::Model> {
    let product = ProductActive {
        id: Set(Uuid::new_v4()),
        owner_email: Set("owner@example.com".into()),
        name: Set(name.to_string()),
        description: Set(None),
        buying_price: Set(selling_price / 2),
        selling_price: Set(selling_price),
        stock: Set(stock),
        category: Set(None),
        image_url: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(product)
}

fn line(product: &axum_inventory_api::entity::products::Model, quantity: i32) -> SaleLineItem {
    SaleLineItem {
        product_id: product.id,
        name: product.name.clone(),
        quantity,
    }
}

fn request(seller: &str, items: Vec<SaleLineItem>) -> RecordSaleRequest {
    RecordSaleRequest {
        sold_by: seller.to_string(),
        sale_date: None,
        items,
    }
}

async fn stock_of(state: &AppState, id: Uuid) -> anyhow::Result<i32> {
    let product = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .expect("product should exist");
    Ok(product.stock)
}

async fn sales_count(state: &AppState, seller: &str) -> anyhow::Result<u64> {
    Ok(Sales::find()
        .filter(SaleCol::SoldBy.eq(seller))
        .count(&state.orm)
        .await?)
}
