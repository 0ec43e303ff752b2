use axum_inventory_api::{config::AppConfig, db::create_pool};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let owner = "owner@example.com";
    ensure_user(&pool, owner, "Demo Owner").await?;
    seed_products(&pool, owner).await?;

    println!("Seed completed. Owner: {owner}");
    Ok(())
}

async fn ensure_user(pool: &sqlx::PgPool, email: &str, name: &str) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO users (email, name)
        VALUES ($1, $2)
        ON CONFLICT (email) DO NOTHING
        "#,
    )
    .bind(email)
    .bind(name)
    .execute(pool)
    .await?;

    println!("Ensured user {email}");
    Ok(())
}

async fn seed_products(pool: &sqlx::PgPool, owner: &str) -> anyhow::Result<()> {
    let existing: (i64,) = sqlx::query_as("SELECT count(*) FROM products")
        .fetch_one(pool)
        .await?;
    if existing.0 > 0 {
        println!("Products already present, skipping seed");
        return Ok(());
    }

    let products = vec![
        ("Thermal Printer", "80mm receipt printer", 420000, 550000, 12, "hardware"),
        ("Barcode Scanner", "USB laser scanner", 150000, 210000, 30, "hardware"),
        ("Cash Drawer", "5-bill 8-coin drawer", 230000, 320000, 8, "hardware"),
        ("Label Roll", "Pack of 12 label rolls", 40000, 65000, 200, "consumables"),
    ];

    for (name, desc, buying, selling, stock, category) in products {
        sqlx::query(
            r#"
            INSERT INTO products (id, owner_email, name, description, buying_price, selling_price, stock, category)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(name)
        .bind(desc)
        .bind(i64::from(buying))
        .bind(i64::from(selling))
        .bind(stock)
        .bind(category)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}
