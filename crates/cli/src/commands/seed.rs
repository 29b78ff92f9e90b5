//! Seed the catalog with sample products.

use rust_decimal::Decimal;

use greenbasket_api::db::{self, products::ProductRepository};

use super::CommandError;

/// Sample products: (name, price in cents, stock).
const SAMPLE_PRODUCTS: &[(&str, i64, i32)] = &[
    ("Gaming Mouse", 2999, 50),
    ("Mechanical Keyboard", 8950, 30),
    ("USB-C Hub", 4500, 25),
    ("Laptop Stand", 3499, 40),
    ("Webcam 1080p", 5999, 15),
];

/// Insert sample products. Skips seeding when the catalog is non-empty.
///
/// # Errors
///
/// Returns an error if the database URL is missing or a query fails.
pub async fn run() -> Result<(), CommandError> {
    let database_url = super::database_url()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    let products = ProductRepository::new(&pool);
    if !products.list().await?.is_empty() {
        tracing::info!("Catalog already has products, skipping seed");
        return Ok(());
    }

    for &(name, cents, stock) in SAMPLE_PRODUCTS {
        let product = products.create(name, Decimal::new(cents, 2), stock).await?;
        tracing::info!(id = %product.id, name, "seeded product");
    }

    tracing::info!("Seed complete: {} products", SAMPLE_PRODUCTS.len());
    Ok(())
}
