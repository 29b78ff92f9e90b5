//! Product repository for catalog queries and stock adjustment.

use sqlx::{PgConnection, PgPool};

use greenbasket_core::ProductId;
use rust_decimal::Decimal;

use super::RepositoryError;
use crate::models::Product;

/// Outcome of a conditional stock decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockDecrement {
    /// Stock was decremented by the requested quantity.
    Decremented,
    /// No product row with the given id.
    ProductMissing,
    /// The product exists but holds fewer units than requested.
    Insufficient {
        /// Stock currently on hand.
        available: i32,
    },
}

/// Repository for product catalog operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all products, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT id, name, price, stock, created_at, updated_at
            FROM products
            ORDER BY id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            SELECT id, name, price, stock, created_at, updated_at
            FROM products
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Case-insensitive substring search on product name.
    ///
    /// The term is matched anywhere in the name; `\`, `%` and `_` in the
    /// term are escaped so they match literally.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn search_by_name(&self, term: &str) -> Result<Vec<Product>, RepositoryError> {
        let pattern = format!("%{}%", escape_like(term));

        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT id, name, price, stock, created_at, updated_at
            FROM products
            WHERE name ILIKE $1
            ORDER BY id ASC
            ",
        )
        .bind(pattern)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Insert a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        name: &str,
        price: Decimal,
        stock: i32,
    ) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            INSERT INTO products (name, price, stock)
            VALUES ($1, $2, $3)
            RETURNING id, name, price, stock, created_at, updated_at
            ",
        )
        .bind(name)
        .bind(price)
        .bind(stock)
        .fetch_one(self.pool)
        .await?;

        Ok(product)
    }

    /// Fully replace name, price and stock of an existing product.
    ///
    /// Returns `None` if no row with the given id exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: ProductId,
        name: &str,
        price: Decimal,
        stock: i32,
    ) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            UPDATE products
            SET name = $2, price = $3, stock = $4, updated_at = now()
            WHERE id = $1
            RETURNING id, name, price, stock, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(name)
        .bind(price)
        .bind(stock)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Delete a product by its ID.
    ///
    /// Returns `true` if a row was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM products
            WHERE id = $1
            ",
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Atomically decrement stock when enough units are on hand.
///
/// Runs `UPDATE ... SET stock = stock - $q WHERE id = $id AND stock >= $q`
/// and inspects the affected-row count, so two concurrent add-to-cart calls
/// can never both pass the stock check. Meant to run inside the add-to-cart
/// transaction.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if a query fails.
pub async fn try_decrement_stock(
    conn: &mut PgConnection,
    id: ProductId,
    quantity: i32,
) -> Result<StockDecrement, RepositoryError> {
    let result = sqlx::query(
        r"
        UPDATE products
        SET stock = stock - $2, updated_at = now()
        WHERE id = $1 AND stock >= $2
        ",
    )
    .bind(id)
    .bind(quantity)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() > 0 {
        return Ok(StockDecrement::Decremented);
    }

    // Zero rows affected: either the product is gone or stock ran short.
    let available: Option<(i32,)> = sqlx::query_as(
        r"
        SELECT stock
        FROM products
        WHERE id = $1
        ",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(available.map_or(StockDecrement::ProductMissing, |(stock,)| {
        StockDecrement::Insufficient { available: stock }
    }))
}

/// Escape `LIKE`/`ILIKE` metacharacters so a search term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_plain() {
        assert_eq!(escape_like("gaming mouse"), "gaming mouse");
    }

    #[test]
    fn test_escape_like_percent() {
        assert_eq!(escape_like("100% juice"), "100\\% juice");
    }

    #[test]
    fn test_escape_like_underscore_and_backslash() {
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
    }

    #[test]
    fn test_stock_decrement_variants() {
        assert_eq!(StockDecrement::Decremented, StockDecrement::Decremented);
        assert_ne!(
            StockDecrement::ProductMissing,
            StockDecrement::Insufficient { available: 0 }
        );
    }
}
