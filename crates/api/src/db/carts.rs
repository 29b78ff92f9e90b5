//! Cart repository: cart resolution, line-item upserts and the cart view.

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool, Row};

use greenbasket_core::{CartId, ProductId, UserId};

use super::RepositoryError;
use crate::models::{Cart, CartItem, CartItemView};

/// Repository for cart reads and single-statement mutations.
///
/// Mutations that must be atomic with a stock adjustment (add-to-cart) use
/// the transaction-scoped functions below instead.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find a user's cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_user(&self, user_id: UserId) -> Result<Option<Cart>, RepositoryError> {
        let cart = sqlx::query_as::<_, Cart>(
            r"
            SELECT id, user_id, created_at
            FROM carts
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(cart)
    }

    /// Join a user's line items to their products.
    ///
    /// Returns one row per line item with the product name, unit price,
    /// quantity and computed line total. Empty when the user has no cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_items(&self, user_id: UserId) -> Result<Vec<CartItemView>, RepositoryError> {
        let rows = sqlx::query(
            r"
            SELECT ci.product_id, p.name, p.price, ci.quantity
            FROM cart_items ci
            JOIN carts c ON c.id = ci.cart_id
            JOIN products p ON p.id = ci.product_id
            WHERE c.user_id = $1
            ORDER BY ci.created_at ASC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let product_id: ProductId = row.try_get("product_id")?;
            let name: String = row.try_get("name")?;
            let price: Decimal = row.try_get("price")?;
            let quantity: i32 = row.try_get("quantity")?;
            items.push(CartItemView::from_parts(product_id, name, price, quantity));
        }

        Ok(items)
    }

    /// Replace the quantity of an existing line item.
    ///
    /// Returns the updated row, or `None` if no line item matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update_item_quantity(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let item = sqlx::query_as::<_, CartItem>(
            r"
            UPDATE cart_items
            SET quantity = $3
            WHERE cart_id = $1 AND product_id = $2
            RETURNING cart_id, product_id, quantity, created_at
            ",
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_optional(self.pool)
        .await?;

        Ok(item)
    }

    /// Delete a line item.
    ///
    /// Returns `true` if a row was deleted. Stock is not restored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete_item(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM cart_items
            WHERE cart_id = $1 AND product_id = $2
            ",
        )
        .bind(cart_id)
        .bind(product_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
// Transaction-scoped functions (add-to-cart)
// =============================================================================

/// Resolve the user's cart id, creating the cart when absent.
///
/// First-write-wins under concurrency: the insert uses
/// `ON CONFLICT (user_id) DO NOTHING` and falls back to re-selecting the row
/// another request created. The caller must verify the user exists first,
/// otherwise the insert fails on the foreign key.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if a query fails, or
/// `RepositoryError::DataCorruption` if the cart vanishes between the two
/// statements (deleted mid-transaction).
pub async fn resolve_or_create_cart(
    conn: &mut PgConnection,
    user_id: UserId,
) -> Result<CartId, RepositoryError> {
    let inserted: Option<(CartId,)> = sqlx::query_as(
        r"
        INSERT INTO carts (user_id)
        VALUES ($1)
        ON CONFLICT (user_id) DO NOTHING
        RETURNING id
        ",
    )
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?;

    if let Some((cart_id,)) = inserted {
        return Ok(cart_id);
    }

    let existing: Option<(CartId,)> = sqlx::query_as(
        r"
        SELECT id
        FROM carts
        WHERE user_id = $1
        ",
    )
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?;

    existing.map(|(id,)| id).ok_or_else(|| {
        RepositoryError::DataCorruption(format!("cart for user {user_id} disappeared"))
    })
}

/// Insert a line item or merge into an existing one.
///
/// A cart holds at most one row per product: on conflict the quantities are
/// summed, so repeated adds increment rather than duplicate.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the upsert fails.
pub async fn upsert_item(
    conn: &mut PgConnection,
    cart_id: CartId,
    product_id: ProductId,
    quantity: i32,
) -> Result<(), RepositoryError> {
    sqlx::query(
        r"
        INSERT INTO cart_items (cart_id, product_id, quantity)
        VALUES ($1, $2, $3)
        ON CONFLICT (cart_id, product_id)
        DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
        ",
    )
    .bind(cart_id)
    .bind(product_id)
    .bind(quantity)
    .execute(conn)
    .await?;

    Ok(())
}
