//! Cart service: the cart-mutation workflow.
//!
//! Add-to-cart runs inside a single database transaction so the stock
//! decrement and the line-item upsert land together or not at all. The
//! stock check itself is an atomic conditional decrement
//! (`UPDATE ... WHERE stock >= quantity`, affected-row count inspected), so
//! two concurrent adds for the same product can never both pass it.
//!
//! Deliberately preserved behavior: stock is never restored on item removal
//! or quantity decrease, and never re-checked on quantity increase via the
//! update path. Only the add path touches stock.

use sqlx::PgPool;
use thiserror::Error;

use greenbasket_core::{ProductId, UserId};

use crate::db::RepositoryError;
use crate::db::carts::{self, CartRepository};
use crate::db::products::{self, StockDecrement};
use crate::db::users;
use crate::models::CartItemView;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// No product with the given id.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// No user with the given id.
    #[error("user {0} not found")]
    UserNotFound(UserId),

    /// The user has no cart yet.
    #[error("no cart for user {0}")]
    CartNotFound(UserId),

    /// The cart holds no line item for the product.
    #[error("no cart item for product {0}")]
    ItemNotFound(ProductId),

    /// Requested quantity exceeds the stock on hand.
    #[error("insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        /// The product that ran short.
        product_id: ProductId,
        /// Units requested.
        requested: i32,
        /// Units currently on hand.
        available: i32,
    },

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for CartError {
    fn from(err: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(err))
    }
}

/// Cart service.
pub struct CartService<'a> {
    pool: &'a PgPool,
    carts: CartRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            pool,
            carts: CartRepository::new(pool),
        }
    }

    /// Add a product to the user's cart, decrementing stock atomically.
    ///
    /// Inside one transaction: verify the user, conditionally decrement
    /// stock, resolve or lazily create the cart, and upsert the line item
    /// (merging quantities when the product is already in the cart).
    ///
    /// # Errors
    ///
    /// - `CartError::UserNotFound` if the user row is absent
    /// - `CartError::ProductNotFound` if the product row is absent
    /// - `CartError::InsufficientStock` if `stock < quantity`; the store is
    ///   left unchanged
    /// - `CartError::Repository` for unexpected store failures
    pub async fn add_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<(), CartError> {
        let mut tx = self.pool.begin().await?;

        if !users::exists(&mut *tx, user_id).await? {
            return Err(CartError::UserNotFound(user_id));
        }

        match products::try_decrement_stock(&mut *tx, product_id, quantity).await? {
            StockDecrement::Decremented => {}
            StockDecrement::ProductMissing => {
                return Err(CartError::ProductNotFound(product_id));
            }
            StockDecrement::Insufficient { available } => {
                return Err(CartError::InsufficientStock {
                    product_id,
                    requested: quantity,
                    available,
                });
            }
        }

        let cart_id = carts::resolve_or_create_cart(&mut *tx, user_id).await?;
        carts::upsert_item(&mut *tx, cart_id, product_id, quantity).await?;

        tx.commit().await?;

        tracing::info!(
            %user_id, %product_id, quantity,
            "added to cart, stock decremented"
        );
        Ok(())
    }

    /// Replace the quantity of an existing line item.
    ///
    /// Stock is not reconciled against the delta; this is the preserved
    /// behavior of the original workflow.
    ///
    /// # Errors
    ///
    /// - `CartError::CartNotFound` if the user has no cart
    /// - `CartError::ItemNotFound` if the product is not in the cart
    /// - `CartError::Repository` for unexpected store failures
    pub async fn update_item_quantity(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<(), CartError> {
        let cart = self
            .carts
            .find_by_user(user_id)
            .await?
            .ok_or(CartError::CartNotFound(user_id))?;

        let item = self
            .carts
            .update_item_quantity(cart.id, product_id, quantity)
            .await?
            .ok_or(CartError::ItemNotFound(product_id))?;

        tracing::info!(%user_id, %product_id, quantity = item.quantity, "cart item quantity replaced");
        Ok(())
    }

    /// Remove a line item from the user's cart. Stock is not restored.
    ///
    /// # Errors
    ///
    /// - `CartError::CartNotFound` if the user has no cart
    /// - `CartError::ItemNotFound` if the product is not in the cart
    /// - `CartError::Repository` for unexpected store failures
    pub async fn remove_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<(), CartError> {
        let cart = self
            .carts
            .find_by_user(user_id)
            .await?
            .ok_or(CartError::CartNotFound(user_id))?;

        let deleted = self.carts.delete_item(cart.id, product_id).await?;

        if deleted {
            tracing::info!(%user_id, %product_id, "cart item removed");
            Ok(())
        } else {
            Err(CartError::ItemNotFound(product_id))
        }
    }

    /// Retrieve the user's cart as line items joined to products.
    ///
    /// Returns an empty list when the user has no cart or an empty cart;
    /// that is not an error.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the query fails.
    pub async fn get_items(&self, user_id: UserId) -> Result<Vec<CartItemView>, CartError> {
        Ok(self.carts.list_items(user_id).await?)
    }
}
