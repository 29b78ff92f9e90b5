//! Catalog service: CRUD and substring search over products.

use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

use greenbasket_core::ProductId;

use crate::db::RepositoryError;
use crate::db::products::ProductRepository;
use crate::models::Product;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product with the given id.
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Catalog service.
///
/// Every operation touches at most the single addressed row; there are no
/// side effects on other tables.
pub struct CatalogService<'a> {
    products: ProductRepository<'a>,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            products: ProductRepository::new(pool),
        }
    }

    /// List all products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.list().await?)
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no row matches.
    pub async fn get(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.products
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    /// Case-insensitive substring search on product name.
    ///
    /// An empty result is not an error; the handler rejects blank terms
    /// before this is called.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the query fails.
    pub async fn search(&self, term: &str) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.search_by_name(term).await?)
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the insert fails.
    pub async fn create(
        &self,
        name: &str,
        price: Decimal,
        stock: i32,
    ) -> Result<Product, CatalogError> {
        let product = self.products.create(name, price, stock).await?;
        tracing::info!(product_id = %product.id, name, "product created");
        Ok(product)
    }

    /// Fully replace name/price/stock of a product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no row matches.
    pub async fn update(
        &self,
        id: ProductId,
        name: &str,
        price: Decimal,
        stock: i32,
    ) -> Result<Product, CatalogError> {
        self.products
            .update(id, name, price, stock)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no row matches.
    pub async fn delete(&self, id: ProductId) -> Result<(), CatalogError> {
        if self.products.delete(id).await? {
            tracing::info!(product_id = %id, "product deleted");
            Ok(())
        } else {
            Err(CatalogError::NotFound(id))
        }
    }
}
