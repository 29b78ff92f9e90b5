//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database ping)
//!
//! # Products
//! GET    /products               - List all products
//! GET    /products/{id}          - Get product by id
//! GET    /products/search/{name} - Case-insensitive substring search
//! POST   /products               - Create product
//! PUT    /products               - Full replace by id (body carries the id)
//! DELETE /products/{id}          - Delete product
//!
//! # Cart
//! GET    /cart?userId=           - Retrieve cart (possibly empty)
//! POST   /cart                   - Add item, decrement stock atomically
//! PUT    /cart?userId=&productId=&quantity= - Replace line-item quantity
//! DELETE /cart?userId=&productId=           - Remove line item
//! ```
//!
//! Handlers validate required fields and numeric ranges before invoking the
//! service layer, then translate typed service failures into HTTP statuses.

pub mod cart;
pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create).put(products::update))
        .route("/{id}", get(products::get_by_id).delete(products::remove))
        .route("/search/{name}", get(products::search))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(cart::show)
            .post(cart::add)
            .put(cart::update)
            .delete(cart::remove),
    )
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
}
