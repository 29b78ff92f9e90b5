//! Service layer: catalog CRUD/search and the cart-mutation workflow.
//!
//! Services hold no state of their own beyond a pool reference; all shared
//! mutable state is the database. They signal typed failures and never
//! panic the process.

pub mod cart;
pub mod catalog;

pub use cart::CartService;
pub use catalog::CatalogService;
