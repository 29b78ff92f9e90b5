//! Data records for the catalog and cart.
//!
//! These are plain records: what the database stores and what the API
//! returns. No lazy loading, no navigation properties - joins are explicit
//! query functions in [`crate::db`].

pub mod cart;
pub mod product;
pub mod user;

pub use cart::{Cart, CartItem, CartItemView};
pub use product::Product;
pub use user::User;
