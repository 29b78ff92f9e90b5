//! Shared newtype wrappers.
//!
//! - [`id`] - Type-safe entity IDs (`ProductId`, `UserId`, `CartId`)
//! - [`email`] - Validated email addresses

pub mod email;
pub mod id;

pub use email::{Email, EmailError};
pub use id::{CartId, ProductId, UserId};
