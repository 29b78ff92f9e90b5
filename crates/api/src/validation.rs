//! Explicit request validation.
//!
//! Each request shape has a validation function returning a structured list
//! of field errors, invoked by the route handler before any service call.
//! Constraints: name length 1-50, price > 0, stock >= 0, ids and quantities
//! positive.

use rust_decimal::Decimal;
use serde::Serialize;

/// Maximum product name length.
pub const MAX_NAME_LENGTH: usize = 50;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field, as it appears in the request.
    pub field: &'static str,
    /// Human-readable constraint message.
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Convert accumulated field errors into a `Result`.
///
/// # Errors
///
/// Returns `AppError::Validation` when the list is non-empty.
pub fn check(errors: Vec<FieldError>) -> crate::error::Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(crate::error::AppError::Validation(errors))
    }
}

/// Validate the name/price/stock triple shared by product create and update.
#[must_use]
pub fn validate_product_fields(name: &str, price: Decimal, stock: i32) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if name.is_empty() {
        errors.push(FieldError::new("name", "name must not be empty"));
    } else if name.chars().count() > MAX_NAME_LENGTH {
        errors.push(FieldError::new(
            "name",
            format!("name must be at most {MAX_NAME_LENGTH} characters"),
        ));
    }

    if price <= Decimal::ZERO {
        errors.push(FieldError::new("price", "price must be greater than zero"));
    }

    if stock < 0 {
        errors.push(FieldError::new("stock", "stock must not be negative"));
    }

    errors
}

/// Validate a positive identifier (`id`, `userId`, `productId`).
#[must_use]
pub fn validate_id(field: &'static str, id: i32) -> Vec<FieldError> {
    if id > 0 {
        Vec::new()
    } else {
        vec![FieldError::new(
            field,
            format!("{field} must be a positive integer"),
        )]
    }
}

/// Validate a positive quantity.
#[must_use]
pub fn validate_quantity(quantity: i32) -> Vec<FieldError> {
    if quantity > 0 {
        Vec::new()
    } else {
        vec![FieldError::new(
            "quantity",
            "quantity must be a positive integer",
        )]
    }
}

/// Validate a search term: must not be empty or whitespace-only.
#[must_use]
pub fn validate_search_term(term: &str) -> Vec<FieldError> {
    if term.trim().is_empty() {
        vec![FieldError::new("name", "search term must not be empty")]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_product_fields() {
        assert!(validate_product_fields("Gaming Mouse", Decimal::new(999, 2), 5).is_empty());
    }

    #[test]
    fn test_empty_name() {
        let errors = validate_product_fields("", Decimal::ONE, 0);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().unwrap().field, "name");
    }

    #[test]
    fn test_name_at_limit_is_valid() {
        let name = "x".repeat(MAX_NAME_LENGTH);
        assert!(validate_product_fields(&name, Decimal::ONE, 0).is_empty());
    }

    #[test]
    fn test_name_over_limit() {
        let name = "x".repeat(MAX_NAME_LENGTH + 1);
        let errors = validate_product_fields(&name, Decimal::ONE, 0);
        assert_eq!(errors.first().unwrap().field, "name");
    }

    #[test]
    fn test_zero_and_negative_price() {
        assert_eq!(
            validate_product_fields("a", Decimal::ZERO, 0)
                .first()
                .unwrap()
                .field,
            "price"
        );
        assert_eq!(
            validate_product_fields("a", Decimal::new(-100, 2), 0)
                .first()
                .unwrap()
                .field,
            "price"
        );
    }

    #[test]
    fn test_negative_stock() {
        let errors = validate_product_fields("a", Decimal::ONE, -1);
        assert_eq!(errors.first().unwrap().field, "stock");
    }

    #[test]
    fn test_multiple_failures_accumulate() {
        let errors = validate_product_fields("", Decimal::ZERO, -1);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_validate_id() {
        assert!(validate_id("userId", 1).is_empty());
        assert!(!validate_id("userId", 0).is_empty());
        assert!(!validate_id("productId", -3).is_empty());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_empty());
        assert!(!validate_quantity(0).is_empty());
        assert!(!validate_quantity(-2).is_empty());
    }

    #[test]
    fn test_validate_search_term() {
        assert!(validate_search_term("mouse").is_empty());
        assert!(!validate_search_term("").is_empty());
        assert!(!validate_search_term("   ").is_empty());
    }

    #[test]
    fn test_check_collects_into_validation_error() {
        let result = check(vec![FieldError::new("name", "bad")]);
        assert!(matches!(
            result,
            Err(crate::error::AppError::Validation(errors)) if errors.len() == 1
        ));
    }
}
