//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-class errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`. The taxonomy is fixed: validation failures,
//! not-found, insufficient stock, and a generic store failure that never
//! leaks internals.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::cart::CartError;
use crate::services::catalog::CatalogError;
use crate::validation::FieldError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or out-of-range input, with field-level messages.
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// Referenced entity absent.
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Entity kind, e.g. "product".
        entity: &'static str,
        /// The identifier that missed.
        id: i32,
    },

    /// Requested quantity exceeds available stock.
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock {
        /// Units requested.
        requested: i32,
        /// Units currently on hand.
        available: i32,
    },

    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] RepositoryError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => Self::NotFound {
                entity: "product",
                id: id.as_i32(),
            },
            CatalogError::Repository(e) => Self::Database(e),
        }
    }
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::ProductNotFound(id) => Self::NotFound {
                entity: "product",
                id: id.as_i32(),
            },
            CartError::UserNotFound(id) => Self::NotFound {
                entity: "user",
                id: id.as_i32(),
            },
            CartError::CartNotFound(user_id) => Self::NotFound {
                entity: "cart for user",
                id: user_id.as_i32(),
            },
            CartError::ItemNotFound(product_id) => Self::NotFound {
                entity: "cart item for product",
                id: product_id.as_i32(),
            },
            CartError::InsufficientStock {
                requested,
                available,
                ..
            } => Self::InsufficientStock {
                requested,
                available,
            },
            CartError::Repository(e) => Self::Database(e),
        }
    }
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InsufficientStock { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();

        // Don't expose internal error details to clients
        let body = match &self {
            Self::Validation(errors) => json!({ "errors": errors }),
            Self::NotFound { .. } => json!({ "error": self.to_string() }),
            Self::InsufficientStock {
                requested,
                available,
            } => json!({
                "error": self.to_string(),
                "requested": requested,
                "available": available,
            }),
            Self::Database(_) | Self::Internal(_) => {
                json!({ "error": "internal server error" })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use greenbasket_core::{ProductId, UserId};

    #[test]
    fn test_display() {
        let err = AppError::NotFound {
            entity: "product",
            id: 123,
        };
        assert_eq!(err.to_string(), "product with id 123 not found");

        let err = AppError::InsufficientStock {
            requested: 7,
            available: 5,
        };
        assert_eq!(
            err.to_string(),
            "insufficient stock: requested 7, available 5"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation(vec![]).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InsufficientStock {
                requested: 2,
                available: 1
            }
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound {
                entity: "product",
                id: 1
            }
            .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Internal("boom".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_cart_error_conversion() {
        let err: AppError = CartError::ProductNotFound(ProductId::new(4)).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err: AppError = CartError::InsufficientStock {
            product_id: ProductId::new(4),
            requested: 10,
            available: 3,
        }
        .into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err: AppError = CartError::CartNotFound(UserId::new(9)).into();
        assert_eq!(err.to_string(), "cart for user with id 9 not found");
    }

    #[test]
    fn test_internal_error_body_is_generic() {
        let response = AppError::Internal("connection refused to 10.0.0.1".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
