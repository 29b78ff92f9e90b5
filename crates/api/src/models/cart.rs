//! Cart and line-item records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use greenbasket_core::{CartId, ProductId, UserId};

/// A shopping cart row. One per user, created lazily on first add-to-cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: CartId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// A line item in a cart. Unique per (cart, product) pair; repeated adds
/// increment `quantity` rather than inserting a second row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

/// A line item joined to its product, as returned by `GET /cart`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub line_total: Decimal,
}

impl CartItemView {
    /// Compute the line total (unit price x quantity) for a joined row.
    #[must_use]
    pub fn from_parts(
        product_id: ProductId,
        name: String,
        unit_price: Decimal,
        quantity: i32,
    ) -> Self {
        let line_total = unit_price * Decimal::from(quantity);
        Self {
            product_id,
            name,
            unit_price,
            quantity,
            line_total,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let view = CartItemView::from_parts(
            ProductId::new(1),
            "Gaming Mouse".to_string(),
            Decimal::new(999, 2),
            3,
        );
        assert_eq!(view.line_total, Decimal::new(2997, 2));
    }

    #[test]
    fn test_line_total_single_unit() {
        let view =
            CartItemView::from_parts(ProductId::new(2), "Desk".to_string(), Decimal::new(15000, 2), 1);
        assert_eq!(view.line_total, view.unit_price);
    }

    #[test]
    fn test_serialize_camel_case() {
        let view = CartItemView::from_parts(
            ProductId::new(1),
            "Gaming Mouse".to_string(),
            Decimal::new(999, 2),
            2,
        );
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["productId"], 1);
        assert_eq!(json["unitPrice"], "9.99");
        assert_eq!(json["lineTotal"], "19.98");
    }
}
