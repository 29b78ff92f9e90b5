//! Product record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use greenbasket_core::ProductId;

/// A catalog product as stored in the `products` table.
///
/// Stock is mutated by catalog writes and by cart stock decrements; it is
/// never touched by cart-item removal or quantity updates.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_camel_case() {
        let product = Product {
            id: ProductId::new(1),
            name: "Gaming Mouse".to_string(),
            price: Decimal::new(999, 2),
            stock: 5,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Gaming Mouse");
        assert_eq!(json["price"], "9.99");
        assert_eq!(json["stock"], 5);
        assert!(json.get("createdAt").is_some());
    }
}
