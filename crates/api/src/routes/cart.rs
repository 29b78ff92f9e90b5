//! Cart route handlers.

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use greenbasket_core::{ProductId, UserId};

use crate::error::Result;
use crate::services::CartService;
use crate::state::AppState;
use crate::validation;

/// Query for `GET /cart`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowCartQuery {
    pub user_id: i32,
}

/// Body for `POST /cart`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: i32,
    pub user_id: i32,
    pub quantity: i32,
}

/// Query for `PUT /cart`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartQuery {
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
}

/// Query for `DELETE /cart`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartQuery {
    pub user_id: i32,
    pub product_id: i32,
}

/// `GET /cart?userId=` - the user's cart joined to products.
///
/// An empty or missing cart yields an empty list with an explanatory
/// message, never an error.
pub async fn show(
    State(state): State<AppState>,
    Query(query): Query<ShowCartQuery>,
) -> Result<impl IntoResponse> {
    validation::check(validation::validate_id("userId", query.user_id))?;

    let items = CartService::new(state.pool())
        .get_items(UserId::new(query.user_id))
        .await?;

    let body = if items.is_empty() {
        json!({ "items": items, "message": "cart is empty" })
    } else {
        json!({ "items": items })
    };
    Ok(Json(body))
}

/// `POST /cart` - add an item, decrementing stock in the same transaction.
pub async fn add(
    State(state): State<AppState>,
    Json(body): Json<AddToCartRequest>,
) -> Result<impl IntoResponse> {
    let mut errors = validation::validate_id("productId", body.product_id);
    errors.extend(validation::validate_id("userId", body.user_id));
    errors.extend(validation::validate_quantity(body.quantity));
    validation::check(errors)?;

    CartService::new(state.pool())
        .add_item(
            UserId::new(body.user_id),
            ProductId::new(body.product_id),
            body.quantity,
        )
        .await?;
    Ok(Json(json!({ "message": "item added to cart" })))
}

/// `PUT /cart?userId=&productId=&quantity=` - replace a line-item quantity.
pub async fn update(
    State(state): State<AppState>,
    Query(query): Query<UpdateCartQuery>,
) -> Result<impl IntoResponse> {
    let mut errors = validation::validate_id("userId", query.user_id);
    errors.extend(validation::validate_id("productId", query.product_id));
    errors.extend(validation::validate_quantity(query.quantity));
    validation::check(errors)?;

    CartService::new(state.pool())
        .update_item_quantity(
            UserId::new(query.user_id),
            ProductId::new(query.product_id),
            query.quantity,
        )
        .await?;
    Ok(Json(json!({ "message": "cart item updated" })))
}

/// `DELETE /cart?userId=&productId=` - remove a line item.
pub async fn remove(
    State(state): State<AppState>,
    Query(query): Query<RemoveFromCartQuery>,
) -> Result<impl IntoResponse> {
    let mut errors = validation::validate_id("userId", query.user_id);
    errors.extend(validation::validate_id("productId", query.product_id));
    validation::check(errors)?;

    CartService::new(state.pool())
        .remove_item(
            UserId::new(query.user_id),
            ProductId::new(query.product_id),
        )
        .await?;
    Ok(Json(json!({ "message": "cart item removed" })))
}
