//! Product route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use greenbasket_core::ProductId;

use crate::error::Result;
use crate::services::CatalogService;
use crate::state::AppState;
use crate::validation;

/// Body for `POST /products`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
}

/// Body for `PUT /products`. Full replace; the id addresses the row.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
}

/// `GET /products` - list all products.
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let products = CatalogService::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// `GET /products/{id}` - get a product by id.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    validation::check(validation::validate_id("id", id))?;

    let product = CatalogService::new(state.pool())
        .get(ProductId::new(id))
        .await?;
    Ok(Json(product))
}

/// `GET /products/search/{name}` - case-insensitive substring search.
pub async fn search(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse> {
    validation::check(validation::validate_search_term(&name))?;

    let products = CatalogService::new(state.pool()).search(&name).await?;
    Ok(Json(products))
}

/// `POST /products` - create a product, returns 201 with the row.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateProductRequest>,
) -> Result<impl IntoResponse> {
    validation::check(validation::validate_product_fields(
        &body.name, body.price, body.stock,
    ))?;

    let product = CatalogService::new(state.pool())
        .create(&body.name, body.price, body.stock)
        .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /products` - full replace of name/price/stock by id.
pub async fn update(
    State(state): State<AppState>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse> {
    let mut errors = validation::validate_id("id", body.id);
    errors.extend(validation::validate_product_fields(
        &body.name, body.price, body.stock,
    ));
    validation::check(errors)?;

    let product = CatalogService::new(state.pool())
        .update(ProductId::new(body.id), &body.name, body.price, body.stock)
        .await?;
    Ok(Json(product))
}

/// `DELETE /products/{id}` - delete a product.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    validation::check(validation::validate_id("id", id))?;

    CatalogService::new(state.pool())
        .delete(ProductId::new(id))
        .await?;
    Ok(Json(json!({ "message": format!("product {id} deleted") })))
}
