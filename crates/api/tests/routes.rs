//! Router-level tests for request validation and error shape.
//!
//! These drive the real router via `tower::ServiceExt::oneshot` with a
//! lazily connecting pool: every request here is rejected by validation
//! before any query runs, so no database is needed.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

use greenbasket_api::config::ApiConfig;
use greenbasket_api::state::AppState;
use greenbasket_api::{app, db};

fn test_app() -> Router {
    let config = ApiConfig {
        database_url: SecretString::from("postgres://greenbasket@localhost:5432/unused"),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
    };
    let pool = db::create_lazy_pool(&config.database_url).unwrap();
    app(AppState::new(config, pool))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

#[tokio::test]
async fn health_returns_ok() {
    let response = test_app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn get_product_rejects_non_positive_id() {
    for uri in ["/products/0", "/products/-7"] {
        let response = test_app().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");

        let body = body_json(response).await;
        assert_eq!(body["errors"][0]["field"], "id");
    }
}

#[tokio::test]
async fn search_rejects_blank_term() {
    let response = test_app()
        .oneshot(get("/products/search/%20%20"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["errors"][0]["field"], "name");
}

#[tokio::test]
async fn create_product_rejects_all_invalid_fields() {
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/products",
            r#"{"name":"","price":"0","stock":-1}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "price", "stock"]);
}

#[tokio::test]
async fn create_product_rejects_overlong_name() {
    let name = "x".repeat(51);
    let body = format!(r#"{{"name":"{name}","price":"9.99","stock":1}}"#);
    let response = test_app()
        .oneshot(json_request("POST", "/products", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_product_rejects_malformed_json() {
    let response = test_app()
        .oneshot(json_request("POST", "/products", "{not json"))
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn update_product_rejects_non_positive_id() {
    let response = test_app()
        .oneshot(json_request(
            "PUT",
            "/products",
            r#"{"id":0,"name":"Gaming Mouse","price":"9.99","stock":5}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["errors"][0]["field"], "id");
}

#[tokio::test]
async fn delete_product_rejects_non_positive_id() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/products/0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn show_cart_rejects_non_positive_user_id() {
    let response = test_app().oneshot(get("/cart?userId=0")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["errors"][0]["field"], "userId");
}

#[tokio::test]
async fn show_cart_rejects_missing_user_id() {
    let response = test_app().oneshot(get("/cart")).await.unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn add_to_cart_rejects_invalid_fields() {
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/cart",
            r#"{"productId":0,"userId":-1,"quantity":0}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["productId", "userId", "quantity"]);
}

#[tokio::test]
async fn update_cart_rejects_non_positive_quantity() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/cart?userId=1&productId=1&quantity=0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["errors"][0]["field"], "quantity");
}

#[tokio::test]
async fn remove_from_cart_rejects_non_positive_ids() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/cart?userId=-2&productId=0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["userId", "productId"]);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let response = test_app().oneshot(get("/orders")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
