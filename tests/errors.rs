mod common;

use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use student_store::{
    cart::{Cart, ProductId},
    config::AuthConfig,
    dto::orders::CreateOrderRequest,
    error::AppError,
    routes::create_api_router,
    state::AppState,
};
use uuid::Uuid;

async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn validation_error_maps_to_400_with_nested_message() {
    let (status, body) = body_json(AppError::Validation("Invalid order in request body.".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Invalid order in request body.");
    assert_eq!(body["error"]["status"], 400);
}

#[tokio::test]
async fn unauthorized_and_not_found_map_to_their_status_codes() {
    let (status, body) = body_json(AppError::Unauthorized("Invalid credentials".into())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["message"], "Invalid credentials");

    let (status, body) = body_json(AppError::NotFound("Product".into())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Product not found");
}

#[tokio::test]
async fn internal_errors_do_not_leak_details() {
    let (status, body) = body_json(AppError::Internal(anyhow::anyhow!("secret connection string"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["message"], "Internal Server Error");
}

#[test]
fn order_payload_without_order_field_is_rejected() {
    let payload: CreateOrderRequest = serde_json::from_str("{}").unwrap();
    match payload.into_cart() {
        Err(AppError::Validation(msg)) => assert_eq!(msg, "Invalid order in request body."),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn empty_order_is_rejected() {
    let payload: CreateOrderRequest = serde_json::from_str(r#"{"order": {}}"#).unwrap();
    assert!(matches!(payload.into_cart(), Err(AppError::Validation(_))));
}

#[test]
fn order_payload_round_trips_cart_mapping() {
    let p = ProductId::new(Uuid::new_v4());
    let body = serde_json::to_value(CreateOrderRequest::new(
        Cart::from_entries([(p, 2)]).unwrap(),
    ))
    .unwrap();
    assert_eq!(body["order"][p.to_string()], 2);

    let parsed: CreateOrderRequest = serde_json::from_value(body).unwrap();
    assert_eq!(parsed.into_cart().unwrap().get(&p).map(|q| q.get()), Some(2));
}

// Body rejections happen before any handler touches the database, so a lazy
// pool that never connects is enough here.
async fn spawn_api() -> String {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/student_store_unused")
        .unwrap();
    let auth = AuthConfig {
        jwt_secret: "router-secret".into(),
        token_ttl: Duration::hours(1),
    };
    common::spawn(create_api_router().with_state(AppState::new(pool, auth))).await
}

#[tokio::test]
async fn incomplete_login_body_gets_nested_error() {
    let base = spawn_api().await;
    let response = reqwest::Client::new()
        .post(format!("{base}/auth/login"))
        .json(&serde_json::json!({ "email": "a@b.c" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"]["status"], 400);
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.contains("password"), "{message}");
    assert_eq!(body["message"], body["error"]["message"]);
}

#[tokio::test]
async fn malformed_register_body_gets_nested_error() {
    let base = spawn_api().await;
    let response = reqwest::Client::new()
        .post(format!("{base}/auth/register"))
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"]["status"], 400);
    assert!(body["error"]["message"].as_str().is_some_and(|m| !m.is_empty()));
}

#[tokio::test]
async fn order_without_token_gets_nested_unauthorized() {
    let base = spawn_api().await;
    let response = reqwest::Client::new()
        .post(format!("{base}/orders"))
        .json(&serde_json::json!({ "order": { "not-a-uuid": 1 } }))
        .send()
        .await
        .unwrap();

    // No bearer token: the extractor rejects first, still with the nested shape.
    assert_eq!(response.status().as_u16(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"]["status"], 401);
}
