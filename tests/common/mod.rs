#![allow(dead_code)]

//! In-process stand-in for the store API, bound to an ephemeral port.

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    routing::{get, post},
};
use chrono::Utc;
use serde_json::{Value, json};
use student_store::{
    cart::ProductId,
    client::{ApiClient, MemoryTokenStore, Session},
    config::ClientConfig,
    dto::{auth::LoginRequest, orders::CreateOrderRequest},
    error::AppError,
    models::{OrderLine, Product, User},
};
use uuid::Uuid;

pub const GOOD_TOKEN: &str = "good-token";
pub const PASSWORD: &str = "secret123";

#[derive(Clone)]
pub struct Stub {
    pub user: User,
    pub products: Vec<Product>,
    pub orders: Arc<Mutex<Vec<OrderLine>>>,
}

impl Stub {
    pub fn new() -> Self {
        Self {
            user: User {
                id: Uuid::new_v4(),
                email: "student@example.com".into(),
                name: Some("Student".into()),
                created_at: Utc::now(),
            },
            products: vec![
                product("Cheetos", "food", 150),
                product("Campus Hoodie", "clothing", 3999),
                product("Cheese Crackers", "food", 275),
            ],
            orders: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn order_count(&self) -> usize {
        self.orders.lock().unwrap().len()
    }
}

pub fn product(name: &str, category: &str, price: i64) -> Product {
    Product {
        id: ProductId::new(Uuid::new_v4()),
        name: name.into(),
        category: category.into(),
        description: None,
        image_url: None,
        price,
        created_at: Utc::now(),
    }
}

fn authorize(headers: &HeaderMap) -> Result<(), AppError> {
    let ok = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {GOOD_TOKEN}"));
    if ok {
        Ok(())
    } else {
        Err(AppError::Unauthorized("Invalid or expired token".into()))
    }
}

async fn login(
    State(stub): State<Stub>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    if body.email != stub.user.email || body.password != PASSWORD {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }
    Ok(Json(json!({ "message": "Logged in", "user": stub.user, "token": GOOD_TOKEN })))
}

async fn register(State(stub): State<Stub>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::CREATED,
        Json(json!({ "message": "User created", "user": stub.user, "token": GOOD_TOKEN })),
    )
}

async fn me(State(stub): State<Stub>, headers: HeaderMap) -> Result<Json<Value>, AppError> {
    authorize(&headers)?;
    Ok(Json(json!({ "message": "Ok", "user": stub.user })))
}

async fn store(State(stub): State<Stub>) -> Json<Value> {
    Json(json!({ "message": "Ok", "products": stub.products }))
}

async fn list_orders(State(stub): State<Stub>, headers: HeaderMap) -> Result<Json<Value>, AppError> {
    authorize(&headers)?;
    let orders = stub.orders.lock().unwrap().clone();
    Ok(Json(json!({ "message": "Ok", "orders": orders })))
}

async fn create_order(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(body): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    authorize(&headers)?;
    let cart = body.into_cart()?;
    let order_id = Uuid::new_v4();
    let mut lines = Vec::new();
    for (id, qty) in cart.iter() {
        let product = stub
            .products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::Validation(format!("Unknown product {id}")))?;
        lines.push(OrderLine {
            order_id,
            customer_id: stub.user.id,
            product_id: id,
            quantity: qty.get(),
            name: product.name.clone(),
            price: product.price,
            ordered_at: Utc::now(),
        });
    }
    let history = {
        let mut orders = stub.orders.lock().unwrap();
        orders.extend(lines);
        orders.clone()
    };
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Order created", "order": history })),
    ))
}

pub fn router(stub: Stub) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/me", get(me))
        .route("/store", get(store))
        .route("/orders", get(list_orders).post(create_order))
        .with_state(stub)
}

pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

pub async fn spawn_stub() -> (Stub, String) {
    let stub = Stub::new();
    let url = spawn(router(stub.clone())).await;
    (stub, url)
}

pub fn client(base_url: &str, store: MemoryTokenStore) -> ApiClient<MemoryTokenStore> {
    ApiClient::new(&ClientConfig::new(base_url), Session::new(store)).unwrap()
}
