use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::cart::ProductId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// Unit price in cents.
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

/// One purchased product within an order, with the price paid at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub order_id: Uuid,
    pub customer_id: Uuid,
    pub product_id: ProductId,
    pub quantity: i32,
    pub name: String,
    pub price: i64,
    pub ordered_at: DateTime<Utc>,
}
