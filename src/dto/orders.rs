use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    cart::Cart,
    error::{AppError, AppResult},
    models::OrderLine,
};

/// Checkout body: `{"order": {"<product id>": <quantity>, ...}}`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub order: Option<Cart>,
}

impl CreateOrderRequest {
    pub fn new(cart: Cart) -> Self {
        Self { order: Some(cart) }
    }

    /// Extract the cart, failing when the `order` field is absent or empty.
    pub fn into_cart(self) -> AppResult<Cart> {
        let cart = self
            .order
            .ok_or_else(|| AppError::Validation("Invalid order in request body.".into()))?;
        if cart.is_empty() {
            return Err(AppError::Validation("Cart is empty".into()));
        }
        Ok(cart)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderHistory {
    pub orders: Vec<OrderLine>,
}

/// Response to a checkout: the customer's whole order history, not just the new order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedOrder {
    pub order: Vec<OrderLine>,
}
