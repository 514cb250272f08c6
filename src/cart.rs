//! Client-held shopping cart.
//!
//! A [`Cart`] maps a [`ProductId`] to a strictly positive [`Quantity`]. Every
//! operation here is pure: it borrows the current cart and returns a new one.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Product;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("Quantity must be greater than 0, got {0}")]
    InvalidQuantity(i64),

    #[error("Invalid product id {0}")]
    InvalidProductId(String),
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
    sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = CartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| CartError::InvalidProductId(s.to_string()))
    }
}

impl From<Uuid> for ProductId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<ProductId> for Uuid {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

/// A quantity that is always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "i64", into = "i32")]
pub struct Quantity(i32);

impl Quantity {
    pub const ONE: Quantity = Quantity(1);

    pub fn new(value: i32) -> Result<Self, CartError> {
        Self::try_from(i64::from(value))
    }

    pub const fn get(&self) -> i32 {
        self.0
    }

    fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// `None` once the last unit is gone.
    fn decrement(self) -> Option<Self> {
        (self.0 > 1).then(|| Self(self.0 - 1))
    }
}

impl TryFrom<i64> for Quantity {
    type Error = CartError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match i32::try_from(value) {
            Ok(v) if v > 0 => Ok(Self(v)),
            _ => Err(CartError::InvalidQuantity(value)),
        }
    }
}

impl From<Quantity> for i32 {
    fn from(q: Quantity) -> Self {
        q.0
    }
}

/// Anything that can be put in a cart.
pub trait CartItem {
    fn product_id(&self) -> ProductId;
}

impl CartItem for ProductId {
    fn product_id(&self) -> ProductId {
        *self
    }
}

impl CartItem for Product {
    fn product_id(&self) -> ProductId {
        self.id
    }
}

impl<T: CartItem + ?Sized> CartItem for &T {
    fn product_id(&self) -> ProductId {
        (**self).product_id()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct Cart(BTreeMap<ProductId, Quantity>);

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from raw pairs, rejecting non-positive quantities.
    /// Repeated ids are summed.
    pub fn from_entries<I>(entries: I) -> Result<Self, CartError>
    where
        I: IntoIterator<Item = (ProductId, i64)>,
    {
        let mut items: BTreeMap<ProductId, Quantity> = BTreeMap::new();
        for (id, raw) in entries {
            let qty = Quantity::try_from(raw)?;
            let total = match items.get(&id) {
                Some(existing) => Quantity::try_from(i64::from(existing.get()) + i64::from(qty.get()))?,
                None => qty,
            };
            items.insert(id, total);
        }
        Ok(Self(items))
    }

    pub fn get(&self, id: &ProductId) -> Option<Quantity> {
        self.0.get(id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProductId, Quantity)> + '_ {
        self.0.iter().map(|(id, qty)| (*id, *qty))
    }

    pub fn product_ids(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn add_to_cart(cart: &Cart, item: impl CartItem) -> Cart {
    let id = item.product_id();
    let mut next = cart.0.clone();
    let qty = next.get(&id).map_or(Quantity::ONE, |q| q.increment());
    next.insert(id, qty);
    Cart(next)
}

pub fn remove_from_cart(cart: &Cart, item: impl CartItem) -> Cart {
    let id = item.product_id();
    let mut next = cart.0.clone();
    if let Some(qty) = next.remove(&id) {
        if let Some(remaining) = qty.decrement() {
            next.insert(id, remaining);
        }
    }
    Cart(next)
}

pub fn get_quantity_of_item_in_cart(cart: &Cart, item: impl CartItem) -> i32 {
    cart.get(&item.product_id()).map_or(0, |q| q.get())
}

pub fn get_total_items_in_cart(cart: &Cart) -> i64 {
    cart.0.values().map(|q| i64::from(q.get())).sum()
}

/// One priced row of the cart, as shown on the checkout page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: i64,
    pub quantity: i32,
    pub line_total: i64,
}

/// Join the cart against the catalogue. Ids missing from `products` are skipped.
pub fn cart_lines(cart: &Cart, products: &[Product]) -> Vec<CartLine> {
    cart.iter()
        .filter_map(|(id, qty)| {
            products.iter().find(|p| p.id == id).map(|p| CartLine {
                product_id: id,
                name: p.name.clone(),
                unit_price: p.price,
                quantity: qty.get(),
                line_total: p.price.saturating_mul(i64::from(qty.get())),
            })
        })
        .collect()
}

pub fn cart_subtotal(lines: &[CartLine]) -> i64 {
    lines.iter().map(|l| l.line_total).sum()
}
