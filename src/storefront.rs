//! Top-level client state for the store UI.
//!
//! [`Storefront`] owns everything the views render (user, catalogue, order
//! history, cart, flags, latest error) and performs the API calls the views
//! trigger. Views only read [`StoreState`] and call these methods.

use crate::{
    cart::{self, Cart, CartItem, CartLine},
    client::{ApiClient, AuthPayload, TokenStore},
    dto::auth::{LoginRequest, RegisterRequest},
    models::{OrderLine, Product, User},
};

pub const ALL_CATEGORIES: &str = "All Categories";

const PRODUCTS_ERROR: &str = "Error fetching products.";
const USER_ERROR: &str = "Error fetching user.";
const CHECKOUT_ERROR: &str = "Error checking out.";
const ORDERS_ERROR: &str = "Error fetching orders.";
const AUTH_ERROR: &str = "Error authenticating.";

#[derive(Debug, Clone, PartialEq)]
pub struct StoreState {
    pub user: Option<User>,
    pub products: Vec<Product>,
    pub orders: Vec<OrderLine>,
    pub cart: Cart,
    pub active_category: String,
    pub search_input: String,
    pub is_fetching: bool,
    pub is_checking_out: bool,
    pub error: Option<String>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            user: None,
            products: Vec::new(),
            orders: Vec::new(),
            cart: Cart::new(),
            active_category: ALL_CATEGORIES.to_string(),
            search_input: String::new(),
            is_fetching: false,
            is_checking_out: false,
            error: None,
        }
    }
}

pub struct Storefront<S> {
    client: ApiClient<S>,
    state: StoreState,
}

impl<S: TokenStore> Storefront<S> {
    pub fn new(client: ApiClient<S>) -> Self {
        Self {
            client,
            state: StoreState::default(),
        }
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn client(&self) -> &ApiClient<S> {
        &self.client
    }

    /// Initial load: fetch the catalogue, then restore a persisted session.
    pub async fn bootstrap(&mut self) {
        self.fetch_products().await;

        match self.client.session_mut().restore() {
            Ok(true) => self.fetch_authed_user().await,
            Ok(false) => {}
            Err(err) => self.state.error = Some(err.to_string()),
        }
    }

    pub async fn fetch_products(&mut self) {
        self.state.is_fetching = true;
        let (data, error) = self.client.fetch_product_list().await.into_parts();
        match data.and_then(|d| d.products) {
            Some(products) => self.state.products = products,
            None => self.state.error = Some(error.unwrap_or_else(|| PRODUCTS_ERROR.into())),
        }
        self.state.is_fetching = false;
    }

    async fn fetch_authed_user(&mut self) {
        self.state.is_fetching = true;
        let (data, error) = self.client.fetch_user_from_token().await.into_parts();
        match data.and_then(|d| d.user) {
            Some(user) => self.state.user = Some(user),
            None => self.state.error = Some(error.unwrap_or_else(|| USER_ERROR.into())),
        }
        self.state.is_fetching = false;
    }

    pub async fn login(&mut self, credentials: &LoginRequest) -> bool {
        let outcome = self.client.login_user(credentials).await;
        self.accept_auth(outcome.into_parts())
    }

    pub async fn signup(&mut self, credentials: &RegisterRequest) -> bool {
        let outcome = self.client.signup_user(credentials).await;
        self.accept_auth(outcome.into_parts())
    }

    fn accept_auth(
        &mut self,
        (data, error): (Option<AuthPayload>, Option<String>),
    ) -> bool {
        let Some((user, token)) = data.and_then(|d| d.user.zip(d.token)) else {
            self.state.error = Some(error.unwrap_or_else(|| AUTH_ERROR.into()));
            return false;
        };
        if let Err(err) = self.client.session_mut().set_token(token) {
            self.state.error = Some(err.to_string());
            return false;
        }
        tracing::debug!(user_id = %user.id, "signed in");
        self.state.user = Some(user);
        self.state.error = None;
        true
    }

    /// Drop the session and everything tied to it.
    pub fn logout(&mut self) {
        let (_, error) = self.client.log_out_user().into_parts();
        self.state.user = None;
        self.state.orders.clear();
        self.state.cart = Cart::new();
        self.state.error = error;
    }

    /// Submit the cart. On success the order history is replaced by the
    /// server's full list and the cart is emptied.
    pub async fn checkout(&mut self) -> Option<&[OrderLine]> {
        self.state.is_checking_out = true;
        let (data, error) = self.client.create_order(&self.state.cart).await.into_parts();
        let placed = match data.and_then(|d| d.order) {
            Some(orders) => {
                self.state.orders = orders;
                self.state.cart = Cart::new();
                true
            }
            None => {
                self.state.error = Some(error.unwrap_or_else(|| CHECKOUT_ERROR.into()));
                false
            }
        };
        self.state.is_checking_out = false;
        placed.then_some(self.state.orders.as_slice())
    }

    pub async fn refresh_orders(&mut self) {
        self.state.is_fetching = true;
        let (data, error) = self.client.fetch_orders().await.into_parts();
        match data.and_then(|d| d.orders) {
            Some(orders) => self.state.orders = orders,
            None => self.state.error = Some(error.unwrap_or_else(|| ORDERS_ERROR.into())),
        }
        self.state.is_fetching = false;
    }

    pub fn add_to_cart(&mut self, item: impl CartItem) {
        self.state.cart = cart::add_to_cart(&self.state.cart, item);
    }

    pub fn remove_from_cart(&mut self, item: impl CartItem) {
        self.state.cart = cart::remove_from_cart(&self.state.cart, item);
    }

    pub fn quantity_of(&self, item: impl CartItem) -> i32 {
        cart::get_quantity_of_item_in_cart(&self.state.cart, item)
    }

    pub fn total_items(&self) -> i64 {
        cart::get_total_items_in_cart(&self.state.cart)
    }

    pub fn cart_lines(&self) -> Vec<CartLine> {
        cart::cart_lines(&self.state.cart, &self.state.products)
    }

    pub fn set_active_category(&mut self, category: impl Into<String>) {
        self.state.active_category = category.into();
    }

    pub fn set_search_input(&mut self, input: impl Into<String>) {
        self.state.search_input = input.into();
    }

    pub fn visible_products(&self) -> Vec<&Product> {
        filter_products(
            &self.state.products,
            &self.state.active_category,
            &self.state.search_input,
        )
    }
}

/// Products in `category` (or all, for [`ALL_CATEGORIES`]) whose name
/// contains `search`, both compared case-insensitively.
pub fn filter_products<'a>(products: &'a [Product], category: &str, search: &str) -> Vec<&'a Product> {
    let category = category.trim();
    let all = category.is_empty() || category.eq_ignore_ascii_case(ALL_CATEGORIES);
    let needle = search.trim().to_lowercase();

    products
        .iter()
        .filter(|p| all || p.category.eq_ignore_ascii_case(category))
        .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
        .collect()
}
