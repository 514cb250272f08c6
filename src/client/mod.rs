//! Outbound client for the store API.
//!
//! Every public call returns an [`ApiResult`]: either the decoded payload or a
//! single error string. Nothing here panics or surfaces raw transport errors.

pub mod session;
pub mod storage;

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::{
    cart::Cart,
    config::ClientConfig,
    dto::{
        auth::{LoginRequest, RegisterRequest},
        orders::CreateOrderRequest,
    },
    models::{OrderLine, Product, User},
};

pub use session::Session;
pub use storage::{FileTokenStore, MemoryTokenStore, TOKEN_KEY, TokenStore};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Token storage error: {0}")]
    Storage(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Normalized outcome of a client call; exactly one side is present.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult<T> {
    data: Option<T>,
    error: Option<String>,
}

impl<T> ApiResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_ok(&self) -> bool {
        self.data.is_some()
    }

    pub fn into_parts(self) -> (Option<T>, Option<String>) {
        (self.data, self.error)
    }

    pub fn into_result(self) -> Result<T, String> {
        match (self.data, self.error) {
            (Some(data), _) => Ok(data),
            (None, Some(err)) => Err(err),
            (None, None) => Err("Unknown error".to_string()),
        }
    }
}

impl<T> From<Result<T, ClientError>> for ApiResult<T> {
    fn from(result: Result<T, ClientError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => Self::err(err.to_string()),
        }
    }
}

// Response bodies as the client sees them. Fields are optional so a
// well-formed response that lacks the expected key can be told apart from a
// failed request.

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthPayload {
    pub user: Option<User>,
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserPayload {
    pub user: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductsPayload {
    pub products: Option<Vec<Product>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrdersPayload {
    pub orders: Option<Vec<OrderLine>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedOrderPayload {
    pub order: Option<Vec<OrderLine>>,
}

pub struct ApiClient<S> {
    http: reqwest::Client,
    base_url: String,
    session: Session<S>,
}

impl<S: TokenStore> ApiClient<S> {
    pub fn new(config: &ClientConfig, session: Session<S>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<S> {
        &mut self.session
    }

    pub async fn login_user(&self, credentials: &LoginRequest) -> ApiResult<AuthPayload> {
        self.request::<AuthPayload, _>(Method::POST, "auth/login", Some(credentials))
            .await
            .into()
    }

    pub async fn signup_user(&self, credentials: &RegisterRequest) -> ApiResult<AuthPayload> {
        self.request::<AuthPayload, _>(Method::POST, "auth/register", Some(credentials))
            .await
            .into()
    }

    pub async fn fetch_product_list(&self) -> ApiResult<ProductsPayload> {
        self.request::<ProductsPayload, ()>(Method::GET, "store", None)
            .await
            .into()
    }

    pub async fn fetch_user_from_token(&self) -> ApiResult<UserPayload> {
        self.request::<UserPayload, ()>(Method::GET, "auth/me", None)
            .await
            .into()
    }

    pub async fn create_order(&self, cart: &Cart) -> ApiResult<CreatedOrderPayload> {
        let body = CreateOrderRequest::new(cart.clone());
        self.request::<CreatedOrderPayload, _>(Method::POST, "orders", Some(&body))
            .await
            .into()
    }

    pub async fn fetch_orders(&self) -> ApiResult<OrdersPayload> {
        self.request::<OrdersPayload, ()>(Method::GET, "orders", None)
            .await
            .into()
    }

    /// Forget the token locally. The server keeps no session state to revoke.
    pub fn log_out_user(&mut self) -> ApiResult<()> {
        self.session.clear().into()
    }

    async fn request<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        let mut req = self.http.request(method.clone(), &url);
        if let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        tracing::debug!(%method, %url, "api request");
        let response = match req.send().await {
            Ok(resp) => resp,
            Err(err) => {
                tracing::warn!(%url, error = %err, "api request failed");
                return Err(err.into());
            }
        };

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let err = api_error(status, &bytes);
            tracing::warn!(%url, status = status.as_u16(), error = %err, "api error response");
            return Err(err);
        }

        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// Prefer the server's `error.message`; otherwise describe the status.
fn api_error(status: StatusCode, body: &[u8]) -> ClientError {
    let message = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_owned)
        })
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));

    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}
