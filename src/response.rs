use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Envelope for every JSON body: a human-readable `message` plus the payload
/// fields flattened next to it, e.g. `{"message": "Ok", "products": [...]}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}
