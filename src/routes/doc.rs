use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    cart::{Cart, ProductId, Quantity},
    dto::{
        auth::{AuthResponse, LoginRequest, MeResponse, RegisterRequest},
        orders::{CreateOrderRequest, CreatedOrder, OrderHistory},
        products::{ProductDetail, ProductList},
    },
    error::{ErrorData, ErrorDetail},
    models::{OrderLine, Product, User},
    response::ApiResponse,
    routes::{auth, health, orders, store},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        auth::me,
        store::list_products,
        store::get_product,
        orders::list_orders,
        orders::create_order
    ),
    components(
        schemas(
            User,
            Product,
            ProductId,
            Quantity,
            Cart,
            OrderLine,
            LoginRequest,
            RegisterRequest,
            AuthResponse,
            MeResponse,
            ProductList,
            ProductDetail,
            CreateOrderRequest,
            OrderHistory,
            CreatedOrder,
            ErrorDetail,
            ErrorData,
            ApiResponse<AuthResponse>,
            ApiResponse<ProductList>,
            ApiResponse<OrderHistory>,
            ApiResponse<CreatedOrder>,
            ApiResponse<ErrorData>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Store", description = "Product catalogue endpoints"),
        (name = "Orders", description = "Order endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
