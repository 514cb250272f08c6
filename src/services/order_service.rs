use std::collections::HashMap;

use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait};
use uuid::Uuid;

use crate::{
    db::DbPool,
    dto::orders::{CreateOrderRequest, CreatedOrder, OrderHistory},
    entity::{
        order_details::ActiveModel as OrderDetailActive,
        orders::ActiveModel as OrderActive,
        products::{Column as ProdCol, Entity as Products},
        users::{Column as UserCol, Entity as Users},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::OrderLine,
    response::ApiResponse,
    state::AppState,
};

pub async fn list_orders_for_user(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<OrderHistory>> {
    let orders = fetch_order_lines(&state.pool, &user.email).await?;
    Ok(ApiResponse::success("Ok", OrderHistory { orders }))
}

/// Persist the cart as one order. The header and every line are written in a
/// single transaction; the response is the customer's refreshed history.
pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<CreatedOrder>> {
    let cart = payload.into_cart()?;

    let txn = state.orm.begin().await?;

    let customer = Users::find()
        .filter(UserCol::Email.eq(user.email.as_str()))
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("User".into()))?;

    let ids: Vec<Uuid> = cart.product_ids().map(Uuid::from).collect();
    let prices: HashMap<Uuid, i64> = Products::find()
        .filter(ProdCol::Id.is_in(ids))
        .all(&txn)
        .await?
        .into_iter()
        .map(|p| (p.id, p.price))
        .collect();

    if let Some(missing) = cart.product_ids().find(|id| !prices.contains_key(&id.as_uuid())) {
        return Err(AppError::Validation(format!("Unknown product {missing}")));
    }

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        customer_id: Set(customer.id),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    for (product_id, quantity) in cart.iter() {
        let price = prices
            .get(&product_id.as_uuid())
            .copied()
            .ok_or_else(|| AppError::Validation(format!("Unknown product {product_id}")))?;

        OrderDetailActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            product_id: Set(product_id.as_uuid()),
            quantity: Set(quantity.get()),
            price: Set(price),
            created_at: NotSet,
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    tracing::info!(
        order_id = %order.id,
        customer_id = %customer.id,
        lines = cart.len(),
        "order created"
    );

    let history = fetch_order_lines(&state.pool, &user.email).await?;
    Ok(ApiResponse::success(
        "Order created",
        CreatedOrder { order: history },
    ))
}

async fn fetch_order_lines(pool: &DbPool, email: &str) -> AppResult<Vec<OrderLine>> {
    let rows = sqlx::query_as::<_, OrderLine>(
        r#"
        SELECT o.id AS order_id, o.customer_id, od.product_id, od.quantity,
               p.name, od.price, o.created_at AS ordered_at
        FROM orders o
        JOIN order_details od ON od.order_id = o.id
        JOIN products p ON p.id = od.product_id
        WHERE o.customer_id = (SELECT id FROM users WHERE email = $1)
        ORDER BY o.created_at ASC, od.created_at ASC, od.id ASC
        "#,
    )
    .bind(email)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
