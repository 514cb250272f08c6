use crate::{
    cart::ProductId,
    db::DbPool,
    dto::products::{ProductDetail, ProductList},
    error::{AppError, AppResult},
    models::Product,
    response::ApiResponse,
};

pub async fn list_products(pool: &DbPool) -> AppResult<ApiResponse<ProductList>> {
    let products = sqlx::query_as::<_, Product>(
        r#"
        SELECT id, name, category, description, image_url, price, created_at
        FROM products
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(ApiResponse::success("Ok", ProductList { products }))
}

pub async fn get_product(pool: &DbPool, id: ProductId) -> AppResult<ApiResponse<ProductDetail>> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        SELECT id, name, category, description, image_url, price, created_at
        FROM products
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Product".into()))?;

    Ok(ApiResponse::success("Ok", ProductDetail { product }))
}
