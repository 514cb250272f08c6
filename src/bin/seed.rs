use student_store::{
    db::{create_pool, run_migrations},
    services::auth_service::{hash_password, normalize_email},
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL")?;

    let pool = create_pool(&database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&pool).await?;

    let user_id = ensure_user(&pool, "student@example.com", "student123", "Demo Student").await?;
    seed_products(&pool).await?;

    println!("Seed completed. User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    email: &str,
    password: &str,
    name: &str,
) -> anyhow::Result<Uuid> {
    let email = normalize_email(email);
    let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, name, password_hash)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email.as_str())
    .bind(name)
    .bind(password_hash)
    .fetch_optional(pool)
    .await?;

    // If user already exists, fetch id
    let user_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (Uuid,) = sqlx::query_as("SELECT id FROM users WHERE email = $1")
                .bind(email.as_str())
                .fetch_one(pool)
                .await?;
            existing.0
        }
    };

    println!("Ensured user {email}");
    Ok(user_id)
}

async fn seed_products(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let products = vec![
        ("Rice Krispies", "food", "Crispy rice cereal", 99),
        ("Cheetos", "food", "Cheesy corn puffs", 150),
        ("Sparkling Water", "food", "Unflavoured, 12 oz can", 125),
        ("Campus Hoodie", "clothing", "Heavyweight fleece hoodie", 3999),
        ("Lanyard", "accessories", "Keep your ID card close", 499),
        ("Spiral Notebook", "tech", "College ruled, 100 sheets", 349),
        ("USB-C Cable", "tech", "1 m braided cable", 1299),
    ];

    for (name, category, desc, price) in products {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, category, description, price)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(category)
        .bind(desc)
        .bind(price as i64)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}
