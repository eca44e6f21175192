use rust_decimal::dec;
use sqlx::PgPool;
use tracing::info;

use crate::auth;
use crate::db::models::market_data::NewMarketDataModel;
use crate::db::models::users::NewUserModel;
use crate::db::queries::{market_data as market_data_queries, users as users_queries};
use crate::errors::StoreError;

const DEMO_PASSWORD: &str = "password123";

/// Inserts the demo users and demo quotes. Users already present are left
/// untouched, so re-running is safe.
pub async fn seed_demo_data(pool: &PgPool) -> Result<(), StoreError> {
    seed_demo_users(pool).await?;
    seed_demo_market_data(pool).await?;
    Ok(())
}

async fn seed_demo_users(pool: &PgPool) -> Result<(), StoreError> {
    let demo_users = [
        ("demo@example.com", "Demo", "User"),
        ("investor@example.com", "John", "Investor"),
    ];

    for (email, first_name, last_name) in demo_users {
        if users_queries::get_user_by_email(pool, email).await?.is_some() {
            continue;
        }

        let user = NewUserModel {
            email: email.to_string(),
            password_hash: auth::hash_password(DEMO_PASSWORD)?,
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
        };
        users_queries::insert_user(pool, &user).await?;
        info!(email, "Seeded demo user");
    }

    Ok(())
}

async fn seed_demo_market_data(pool: &PgPool) -> Result<(), StoreError> {
    let quotes = [
        ("AAPL", dec!(175.50), "Apple Inc."),
        ("GOOGL", dec!(2750.25), "Alphabet Inc."),
        ("MSFT", dec!(415.75), "Microsoft Corporation"),
        ("TSLA", dec!(250.00), "Tesla Inc."),
        ("AMZN", dec!(145.80), "Amazon.com Inc."),
        ("NVDA", dec!(480.25), "NVIDIA Corporation"),
    ];

    for (symbol, price, company_name) in &quotes {
        let quote = NewMarketDataModel {
            symbol: symbol.to_string(),
            current_price: Some(*price),
            company_name: Some(company_name.to_string()),
            exchange: Some("NASDAQ".to_string()),
            currency: "USD".to_string(),
        };
        market_data_queries::update_price(pool, &quote).await?;
    }

    info!(count = quotes.len(), "Seeded demo market data");
    Ok(())
}

/// Deletes every row from every table. Test teardown only.
pub async fn clear_all(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query("DELETE FROM transactions").execute(pool).await?;
    sqlx::query("DELETE FROM portfolio_snapshots").execute(pool).await?;
    sqlx::query("DELETE FROM users").execute(pool).await?;
    sqlx::query("DELETE FROM market_data").execute(pool).await?;
    Ok(())
}
