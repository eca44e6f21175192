use sqlx::{
    Executor,
    postgres::PgPool,
};

pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    pool.execute(include_str!("users.sql")).await?;
    pool.execute(include_str!("transactions.sql")).await?;
    pool.execute(include_str!("portfolio_snapshots.sql")).await?;
    pool.execute(include_str!("market_data.sql")).await?;

    // Create indices for lookup performance
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_users_email
        ON users(email);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_users_created_at
        ON users(created_at);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_transactions_user
        ON transactions(user_id);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_transactions_symbol
        ON transactions(symbol);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_transactions_date
        ON transactions(transaction_date);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_transactions_user_date
        ON transactions(user_id, transaction_date);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_transactions_user_symbol
        ON transactions(user_id, symbol);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_portfolio_snapshots_user
        ON portfolio_snapshots(user_id);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_portfolio_snapshots_date
        ON portfolio_snapshots(snapshot_date);
        "#,
    )
    .execute(pool)
    .await?;

    // Backs the (user_id, snapshot_date) upsert; one snapshot per user per day
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_portfolio_snapshots_user_date
        ON portfolio_snapshots(user_id, snapshot_date);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_market_data_last_updated
        ON market_data(last_updated);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_market_data_exchange
        ON market_data(exchange);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
