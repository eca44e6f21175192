use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Row};

use crate::db::models::market_data::{MarketDataModel, NewMarketDataModel, PriceUpdate};
use crate::db::models::transactions::{normalize_symbol, validate_symbol};
use crate::errors::StoreError;

const COLUMNS: &str = "symbol, current_price, company_name, exchange, currency, last_updated";

pub async fn get_market_data(
    pool: &PgPool,
    symbol: &str,
) -> Result<Option<MarketDataModel>, StoreError> {
    let row = sqlx::query_as::<_, MarketDataModel>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM market_data
        WHERE symbol = $1
        "#,
    ))
    .bind(normalize_symbol(symbol))
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// All quotes on an exchange, symbol order.
pub async fn get_by_exchange(
    pool: &PgPool,
    exchange: &str,
) -> Result<Vec<MarketDataModel>, StoreError> {
    let rows = sqlx::query_as::<_, MarketDataModel>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM market_data
        WHERE exchange = $1
        ORDER BY symbol ASC
        "#,
    ))
    .bind(exchange.to_uppercase())
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Upserts a quote keyed on the (uppercased) symbol and reports whether the
/// row was newly created. A price tick without metadata keeps the existing
/// company name and exchange.
pub async fn update_price(
    pool: &PgPool,
    quote: &NewMarketDataModel,
) -> Result<(MarketDataModel, bool), StoreError> {
    let mut quote = quote.clone();
    quote.normalize();
    quote.validate()?;

    // xmax = 0 only for rows inserted by this statement
    let row = sqlx::query(&format!(
        r#"
        INSERT INTO market_data (symbol, current_price, company_name, exchange, currency, last_updated)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (symbol) DO UPDATE SET
            current_price = EXCLUDED.current_price,
            company_name = COALESCE(EXCLUDED.company_name, market_data.company_name),
            exchange = COALESCE(EXCLUDED.exchange, market_data.exchange),
            currency = EXCLUDED.currency,
            last_updated = EXCLUDED.last_updated
        RETURNING {COLUMNS}, (xmax = 0) AS created
        "#,
    ))
    .bind(&quote.symbol)
    .bind(quote.current_price)
    .bind(&quote.company_name)
    .bind(&quote.exchange)
    .bind(&quote.currency)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    let created: bool = row.try_get("created")?;
    let model = MarketDataModel::from_row(&row)?;

    Ok((model, created))
}

/// Applies a batch of price ticks in one transaction. Only `current_price`
/// and `last_updated` are overwritten on conflict. Returns the number of
/// rows written.
pub async fn bulk_update_prices(
    pool: &PgPool,
    updates: &[PriceUpdate],
) -> Result<u64, StoreError> {
    let mut normalized = Vec::with_capacity(updates.len());
    for update in updates {
        let symbol = normalize_symbol(&update.symbol);
        validate_symbol(&symbol)?;
        if update.price < Decimal::ZERO {
            return Err(StoreError::Validation(format!(
                "price for {symbol} must be non-negative, got {}",
                update.price
            )));
        }
        normalized.push((symbol, update.price));
    }

    let now = Utc::now();
    let mut tx = pool.begin().await?;
    let mut written = 0u64;

    for (symbol, price) in &normalized {
        let result = sqlx::query(
            r#"
            INSERT INTO market_data (symbol, current_price, last_updated)
            VALUES ($1, $2, $3)
            ON CONFLICT (symbol) DO UPDATE SET
                current_price = EXCLUDED.current_price,
                last_updated = EXCLUDED.last_updated
            "#,
        )
        .bind(symbol)
        .bind(price)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        written += result.rows_affected();
    }

    tx.commit().await?;
    Ok(written)
}

/// Quotes older than `max_age_minutes`, due for a refresh.
pub async fn get_stale_market_data(
    pool: &PgPool,
    max_age_minutes: i64,
) -> Result<Vec<MarketDataModel>, StoreError> {
    let cutoff = Utc::now() - Duration::minutes(max_age_minutes);

    let rows = sqlx::query_as::<_, MarketDataModel>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM market_data
        WHERE last_updated < $1
        "#,
    ))
    .bind(cutoff)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Case-insensitive substring search over symbol and company name.
pub async fn search_symbols(
    pool: &PgPool,
    query: &str,
    limit: i64,
) -> Result<Vec<MarketDataModel>, StoreError> {
    let rows = sqlx::query_as::<_, MarketDataModel>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM market_data
        WHERE symbol ILIKE $1 OR company_name ILIKE $2
        ORDER BY symbol ASC
        LIMIT $3
        "#,
    ))
    .bind(format!("%{}%", query.to_uppercase()))
    .bind(format!("%{query}%"))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
