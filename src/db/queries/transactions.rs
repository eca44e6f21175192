use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::transactions::{NewTransactionModel, TransactionModel, normalize_symbol};
use crate::errors::StoreError;

// The type column is a Postgres enum; select it as text so rows decode
// without a custom type mapping.
const COLUMNS: &str = "id, user_id, symbol, type::text AS tx_type, quantity, price, \
                       transaction_date, fees, notes, created_at, updated_at";

pub async fn insert_transaction(
    pool: &PgPool,
    mut tx: NewTransactionModel,
) -> Result<TransactionModel, StoreError> {
    tx.normalize();
    tx.validate()?;

    let row = sqlx::query_as::<_, TransactionModel>(&format!(
        r#"
        INSERT INTO transactions (id, user_id, symbol, type, quantity, price, transaction_date, fees, notes)
        VALUES ($1, $2, $3, $4::transaction_type, $5, $6, $7, $8, $9)
        RETURNING {COLUMNS}
        "#,
    ))
    .bind(Uuid::new_v4())
    .bind(tx.user_id)
    .bind(&tx.symbol)
    .bind(tx.tx_type.as_str())
    .bind(tx.quantity)
    .bind(tx.price)
    .bind(tx.transaction_date)
    .bind(tx.fees)
    .bind(&tx.notes)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// All transactions for a user, newest first.
pub async fn get_transactions_by_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<TransactionModel>, StoreError> {
    let rows = sqlx::query_as::<_, TransactionModel>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM transactions
        WHERE user_id = $1
        ORDER BY transaction_date DESC
        "#,
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Transactions for one holding, oldest first.
pub async fn get_transactions_by_symbol(
    pool: &PgPool,
    user_id: Uuid,
    symbol: &str,
) -> Result<Vec<TransactionModel>, StoreError> {
    let rows = sqlx::query_as::<_, TransactionModel>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM transactions
        WHERE user_id = $1 AND symbol = $2
        ORDER BY transaction_date ASC
        "#,
    ))
    .bind(user_id)
    .bind(normalize_symbol(symbol))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// All transactions for a user in cash-flow order (oldest first), the
/// ordering valuation passes expect.
pub async fn get_portfolio_transactions(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<TransactionModel>, StoreError> {
    let rows = sqlx::query_as::<_, TransactionModel>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM transactions
        WHERE user_id = $1
        ORDER BY transaction_date ASC
        "#,
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Transactions inside an inclusive date range, oldest first.
pub async fn get_transactions_in_range(
    pool: &PgPool,
    user_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<TransactionModel>, StoreError> {
    let rows = sqlx::query_as::<_, TransactionModel>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM transactions
        WHERE user_id = $1
          AND transaction_date >= $2
          AND transaction_date <= $3
        ORDER BY transaction_date ASC
        "#,
    ))
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
