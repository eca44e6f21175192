use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::portfolio_snapshots::{NewPortfolioSnapshotModel, PortfolioSnapshotModel};
use crate::errors::StoreError;

const COLUMNS: &str =
    "id, user_id, snapshot_date, total_value, total_invested, xirr_rate, created_at, updated_at";

pub async fn insert_snapshot(
    pool: &PgPool,
    snapshot: &NewPortfolioSnapshotModel,
) -> Result<PortfolioSnapshotModel, StoreError> {
    snapshot.validate()?;

    let row = sqlx::query_as::<_, PortfolioSnapshotModel>(&format!(
        r#"
        INSERT INTO portfolio_snapshots (id, user_id, snapshot_date, total_value, total_invested, xirr_rate)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {COLUMNS}
        "#,
    ))
    .bind(Uuid::new_v4())
    .bind(snapshot.user_id)
    .bind(snapshot.snapshot_date)
    .bind(snapshot.total_value)
    .bind(snapshot.total_invested)
    .bind(snapshot.xirr_rate)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Create-or-update keyed on (user_id, snapshot_date). A single statement, so
/// concurrent writers race on the unique index instead of creating duplicates.
pub async fn upsert_snapshot(
    pool: &PgPool,
    snapshot: &NewPortfolioSnapshotModel,
) -> Result<PortfolioSnapshotModel, StoreError> {
    snapshot.validate()?;

    let row = sqlx::query_as::<_, PortfolioSnapshotModel>(&format!(
        r#"
        INSERT INTO portfolio_snapshots (id, user_id, snapshot_date, total_value, total_invested, xirr_rate)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (user_id, snapshot_date) DO UPDATE SET
            total_value = EXCLUDED.total_value,
            total_invested = EXCLUDED.total_invested,
            xirr_rate = EXCLUDED.xirr_rate,
            updated_at = $7
        RETURNING {COLUMNS}
        "#,
    ))
    .bind(Uuid::new_v4())
    .bind(snapshot.user_id)
    .bind(snapshot.snapshot_date)
    .bind(snapshot.total_value)
    .bind(snapshot.total_invested)
    .bind(snapshot.xirr_rate)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// All snapshots for a user, newest first.
pub async fn get_snapshots_by_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<PortfolioSnapshotModel>, StoreError> {
    let rows = sqlx::query_as::<_, PortfolioSnapshotModel>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM portfolio_snapshots
        WHERE user_id = $1
        ORDER BY snapshot_date DESC
        "#,
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_latest_snapshot(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<PortfolioSnapshotModel>, StoreError> {
    let row = sqlx::query_as::<_, PortfolioSnapshotModel>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM portfolio_snapshots
        WHERE user_id = $1
        ORDER BY snapshot_date DESC
        LIMIT 1
        "#,
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn get_snapshot_by_date(
    pool: &PgPool,
    user_id: Uuid,
    snapshot_date: NaiveDate,
) -> Result<Option<PortfolioSnapshotModel>, StoreError> {
    let row = sqlx::query_as::<_, PortfolioSnapshotModel>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM portfolio_snapshots
        WHERE user_id = $1 AND snapshot_date = $2
        "#,
    ))
    .bind(user_id)
    .bind(snapshot_date)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Valuation history in chart order (oldest first), with optional inclusive
/// date bounds.
pub async fn get_performance_history(
    pool: &PgPool,
    user_id: Uuid,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<Vec<PortfolioSnapshotModel>, StoreError> {
    let rows = sqlx::query_as::<_, PortfolioSnapshotModel>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM portfolio_snapshots
        WHERE user_id = $1
          AND ($2::date IS NULL OR snapshot_date >= $2)
          AND ($3::date IS NULL OR snapshot_date <= $3)
        ORDER BY snapshot_date ASC
        "#,
    ))
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
