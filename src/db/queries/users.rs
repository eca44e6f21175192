use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::users::{NewUserModel, UserModel, validate_email};
use crate::errors::StoreError;

pub async fn insert_user(pool: &PgPool, user: &NewUserModel) -> Result<UserModel, StoreError> {
    user.validate()?;

    let row = sqlx::query_as::<_, UserModel>(
        r#"
        INSERT INTO users (id, email, password_hash, first_name, last_name)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, email, password_hash, first_name, last_name, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_user_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserModel>, StoreError> {
    let row = sqlx::query_as::<_, UserModel>(
        r#"
        SELECT id, email, password_hash, first_name, last_name, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn get_user_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<UserModel>, StoreError> {
    let row = sqlx::query_as::<_, UserModel>(
        r#"
        SELECT id, email, password_hash, first_name, last_name, created_at, updated_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Full-record update; bumps `updated_at`.
pub async fn update_user(pool: &PgPool, user: &UserModel) -> Result<UserModel, StoreError> {
    validate_email(&user.email)?;
    if user.password_hash.is_empty() {
        return Err(StoreError::Validation(
            "password_hash must not be empty".to_string(),
        ));
    }

    let row = sqlx::query_as::<_, UserModel>(
        r#"
        UPDATE users
        SET email = $2, password_hash = $3, first_name = $4, last_name = $5, updated_at = $6
        WHERE id = $1
        RETURNING id, email, password_hash, first_name, last_name, created_at, updated_at
        "#,
    )
    .bind(user.id)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Deletes a user; transactions and snapshots go with it via ON DELETE CASCADE.
pub async fn delete_user(pool: &PgPool, id: Uuid) -> Result<bool, StoreError> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
