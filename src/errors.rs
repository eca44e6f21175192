use thiserror::Error;

/// Unified error type for the persistence and valuation layers.
///
/// Constraint failures reported by Postgres are translated into the
/// `Uniqueness`/`Referential` variants so callers can match on them without
/// digging through driver error codes.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid transaction type: {0}")]
    InvalidTransactionType(String),

    #[error("uniqueness violation: {0}")]
    Uniqueness(String),

    #[error("referential integrity violation: {0}")]
    Referential(String),

    #[error("password hashing failed: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

// Postgres error codes: 23505 = unique_violation, 23503 = foreign_key_violation
const PG_UNIQUE_VIOLATION: &str = "23505";
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            match db_err.code().as_deref() {
                Some(PG_UNIQUE_VIOLATION) => {
                    return StoreError::Uniqueness(db_err.message().to_string());
                }
                Some(PG_FOREIGN_KEY_VIOLATION) => {
                    return StoreError::Referential(db_err.message().to_string());
                }
                _ => {}
            }
        }
        StoreError::Database(e)
    }
}
