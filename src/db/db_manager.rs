use sqlx::PgPool;

use super::connection;
use super::schema;
use super::seed;
use crate::config::Config;
use crate::errors::StoreError;

pub struct DbManager {
    pub pool: PgPool,
}

impl DbManager {
    /// Creates a new database connection pool and initializes the schema
    pub async fn init(config: &Config) -> Result<Self, StoreError> {
        let pool = connection::create_pool(config).await?;

        // Ensure schema is initialized (creates tables if needed)
        schema::init_schema(&pool).await?;

        Ok(Self { pool })
    }

    /// Inserts the demo users and demo quotes; safe to call repeatedly.
    pub async fn seed_demo_data(&self) -> Result<(), StoreError> {
        seed::seed_demo_data(&self.pool).await
    }
}
