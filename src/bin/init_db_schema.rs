use dotenvy::dotenv;
use eyre::Result;
use tracing::info;

use portfolio_tracker::config;
use portfolio_tracker::db::{
    connection,
    schema,
    seed,
};
use portfolio_tracker::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging
    if let Err(e) = logging::init_logging(env!("CARGO_BIN_NAME").to_string()) {
        eprintln!("Failed to initialize logging: {}", e);
        return Err(e);
    }

    // Load configuration
    let cfg = config::Config::load();
    info!(app_env = %cfg.app_env, "Configuration loaded and logging initialized");

    // Initialize database connection pool
    let pool = connection::create_pool(&cfg).await?;
    info!("Database connection pool created");

    // Initialize database schema
    schema::init_schema(&pool).await?;
    info!("Database schema initialized");

    // Optionally seed demo users and quotes
    if std::env::var("SEED_DEMO_DATA").unwrap_or_else(|_| "false".to_string()) == "true" {
        seed::seed_demo_data(&pool).await?;
        info!("Demo data seeded");
    }

    tokio::time::sleep(std::time::Duration::from_secs(3)).await; // Allow time for logging to flush
    Ok(())
}
