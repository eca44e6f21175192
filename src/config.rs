use dotenvy::dotenv;
use std::env;

pub struct Config {
    pub database_url: String,
    pub app_env: String,
    pub max_connections: u32,
}

impl Config {
    pub fn load() -> Self {
        dotenv().ok();

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let database_url = match app_env.as_str() {
            "production" => env::var("DATABASE_URL").expect("Missing DATABASE_URL"),
            "development" | "test" => match env::var("DATABASE_URL") {
                Ok(url) => url,
                Err(_) => Self::database_url_from_parts(&app_env),
            },
            _ => panic!("Invalid APP_ENV value (must be 'development', 'test' or 'production')"),
        };

        let max_connections = match app_env.as_str() {
            "production" => 20,
            _ => 5,
        };

        Config {
            database_url,
            app_env,
            max_connections,
        }
    }

    fn database_url_from_parts(app_env: &str) -> String {
        let user = env::var("DB_USER").unwrap_or_else(|_| "portfolio_user".to_string());
        let password = env::var("DB_PASSWORD").unwrap_or_else(|_| "portfolio_password".to_string());
        let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
        let name = if app_env == "test" {
            env::var("DB_NAME_TEST").unwrap_or_else(|_| "portfolio_db_test".to_string())
        } else {
            env::var("DB_NAME").unwrap_or_else(|_| "portfolio_db".to_string())
        };

        format!("postgres://{user}:{password}@{host}:{port}/{name}")
    }
}
