//! Configuration Module
//!
//! Loads configuration from environment variables.

use std::env;

use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Application environment tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Test,
    Dev,
    Prod,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,

    /// Application environment
    pub app_env: AppEnv,

    /// HTTP server port
    pub http_port: u16,

    /// Log level (e.g., "info", "debug", "trace")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Database env vars (ignored when DATABASE_URL is set):
    /// - DB_HOST (default: localhost)
    /// - DB_PORT (default: 5432)
    /// - DB_USER (required)
    /// - DB_PASSWORD (required)
    /// - DB_NAME (required)
    ///
    /// Optional env vars:
    /// - DATABASE_URL: full PostgreSQL connection string
    /// - APP_ENV: test, dev or prod (default: dev)
    /// - HTTP_PORT: HTTP server port (default: 8080)
    /// - RUST_LOG: log level (default: "info")
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let database_url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
                let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
                let user = env::var("DB_USER")
                    .map_err(|_| ConfigError::MissingEnv("DB_USER".to_string()))?;
                let password = env::var("DB_PASSWORD")
                    .map_err(|_| ConfigError::MissingEnv("DB_PASSWORD".to_string()))?;
                let name = env::var("DB_NAME")
                    .map_err(|_| ConfigError::MissingEnv("DB_NAME".to_string()))?;

                format!("postgres://{user}:{password}@{host}:{port}/{name}")
            }
        };

        let app_env = match env::var("APP_ENV").as_deref() {
            Ok("test") => AppEnv::Test,
            Ok("prod") => AppEnv::Prod,
            Ok("dev") | Err(_) => AppEnv::Dev,
            Ok(other) => {
                return Err(ConfigError::InvalidValue(
                    "APP_ENV".to_string(),
                    other.to_string(),
                ))
            }
        };

        let http_port = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidValue("HTTP_PORT".to_string(), e.to_string()))?;

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            database_url,
            app_env,
            http_port,
            log_level,
        })
    }

    /// Get the HTTP listen address
    pub fn http_addr(&self) -> String {
        format!("0.0.0.0:{}", self.http_port)
    }
}
