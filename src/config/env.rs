// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use dotenv::dotenv;
use std::env;
use std::str::FromStr;

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection string for the places dataset
    /// Format: sqlite://path/to/mashup.db
    pub database_url: String,

    /// Server bind address (e.g., "127.0.0.1")
    pub server_address: String,

    /// Server listen port (default 5000)
    pub server_port: u16,

    /// Environment: development, staging, production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Maximum connections in database pool
    pub db_max_connections: u32,

    /// Connection timeout in seconds
    pub db_connection_timeout: u64,

    /// Match search prefixes ignoring ASCII case (SQLite LIKE semantics)
    pub search_case_insensitive: bool,

    /// Endpoint of the news lookup provider, queried with `?geo=lat,lng`
    pub articles_api_url: String,

    /// Feed used when the provider has nothing for a location
    pub articles_fallback_url: Option<String>,

    /// Upper bound on one provider request, in seconds
    pub articles_timeout: u64,

    /// How long lookup results stay cached, in seconds
    pub articles_cache_ttl: u64,

    /// Interval between cache eviction sweeps, in seconds
    pub articles_cache_cleanup: u64,
}

fn var_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        dotenv().ok();

        Config {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://mashup.db".to_string()),

            server_address: env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string()),

            server_port: var_or("SERVER_PORT", 5000),

            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            db_max_connections: var_or("DB_MAX_CONNECTIONS", 8),

            db_connection_timeout: var_or("DB_CONNECTION_TIMEOUT", 30),

            search_case_insensitive: var_or("SEARCH_CASE_INSENSITIVE", false),

            articles_api_url: env::var("ARTICLES_API_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8003/articles".to_string()),

            articles_fallback_url: env::var("ARTICLES_FALLBACK_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),

            articles_timeout: var_or("ARTICLES_TIMEOUT", 10),

            articles_cache_ttl: var_or("ARTICLES_CACHE_TTL", 3600),

            articles_cache_cleanup: var_or("ARTICLES_CACHE_CLEANUP", 300),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures application can start safely
    pub fn validate(&self) -> Result<(), String> {
        if self.database_url.is_empty() {
            return Err("DATABASE_URL is required".to_string());
        }

        if self.articles_api_url.is_empty() {
            return Err("ARTICLES_API_URL is required".to_string());
        }

        if self.articles_timeout == 0 {
            return Err("ARTICLES_TIMEOUT must be at least 1 second".to_string());
        }

        if self.articles_fallback_url.is_none() {
            log::warn!("ARTICLES_FALLBACK_URL not configured - empty lookups stay empty");
        }

        Ok(())
    }
}
