use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    /// Empty means any origin is allowed.
    pub allowed_origins: Vec<String>,
    /// Lifetime of a freshly created pending match.
    pub match_expiry_hours: i64,
    /// Six-field cron expression for the expiry sweep.
    pub expiry_sweep_cron: String,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: parse_var("PORT", 8080).context("PORT must be a valid number")?,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 10)
                .context("DB_MAX_CONNECTIONS must be a valid number")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "job-match".to_string()),
            allowed_origins: parse_origins(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
            match_expiry_hours: parse_var("MATCH_EXPIRY_HOURS", 168)
                .context("MATCH_EXPIRY_HOURS must be a valid number")?,
            expiry_sweep_cron: env::var("EXPIRY_SWEEP_CRON")
                .unwrap_or_else(|_| "0 * * * * *".to_string()),
            rate_limit_per_second: parse_var("RATE_LIMIT_PER_SECOND", 10)
                .context("RATE_LIMIT_PER_SECOND must be a valid number")?,
            rate_limit_burst: parse_var("RATE_LIMIT_BURST", 20)
                .context("RATE_LIMIT_BURST must be a valid number")?,
        })
    }
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {}: {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
