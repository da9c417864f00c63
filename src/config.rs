use dotenv::dotenv;
use std::env;

use crate::errors::{AppError, AppResult};

const DEFAULT_ROWS_PER_PAGE: u32 = 15;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Process-wide settings, read once at start-up.
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    /// Secret mixed into every password hash.
    pub pepper: String,
    pub rows_per_page: u32,
    pub max_connections: u32,
}

// Hand-written so the pepper never ends up in a log line.
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &"<redacted>")
            .field("pepper", &"<redacted>")
            .field("rows_per_page", &self.rows_per_page)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl AppConfig {
    /// Loads `.env` (if any) and then reads the process environment.
    pub fn from_env() -> AppResult<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| AppError::Config("DATABASE_URL must be set".to_string()))?;

        let pepper = lookup("PEPPER")
            .ok_or_else(|| AppError::Config("PEPPER must be set".to_string()))?;
        if pepper.is_empty() {
            return Err(AppError::Config("PEPPER cannot be empty".to_string()));
        }

        let rows_per_page = parse_positive(&lookup, "ROWS_PER_PAGE", DEFAULT_ROWS_PER_PAGE)?;
        let max_connections =
            parse_positive(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;

        Ok(Self {
            database_url,
            pepper,
            rows_per_page,
            max_connections,
        })
    }
}

fn parse_positive<F>(lookup: &F, key: &str, default: u32) -> AppResult<u32>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<u32>() {
            Ok(value) if value > 0 => Ok(value),
            _ => Err(AppError::Config(format!("{} must be a positive integer, got '{}'", key, raw))),
        },
    }
}
