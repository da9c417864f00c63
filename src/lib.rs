//! Employee records: paging, lookup, login and create/update/soft-delete
//! on top of PostgreSQL.

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod services;
pub mod utils;

use log::info;

use crate::config::AppConfig;
use crate::db::PgEmployeeStore;
use crate::errors::AppResult;
use crate::services::employee::EmployeeService;

/// Installs `env_logger`. Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Connects to the database and returns a ready service.
pub async fn bootstrap(config: &AppConfig) -> AppResult<EmployeeService<PgEmployeeStore>> {
    let pool = db::create_pool(config).await?;
    info!(
        "connected to database (max {} connections, {} rows per page)",
        config.max_connections, config.rows_per_page
    );
    Ok(EmployeeService::new(PgEmployeeStore::new(pool), config.rows_per_page))
}
