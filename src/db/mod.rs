mod store;
mod postgres;
#[cfg(test)]
pub mod memory;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::errors::AppResult;

pub use postgres::{PgEmployeeStore, PgEmployeeTx};
pub use store::{EmployeeStore, EmployeeTx};

pub async fn create_pool(config: &AppConfig) -> AppResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}
