use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

use crate::config::ServerConfig;
use crate::repo::TodoStore;

/// Shared application state passed to Axum handlers via `State`.
///
/// Holds the one long-lived store handle for the process; every handler works
/// through it rather than reaching for a global.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }
}

/// Create the Postgres connection pool.
/// Uses `connect_lazy` so no connections open until the first query.
pub fn create_pool(config: &ServerConfig) -> Result<Pool<Postgres>, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy(&config.database_url)
}

/// Run database migrations against the given pool.
pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
