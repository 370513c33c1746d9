use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPool;

use crate::config::Config;

/// Shared by every handler; cloning is cheap since the pool is reference counted
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Config,
}

impl AppState {
    /// Bring the schema up to date, then open the query pool
    pub async fn new(config: Config) -> Result<Self, AppStateError> {
        migrate(&config.database_url).await?;
        let db = connect(&config).await?;
        tracing::debug!(
            max_connections = config.database_max_connections,
            "PostgreSQL pool ready"
        );

        Ok(Self { db, config })
    }
}

/// Migrations run over a short-lived sqlx pool before SeaORM connects
async fn migrate(database_url: &str) -> Result<(), AppStateError> {
    let pool = PgPool::connect(database_url).await?;
    let outcome = sqlx::migrate!("./migrations").run(&pool).await;
    pool.close().await;

    outcome.map_err(AppStateError::from)
}

async fn connect(config: &Config) -> Result<DatabaseConnection, AppStateError> {
    let mut options = ConnectOptions::new(&config.database_url);
    options
        .max_connections(config.database_max_connections)
        .min_connections(1)
        .acquire_timeout(config.request_timeout())
        .sqlx_logging(true);

    Ok(Database::connect(options).await?)
}

#[derive(Debug, thiserror::Error)]
pub enum AppStateError {
    #[error("PostgreSQL connection error: {0}")]
    Postgres(#[from] sqlx::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] DbErr),

    #[error("Migration error: {0}")]
    Migration(#[from] MigrateError),
}
