use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::app::AppConfig;

/// Open the connection pool and bring the schema up to date.
pub async fn connect(config: &AppConfig) -> Result<DatabaseConnection> {
    tracing::info!("Connecting to database...");

    let mut options = ConnectOptions::new(config.database_url.as_str());
    options.sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .context("database connection failed")?;

    tracing::info!("Database connected");

    tracing::info!("Running database migrations...");
    Migrator::up(&db, None)
        .await
        .context("database migration failed")?;
    tracing::info!("Migrations completed");

    Ok(db)
}
