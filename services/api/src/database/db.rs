use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// Creates the database connection pool
///
/// # PANICS
/// panics if the pool cannot be created, the api is useless without its database
pub async fn connect(db_url: &str) -> DatabaseConnection {
    let mut opt = ConnectOptions::new(db_url);

    opt.max_connections(50)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(60))
        .sqlx_logging(false);

    info!("[DB] getting connection");
    Database::connect(opt)
        .await
        .unwrap_or_else(|e| panic!("[DB] failed to build connection pool: {e}"))
}

/// Apply all pending migrations
pub async fn run_migrations(db: &DatabaseConnection) {
    info!("[DB] running migrations");
    Migrator::up(db, None)
        .await
        .unwrap_or_else(|e| panic!("[DB] failed to run migrations: {e}"));
}

#[cfg(test)]
pub mod test_utils {
    use super::run_migrations;
    use sea_orm::{ConnectOptions, Database, DatabaseConnection};

    /// a migrated in memory sqlite database, the pool holds a single
    /// connection since every sqlite memory connection is its own database
    pub async fn memory_db() -> DatabaseConnection {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);

        let db = Database::connect(opt).await.unwrap();
        run_migrations(&db).await;
        db
    }
}
