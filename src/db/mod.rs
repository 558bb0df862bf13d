use anyhow::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::records::ResourceTable;

/// Shared handle on the record store. Cheap to clone; every clone shares the
/// underlying connection pool.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        // SQLite wants the database file (and its directory) to exist before
        // connecting; other backends manage their own storage.
        if db_url.starts_with("sqlite:") && !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // An in-memory database only lives as long as its one connection; a
        // wider pool would hand out fresh empty databases.
        let (max_connections, min_connections) = if db_url.contains(":memory:") {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// All cached rows for the key, oldest insert first. Empty when the key
    /// has never been cached (or was invalidated).
    pub async fn find_records<T: ResourceTable>(&self, key: &str) -> Result<Vec<T::Model>, DbErr> {
        T::find_by_key(&self.conn, key).await
    }

    /// Appends one normalized record. No dedup, no upsert.
    pub async fn insert_record<T: ResourceTable>(&self, row: T::Model) -> Result<(), DbErr> {
        T::append(&self.conn, row).await
    }

    /// Drops every cached row for the key, returning how many went. Safe to
    /// call when none match.
    pub async fn delete_records<T: ResourceTable>(&self, key: &str) -> Result<u64, DbErr> {
        T::delete_by_key(&self.conn, key).await
    }
}
