use rede_core::AppError;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::DatabaseConfig;
use crate::logos::LogoRepository;
use crate::modules::ModuleRepository;
use crate::news::NewsRepository;
use crate::users::UserRepository;

/// Central database facade — owns the connection pool, runs migrations,
/// and vends repository instances.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL with the given configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to connect: {e}")))?;

        Ok(Self { pool })
    }

    /// Create a `Database` from an existing pool (useful for testing).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run all pending migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        tracing::info!("running database migrations");
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Migration failed: {e}")))?;
        Ok(())
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    /// Get a [`UserRepository`] backed by this pool.
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    /// Get a [`ModuleRepository`] backed by this pool.
    pub fn modules(&self) -> ModuleRepository {
        ModuleRepository::new(self.pool.clone())
    }

    /// Get a [`NewsRepository`] backed by this pool.
    pub fn news(&self) -> NewsRepository {
        NewsRepository::new(self.pool.clone())
    }

    /// Get a [`LogoRepository`] backed by this pool.
    pub fn logos(&self) -> LogoRepository {
        LogoRepository::new(self.pool.clone())
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Map a sqlx error to `Conflict` when it is a unique violation, otherwise
/// to `DatabaseError`.
pub(crate) fn conflict_or_db(e: sqlx::Error, conflict_msg: &str) -> AppError {
    if let sqlx::Error::Database(db) = &e
        && db.code().as_deref() == Some("23505")
    {
        return AppError::Conflict(conflict_msg.to_string());
    }
    AppError::DatabaseError(e.to_string())
}
