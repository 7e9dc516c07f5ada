use chrono::{DateTime, Utc};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

use rede_core::error::AppError;
use rede_core::models::{Module, ModuleUpdate, NewModule};

use crate::database::conflict_or_db;

const TITULO_CONFLICT: &str = "a module with this title already exists";

/// Repository for module records. Module titles are unique; deleting or
/// renaming a module never touches the copies embedded in user records.
#[derive(Clone)]
pub struct ModuleRepository {
    pool: Pool<Postgres>,
}

impl ModuleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: &NewModule) -> Result<Module, AppError> {
        let row = sqlx::query_as::<_, ModuleRow>(
            r#"
            INSERT INTO modules (titulo, url)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(&new.titulo)
        .bind(&new.url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_or_db(e, TITULO_CONFLICT))?;

        Ok(row.into())
    }

    pub async fn list(&self) -> Result<Vec<Module>, AppError> {
        let rows = sqlx::query_as::<_, ModuleRow>("SELECT * FROM modules ORDER BY created_at")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Module>, AppError> {
        let row = sqlx::query_as::<_, ModuleRow>("SELECT * FROM modules WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    pub async fn find_by_titulo(&self, titulo: &str) -> Result<Option<Module>, AppError> {
        let row = sqlx::query_as::<_, ModuleRow>("SELECT * FROM modules WHERE titulo = $1")
            .bind(titulo)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    /// Apply a partial update. Returns `None` when the module is absent.
    pub async fn update(&self, id: Uuid, update: &ModuleUpdate) -> Result<Option<Module>, AppError> {
        let Some(current) = self.get(id).await? else {
            return Ok(None);
        };

        let titulo = update.titulo.clone().unwrap_or(current.titulo);
        let url = update.url.clone().or(current.url);

        let row = sqlx::query_as::<_, ModuleRow>(
            r#"
            UPDATE modules SET titulo = $1, url = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(&titulo)
        .bind(&url)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_or_db(e, TITULO_CONFLICT))?;

        Ok(row.map(Into::into))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM modules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct ModuleRow {
    id: Uuid,
    titulo: String,
    url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ModuleRow> for Module {
    fn from(row: ModuleRow) -> Self {
        Module {
            id: row.id,
            titulo: row.titulo,
            url: row.url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
