use chrono::{DateTime, Utc};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

use rede_core::error::AppError;
use rede_core::models::{Logo, LogoUpdate, NewLogo};

/// Repository for logo assets. Title uniqueness is enforced by the route
/// handlers (lookup before write), not by a constraint.
#[derive(Clone)]
pub struct LogoRepository {
    pool: Pool<Postgres>,
}

impl LogoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: &NewLogo) -> Result<Logo, AppError> {
        let row = sqlx::query_as::<_, LogoRow>(
            r#"
            INSERT INTO logos (titulo, imagem, url)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&new.titulo)
        .bind(&new.imagem)
        .bind(&new.url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.into())
    }

    pub async fn list(&self) -> Result<Vec<Logo>, AppError> {
        let rows = sqlx::query_as::<_, LogoRow>("SELECT * FROM logos ORDER BY created_at")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Logo>, AppError> {
        let row = sqlx::query_as::<_, LogoRow>("SELECT * FROM logos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    pub async fn find_by_titulo(&self, titulo: &str) -> Result<Option<Logo>, AppError> {
        let row = sqlx::query_as::<_, LogoRow>("SELECT * FROM logos WHERE titulo = $1")
            .bind(titulo)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    /// Apply a partial update. Returns `None` when the logo is absent.
    pub async fn update(&self, id: Uuid, update: &LogoUpdate) -> Result<Option<Logo>, AppError> {
        let Some(current) = self.get(id).await? else {
            return Ok(None);
        };

        let titulo = update.titulo.clone().unwrap_or(current.titulo);
        let imagem = update.imagem.clone().unwrap_or(current.imagem);
        let url = update.url.clone().or(current.url);

        let row = sqlx::query_as::<_, LogoRow>(
            r#"
            UPDATE logos SET titulo = $1, imagem = $2, url = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(&titulo)
        .bind(&imagem)
        .bind(&url)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM logos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct LogoRow {
    id: Uuid,
    titulo: String,
    imagem: String,
    url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LogoRow> for Logo {
    fn from(row: LogoRow) -> Self {
        Logo {
            id: row.id,
            titulo: row.titulo,
            imagem: row.imagem,
            url: row.url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
