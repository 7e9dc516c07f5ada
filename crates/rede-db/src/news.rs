use chrono::{DateTime, Utc};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

use rede_core::error::AppError;
use rede_core::models::{NewNews, News, NewsUpdate, UserRef};

const SELECT_JOINED: &str = r#"
    SELECT n.id, n.titulo, n.subtitulo, n.imagem, n.data_publicacao, n.link,
           n.veiculo_midia, n.ativo, n.usuario_cadastro, n.cliques,
           n.created_at, n.updated_at,
           u.nome AS usuario_nome, u.email AS usuario_email
    FROM news n
    LEFT JOIN users u ON u.id = n.usuario_cadastro
"#;

/// Repository for news articles. The registering user is resolved on read;
/// a reference to a deleted user resolves to nothing, it never fails.
#[derive(Clone)]
pub struct NewsRepository {
    pool: Pool<Postgres>,
}

impl NewsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: &NewNews) -> Result<News, AppError> {
        let row: (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO news (titulo, subtitulo, imagem, data_publicacao, link,
                              veiculo_midia, ativo, usuario_cadastro)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&new.titulo)
        .bind(&new.subtitulo)
        .bind(&new.imagem)
        .bind(new.data_publicacao)
        .bind(&new.link)
        .bind(&new.veiculo_midia)
        .bind(new.ativo)
        .bind(new.usuario_cadastro)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        self.get(row.0)
            .await?
            .ok_or_else(|| AppError::DatabaseError("inserted news row vanished".into()))
    }

    pub async fn list(&self) -> Result<Vec<News>, AppError> {
        self.fetch_list(&format!("{SELECT_JOINED} ORDER BY n.created_at"), None)
            .await
    }

    /// Only articles currently flagged active.
    pub async fn list_ativas(&self) -> Result<Vec<News>, AppError> {
        self.fetch_list(
            &format!("{SELECT_JOINED} WHERE n.ativo ORDER BY n.created_at"),
            None,
        )
        .await
    }

    /// Articles registered by one user.
    pub async fn list_by_usuario(&self, usuario_id: Uuid) -> Result<Vec<News>, AppError> {
        self.fetch_list(
            &format!("{SELECT_JOINED} WHERE n.usuario_cadastro = $1 ORDER BY n.created_at"),
            Some(usuario_id),
        )
        .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<News>, AppError> {
        let row = sqlx::query_as::<_, NewsRow>(&format!("{SELECT_JOINED} WHERE n.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    /// Apply a partial update. Returns `None` when the article is absent.
    pub async fn update(&self, id: Uuid, update: &NewsUpdate) -> Result<Option<News>, AppError> {
        let Some(current) = self.get_raw(id).await? else {
            return Ok(None);
        };

        sqlx::query(
            r#"
            UPDATE news
            SET titulo = $1, subtitulo = $2, imagem = $3, data_publicacao = $4,
                link = $5, veiculo_midia = $6, ativo = $7, usuario_cadastro = $8,
                updated_at = NOW()
            WHERE id = $9
            "#,
        )
        .bind(update.titulo.as_ref().unwrap_or(&current.titulo))
        .bind(update.subtitulo.as_ref().unwrap_or(&current.subtitulo))
        .bind(update.imagem.as_ref().unwrap_or(&current.imagem))
        .bind(update.data_publicacao.unwrap_or(current.data_publicacao))
        .bind(update.link.as_ref().unwrap_or(&current.link))
        .bind(update.veiculo_midia.as_ref().unwrap_or(&current.veiculo_midia))
        .bind(update.ativo.unwrap_or(current.ativo))
        .bind(update.usuario_cadastro.unwrap_or(current.usuario_cadastro))
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        self.get(id).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Atomically bump the click counter. Returns the new total, or `None`
    /// when the article is absent.
    pub async fn increment_cliques(&self, id: Uuid) -> Result<Option<i32>, AppError> {
        let row: Option<(i32,)> = sqlx::query_as(
            r#"
            UPDATE news SET cliques = cliques + 1, updated_at = NOW()
            WHERE id = $1
            RETURNING cliques
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(|r| r.0))
    }

    async fn fetch_list(&self, sql: &str, bind: Option<Uuid>) -> Result<Vec<News>, AppError> {
        let mut query = sqlx::query_as::<_, NewsRow>(sql);
        if let Some(id) = bind {
            query = query.bind(id);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Editable columns only, for read-modify-write updates.
    async fn get_raw(&self, id: Uuid) -> Result<Option<RawNewsRow>, AppError> {
        let row = sqlx::query_as::<_, RawNewsRow>(
            r#"
            SELECT titulo, subtitulo, imagem, data_publicacao, link,
                   veiculo_midia, ativo, usuario_cadastro
            FROM news WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row)
    }
}

// -- Internal row types for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct NewsRow {
    id: Uuid,
    titulo: String,
    subtitulo: String,
    imagem: String,
    data_publicacao: DateTime<Utc>,
    link: String,
    veiculo_midia: String,
    ativo: bool,
    usuario_cadastro: Uuid,
    cliques: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    usuario_nome: Option<String>,
    usuario_email: Option<String>,
}

impl From<NewsRow> for News {
    fn from(row: NewsRow) -> Self {
        let usuario_cadastro = match (row.usuario_nome, row.usuario_email) {
            (Some(nome), Some(email)) => Some(UserRef {
                id: row.usuario_cadastro,
                nome,
                email,
            }),
            _ => None,
        };

        News {
            id: row.id,
            titulo: row.titulo,
            subtitulo: row.subtitulo,
            imagem: row.imagem,
            data_publicacao: row.data_publicacao,
            link: row.link,
            veiculo_midia: row.veiculo_midia,
            ativo: row.ativo,
            usuario_cadastro,
            cliques: row.cliques,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RawNewsRow {
    titulo: String,
    subtitulo: String,
    imagem: String,
    data_publicacao: DateTime<Utc>,
    link: String,
    veiculo_midia: String,
    ativo: bool,
    usuario_cadastro: Uuid,
}
