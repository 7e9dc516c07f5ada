use chrono::{DateTime, Utc};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

use rede_core::error::AppError;
use rede_core::membership;
use rede_core::models::{AuthUser, ModuleMembership, NewUser, User, UserUpdate};

use crate::database::conflict_or_db;

const EMAIL_CONFLICT: &str = "a user with this email already exists";

/// Repository for user records and their embedded module lists.
///
/// Membership operations are read-modify-write against the single user
/// row; concurrent mutations of the same user race last-writer-wins.
#[derive(Clone)]
pub struct UserRepository {
    pool: Pool<Postgres>,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user. `senha_hash` must already be hashed.
    pub async fn create(&self, new: &NewUser) -> Result<User, AppError> {
        let modulos = serde_json::to_value(&new.modulos)?;
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (nome, email, senha, modulos)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&new.nome)
        .bind(&new.email)
        .bind(&new.senha_hash)
        .bind(&modulos)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_or_db(e, EMAIL_CONFLICT))?;

        row.try_into_user()
    }

    /// All users, in insertion order.
    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>("SELECT * FROM users ORDER BY created_at")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(UserRow::try_into_user).collect()
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.get_auth(id).await?.map(|a| a.user))
    }

    /// Exact-match lookup by email (case-sensitive as stored), with the
    /// credential hash attached for login verification.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<AuthUser>, AppError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        row.map(UserRow::try_into_auth).transpose()
    }

    /// Total number of user records.
    pub async fn count(&self) -> Result<i64, AppError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(row.0)
    }

    /// Apply a partial update. Returns `None` when the user is absent.
    pub async fn update(&self, id: Uuid, update: &UserUpdate) -> Result<Option<User>, AppError> {
        let Some(current) = self.get_auth(id).await? else {
            return Ok(None);
        };

        let nome = update.nome.clone().unwrap_or(current.user.nome);
        let email = update.email.clone().unwrap_or(current.user.email);
        let senha = update.senha_hash.clone().unwrap_or(current.senha_hash);
        let modulos = update.modulos.clone().unwrap_or(current.user.modulos);
        let modulos_json = serde_json::to_value(&modulos)?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET nome = $1, email = $2, senha = $3, modulos = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&nome)
        .bind(&email)
        .bind(&senha)
        .bind(&modulos_json)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_or_db(e, EMAIL_CONFLICT))?;

        row.map(UserRow::try_into_user).transpose()
    }

    /// Delete a user. Returns `false` when the user is absent. News items
    /// registered by the user keep their dangling reference.
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    // -- Module membership --------------------------------------------------

    /// Attach a module to the user's list, reactivating an existing entry
    /// in place. Module existence and the title copy are the caller's
    /// responsibility.
    pub async fn attach_module(
        &self,
        user_id: Uuid,
        module_id: Uuid,
        titulo: &str,
    ) -> Result<User, AppError> {
        let mut user = self
            .get(user_id)
            .await?
            .ok_or_else(|| AppError::user_not_found(user_id))?;

        membership::attach(&mut user.modulos, module_id, titulo);
        self.store_modulos(user_id, &user.modulos).await
    }

    /// Flip the active flag on an existing membership.
    pub async fn set_module_active(
        &self,
        user_id: Uuid,
        module_id: Uuid,
        ativo: bool,
    ) -> Result<User, AppError> {
        let mut user = self
            .get(user_id)
            .await?
            .ok_or_else(|| AppError::user_not_found(user_id))?;

        if !membership::set_active(&mut user.modulos, module_id, ativo) {
            return Err(AppError::membership_not_found(user_id, module_id));
        }
        self.store_modulos(user_id, &user.modulos).await
    }

    /// Remove a membership. Detaching a module the user never had succeeds
    /// without change.
    pub async fn detach_module(&self, user_id: Uuid, module_id: Uuid) -> Result<User, AppError> {
        let mut user = self
            .get(user_id)
            .await?
            .ok_or_else(|| AppError::user_not_found(user_id))?;

        membership::detach(&mut user.modulos, module_id);
        self.store_modulos(user_id, &user.modulos).await
    }

    /// The user's membership list, in attach order.
    pub async fn list_modules(&self, user_id: Uuid) -> Result<Vec<ModuleMembership>, AppError> {
        let user = self
            .get(user_id)
            .await?
            .ok_or_else(|| AppError::user_not_found(user_id))?;

        Ok(user.modulos)
    }

    async fn get_auth(&self, id: Uuid) -> Result<Option<AuthUser>, AppError> {
        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        row.map(UserRow::try_into_auth).transpose()
    }

    /// Write the whole module list back to the user row.
    async fn store_modulos(
        &self,
        user_id: Uuid,
        modulos: &[ModuleMembership],
    ) -> Result<User, AppError> {
        let modulos_json = serde_json::to_value(modulos)?;
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users SET modulos = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(&modulos_json)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        row.ok_or_else(|| AppError::user_not_found(user_id))?
            .try_into_user()
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    nome: String,
    email: String,
    senha: String,
    modulos: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn try_into_auth(self) -> Result<AuthUser, AppError> {
        let modulos: Vec<ModuleMembership> = serde_json::from_value(self.modulos)?;
        Ok(AuthUser {
            user: User {
                id: self.id,
                nome: self.nome,
                email: self.email,
                modulos,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            senha_hash: self.senha,
        })
    }

    fn try_into_user(self) -> Result<User, AppError> {
        Ok(self.try_into_auth()?.user)
    }
}
