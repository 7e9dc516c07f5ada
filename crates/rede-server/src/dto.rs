use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rede_core::models::{Logo, Module, ModuleMembership, News, User, UserRef};

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: LoginUserResponse,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginUserResponse {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    pub nome: String,
    pub email: String,
    /// Plaintext senha; stored only as a bcrypt hash.
    pub senha: String,
    #[serde(default)]
    pub modulos: Vec<UserModuleEntry>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateUserRequest {
    pub nome: Option<String>,
    pub email: Option<String>,
    /// Re-hashed before storage when present.
    pub senha: Option<String>,
    pub modulos: Option<Vec<UserModuleEntry>>,
}

/// Membership entry as accepted on user create/update.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserModuleEntry {
    pub module_id: Uuid,
    pub titulo: String,
    #[serde(default = "default_true")]
    pub ativo: bool,
}

impl From<UserModuleEntry> for ModuleMembership {
    fn from(e: UserModuleEntry) -> Self {
        ModuleMembership {
            module_id: e.module_id,
            titulo: e.titulo,
            ativo: e.ativo,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub modulos: Vec<UserModuleResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            nome: user.nome,
            email: user.email,
            modulos: user.modulos.into_iter().map(Into::into).collect(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserModuleResponse {
    pub module_id: Uuid,
    pub titulo: String,
    pub ativo: bool,
}

impl From<ModuleMembership> for UserModuleResponse {
    fn from(m: ModuleMembership) -> Self {
        Self {
            module_id: m.module_id,
            titulo: m.titulo,
            ativo: m.ativo,
        }
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddUserModuleRequest {
    pub module_id: Uuid,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateUserModuleRequest {
    pub ativo: bool,
}

// ---------------------------------------------------------------------------
// Modules
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateModuleRequest {
    pub titulo: String,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateModuleRequest {
    pub titulo: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModuleResponse {
    pub id: Uuid,
    pub titulo: String,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Module> for ModuleResponse {
    fn from(m: Module) -> Self {
        Self {
            id: m.id,
            titulo: m.titulo,
            url: m.url,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// News
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNewsRequest {
    pub titulo: String,
    pub subtitulo: String,
    /// base64 image payload
    pub imagem: String,
    pub data_publicacao: DateTime<Utc>,
    pub link: String,
    pub veiculo_midia: String,
    pub ativo: Option<bool>,
    /// Id of the user registering the item.
    pub usuario_cadastro: Uuid,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNewsRequest {
    pub titulo: Option<String>,
    pub subtitulo: Option<String>,
    pub imagem: Option<String>,
    pub data_publicacao: Option<DateTime<Utc>>,
    pub link: Option<String>,
    pub veiculo_midia: Option<String>,
    pub ativo: Option<bool>,
    pub usuario_cadastro: Option<Uuid>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListNewsQuery {
    /// `true` limits the listing to active articles.
    pub ativas: Option<bool>,
    /// Limit the listing to articles registered by this user.
    pub usuario: Option<Uuid>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    pub id: Uuid,
    pub titulo: String,
    pub subtitulo: String,
    pub imagem: String,
    pub data_publicacao: DateTime<Utc>,
    pub link: String,
    pub veiculo_midia: String,
    pub ativo: bool,
    /// Registering user, or null when that account no longer exists.
    pub usuario_cadastro: Option<UserRefResponse>,
    pub cliques: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<News> for NewsResponse {
    fn from(n: News) -> Self {
        Self {
            id: n.id,
            titulo: n.titulo,
            subtitulo: n.subtitulo,
            imagem: n.imagem,
            data_publicacao: n.data_publicacao,
            link: n.link,
            veiculo_midia: n.veiculo_midia,
            ativo: n.ativo,
            usuario_cadastro: n.usuario_cadastro.map(Into::into),
            cliques: n.cliques,
            created_at: n.created_at,
            updated_at: n.updated_at,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserRefResponse {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
}

impl From<UserRef> for UserRefResponse {
    fn from(u: UserRef) -> Self {
        Self {
            id: u.id,
            nome: u.nome,
            email: u.email,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CliqueResponse {
    pub message: String,
    /// Total clicks after the increment.
    pub cliques: i32,
}

// ---------------------------------------------------------------------------
// Logos
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateLogoRequest {
    pub titulo: String,
    /// base64 image payload
    pub imagem: String,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateLogoRequest {
    pub titulo: Option<String>,
    pub imagem: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogoResponse {
    pub id: Uuid,
    pub titulo: String,
    pub imagem: String,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Logo> for LogoResponse {
    fn from(l: Logo) -> Self {
        Self {
            id: l.id,
            titulo: l.titulo,
            imagem: l.imagem,
            url: l.url,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
