use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One entry in the module list embedded in a user record.
///
/// `titulo` is a denormalized copy of the module's title captured when the
/// module was attached; it is not kept in sync with later renames.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleMembership {
    pub module_id: Uuid,
    pub titulo: String,
    pub ativo: bool,
}

/// A user account. The credential hash is deliberately absent — it never
/// leaves the persistence layer except inside [`AuthUser`].
#[derive(Debug, Clone, serde::Serialize)]
pub struct User {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub modulos: Vec<ModuleMembership>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user together with the stored credential hash, for login verification
/// only.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
    pub senha_hash: String,
}

/// DTO for inserting a new user. `senha_hash` must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub nome: String,
    pub email: String,
    pub senha_hash: String,
    pub modulos: Vec<ModuleMembership>,
}

/// Partial user update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub senha_hash: Option<String>,
    pub modulos: Option<Vec<ModuleMembership>>,
}

/// A reusable module that users can be granted access to.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Module {
    pub id: Uuid,
    pub titulo: String,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewModule {
    pub titulo: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ModuleUpdate {
    pub titulo: Option<String>,
    pub url: Option<String>,
}

/// Minimal user embedding for news responses — who registered the item.
#[derive(Debug, Clone, serde::Serialize)]
pub struct UserRef {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
}

/// A news article. `usuario_cadastro` resolves to the registering user, or
/// `None` when that user has since been deleted (the stored reference does
/// not cascade).
#[derive(Debug, Clone, serde::Serialize)]
pub struct News {
    pub id: Uuid,
    pub titulo: String,
    pub subtitulo: String,
    /// base64 image payload
    pub imagem: String,
    pub data_publicacao: DateTime<Utc>,
    pub link: String,
    pub veiculo_midia: String,
    pub ativo: bool,
    pub usuario_cadastro: Option<UserRef>,
    pub cliques: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewNews {
    pub titulo: String,
    pub subtitulo: String,
    pub imagem: String,
    pub data_publicacao: DateTime<Utc>,
    pub link: String,
    pub veiculo_midia: String,
    pub ativo: bool,
    pub usuario_cadastro: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct NewsUpdate {
    pub titulo: Option<String>,
    pub subtitulo: Option<String>,
    pub imagem: Option<String>,
    pub data_publicacao: Option<DateTime<Utc>>,
    pub link: Option<String>,
    pub veiculo_midia: Option<String>,
    pub ativo: Option<bool>,
    pub usuario_cadastro: Option<Uuid>,
}

/// A logo asset.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Logo {
    pub id: Uuid,
    pub titulo: String,
    /// base64 image payload
    pub imagem: String,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewLogo {
    pub titulo: String,
    pub imagem: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct LogoUpdate {
    pub titulo: Option<String>,
    pub imagem: Option<String>,
    pub url: Option<String>,
}
