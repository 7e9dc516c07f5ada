//! Credential hashing and access-token issue/validation.
//!
//! Tokens are stateless HS256 JWTs signed with a process-wide secret. The
//! persistence re-check (a token for a deleted user must stop working)
//! happens in the server's auth middleware, which owns the DB handle.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::User;

/// bcrypt work factor for stored credentials.
pub const BCRYPT_COST: u32 = 10;

/// Token signing configuration. Process-wide; the secret has no default.
#[derive(Clone)]
pub struct AuthConfig {
    secret: String,
    pub token_ttl_secs: u64,
}

impl AuthConfig {
    pub fn new(secret: impl Into<String>, token_ttl_secs: u64) -> Self {
        Self {
            secret: secret.into(),
            token_ttl_secs,
        }
    }

    /// Read configuration from environment variables.
    ///
    /// - `REDE_JWT_SECRET` (required — startup fails without it)
    /// - `REDE_TOKEN_TTL_SECS` (optional, defaults to 3600)
    pub fn from_env() -> Result<Self, AppError> {
        let secret = std::env::var("REDE_JWT_SECRET").map_err(|_| {
            AppError::ConfigError(
                "REDE_JWT_SECRET not set. Refusing to start without a signing key.".into(),
            )
        })?;
        if secret.is_empty() {
            return Err(AppError::ConfigError(
                "REDE_JWT_SECRET must not be empty".into(),
            ));
        }

        let token_ttl_secs = match std::env::var("REDE_TOKEN_TTL_SECS") {
            Err(_) => 3600,
            Ok(raw) => {
                let parsed: u64 = raw.parse().map_err(|_| {
                    AppError::ConfigError(format!(
                        "Invalid REDE_TOKEN_TTL_SECS '{raw}': must be a positive integer"
                    ))
                })?;
                if parsed == 0 {
                    return Err(AppError::ConfigError(
                        "REDE_TOKEN_TTL_SECS must be at least 1".into(),
                    ));
                }
                parsed
            }
        };

        Ok(Self {
            secret,
            token_ttl_secs,
        })
    }
}

/// Claims embedded in an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: Uuid,
    pub email: String,
    pub nome: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Hash a plaintext senha for storage.
pub fn hash_senha(senha: &str) -> Result<String, AppError> {
    bcrypt::hash(senha, BCRYPT_COST)
        .map_err(|e| AppError::Generic(format!("password hashing failed: {e}")))
}

/// Compare a submitted senha against the stored hash.
///
/// A malformed stored hash counts as a mismatch — the caller collapses it
/// into the same unauthenticated outcome as a wrong password.
pub fn verify_senha(senha: &str, hash: &str) -> bool {
    match bcrypt::verify(senha, hash) {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!("stored credential hash rejected by bcrypt: {e}");
            false
        }
    }
}

/// Sign an access token for a verified user.
pub fn issue_token(config: &AuthConfig, user: &User) -> Result<String, AppError> {
    let iat = Utc::now().timestamp();
    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        nome: user.nome.clone(),
        iat,
        exp: iat + config.token_ttl_secs as i64,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::Generic(format!("token signing failed: {e}")))
}

/// Verify signature and expiration and return the embedded claims.
///
/// Invalid signature, malformed token, and expired token all collapse to
/// [`AppError::Unauthenticated`]; no distinction reaches the caller.
pub fn validate_token(config: &AuthConfig, token: &str) -> Result<Claims, AppError> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthenticated)?;

    Ok(data.claims)
}
