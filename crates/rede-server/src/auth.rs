use std::sync::Arc;

use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use rede_core::auth;
use rede_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Middleware that validates `Authorization: Bearer <token>` and re-fetches
/// the subject from the database — a token for a deleted account must stop
/// working. Missing header, bad signature, expired token, and unknown
/// subject all produce the same information-free 401.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    request: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthenticated)?;

    let claims = auth::validate_token(&state.auth, token)?;

    let user = state
        .db
        .users()
        .get(claims.sub)
        .await?
        .ok_or(AppError::Unauthenticated)?;

    tracing::debug!("authenticated request from user {}", user.id);
    Ok(next.run(request).await)
}
