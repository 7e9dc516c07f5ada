use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;

use rede_core::auth;
use rede_core::error::AppError;

use crate::dto::{LoginRequest, LoginResponse, LoginUserResponse};
use crate::error::ApiError;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Access token issued", body = LoginResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // "unknown email" and "wrong senha" are indistinguishable on purpose
    let verified = state
        .db
        .users()
        .find_by_email(&body.email)
        .await?
        .filter(|a| auth::verify_senha(&body.senha, &a.senha_hash))
        .ok_or(AppError::Unauthenticated)?;

    let token = auth::issue_token(&state.auth, &verified.user)?;
    tracing::info!("user logged in: {}", verified.user.id);

    Ok(axum::Json(LoginResponse {
        access_token: token,
        user: LoginUserResponse {
            id: verified.user.id,
            nome: verified.user.nome,
            email: verified.user.email,
        },
    }))
}
