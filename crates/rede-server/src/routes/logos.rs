use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use rede_core::error::AppError;
use rede_core::models::{LogoUpdate, NewLogo};

use crate::dto::{CreateLogoRequest, LogoResponse, MessageResponse, UpdateLogoRequest};
use crate::error::ApiError;
use crate::state::AppState;

fn logo_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("logo not found: {id}"))
}

#[utoipa::path(
    post,
    path = "/logos",
    request_body = CreateLogoRequest,
    responses(
        (status = 201, description = "Logo created", body = LogoResponse),
        (status = 409, description = "Conflict", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "logos"
)]
pub async fn create_logo(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<CreateLogoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if state
        .db
        .logos()
        .find_by_titulo(&body.titulo)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("a logo with this title already exists".into()).into());
    }

    let logo = state
        .db
        .logos()
        .create(&NewLogo {
            titulo: body.titulo,
            imagem: body.imagem,
            url: body.url,
        })
        .await?;

    Ok((StatusCode::CREATED, axum::Json(LogoResponse::from(logo))))
}

#[utoipa::path(
    get,
    path = "/logos",
    responses(
        (status = 200, description = "List of logos", body = Vec<LogoResponse>),
    ),
    tag = "logos"
)]
pub async fn list_logos(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let logos = state.db.logos().list().await?;

    Ok(axum::Json(
        logos
            .into_iter()
            .map(LogoResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    get,
    path = "/logos/{id}",
    params(
        ("id" = Uuid, Path, description = "Logo ID")
    ),
    responses(
        (status = 200, description = "Logo details", body = LogoResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "logos"
)]
pub async fn get_logo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let logo = state
        .db
        .logos()
        .get(id)
        .await?
        .ok_or_else(|| logo_not_found(id))?;

    Ok(axum::Json(LogoResponse::from(logo)))
}

#[utoipa::path(
    patch,
    path = "/logos/{id}",
    params(
        ("id" = Uuid, Path, description = "Logo ID")
    ),
    request_body = UpdateLogoRequest,
    responses(
        (status = 200, description = "Logo updated", body = LogoResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 409, description = "Conflict", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "logos"
)]
pub async fn update_logo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    axum::Json(body): axum::Json<UpdateLogoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(titulo) = &body.titulo
        && let Some(existing) = state.db.logos().find_by_titulo(titulo).await?
        && existing.id != id
    {
        return Err(AppError::Conflict("a logo with this title already exists".into()).into());
    }

    let logo = state
        .db
        .logos()
        .update(
            id,
            &LogoUpdate {
                titulo: body.titulo,
                imagem: body.imagem,
                url: body.url,
            },
        )
        .await?
        .ok_or_else(|| logo_not_found(id))?;

    Ok(axum::Json(LogoResponse::from(logo)))
}

#[utoipa::path(
    delete,
    path = "/logos/{id}",
    params(
        ("id" = Uuid, Path, description = "Logo ID")
    ),
    responses(
        (status = 200, description = "Logo removed", body = MessageResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "logos"
)]
pub async fn delete_logo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.db.logos().delete(id).await? {
        return Err(logo_not_found(id).into());
    }

    Ok(axum::Json(MessageResponse {
        message: "logo removed".to_string(),
    }))
}
