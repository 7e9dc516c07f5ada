use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use rede_core::error::AppError;
use rede_core::models::{ModuleUpdate, NewModule};

use crate::dto::{CreateModuleRequest, MessageResponse, ModuleResponse, UpdateModuleRequest};
use crate::error::ApiError;
use crate::state::AppState;

fn module_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("module not found: {id}"))
}

#[utoipa::path(
    post,
    path = "/modules",
    request_body = CreateModuleRequest,
    responses(
        (status = 201, description = "Module created", body = ModuleResponse),
        (status = 409, description = "Conflict", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "modules"
)]
pub async fn create_module(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<CreateModuleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if state
        .db
        .modules()
        .find_by_titulo(&body.titulo)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("a module with this title already exists".into()).into());
    }

    let module = state
        .db
        .modules()
        .create(&NewModule {
            titulo: body.titulo,
            url: body.url,
        })
        .await?;

    Ok((StatusCode::CREATED, axum::Json(ModuleResponse::from(module))))
}

#[utoipa::path(
    get,
    path = "/modules",
    responses(
        (status = 200, description = "List of modules", body = Vec<ModuleResponse>),
    ),
    tag = "modules"
)]
pub async fn list_modules(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let modules = state.db.modules().list().await?;

    Ok(axum::Json(
        modules
            .into_iter()
            .map(ModuleResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    get,
    path = "/modules/{id}",
    params(
        ("id" = Uuid, Path, description = "Module ID")
    ),
    responses(
        (status = 200, description = "Module details", body = ModuleResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "modules"
)]
pub async fn get_module(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let module = state
        .db
        .modules()
        .get(id)
        .await?
        .ok_or_else(|| module_not_found(id))?;

    Ok(axum::Json(ModuleResponse::from(module)))
}

#[utoipa::path(
    patch,
    path = "/modules/{id}",
    params(
        ("id" = Uuid, Path, description = "Module ID")
    ),
    request_body = UpdateModuleRequest,
    responses(
        (status = 200, description = "Module updated", body = ModuleResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 409, description = "Conflict", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "modules"
)]
pub async fn update_module(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    axum::Json(body): axum::Json<UpdateModuleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // retitling onto another module's title is a conflict; existing
    // membership copies keep the old title either way
    if let Some(titulo) = &body.titulo
        && let Some(existing) = state.db.modules().find_by_titulo(titulo).await?
        && existing.id != id
    {
        return Err(AppError::Conflict("a module with this title already exists".into()).into());
    }

    let module = state
        .db
        .modules()
        .update(
            id,
            &ModuleUpdate {
                titulo: body.titulo,
                url: body.url,
            },
        )
        .await?
        .ok_or_else(|| module_not_found(id))?;

    Ok(axum::Json(ModuleResponse::from(module)))
}

#[utoipa::path(
    delete,
    path = "/modules/{id}",
    params(
        ("id" = Uuid, Path, description = "Module ID")
    ),
    responses(
        (status = 200, description = "Module removed", body = MessageResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "modules"
)]
pub async fn delete_module(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    // memberships embedded in user records are left untouched
    if !state.db.modules().delete(id).await? {
        return Err(module_not_found(id).into());
    }

    Ok(axum::Json(MessageResponse {
        message: "module removed".to_string(),
    }))
}
