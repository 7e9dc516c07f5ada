use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use rede_core::auth;
use rede_core::error::AppError;
use rede_core::models::{NewUser, User, UserUpdate};

use crate::dto::{
    AddUserModuleRequest, CreateUserRequest, MessageResponse, UpdateUserModuleRequest,
    UpdateUserRequest, UserModuleResponse, UserResponse,
};
use crate::error::ApiError;
use crate::state::AppState;

async fn insert_user(state: &AppState, body: CreateUserRequest) -> Result<User, ApiError> {
    let senha_hash = auth::hash_senha(&body.senha)?;
    let new = NewUser {
        nome: body.nome,
        email: body.email,
        senha_hash,
        modulos: body.modulos.into_iter().map(Into::into).collect(),
    };
    Ok(state.db.users().create(&new).await?)
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/users/bootstrap",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "First user created", body = UserResponse),
        (status = 409, description = "Conflict", body = crate::dto::ErrorResponse),
    ),
    tag = "users"
)]
pub async fn bootstrap(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if state.db.users().count().await? > 0 {
        return Err(AppError::Conflict("system already has registered users".into()).into());
    }

    let user = insert_user(&state, body).await?;
    tracing::info!("bootstrap user created: {}", user.id);

    Ok((StatusCode::CREATED, axum::Json(UserResponse::from(user))))
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 409, description = "Conflict", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = insert_user(&state, body).await?;

    Ok((StatusCode::CREATED, axum::Json(UserResponse::from(user))))
}

#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "List of users", body = Vec<UserResponse>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let users = state.db.users().list().await?;

    Ok(axum::Json(
        users
            .into_iter()
            .map(UserResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = UserResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .db
        .users()
        .get(id)
        .await?
        .ok_or_else(|| AppError::user_not_found(id))?;

    Ok(axum::Json(UserResponse::from(user)))
}

#[utoipa::path(
    patch,
    path = "/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 409, description = "Conflict", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    axum::Json(body): axum::Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let senha_hash = body.senha.as_deref().map(auth::hash_senha).transpose()?;
    let update = UserUpdate {
        nome: body.nome,
        email: body.email,
        senha_hash,
        modulos: body
            .modulos
            .map(|entries| entries.into_iter().map(Into::into).collect()),
    };

    let user = state
        .db
        .users()
        .update(id, &update)
        .await?
        .ok_or_else(|| AppError::user_not_found(id))?;

    Ok(axum::Json(UserResponse::from(user)))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User removed", body = MessageResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.db.users().delete(id).await? {
        return Err(AppError::user_not_found(id).into());
    }

    Ok(axum::Json(MessageResponse {
        message: "user removed".to_string(),
    }))
}

// ---------------------------------------------------------------------------
// Module membership
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/users/{id}/modules",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "The user's module list", body = Vec<UserModuleResponse>),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn list_user_modules(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let modulos = state.db.users().list_modules(id).await?;

    Ok(axum::Json(
        modulos
            .into_iter()
            .map(UserModuleResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    post,
    path = "/users/{id}/modules",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = AddUserModuleRequest,
    responses(
        (status = 201, description = "Module attached", body = UserResponse),
        (status = 404, description = "User or module not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn add_user_module(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    axum::Json(body): axum::Json<AddUserModuleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // the membership manager does not validate module existence; the title
    // copy is captured here
    let module = state
        .db
        .modules()
        .get(body.module_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("module not found: {}", body.module_id)))?;

    let user = state
        .db
        .users()
        .attach_module(id, module.id, &module.titulo)
        .await?;

    Ok((StatusCode::CREATED, axum::Json(UserResponse::from(user))))
}

#[utoipa::path(
    patch,
    path = "/users/{id}/modules/{module_id}",
    params(
        ("id" = Uuid, Path, description = "User ID"),
        ("module_id" = Uuid, Path, description = "Module ID"),
    ),
    request_body = UpdateUserModuleRequest,
    responses(
        (status = 200, description = "Membership updated", body = UserResponse),
        (status = 404, description = "User or membership not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn update_user_module(
    State(state): State<Arc<AppState>>,
    Path((id, module_id)): Path<(Uuid, Uuid)>,
    axum::Json(body): axum::Json<UpdateUserModuleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .db
        .users()
        .set_module_active(id, module_id, body.ativo)
        .await?;

    Ok(axum::Json(UserResponse::from(user)))
}

#[utoipa::path(
    delete,
    path = "/users/{id}/modules/{module_id}",
    params(
        ("id" = Uuid, Path, description = "User ID"),
        ("module_id" = Uuid, Path, description = "Module ID"),
    ),
    responses(
        (status = 200, description = "Module detached", body = MessageResponse),
        (status = 404, description = "User not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn remove_user_module(
    State(state): State<Arc<AppState>>,
    Path((id, module_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    // detaching a module the user never had is a successful no-op
    state.db.users().detach_module(id, module_id).await?;

    Ok(axum::Json(MessageResponse {
        message: "module removed from user".to_string(),
    }))
}
