use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use rede_core::error::AppError;
use rede_core::models::{NewNews, NewsUpdate};

use crate::dto::{
    CliqueResponse, CreateNewsRequest, ListNewsQuery, MessageResponse, NewsResponse,
    UpdateNewsRequest,
};
use crate::error::ApiError;
use crate::state::AppState;

fn news_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("news item not found: {id}"))
}

#[utoipa::path(
    post,
    path = "/news",
    request_body = CreateNewsRequest,
    responses(
        (status = 201, description = "News item created", body = NewsResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "news"
)]
pub async fn create_news(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<CreateNewsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let news = state
        .db
        .news()
        .create(&NewNews {
            titulo: body.titulo,
            subtitulo: body.subtitulo,
            imagem: body.imagem,
            data_publicacao: body.data_publicacao,
            link: body.link,
            veiculo_midia: body.veiculo_midia,
            ativo: body.ativo.unwrap_or(true),
            usuario_cadastro: body.usuario_cadastro,
        })
        .await?;

    Ok((StatusCode::CREATED, axum::Json(NewsResponse::from(news))))
}

#[utoipa::path(
    get,
    path = "/news",
    params(ListNewsQuery),
    responses(
        (status = 200, description = "List of news items", body = Vec<NewsResponse>),
    ),
    tag = "news"
)]
pub async fn list_news(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListNewsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let news = if query.ativas == Some(true) {
        state.db.news().list_ativas().await?
    } else if let Some(usuario) = query.usuario {
        state.db.news().list_by_usuario(usuario).await?
    } else {
        state.db.news().list().await?
    };

    Ok(axum::Json(
        news.into_iter().map(NewsResponse::from).collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    get,
    path = "/news/{id}",
    params(
        ("id" = Uuid, Path, description = "News ID")
    ),
    responses(
        (status = 200, description = "News details", body = NewsResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "news"
)]
pub async fn get_news(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let news = state
        .db
        .news()
        .get(id)
        .await?
        .ok_or_else(|| news_not_found(id))?;

    Ok(axum::Json(NewsResponse::from(news)))
}

#[utoipa::path(
    patch,
    path = "/news/{id}",
    params(
        ("id" = Uuid, Path, description = "News ID")
    ),
    request_body = UpdateNewsRequest,
    responses(
        (status = 200, description = "News updated", body = NewsResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "news"
)]
pub async fn update_news(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    axum::Json(body): axum::Json<UpdateNewsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let update = NewsUpdate {
        titulo: body.titulo,
        subtitulo: body.subtitulo,
        imagem: body.imagem,
        data_publicacao: body.data_publicacao,
        link: body.link,
        veiculo_midia: body.veiculo_midia,
        ativo: body.ativo,
        usuario_cadastro: body.usuario_cadastro,
    };

    let news = state
        .db
        .news()
        .update(id, &update)
        .await?
        .ok_or_else(|| news_not_found(id))?;

    Ok(axum::Json(NewsResponse::from(news)))
}

#[utoipa::path(
    delete,
    path = "/news/{id}",
    params(
        ("id" = Uuid, Path, description = "News ID")
    ),
    responses(
        (status = 200, description = "News removed", body = MessageResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "news"
)]
pub async fn delete_news(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.db.news().delete(id).await? {
        return Err(news_not_found(id).into());
    }

    Ok(axum::Json(MessageResponse {
        message: "news item removed".to_string(),
    }))
}

#[utoipa::path(
    patch,
    path = "/news/{id}/clique",
    params(
        ("id" = Uuid, Path, description = "News ID")
    ),
    responses(
        (status = 200, description = "Click registered", body = CliqueResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "news"
)]
pub async fn register_clique(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let cliques = state
        .db
        .news()
        .increment_cliques(id)
        .await?
        .ok_or_else(|| news_not_found(id))?;

    Ok(axum::Json(CliqueResponse {
        message: "click registered".to_string(),
        cliques,
    }))
}
