use std::sync::Arc;

use axum::Router;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::{delete, get, patch, post};
use tower_http::limit::RequestBodyLimitLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::require_auth;
use crate::dto::HealthResponse;
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod auth;
pub mod logos;
pub mod modules;
pub mod news;
pub mod users;

/// Request bodies carry base64 images; the 2 MiB default is not enough.
const BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Build the full router with all routes and middleware.
///
/// Reads are public except for the user collection; login, the first-user
/// bootstrap, and the click counter are the only public writes.
pub fn router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/users", post(users::create_user))
        .route("/users", get(users::list_users))
        .route("/users/{id}", get(users::get_user))
        .route("/users/{id}", patch(users::update_user))
        .route("/users/{id}", delete(users::delete_user))
        .route("/users/{id}/modules", get(users::list_user_modules))
        .route("/users/{id}/modules", post(users::add_user_module))
        .route(
            "/users/{id}/modules/{module_id}",
            patch(users::update_user_module),
        )
        .route(
            "/users/{id}/modules/{module_id}",
            delete(users::remove_user_module),
        )
        .route("/modules", post(modules::create_module))
        .route("/modules/{id}", patch(modules::update_module))
        .route("/modules/{id}", delete(modules::delete_module))
        .route("/news", post(news::create_news))
        .route("/news/{id}", patch(news::update_news))
        .route("/news/{id}", delete(news::delete_news))
        .route("/logos", post(logos::create_logo))
        .route("/logos/{id}", patch(logos::update_logo))
        .route("/logos/{id}", delete(logos::delete_logo))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let public = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/users/bootstrap", post(users::bootstrap))
        .route("/modules", get(modules::list_modules))
        .route("/modules/{id}", get(modules::get_module))
        .route("/news", get(news::list_news))
        .route("/news/{id}", get(news::get_news))
        .route("/news/{id}/clique", patch(news::register_clique))
        .route("/logos", get(logos::list_logos))
        .route("/logos/{id}", get(logos::get_logo))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    public
        .merge(protected)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let db_status = match state.db.health_check().await {
        Ok(()) => "ok",
        Err(_) => "error",
    };

    let status = if db_status == "ok" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = HealthResponse {
        status: if db_status == "ok" {
            "healthy"
        } else {
            "unhealthy"
        },
        database: db_status,
    };

    (status, axum::Json(response))
}
