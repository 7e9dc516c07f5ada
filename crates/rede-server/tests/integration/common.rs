use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};
use tower::ServiceExt;

use rede_core::auth::AuthConfig;
use rede_db::Database;
use rede_server::routes;
use rede_server::state::AppState;

pub const TEST_JWT_SECRET: &str = "test-signing-key-not-for-production";

pub struct TestApp {
    pub router: Router,
    _container: ContainerAsync<GenericImage>,
}

/// Spin up a PostgreSQL container, run migrations, and build the app router.
pub async fn setup_test_app() -> TestApp {
    let container = GenericImage::new("postgres", "16")
        .with_exposed_port(ContainerPort::Tcp(5432))
        .with_wait_for(WaitFor::message_on_stderr(
            "database system is ready to accept connections",
        ))
        .with_env_var("POSTGRES_PASSWORD", "postgres")
        .with_env_var("POSTGRES_DB", "rede_test")
        .start()
        .await
        .expect("Failed to start PostgreSQL container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get port");

    let url = format!("postgresql://postgres:postgres@{host}:{port}/rede_test");
    let pool = retry_connect(&url).await;

    let db = Database::from_pool(pool);
    db.migrate().await.expect("Failed to run migrations");

    let state = Arc::new(AppState {
        db,
        auth: AuthConfig::new(TEST_JWT_SECRET, 3600),
    });

    TestApp {
        router: routes::router(state),
        _container: container,
    }
}

async fn retry_connect(url: &str) -> PgPool {
    for _ in 0..30 {
        if let Ok(pool) = PgPoolOptions::new().max_connections(5).connect(url).await {
            return pool;
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }
    panic!("Failed to connect to test database");
}

/// Fire one request at the router and decode the JSON response body.
pub async fn request(
    router: &Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

/// Create the first user via the public bootstrap endpoint and log in,
/// returning the access token and the login user payload.
pub async fn bootstrap_and_login(router: &Router) -> (String, serde_json::Value) {
    let (status, _) = request(
        router,
        "POST",
        "/users/bootstrap",
        None,
        Some(serde_json::json!({
            "nome": "João",
            "email": "joao@x.com",
            "senha": "123456"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, login) = request(
        router,
        "POST",
        "/auth/login",
        None,
        Some(serde_json::json!({
            "email": "joao@x.com",
            "senha": "123456"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let token = login["access_token"].as_str().unwrap().to_string();
    (token, login["user"].clone())
}
