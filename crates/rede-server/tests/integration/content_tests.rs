use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::common::{bootstrap_and_login, request, setup_test_app};

fn news_body(titulo: &str, usuario_id: &str, ativo: bool) -> serde_json::Value {
    json!({
        "titulo": titulo,
        "subtitulo": "subtitle",
        "imagem": "data:image/png;base64,iVBORw0KGgo=",
        "dataPublicacao": "2025-01-15T10:00:00Z",
        "link": "https://exemplo.com/noticia",
        "veiculoMidia": "TechNews",
        "ativo": ativo,
        "usuarioCadastro": usuario_id
    })
}

// ---------------------------------------------------------------------------
// News
// ---------------------------------------------------------------------------

#[tokio::test]
async fn news_crud_roundtrip() {
    let app = setup_test_app().await;
    let (token, user) = bootstrap_and_login(&app.router).await;
    let user_id = user["id"].as_str().unwrap();

    let (status, created) = request(
        &app.router,
        "POST",
        "/news",
        Some(&token),
        Some(news_body("Nova tecnologia", user_id, true)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["cliques"], 0);
    assert_eq!(created["usuarioCadastro"]["email"], "joao@x.com");

    let id = created["id"].as_str().unwrap();

    // reads are public
    let (status, fetched) = request(&app.router, "GET", &format!("/news/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["titulo"], "Nova tecnologia");

    let (status, updated) = request(
        &app.router,
        "PATCH",
        &format!("/news/{id}"),
        Some(&token),
        Some(json!({"titulo": "Atualizada"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["titulo"], "Atualizada");
    assert_eq!(updated["subtitulo"], "subtitle");

    let (status, _) = request(
        &app.router,
        "DELETE",
        &format!("/news/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = request(&app.router, "GET", &format!("/news/{id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn news_mutations_require_a_token() {
    let app = setup_test_app().await;
    let (_, user) = bootstrap_and_login(&app.router).await;
    let user_id = user["id"].as_str().unwrap();

    let (status, _) = request(
        &app.router,
        "POST",
        "/news",
        None,
        Some(news_body("sem token", user_id, true)),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn news_listing_filters() {
    let app = setup_test_app().await;
    let (token, user) = bootstrap_and_login(&app.router).await;
    let user_id = user["id"].as_str().unwrap().to_string();

    let (_, other) = request(
        &app.router,
        "POST",
        "/users",
        Some(&token),
        Some(json!({"nome": "Maria", "email": "maria@x.com", "senha": "654321"})),
    )
    .await;
    let other_id = other["id"].as_str().unwrap().to_string();

    for (titulo, usuario, ativo) in [
        ("a", &user_id, true),
        ("b", &user_id, false),
        ("c", &other_id, true),
    ] {
        let (status, _) = request(
            &app.router,
            "POST",
            "/news",
            Some(&token),
            Some(news_body(titulo, usuario, ativo)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, all) = request(&app.router, "GET", "/news", None, None).await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (_, ativas) = request(&app.router, "GET", "/news?ativas=true", None, None).await;
    let titles: Vec<&str> = ativas
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["titulo"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["a", "c"]);

    let (_, by_user) = request(
        &app.router,
        "GET",
        &format!("/news?usuario={user_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(by_user.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn clique_counter_increments_publicly() {
    let app = setup_test_app().await;
    let (token, user) = bootstrap_and_login(&app.router).await;
    let user_id = user["id"].as_str().unwrap();

    let (_, created) = request(
        &app.router,
        "POST",
        "/news",
        Some(&token),
        Some(news_body("clicável", user_id, true)),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    for expected in 1..=2 {
        let (status, body) = request(
            &app.router,
            "PATCH",
            &format!("/news/{id}/clique"),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cliques"], expected);
    }

    let (status, _) = request(
        &app.router,
        "PATCH",
        &format!("/news/{}/clique", Uuid::new_v4()),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_the_registering_user_leaves_news_readable() {
    let app = setup_test_app().await;
    let (token, _) = bootstrap_and_login(&app.router).await;

    let (_, other) = request(
        &app.router,
        "POST",
        "/users",
        Some(&token),
        Some(json!({"nome": "Maria", "email": "maria@x.com", "senha": "654321"})),
    )
    .await;
    let other_id = other["id"].as_str().unwrap().to_string();

    let (_, created) = request(
        &app.router,
        "POST",
        "/news",
        Some(&token),
        Some(news_body("órfã", &other_id, true)),
    )
    .await;
    let news_id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["usuarioCadastro"]["nome"], "Maria");

    let (status, _) = request(
        &app.router,
        "DELETE",
        &format!("/users/{other_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, fetched) =
        request(&app.router, "GET", &format!("/news/{news_id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["usuarioCadastro"], serde_json::Value::Null);
}

// ---------------------------------------------------------------------------
// Modules
// ---------------------------------------------------------------------------

#[tokio::test]
async fn duplicate_module_titulo_returns_409() {
    let app = setup_test_app().await;
    let (token, _) = bootstrap_and_login(&app.router).await;

    let (status, _) = request(
        &app.router,
        "POST",
        "/modules",
        Some(&token),
        Some(json!({"titulo": "Vendas"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = request(
        &app.router,
        "POST",
        "/modules",
        Some(&token),
        Some(json!({"titulo": "Vendas"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn module_retitle_onto_existing_titulo_conflicts() {
    let app = setup_test_app().await;
    let (token, _) = bootstrap_and_login(&app.router).await;

    let (_, a) = request(
        &app.router,
        "POST",
        "/modules",
        Some(&token),
        Some(json!({"titulo": "A"})),
    )
    .await;
    let (_, _b) = request(
        &app.router,
        "POST",
        "/modules",
        Some(&token),
        Some(json!({"titulo": "B"})),
    )
    .await;

    let a_id = a["id"].as_str().unwrap();
    let (status, _) = request(
        &app.router,
        "PATCH",
        &format!("/modules/{a_id}"),
        Some(&token),
        Some(json!({"titulo": "B"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // retitling onto your own title is fine
    let (status, _) = request(
        &app.router,
        "PATCH",
        &format!("/modules/{a_id}"),
        Some(&token),
        Some(json!({"titulo": "A", "url": "https://exemplo.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn module_reads_are_public() {
    let app = setup_test_app().await;
    let (token, _) = bootstrap_and_login(&app.router).await;

    let (_, created) = request(
        &app.router,
        "POST",
        "/modules",
        Some(&token),
        Some(json!({"titulo": "Vendas", "url": "https://exemplo.com/vendas"})),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, list) = request(&app.router, "GET", "/modules", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, fetched) =
        request(&app.router, "GET", &format!("/modules/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["titulo"], "Vendas");
    assert_eq!(fetched["url"], "https://exemplo.com/vendas");
}

// ---------------------------------------------------------------------------
// Logos
// ---------------------------------------------------------------------------

#[tokio::test]
async fn logo_crud_and_duplicate_titulo() {
    let app = setup_test_app().await;
    let (token, _) = bootstrap_and_login(&app.router).await;

    let (status, created) = request(
        &app.router,
        "POST",
        "/logos",
        Some(&token),
        Some(json!({"titulo": "Empresa", "imagem": "data:image/png;base64,AAAA"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap();

    let (status, _) = request(
        &app.router,
        "POST",
        "/logos",
        Some(&token),
        Some(json!({"titulo": "Empresa", "imagem": "data:image/png;base64,BBBB"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // public read
    let (status, fetched) = request(&app.router, "GET", &format!("/logos/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["titulo"], "Empresa");

    let (status, updated) = request(
        &app.router,
        "PATCH",
        &format!("/logos/{id}"),
        Some(&token),
        Some(json!({"url": "https://exemplo.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["url"], "https://exemplo.com");

    let (status, _) = request(
        &app.router,
        "DELETE",
        &format!("/logos/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = request(&app.router, "GET", &format!("/logos/{id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
