use uuid::Uuid;

use rede_core::error::AppError;
use rede_core::models::{NewUser, UserUpdate};

use crate::common::setup_test_db;

fn new_user(email: &str) -> NewUser {
    NewUser {
        nome: "João".to_string(),
        email: email.to_string(),
        senha_hash: "$2b$10$fakehashfakehashfakehashfakehashfakehashfakehashfake".to_string(),
        modulos: vec![],
    }
}

#[tokio::test]
async fn create_and_fetch_user() {
    let (db, _container) = setup_test_db().await;
    let users = db.users();

    let created = users.create(&new_user("joao@x.com")).await.unwrap();
    assert_eq!(created.nome, "João");
    assert_eq!(created.email, "joao@x.com");
    assert!(created.modulos.is_empty());

    let fetched = users.get(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, created.id);

    let auth = users.find_by_email("joao@x.com").await.unwrap().unwrap();
    assert_eq!(auth.user.id, created.id);
    assert!(auth.senha_hash.starts_with("$2b$10$"));
}

#[tokio::test]
async fn email_lookup_is_exact_match() {
    let (db, _container) = setup_test_db().await;
    let users = db.users();

    users.create(&new_user("joao@x.com")).await.unwrap();
    assert!(users.find_by_email("JOAO@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let (db, _container) = setup_test_db().await;
    let users = db.users();

    users.create(&new_user("joao@x.com")).await.unwrap();
    let err = users.create(&new_user("joao@x.com")).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");
}

#[tokio::test]
async fn update_changes_only_provided_fields() {
    let (db, _container) = setup_test_db().await;
    let users = db.users();

    let created = users.create(&new_user("joao@x.com")).await.unwrap();
    let updated = users
        .update(
            created.id,
            &UserUpdate {
                nome: Some("Maria".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.nome, "Maria");
    assert_eq!(updated.email, "joao@x.com");

    let auth = users.find_by_email("joao@x.com").await.unwrap().unwrap();
    assert!(auth.senha_hash.starts_with("$2b$10$"), "hash untouched");
}

#[tokio::test]
async fn update_missing_user_returns_none() {
    let (db, _container) = setup_test_db().await;

    let result = db
        .users()
        .update(Uuid::new_v4(), &UserUpdate::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn delete_user() {
    let (db, _container) = setup_test_db().await;
    let users = db.users();

    let created = users.create(&new_user("joao@x.com")).await.unwrap();
    assert!(users.delete(created.id).await.unwrap());
    assert!(users.get(created.id).await.unwrap().is_none());
    assert!(!users.delete(created.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Module membership
// ---------------------------------------------------------------------------

#[tokio::test]
async fn attach_module_appends_and_persists() {
    let (db, _container) = setup_test_db().await;
    let users = db.users();

    let user = users.create(&new_user("joao@x.com")).await.unwrap();
    let m1 = Uuid::new_v4();

    let updated = users.attach_module(user.id, m1, "Vendas").await.unwrap();
    assert_eq!(updated.modulos.len(), 1);
    assert_eq!(updated.modulos[0].module_id, m1);
    assert_eq!(updated.modulos[0].titulo, "Vendas");
    assert!(updated.modulos[0].ativo);

    // persisted, not just returned
    let listed = users.list_modules(user.id).await.unwrap();
    assert_eq!(listed, updated.modulos);
}

#[tokio::test]
async fn attach_is_idempotent_per_module() {
    let (db, _container) = setup_test_db().await;
    let users = db.users();

    let user = users.create(&new_user("joao@x.com")).await.unwrap();
    let m1 = Uuid::new_v4();

    users.attach_module(user.id, m1, "Vendas").await.unwrap();
    let updated = users.attach_module(user.id, m1, "Vendas").await.unwrap();
    assert_eq!(updated.modulos.len(), 1);
    assert!(updated.modulos[0].ativo);
}

#[tokio::test]
async fn reattach_keeps_original_titulo() {
    let (db, _container) = setup_test_db().await;
    let users = db.users();

    let user = users.create(&new_user("joao@x.com")).await.unwrap();
    let m1 = Uuid::new_v4();

    users.attach_module(user.id, m1, "A").await.unwrap();
    users.set_module_active(user.id, m1, false).await.unwrap();
    let updated = users.attach_module(user.id, m1, "B").await.unwrap();

    assert_eq!(updated.modulos.len(), 1);
    assert_eq!(updated.modulos[0].titulo, "A");
    assert!(updated.modulos[0].ativo);
}

#[tokio::test]
async fn set_active_distinguishes_user_and_membership_absence() {
    let (db, _container) = setup_test_db().await;
    let users = db.users();

    let user = users.create(&new_user("joao@x.com")).await.unwrap();
    let m1 = Uuid::new_v4();

    let missing_membership = users
        .set_module_active(user.id, m1, false)
        .await
        .unwrap_err();
    let missing_user = users
        .set_module_active(Uuid::new_v4(), m1, false)
        .await
        .unwrap_err();

    assert!(matches!(missing_membership, AppError::NotFound(_)));
    assert!(matches!(missing_user, AppError::NotFound(_)));
    assert_ne!(missing_membership.to_string(), missing_user.to_string());
}

#[tokio::test]
async fn detach_is_idempotent() {
    let (db, _container) = setup_test_db().await;
    let users = db.users();

    let user = users.create(&new_user("joao@x.com")).await.unwrap();
    let m1 = Uuid::new_v4();
    let never_attached = Uuid::new_v4();

    users.attach_module(user.id, m1, "Vendas").await.unwrap();

    let updated = users.detach_module(user.id, never_attached).await.unwrap();
    assert_eq!(updated.modulos.len(), 1, "no-op on absent membership");

    let updated = users.detach_module(user.id, m1).await.unwrap();
    assert!(updated.modulos.is_empty());
}

#[tokio::test]
async fn list_modules_for_missing_user_fails() {
    let (db, _container) = setup_test_db().await;

    let err = db.users().list_modules(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn memberships_keep_attach_order() {
    let (db, _container) = setup_test_db().await;
    let users = db.users();

    let user = users.create(&new_user("joao@x.com")).await.unwrap();
    let all: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
    for (i, id) in all.iter().enumerate() {
        users
            .attach_module(user.id, *id, &format!("m{i}"))
            .await
            .unwrap();
    }

    let listed = users.list_modules(user.id).await.unwrap();
    let got: Vec<Uuid> = listed.iter().map(|m| m.module_id).collect();
    assert_eq!(got, all);
}

#[tokio::test]
async fn deleting_a_module_record_keeps_membership_copies() {
    let (db, _container) = setup_test_db().await;
    let users = db.users();
    let modules = db.modules();

    let user = users.create(&new_user("joao@x.com")).await.unwrap();
    let module = modules
        .create(&rede_core::models::NewModule {
            titulo: "Vendas".to_string(),
            url: None,
        })
        .await
        .unwrap();

    users
        .attach_module(user.id, module.id, &module.titulo)
        .await
        .unwrap();
    assert!(modules.delete(module.id).await.unwrap());

    let listed = users.list_modules(user.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].titulo, "Vendas");
}
