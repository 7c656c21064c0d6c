// Testes do repositório sobre o Postgres real (SQL de produção).
// Rodam apenas com TEST_DATABASE_URL=postgres://... definida.

mod common;

use actix_web::{http::StatusCode, test, web, App};
use common::{email_unico, repositorio_postgres, usuario_json, JWT_SECRET};
use serde_json::{json, Value};
use std::sync::Arc;

use usuarios_api::configurar_rotas;
use usuarios_api::shared::app_error::AppError;
use usuarios_api::usuarios::usuario_repository::UsuarioRepository;
use usuarios_api::usuarios::usuario_structs::DadosUsuario;
use usuarios_api::AppState;

fn dados(email: &str, password_hash: Option<&str>) -> DadosUsuario {
    DadosUsuario {
        nombre: "Ana".to_string(),
        email: email.to_string(),
        lastname: "Souza".to_string(),
        password_hash: password_hash.map(str::to_string),
    }
}

#[actix_web::test]
async fn inserir_buscar_e_listar() {
    let Some(repo) = repositorio_postgres().await else { return };
    let email = email_unico("inserir");

    let criado = repo.inserir(dados(&email, None)).await.unwrap();
    assert!(criado.id > 0);
    assert!(criado.password_hash.is_none());

    let por_id = repo.buscar_por_id(criado.id).await.unwrap().unwrap();
    assert_eq!(por_id.email, email);
    let por_email = repo.buscar_por_email(&email).await.unwrap().unwrap();
    assert_eq!(por_email.id, criado.id);
    assert!(repo.listar().await.unwrap().iter().any(|u| u.id == criado.id));

    repo.remover(criado.id).await.unwrap();
}

#[actix_web::test]
async fn criar_tabela_e_idempotente() {
    let Some(repo) = repositorio_postgres().await else { return };
    repo.criar_tabela().await.unwrap();
    repo.criar_tabela().await.unwrap();
}

#[actix_web::test]
async fn email_duplicado_vira_conflito_no_insert_e_no_update() {
    let Some(repo) = repositorio_postgres().await else { return };
    let email_a = email_unico("dup-a");
    let email_b = email_unico("dup-b");

    let a = repo.inserir(dados(&email_a, None)).await.unwrap();
    let b = repo.inserir(dados(&email_b, None)).await.unwrap();

    let err = repo.inserir(dados(&email_a, None)).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "veio {:?}", err);

    let err = repo.atualizar(b.id, dados(&email_a, None)).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "veio {:?}", err);

    repo.remover(a.id).await.unwrap();
    repo.remover(b.id).await.unwrap();
}

#[actix_web::test]
async fn atualizar_preserva_ou_troca_o_hash() {
    let Some(repo) = repositorio_postgres().await else { return };
    let email = email_unico("hash");

    let criado = repo.inserir(dados(&email, Some("hash-antigo"))).await.unwrap();

    let mut novos = dados(&email, None);
    novos.nombre = "Beatriz".to_string();
    let atualizado = repo.atualizar(criado.id, novos).await.unwrap();
    assert_eq!(atualizado.nombre, "Beatriz");
    assert_eq!(atualizado.password_hash.as_deref(), Some("hash-antigo"));

    let trocado = repo.atualizar(criado.id, dados(&email, Some("hash-novo"))).await.unwrap();
    assert_eq!(trocado.password_hash.as_deref(), Some("hash-novo"));

    repo.remover(criado.id).await.unwrap();
}

#[actix_web::test]
async fn ids_inexistentes_viram_not_found() {
    let Some(repo) = repositorio_postgres().await else { return };
    let criado = repo.inserir(dados(&email_unico("ausente"), None)).await.unwrap();
    repo.remover(criado.id).await.unwrap();

    assert!(repo.buscar_por_id(criado.id).await.unwrap().is_none());
    assert!(matches!(repo.remover(criado.id).await, Err(AppError::NotFound(_))));
    let err = repo
        .atualizar(criado.id, dados(&email_unico("ausente"), None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[actix_web::test]
async fn fluxo_http_completo_sobre_postgres() {
    let Some(repo) = repositorio_postgres().await else { return };
    let state = web::Data::new(AppState {
        repositorio: Arc::new(repo),
        jwt_secret: JWT_SECRET.to_string(),
        jwt_expiracao_minutos: 30,
        bcrypt_custo: 4,
    });
    let app = test::init_service(App::new().app_data(state.clone()).configure(configurar_rotas)).await;
    let email = email_unico("http");

    let req = test::TestRequest::post()
        .uri("/usuarios")
        .set_json(usuario_json("Ana", &email, "Souza", Some("segredo123")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let criado: Value = test::read_body_json(resp).await;
    let uri = format!("/usuarios/{}", criado["id"]);

    // PUT sem senha mantém o login funcionando
    let req = test::TestRequest::put()
        .uri(&uri)
        .set_json(usuario_json("Ana Maria", &email, "Silva", None))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": email, "password": "segredo123" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::delete().uri(&uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let req = test::TestRequest::get().uri(&uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}
