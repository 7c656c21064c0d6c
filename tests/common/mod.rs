#![allow(dead_code)]

use actix_web::web;
use serde_json::{json, Value};
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use usuarios_api::usuarios::usuario_repository::{InMemoryUsuarioRepository, PostgresUsuarioRepository};
use usuarios_api::AppState;

pub const JWT_SECRET: &str = "chave_de_testes";
pub const CORS_ORIGEM: &str = "http://localhost:3000";

/// Estado da aplicação sobre o repositório em memória, com bcrypt no custo mínimo.
pub fn estado() -> web::Data<AppState> {
    web::Data::new(AppState {
        repositorio: Arc::new(InMemoryUsuarioRepository::new()),
        jwt_secret: JWT_SECRET.to_string(),
        jwt_expiracao_minutos: 30,
        bcrypt_custo: 4,
    })
}

pub fn usuario_json(nombre: &str, email: &str, lastname: &str, password: Option<&str>) -> Value {
    let mut body = json!({ "nombre": nombre, "email": email, "lastname": lastname });
    if let Some(p) = password {
        body["password"] = json!(p);
    }
    body
}

/// Repositório sobre um Postgres real, apontado por `TEST_DATABASE_URL`.
/// Sem a variável, devolve `None` e o teste chamador é pulado.
pub async fn repositorio_postgres() -> Option<PostgresUsuarioRepository> {
    let url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => url,
        _ => {
            println!("[-] TEST_DATABASE_URL não definida, pulando teste de Postgres.");
            return None;
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Falha ao conectar no Postgres de testes");
    let repo = PostgresUsuarioRepository::new(pool);
    repo.criar_tabela().await.expect("Falha ao criar a tabela de usuários");
    Some(repo)
}

/// E-mail que não colide entre execuções no mesmo banco.
pub fn email_unico(prefixo: &str) -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{}-{}-{}@teste.com", prefixo, std::process::id(), nanos)
}
