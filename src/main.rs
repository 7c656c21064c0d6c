// src/main.rs

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{error, info};
use std::io;
use std::sync::Arc;

use usuarios_api::config::EnvConfig;
use usuarios_api::shared::cors::construir_cors;
use usuarios_api::usuarios::usuario_repository::PostgresUsuarioRepository;
use usuarios_api::{configurar_rotas, AppState};

fn erro_io(contexto: &str, e: impl std::fmt::Display) -> io::Error {
    error!("{}: {}", contexto, e);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", contexto, e))
}

// Função principal da aplicação Actix Web.
#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = EnvConfig::from_env().map_err(|e| erro_io("Configuração inválida", e))?;

    let repositorio = PostgresUsuarioRepository::conectar(&config)
        .await
        .map_err(|e| erro_io("Falha ao conectar ao banco PostgreSQL", e))?;
    repositorio
        .criar_tabela()
        .await
        .map_err(|e| erro_io("Falha ao criar a tabela de usuários", e))?;

    // web::Data compartilha o estado imutável entre as workers.
    let app_state = web::Data::new(AppState {
        repositorio: Arc::new(repositorio),
        jwt_secret: config.jwt_secret.clone(),
        jwt_expiracao_minutos: config.jwt_expiracao_minutos,
        bcrypt_custo: config.bcrypt_custo,
    });

    let cors_origem = config.cors_origem.clone();
    let addr = config.bind_addr();
    info!("Iniciando API de usuários em {}:{}...", addr.0, addr.1);

    HttpServer::new(move || {
        App::new()
            .wrap(construir_cors(&cors_origem))
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .configure(configurar_rotas)
    })
    .bind(addr)?
    .run()
    .await
}
