// src/lib.rs

use actix_web::{
    error::{JsonPayloadError, PathError},
    web, HttpRequest,
};
use std::sync::Arc;

pub mod cliente;  // Cliente HTTP usado pelo frontend
pub mod config;   // Configuração via variáveis de ambiente
pub mod shared;   // Módulo shared
pub mod usuarios; // Módulo de usuários

use shared::app_error::AppError;
use usuarios::usuario_repository::UsuarioRepository;

// Estado compartilhado: repositório de usuários e parâmetros de autenticação.
pub struct AppState {
    pub repositorio: Arc<dyn UsuarioRepository>,
    pub jwt_secret: String, // Chave secreta para JWT
    pub jwt_expiracao_minutos: i64,
    pub bcrypt_custo: u32,
}

/// Corpos JSON malformados viram 400 no mesmo formato dos demais erros.
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("JSON inválido: {}", err)).into()
}

/// IDs que não são inteiros viram 400 com o envelope de erro, e não o texto puro do actix.
fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Parâmetro de rota inválido: {}", err)).into()
}

/// Registra as rotas da API. `/usuarios/me` vem antes de `/usuarios/{id}`.
pub fn configurar_rotas(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(usuarios::usuario_router::buscar_usuarios)
        .service(usuarios::usuario_router::cadastrar_usuario)
        .service(usuarios::usuario_router::usuario_logado)
        .service(usuarios::usuario_router::buscar_usuario_por_id)
        .service(usuarios::usuario_router::atualizar_usuario)
        .service(usuarios::usuario_router::deletar_usuario)
        .service(usuarios::usuario_router::login_usuario);
}
