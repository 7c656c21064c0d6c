// src/usuarios/auth_middleware.rs

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};

use futures::future::{ready, Ready};
use log::{error, warn};

use super::seguranca::decodificar_token;
use crate::shared::app_error::AppError;
use crate::AppState;

/// Usuário autenticado extraído do JWT; o e-mail vem do `sub`.
#[derive(Debug, Clone)]
pub struct UsuarioAutenticado {
    pub email: String,
}

/// Extrator de autenticação para Actix Web.
/// Valida o token JWT presente no cabeçalho `Authorization: Bearer <token>`.
impl FromRequest for UsuarioAutenticado {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extrair(req))
    }
}

fn extrair(req: &HttpRequest) -> Result<UsuarioAutenticado, AppError> {
    let jwt_secret = match req.app_data::<web::Data<AppState>>() {
        Some(state) => state.jwt_secret.clone(),
        None => {
            error!("AppState não disponível no extrator de autenticação.");
            return Err(AppError::Internal("AppState ausente".to_string()));
        }
    };

    let header_str = req
        .headers()
        .get("Authorization")
        .ok_or_else(|| AppError::Unauthorized("Token de autenticação ausente.".to_string()))?
        .to_str()
        .map_err(|_| AppError::Unauthorized("Token de autenticação inválido.".to_string()))?;

    let token = header_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Formato de token inválido. Esperado 'Bearer <token>'.".to_string()))?;

    match decodificar_token(token.trim(), &jwt_secret) {
        Ok(claims) => Ok(UsuarioAutenticado { email: claims.sub }),
        Err(e) => {
            warn!("Falha ao validar JWT: {:?}", e);
            let error_message = match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => "Token expirado.",
                jsonwebtoken::errors::ErrorKind::InvalidSignature => "Assinatura do token inválida.",
                jsonwebtoken::errors::ErrorKind::InvalidToken => "Token malformado.",
                _ => "Token de autenticação inválido.",
            };
            Err(AppError::Unauthorized(error_message.to_string()))
        }
    }
}
