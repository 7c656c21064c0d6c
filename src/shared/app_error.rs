// src/shared/app_error.rs

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use log::error;
use thiserror::Error;

use super::shared_structs::GenericResponse;

/// Código SQLSTATE do Postgres para violação de restrição UNIQUE.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Db(sqlx::Error),
    #[error("erro interno: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::RowNotFound = e {
            return AppError::NotFound("Registro não encontrado.".to_string());
        }

        let violou_unique = matches!(
            &e,
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
        );
        if violou_unique {
            AppError::Conflict("E-mail já cadastrado.".to_string())
        } else {
            AppError::Db(e)
        }
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(e: bcrypt::BcryptError) -> Self {
        AppError::Internal(format!("bcrypt: {}", e))
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        AppError::Internal(format!("jwt: {}", e))
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(e: actix_web::error::BlockingError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Db(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Detalhes de falhas internas ficam apenas no log
        let message = match self {
            Self::Db(e) => {
                error!("Erro de banco de dados: {:?}", e);
                "Erro interno ao acessar o banco de dados.".to_string()
            }
            Self::Internal(detalhe) => {
                error!("Erro interno: {}", detalhe);
                "Erro interno do servidor.".to_string()
            }
            outro => outro.to_string(),
        };

        HttpResponse::build(self.status_code()).json(GenericResponse::erro(message))
    }
}
