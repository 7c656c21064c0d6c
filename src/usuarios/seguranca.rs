// src/usuarios/seguranca.rs

use bcrypt::{hash, verify, BcryptResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::usuario_structs::Claims;
use crate::shared::app_error::AppError;

pub fn hash_senha(senha: &str, custo: u32) -> BcryptResult<String> {
    hash(senha, custo)
}

pub fn verificar_senha(senha: &str, senha_hash: &str) -> BcryptResult<bool> {
    verify(senha, senha_hash)
}

/// Gera um JWT HS256 com o e-mail como `sub` e expiração em `minutos`.
pub fn gerar_token(email: &str, jwt_secret: &str, minutos: i64) -> Result<String, AppError> {
    let exp = Duration::try_minutes(minutos)
        .and_then(|validade| Utc::now().checked_add_signed(validade))
        .ok_or_else(|| AppError::Internal(format!("expiração de {} minutos fora do intervalo", minutos)))?
        .timestamp();
    let claims = Claims {
        sub: email.to_string(),
        exp,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )?;
    Ok(token)
}

/// Valida assinatura e expiração, devolvendo as claims.
pub fn decodificar_token(token: &str, jwt_secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_ref()),
        &validation,
    )
    .map(|data| data.claims)
}
