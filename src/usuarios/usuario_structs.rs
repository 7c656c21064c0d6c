// src/usuarios/usuario_structs.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::shared::app_error::AppError;

pub const NOMBRE_MAX: usize = 100;
pub const EMAIL_MAX: usize = 100;
pub const LASTNAME_MAX: usize = 255;
/// bcrypt ignora tudo depois do 72º byte.
pub const PASSWORD_MAX_BYTES: usize = 72;

/// Estrutura que representa um usuário no banco de dados (tabela `usuarios`).
/// A senha é armazenada apenas como hash e nunca é serializada.
#[derive(Debug, Clone, FromRow)]
pub struct Usuario {
    pub id: i32,
    pub nombre: String,
    pub email: String,
    pub lastname: String,
    pub password_hash: Option<String>,
}

/// Estrutura para receber os dados de um usuário nas requisições POST e PUT.
/// O sobrenome também é aceito com a chave `apellido`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NovoUsuario {
    pub nombre: String,
    pub email: String,
    #[serde(alias = "apellido")]
    pub lastname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>, // Senha em texto claro (será hashed antes de salvar)
}

/// Dados já validados e com a senha transformada em hash, prontos para o repositório.
#[derive(Debug, Clone)]
pub struct DadosUsuario {
    pub nombre: String,
    pub email: String,
    pub lastname: String,
    pub password_hash: Option<String>,
}

/// Representação pública do usuário.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsuarioResponse {
    pub id: i32,
    pub nombre: String,
    pub email: String,
    pub lastname: String,
}

impl From<Usuario> for UsuarioResponse {
    fn from(u: Usuario) -> Self {
        UsuarioResponse {
            id: u.id,
            nombre: u.nombre,
            email: u.email,
            lastname: u.lastname,
        }
    }
}

/// Estrutura para receber dados de login do usuário.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String, // Senha em texto claro
}

/// Payload do JWT. O `sub` carrega o e-mail do usuário.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64, // Expiration Time (timestamp Unix)
}

/// Resposta de sucesso do login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
}

impl NovoUsuario {
    /// Normaliza e valida os campos, devolvendo o primeiro problema encontrado.
    pub fn validar(mut self) -> Result<Self, AppError> {
        self.nombre = self.nombre.trim().to_string();
        self.email = self.email.trim().to_string();
        self.lastname = self.lastname.trim().to_string();

        campo_obrigatorio("nombre", &self.nombre, NOMBRE_MAX)?;
        campo_obrigatorio("lastname", &self.lastname, LASTNAME_MAX)?;
        campo_obrigatorio("email", &self.email, EMAIL_MAX)?;

        if !email_valido(&self.email) {
            return Err(AppError::Validation(format!("E-mail inválido: {}", self.email)));
        }

        if let Some(senha) = &self.password {
            if senha.is_empty() {
                return Err(AppError::Validation("A senha não pode ser vazia.".to_string()));
            }
            if senha.len() > PASSWORD_MAX_BYTES {
                return Err(AppError::Validation(format!(
                    "A senha excede {} bytes.",
                    PASSWORD_MAX_BYTES
                )));
            }
        }

        Ok(self)
    }
}

fn campo_obrigatorio(nome: &str, valor: &str, max: usize) -> Result<(), AppError> {
    if valor.is_empty() {
        return Err(AppError::Validation(format!("O campo '{}' é obrigatório.", nome)));
    }
    if valor.chars().count() > max {
        return Err(AppError::Validation(format!(
            "O campo '{}' excede {} caracteres.",
            nome, max
        )));
    }
    Ok(())
}

fn email_valido(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, dominio)) => {
            !local.is_empty()
                && !dominio.contains('@')
                && !email.contains(char::is_whitespace)
                && dominio
                    .split_once('.')
                    .map_or(false, |(antes, depois)| !antes.is_empty() && !depois.is_empty())
        }
        None => false,
    }
}
