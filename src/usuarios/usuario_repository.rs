// src/usuarios/usuario_repository.rs

use async_trait::async_trait;
use log::{debug, info};
use sqlx::postgres::PgPoolOptions;
use sqlx::{query, query_as, Pool, Postgres};
use std::sync::Mutex;

use super::usuario_structs::{DadosUsuario, Usuario};
use crate::config::EnvConfig;
use crate::shared::app_error::AppError;

const SELECT_USUARIO: &str = "SELECT id, nombre, email, lastname, password_hash FROM usuarios";

/// Operações de persistência de usuários.
///
/// `atualizar` sobrescreve nombre, email e lastname; o hash da senha só é trocado
/// quando `dados.password_hash` vem preenchido.
#[async_trait]
pub trait UsuarioRepository: Send + Sync {
    async fn listar(&self) -> Result<Vec<Usuario>, AppError>;
    async fn buscar_por_id(&self, id: i32) -> Result<Option<Usuario>, AppError>;
    async fn buscar_por_email(&self, email: &str) -> Result<Option<Usuario>, AppError>;
    async fn inserir(&self, dados: DadosUsuario) -> Result<Usuario, AppError>;
    async fn atualizar(&self, id: i32, dados: DadosUsuario) -> Result<Usuario, AppError>;
    async fn remover(&self, id: i32) -> Result<(), AppError>;
}

/// Repositório sobre o pool do Postgres. Cada chamada pega uma conexão do pool
/// e a devolve ao final, com ou sem erro.
pub struct PostgresUsuarioRepository {
    db_pool: Pool<Postgres>,
}

impl PostgresUsuarioRepository {
    pub fn new(db_pool: Pool<Postgres>) -> Self {
        Self { db_pool }
    }

    pub async fn conectar(config: &EnvConfig) -> Result<Self, AppError> {
        info!("Conectando ao banco {}", config.database_url());

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(config.connect_options())
            .await?;

        Ok(Self::new(db_pool))
    }

    /// Cria a tabela `usuarios` caso ainda não exista.
    pub async fn criar_tabela(&self) -> Result<(), AppError> {
        query(
            "CREATE TABLE IF NOT EXISTS usuarios (
                id SERIAL PRIMARY KEY,
                nombre VARCHAR(100) NOT NULL,
                email VARCHAR(100) NOT NULL UNIQUE,
                lastname VARCHAR(255) NOT NULL,
                password_hash VARCHAR(255)
            )",
        )
        .execute(&self.db_pool)
        .await?;

        info!("Tabela 'usuarios' verificada");
        Ok(())
    }
}

#[async_trait]
impl UsuarioRepository for PostgresUsuarioRepository {
    async fn listar(&self) -> Result<Vec<Usuario>, AppError> {
        let usuarios = query_as::<_, Usuario>(&format!("{} ORDER BY id", SELECT_USUARIO))
            .fetch_all(&self.db_pool)
            .await?;
        Ok(usuarios)
    }

    async fn buscar_por_id(&self, id: i32) -> Result<Option<Usuario>, AppError> {
        let usuario = query_as::<_, Usuario>(&format!("{} WHERE id = $1", SELECT_USUARIO))
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?;
        Ok(usuario)
    }

    async fn buscar_por_email(&self, email: &str) -> Result<Option<Usuario>, AppError> {
        let usuario = query_as::<_, Usuario>(&format!("{} WHERE email = $1", SELECT_USUARIO))
            .bind(email)
            .fetch_optional(&self.db_pool)
            .await?;
        Ok(usuario)
    }

    async fn inserir(&self, dados: DadosUsuario) -> Result<Usuario, AppError> {
        let usuario = query_as::<_, Usuario>(
            "INSERT INTO usuarios (nombre, email, lastname, password_hash) VALUES ($1, $2, $3, $4)
             RETURNING id, nombre, email, lastname, password_hash",
        )
        .bind(&dados.nombre)
        .bind(&dados.email)
        .bind(&dados.lastname)
        .bind(&dados.password_hash)
        .fetch_one(&self.db_pool)
        .await?;

        debug!("Usuário {} inserido", usuario.id);
        Ok(usuario)
    }

    async fn atualizar(&self, id: i32, dados: DadosUsuario) -> Result<Usuario, AppError> {
        let usuario = query_as::<_, Usuario>(
            "UPDATE usuarios
             SET nombre = $1, email = $2, lastname = $3, password_hash = COALESCE($4, password_hash)
             WHERE id = $5
             RETURNING id, nombre, email, lastname, password_hash",
        )
        .bind(&dados.nombre)
        .bind(&dados.email)
        .bind(&dados.lastname)
        .bind(&dados.password_hash)
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?;

        usuario.ok_or_else(|| AppError::NotFound(format!("Usuario com ID {} não encontrado.", id)))
    }

    async fn remover(&self, id: i32) -> Result<(), AppError> {
        let res = query("DELETE FROM usuarios WHERE id = $1")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        if res.rows_affected() > 0 {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Usuario com ID {} não encontrado.", id)))
        }
    }
}

/// Repositório em memória usado pelos testes, com as mesmas regras de id
/// auto-incrementado e e-mail único da tabela. O binário usa sempre o Postgres.
#[derive(Default)]
pub struct InMemoryUsuarioRepository {
    estado: Mutex<EstadoMemoria>,
}

#[derive(Default)]
struct EstadoMemoria {
    proximo_id: i32,
    usuarios: Vec<Usuario>,
}

impl InMemoryUsuarioRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, EstadoMemoria>, AppError> {
        self.estado
            .lock()
            .map_err(|_| AppError::Internal("mutex do repositório envenenado".to_string()))
    }
}

fn email_em_uso(usuarios: &[Usuario], email: &str, exceto_id: Option<i32>) -> bool {
    usuarios
        .iter()
        .any(|u| u.email == email && Some(u.id) != exceto_id)
}

#[async_trait]
impl UsuarioRepository for InMemoryUsuarioRepository {
    async fn listar(&self) -> Result<Vec<Usuario>, AppError> {
        Ok(self.lock()?.usuarios.clone())
    }

    async fn buscar_por_id(&self, id: i32) -> Result<Option<Usuario>, AppError> {
        Ok(self.lock()?.usuarios.iter().find(|u| u.id == id).cloned())
    }

    async fn buscar_por_email(&self, email: &str) -> Result<Option<Usuario>, AppError> {
        Ok(self.lock()?.usuarios.iter().find(|u| u.email == email).cloned())
    }

    async fn inserir(&self, dados: DadosUsuario) -> Result<Usuario, AppError> {
        let mut estado = self.lock()?;
        if email_em_uso(&estado.usuarios, &dados.email, None) {
            return Err(AppError::Conflict("E-mail já cadastrado.".to_string()));
        }

        estado.proximo_id += 1;
        let usuario = Usuario {
            id: estado.proximo_id,
            nombre: dados.nombre,
            email: dados.email,
            lastname: dados.lastname,
            password_hash: dados.password_hash,
        };
        estado.usuarios.push(usuario.clone());
        Ok(usuario)
    }

    async fn atualizar(&self, id: i32, dados: DadosUsuario) -> Result<Usuario, AppError> {
        let mut estado = self.lock()?;
        if email_em_uso(&estado.usuarios, &dados.email, Some(id)) {
            return Err(AppError::Conflict("E-mail já cadastrado.".to_string()));
        }

        let usuario = estado
            .usuarios
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Usuario com ID {} não encontrado.", id)))?;

        usuario.nombre = dados.nombre;
        usuario.email = dados.email;
        usuario.lastname = dados.lastname;
        if dados.password_hash.is_some() {
            usuario.password_hash = dados.password_hash;
        }
        Ok(usuario.clone())
    }

    async fn remover(&self, id: i32) -> Result<(), AppError> {
        let mut estado = self.lock()?;
        let antes = estado.usuarios.len();
        estado.usuarios.retain(|u| u.id != id);

        if estado.usuarios.len() < antes {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Usuario com ID {} não encontrado.", id)))
        }
    }
}
