// src/usuarios/usuario_router.rs

use actix_web::{delete, get, post, put, web, HttpResponse};
use log::info;

use super::auth_middleware::UsuarioAutenticado;
use super::seguranca::{gerar_token, hash_senha, verificar_senha};
use super::usuario_structs::{AuthResponse, DadosUsuario, LoginRequest, NovoUsuario, UsuarioResponse};
use crate::shared::app_error::AppError;
use crate::shared::shared_structs::GenericResponse;
use crate::AppState;

fn nao_encontrado(id: i32) -> AppError {
    AppError::NotFound(format!("Usuario com ID {} não encontrado.", id))
}

/// Valida o corpo e, se houver senha, gera o hash fora da thread do servidor.
async fn preparar_dados(data: &AppState, novo: NovoUsuario) -> Result<DadosUsuario, AppError> {
    let novo = novo.validar()?;

    let password_hash = match novo.password {
        Some(senha) => {
            let custo = data.bcrypt_custo;
            Some(web::block(move || hash_senha(&senha, custo)).await??)
        }
        None => None,
    };

    Ok(DadosUsuario {
        nombre: novo.nombre,
        email: novo.email,
        lastname: novo.lastname,
        password_hash,
    })
}

/// Rota para listar todos os usuários.
#[get("/usuarios")]
pub async fn buscar_usuarios(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let usuarios: Vec<UsuarioResponse> = data
        .repositorio
        .listar()
        .await?
        .into_iter()
        .map(UsuarioResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(usuarios))
}

/// Rota para cadastrar um novo usuário. E-mail repetido gera 409.
#[post("/usuarios")]
pub async fn cadastrar_usuario(
    data: web::Data<AppState>,
    novo_usuario: web::Json<NovoUsuario>,
) -> Result<HttpResponse, AppError> {
    // 1. Validar os campos e fazer o hash da senha
    let dados = preparar_dados(&data, novo_usuario.into_inner()).await?;

    // 2. Verificar se o e-mail já está em uso
    if data.repositorio.buscar_por_email(&dados.email).await?.is_some() {
        return Err(AppError::Conflict("E-mail já cadastrado.".to_string()));
    }

    // 3. Inserir o novo usuário no banco de dados
    let usuario = data.repositorio.inserir(dados).await?;
    info!("Usuário {} cadastrado", usuario.id);

    Ok(HttpResponse::Created().json(UsuarioResponse::from(usuario)))
}

/// Rota protegida: devolve o usuário dono do token.
#[get("/usuarios/me")]
pub async fn usuario_logado(
    data: web::Data<AppState>,
    autenticado: UsuarioAutenticado,
) -> Result<HttpResponse, AppError> {
    let usuario = data
        .repositorio
        .buscar_por_email(&autenticado.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Usuário do token não existe mais.".to_string()))?;

    Ok(HttpResponse::Ok().json(UsuarioResponse::from(usuario)))
}

/// Rota para buscar um usuário por ID.
#[get("/usuarios/{id}")]
pub async fn buscar_usuario_por_id(
    data: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let usuario = data
        .repositorio
        .buscar_por_id(id)
        .await?
        .ok_or_else(|| nao_encontrado(id))?;

    Ok(HttpResponse::Ok().json(UsuarioResponse::from(usuario)))
}

/// Rota para atualizar um usuário existente (sobrescreve todos os campos).
#[put("/usuarios/{id}")]
pub async fn atualizar_usuario(
    data: web::Data<AppState>,
    path: web::Path<i32>,
    item: web::Json<NovoUsuario>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    if data.repositorio.buscar_por_id(id).await?.is_none() {
        return Err(nao_encontrado(id));
    }

    let dados = preparar_dados(&data, item.into_inner()).await?;
    let usuario = data.repositorio.atualizar(id, dados).await?;
    info!("Usuário {} atualizado", id);

    Ok(HttpResponse::Ok().json(UsuarioResponse::from(usuario)))
}

/// Rota para deletar um usuário.
#[delete("/usuarios/{id}")]
pub async fn deletar_usuario(
    data: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    data.repositorio.remover(id).await?;
    info!("Usuário {} removido", id);

    Ok(HttpResponse::Ok().json(GenericResponse::sucesso(format!(
        "Usuario com ID {} deletado com sucesso.",
        id
    ))))
}

/// Rota para login: confere a senha e devolve um JWT com o e-mail como `sub`.
#[post("/login")]
pub async fn login_usuario(
    data: web::Data<AppState>,
    login_request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let credenciais_invalidas = || AppError::Unauthorized("Credenciais inválidas.".to_string());
    let LoginRequest { email, password } = login_request.into_inner();

    // 1. Buscar o usuário pelo e-mail
    let usuario = data
        .repositorio
        .buscar_por_email(email.trim())
        .await?
        .ok_or_else(credenciais_invalidas)?;

    // 2. Verificar a senha (usuários cadastrados sem senha não podem fazer login)
    let senha_hash = usuario.password_hash.clone().ok_or_else(credenciais_invalidas)?;

    let confere = web::block(move || verificar_senha(&password, &senha_hash)).await??;
    if !confere {
        return Err(credenciais_invalidas());
    }

    // 3. Gerar o JWT
    let token = gerar_token(&usuario.email, &data.jwt_secret, data.jwt_expiracao_minutos)?;
    info!("Login bem-sucedido para o usuário {}", usuario.id);

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "bearer".to_string(),
    }))
}
