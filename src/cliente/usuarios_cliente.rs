// src/cliente/usuarios_cliente.rs

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::shared::shared_structs::GenericResponse;
use crate::usuarios::usuario_structs::{AuthResponse, LoginRequest, NovoUsuario, UsuarioResponse};

#[derive(Debug, Error)]
pub enum ClienteError {
    #[error("falha na requisição: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API respondeu {status}: {message}")]
    Api { status: StatusCode, message: String },
}

impl ClienteError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClienteError::Http(e) => e.status(),
            ClienteError::Api { status, .. } => Some(*status),
        }
    }
}

/// Cliente das rotas `/usuarios` e `/login`. Depois do `login`, o token é
/// enviado como Bearer nas chamadas seguintes.
#[derive(Debug, Clone)]
pub struct UsuariosClient {
    base_url: String,
    http: Client,
    token: Option<String>,
}

impl UsuariosClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        UsuariosClient {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            token: None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, caminho: &str) -> String {
        format!("{}{}", self.base_url, caminho)
    }

    fn autenticar(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn enviar<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClienteError> {
        let resp = self.autenticar(req).send().await?;
        Ok(verificar(resp).await?.json::<T>().await?)
    }

    pub async fn listar(&self) -> Result<Vec<UsuarioResponse>, ClienteError> {
        self.enviar(self.http.get(self.url("/usuarios"))).await
    }

    pub async fn obter(&self, id: i32) -> Result<UsuarioResponse, ClienteError> {
        self.enviar(self.http.get(self.url(&format!("/usuarios/{}", id)))).await
    }

    pub async fn criar(&self, usuario: &NovoUsuario) -> Result<UsuarioResponse, ClienteError> {
        self.enviar(self.http.post(self.url("/usuarios")).json(usuario)).await
    }

    pub async fn atualizar(&self, id: i32, usuario: &NovoUsuario) -> Result<UsuarioResponse, ClienteError> {
        self.enviar(self.http.put(self.url(&format!("/usuarios/{}", id))).json(usuario))
            .await
    }

    pub async fn deletar(&self, id: i32) -> Result<(), ClienteError> {
        let _: GenericResponse<serde_json::Value> = self
            .enviar(self.http.delete(self.url(&format!("/usuarios/{}", id))))
            .await?;
        Ok(())
    }

    /// Faz login e guarda o token para as próximas chamadas.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<String, ClienteError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let auth: AuthResponse = self
            .enviar(self.http.post(self.url("/login")).json(&body))
            .await?;

        self.token = Some(auth.access_token.clone());
        Ok(auth.access_token)
    }

    pub async fn me(&self) -> Result<UsuarioResponse, ClienteError> {
        self.enviar(self.http.get(self.url("/usuarios/me"))).await
    }
}

/// Converte respostas fora da faixa 2xx em `ClienteError::Api`.
async fn verificar(resp: Response) -> Result<Response, ClienteError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let texto = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<GenericResponse<serde_json::Value>>(&texto)
        .map(|r| r.message)
        .unwrap_or(texto);

    Err(ClienteError::Api { status, message })
}
