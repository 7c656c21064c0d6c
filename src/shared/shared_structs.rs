// src/shared/shared_structs.rs

use serde::{Deserialize, Serialize};

/// Estrutura genérica para padronizar as respostas da API.
/// 'T' é o tipo do corpo da resposta, que pode ser opcional.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenericResponse<T> {
    pub status: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")] // Não serializa 'body' se for None
    pub body: Option<T>,
}

impl GenericResponse<()> {
    pub fn sucesso(message: impl Into<String>) -> Self {
        GenericResponse {
            status: "success".to_string(),
            message: message.into(),
            body: None,
        }
    }

    pub fn erro(message: impl Into<String>) -> Self {
        GenericResponse {
            status: "error".to_string(),
            message: message.into(),
            body: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omite_body_quando_vazio() {
        let json = serde_json::to_value(GenericResponse::erro("falhou")).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "error", "message": "falhou" }));
    }
}
