// src/shared/cors.rs

use actix_cors::Cors;
use actix_web::http::header;
use log::debug;

/// Monta a política de CORS liberando apenas a origem configurada (o frontend).
pub fn construir_cors(origem: &str) -> Cors {
    debug!("CORS: origem permitida {}", origem);

    Cors::default()
        .allowed_origin(origem)
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600)
}
