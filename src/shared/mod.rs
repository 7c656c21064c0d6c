// src/shared/mod.rs

// Envelope padrão das respostas
pub mod shared_structs;
// Erros da aplicação e mapeamento para status HTTP
pub mod app_error;
// Política de CORS
pub mod cors;
