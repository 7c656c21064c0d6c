// src/cliente/mod.rs

// Wrapper HTTP das rotas de usuários, consumido pelo frontend
pub mod usuarios_cliente;
