// src/usuarios/mod.rs

// Declara o submódulo que contém as definições das structs de usuários
pub mod usuario_structs;
// Persistência: trait do repositório, Postgres e memória
pub mod usuario_repository;
// Hash de senha e geração/validação de JWT
pub mod seguranca;
// Declara o submódulo que contém as funções de rota relacionadas a usuários
pub mod usuario_router;
// Extrator de autenticação (Bearer JWT)
pub mod auth_middleware;
