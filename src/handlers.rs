pub mod auth;
pub mod catalogo;
pub mod dashboard;
pub mod organizacao;
pub mod relatorios;
pub mod usuarios;
pub mod vendas;
