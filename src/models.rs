pub mod auth;
pub mod cargo;
pub mod catalogo;
pub mod dashboard;
pub mod escopo;
pub mod organizacao;
pub mod vendas;
