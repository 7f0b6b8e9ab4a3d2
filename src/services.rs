pub mod auth;
pub mod catalogo_service;
pub mod dashboard_service;
pub mod escopo_service;
pub mod organizacao_service;
pub mod relatorio_service;
pub mod usuario_service;
pub mod venda_service;
