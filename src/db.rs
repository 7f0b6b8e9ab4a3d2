pub mod user_repo;
pub use user_repo::UserRepository;
pub mod cargo_repo;
pub use cargo_repo::CargoRepository;
pub mod escopo_repo;
pub use escopo_repo::EscopoRepository;
pub mod organizacao_repo;
pub use organizacao_repo::OrganizacaoRepository;
pub mod catalogo_repo;
pub use catalogo_repo::CatalogoRepository;
pub mod vendas_repo;
pub use vendas_repo::VendasRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
