// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,
        handlers::auth::get_my_equipes,
        handlers::auth::get_my_unidades,
        handlers::auth::list_cargos,
        handlers::auth::list_tipos_equipe,

        // --- Organização ---
        handlers::organizacao::list_conglomerados,
        handlers::organizacao::create_conglomerado,
        handlers::organizacao::update_conglomerado,
        handlers::organizacao::delete_conglomerado,
        handlers::organizacao::list_grupos,
        handlers::organizacao::create_grupo,
        handlers::organizacao::update_grupo,
        handlers::organizacao::delete_grupo,
        handlers::organizacao::list_marcas,
        handlers::organizacao::create_marca,
        handlers::organizacao::update_marca,
        handlers::organizacao::delete_marca,
        handlers::organizacao::list_unidades,
        handlers::organizacao::create_unidade,
        handlers::organizacao::update_unidade,
        handlers::organizacao::delete_unidade,
        handlers::organizacao::list_equipes,
        handlers::organizacao::create_equipe,
        handlers::organizacao::update_equipe,
        handlers::organizacao::delete_equipe,

        // --- Usuários ---
        handlers::usuarios::list_usuarios,
        handlers::usuarios::get_usuario,
        handlers::usuarios::create_usuario,
        handlers::usuarios::update_usuario,
        handlers::usuarios::reset_password,
        handlers::usuarios::delete_usuario,
        handlers::usuarios::list_usuarios_equipes,
        handlers::usuarios::add_usuario_equipes,
        handlers::usuarios::delete_usuario_equipe,

        // --- Catálogo ---
        handlers::catalogo::list_produtos,
        handlers::catalogo::create_produto,
        handlers::catalogo::update_produto,
        handlers::catalogo::delete_produto,
        handlers::catalogo::list_produtos_unidades,
        handlers::catalogo::create_produto_unidade,
        handlers::catalogo::update_produto_unidade,
        handlers::catalogo::delete_produto_unidade,
        handlers::catalogo::list_produtos_da_unidade,

        // --- Vendas ---
        handlers::vendas::create_venda,
        handlers::vendas::list_vendas,
        handlers::vendas::get_venda,

        // --- Relatórios ---
        handlers::relatorios::relatorio_vendas,
        handlers::relatorios::exportar_vendas_csv,

        // --- Dashboard ---
        handlers::dashboard::get_resumo,
        handlers::dashboard::get_resumo_admin,
    ),
    components(
        schemas(
            // --- Auth / Usuários ---
            models::auth::TipoEmpresa,
            models::auth::Usuario,
            models::auth::LoginPayload,
            models::auth::AuthResponse,
            models::auth::UsuarioCompleto,
            models::auth::UsuarioResumo,
            models::auth::CriarUsuarioPayload,
            models::auth::AtualizarUsuarioPayload,
            models::auth::RedefinirSenhaPayload,
            models::auth::AdicionarEquipesPayload,
            models::auth::EquipesAdicionadas,
            models::auth::VinculoEquipe,
            models::auth::UsuarioComEquipes,

            // --- Cargos e escopo ---
            models::cargo::Cargo,
            models::cargo::TipoEquipe,
            models::escopo::Escopo,
            models::escopo::Vinculos,

            // --- Organização ---
            models::organizacao::Conglomerado,
            models::organizacao::Grupo,
            models::organizacao::GrupoDetalhe,
            models::organizacao::Marca,
            models::organizacao::Unidade,
            models::organizacao::UnidadeDetalhe,
            models::organizacao::UnidadeOpcao,
            models::organizacao::Equipe,
            models::organizacao::EquipeDetalhe,
            models::organizacao::ConglomeradoPayload,
            models::organizacao::GrupoPayload,
            models::organizacao::MarcaPayload,
            models::organizacao::UnidadePayload,
            models::organizacao::EquipePayload,

            // --- Catálogo ---
            models::catalogo::Produto,
            models::catalogo::ProdutoUnidade,
            models::catalogo::ProdutoUnidadeDetalhe,
            models::catalogo::ProdutoOpcao,
            models::catalogo::ProdutoPayload,
            models::catalogo::ProdutoUnidadePayload,

            // --- Vendas ---
            models::vendas::Venda,
            models::vendas::VendaItem,
            models::vendas::VendaItemDetalhe,
            models::vendas::VendaListagem,
            models::vendas::VendaDetalhe,
            models::vendas::NovoItemPayload,
            models::vendas::NovaVendaPayload,
            models::vendas::RelatorioVendas,

            // --- Dashboard ---
            models::dashboard::ResumoVendas,
            models::dashboard::ResumoAdmin,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação"),
        (name = "Users", description = "Dados do Usuário logado e do seu escopo"),
        (name = "Organização", description = "Conglomerados, Grupos, Marcas, Unidades e Equipes"),
        (name = "Usuários", description = "Cadastro de usuários e vínculos (painel admin)"),
        (name = "Catálogo", description = "Produtos TUNAP e vínculos com as unidades"),
        (name = "Vendas", description = "Registro e consulta de vendas"),
        (name = "Relatórios", description = "Relatório de vendas e exportação CSV"),
        (name = "Dashboard", description = "Indicadores de vendas e do painel")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
