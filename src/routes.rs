// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

pub fn create_router(app_state: AppState) -> Router {
    // Define as rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login));

    // Define as rotas de usuário (protegidas pelo middleware)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route("/me/equipes", get(handlers::auth::get_my_equipes))
        .route("/me/unidades", get(handlers::auth::get_my_unidades));

    let admin_routes = Router::new()
        .route("/resumo", get(handlers::dashboard::get_resumo_admin))
        // Organização
        .route(
            "/conglomerados",
            get(handlers::organizacao::list_conglomerados).post(handlers::organizacao::create_conglomerado),
        )
        .route(
            "/conglomerados/{id}",
            put(handlers::organizacao::update_conglomerado).delete(handlers::organizacao::delete_conglomerado),
        )
        .route(
            "/grupos",
            get(handlers::organizacao::list_grupos).post(handlers::organizacao::create_grupo),
        )
        .route(
            "/grupos/{id}",
            put(handlers::organizacao::update_grupo).delete(handlers::organizacao::delete_grupo),
        )
        .route(
            "/marcas",
            get(handlers::organizacao::list_marcas).post(handlers::organizacao::create_marca),
        )
        .route(
            "/marcas/{id}",
            put(handlers::organizacao::update_marca).delete(handlers::organizacao::delete_marca),
        )
        .route(
            "/unidades",
            get(handlers::organizacao::list_unidades).post(handlers::organizacao::create_unidade),
        )
        .route(
            "/unidades/{id}",
            put(handlers::organizacao::update_unidade).delete(handlers::organizacao::delete_unidade),
        )
        .route(
            "/equipes",
            get(handlers::organizacao::list_equipes).post(handlers::organizacao::create_equipe),
        )
        .route(
            "/equipes/{id}",
            put(handlers::organizacao::update_equipe).delete(handlers::organizacao::delete_equipe),
        )
        // Usuários
        .route(
            "/usuarios",
            get(handlers::usuarios::list_usuarios).post(handlers::usuarios::create_usuario),
        )
        .route(
            "/usuarios/{id}",
            get(handlers::usuarios::get_usuario)
                .put(handlers::usuarios::update_usuario)
                .delete(handlers::usuarios::delete_usuario),
        )
        .route("/usuarios/{id}/senha", post(handlers::usuarios::reset_password))
        .route(
            "/usuarios-equipes",
            get(handlers::usuarios::list_usuarios_equipes).post(handlers::usuarios::add_usuario_equipes),
        )
        .route(
            "/usuarios-equipes/{id}",
            delete(handlers::usuarios::delete_usuario_equipe),
        )
        // Catálogo
        .route(
            "/produtos",
            get(handlers::catalogo::list_produtos).post(handlers::catalogo::create_produto),
        )
        .route(
            "/produtos/{id}",
            put(handlers::catalogo::update_produto).delete(handlers::catalogo::delete_produto),
        )
        .route(
            "/produtos-unidades",
            get(handlers::catalogo::list_produtos_unidades).post(handlers::catalogo::create_produto_unidade),
        )
        .route(
            "/produtos-unidades/{id}",
            put(handlers::catalogo::update_produto_unidade).delete(handlers::catalogo::delete_produto_unidade),
        );

    let vendas_routes = Router::new()
        .route("/", get(handlers::vendas::list_vendas).post(handlers::vendas::create_venda))
        .route("/{id}", get(handlers::vendas::get_venda));

    let relatorios_routes = Router::new()
        .route("/vendas", get(handlers::relatorios::relatorio_vendas))
        .route("/vendas/csv", get(handlers::relatorios::exportar_vendas_csv));

    // Tudo que exige login passa pelo auth_guard
    let protected = Router::new()
        .nest("/users", user_routes)
        .nest("/admin", admin_routes)
        .nest("/vendas", vendas_routes)
        .nest("/relatorios", relatorios_routes)
        .route("/cargos", get(handlers::auth::list_cargos))
        .route("/tipos-equipe", get(handlers::auth::list_tipos_equipe))
        .route(
            "/catalogo/unidades/{unidade_id}/produtos",
            get(handlers::catalogo::list_produtos_da_unidade),
        )
        .route("/dashboard/resumo", get(handlers::dashboard::get_resumo))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api", protected)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}
