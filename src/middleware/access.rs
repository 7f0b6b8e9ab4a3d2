// src/middleware/access.rs

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use std::marker::PhantomData;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::{
        cargo::Cargo,
        escopo::{AccessScope, Hierarquia, NIVEL_ADMIN},
    },
};

/// 1. O Trait que define um nível de acesso mínimo
pub trait NivelDef: Send + Sync + 'static {
    fn minimo() -> i32;
}

/// 2. O Extractor (Guardião)
pub struct RequireNivel<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireNivel<T>
where
    T: NivelDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let locale = Locale::from_request_parts(parts, state).await.unwrap_or_default();

        // A. Extrai Usuário (colocado pelo auth_guard)
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;

        // B. Nível do cargo atual (sem cargo = 0)
        let nivel = app_state
            .escopo_service
            .nivel_acesso(&user.0)
            .await
            .map_err(|e| e.to_api_error(&locale))?;

        if nivel < T::minimo() {
            tracing::warn!(usuario_id = %user.0.id, nivel, "Acesso negado ao painel administrativo");
            return Err(AppError::AccessLevelRequired(T::minimo()).to_api_error(&locale));
        }

        Ok(RequireNivel(PhantomData))
    }
}

// ---
// NÍVEIS
// ---
pub struct NivelAdmin;
impl NivelDef for NivelAdmin {
    fn minimo() -> i32 {
        NIVEL_ADMIN
    }
}

/// Escopo resolvido do usuário logado, com o snapshot da hierarquia.
#[derive(Debug, Clone)]
pub struct CurrentScope {
    pub scope: AccessScope,
    pub hierarquia: Hierarquia,
    pub cargo: Option<Cargo>,
}

impl<S> FromRequestParts<S> for CurrentScope
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let locale = Locale::from_request_parts(parts, state).await.unwrap_or_default();
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;

        let (scope, cargo) = app_state
            .escopo_service
            .resolver(&user.0)
            .await
            .map_err(|e| e.to_api_error(&locale))?;

        let hierarquia = app_state
            .escopo_service
            .hierarquia()
            .await
            .map_err(|e| e.to_api_error(&locale))?;

        Ok(CurrentScope { scope, hierarquia, cargo })
    }
}
