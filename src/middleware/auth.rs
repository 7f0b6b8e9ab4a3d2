// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::auth::Usuario,
};

// O middleware em si: exige `Authorization: Bearer <jwt>` válido e usuário ativo.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    locale: Locale,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or_else(|| AppError::InvalidToken.to_api_error(&locale))?;

    let usuario = app_state
        .auth_service
        .validate_token(token.token())
        .await
        .map_err(|e| match e {
            // Token de usuário que não existe mais é tratado como token inválido
            AppError::UserNotFound => AppError::InvalidToken.to_api_error(&locale),
            other => other.to_api_error(&locale),
        })?;

    if !usuario.ativo {
        return Err(AppError::InactiveUser.to_api_error(&locale));
    }

    // Insere o usuário nos "extensions" da requisição
    request.extensions_mut().insert(AuthenticatedUser(usuario));
    Ok(next.run(request).await)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Usuario);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<AuthenticatedUser>().cloned() {
            Some(user) => Ok(user),
            None => {
                let locale = Locale::from_request_parts(parts, state)
                    .await
                    .unwrap_or_default();
                Err(AppError::InvalidToken.to_api_error(&locale))
            }
        }
    }
}
