use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::middleware::i18n::{translate, translate_with_args, Locale};

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Repositórios e serviços só conhecem o AppError; o handler converte em ApiError.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Usuário inativo")]
    InactiveUser,

    #[error("Nível de acesso insuficiente (mínimo {0})")]
    AccessLevelRequired(i32),

    #[error("{0} não encontrado")]
    NotFound(&'static str),

    #[error("{0} já existe")]
    AlreadyExists(&'static str),

    #[error("Registro referenciado por outros dados")]
    ReferencedRecord,

    #[error("Unidade fora do escopo do usuário")]
    UnidadeNaoPermitida,

    #[error("Equipe fora do escopo do usuário")]
    EquipeNaoPermitida,

    #[error("Equipe não pertence à unidade")]
    EquipeForaDaUnidade,

    #[error("Produto não vinculado à unidade")]
    ProdutoNaoVinculado,

    #[error("Nenhuma equipe selecionada")]
    NenhumaEquipeSelecionada,

    #[error("Usuário já está em todas as equipes selecionadas")]
    UsuarioJaNasEquipes,

    #[error("Vínculo obrigatório para o cargo: {0}")]
    VinculoObrigatorio(&'static str),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Erro ao gerar CSV: {0}")]
    CsvError(#[from] csv::Error),
}

/// O erro como ele sai na resposta HTTP, já traduzido.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::EquipeForaDaUnidade
            | AppError::ProdutoNaoVinculado
            | AppError::NenhumaEquipeSelecionada
            | AppError::VinculoObrigatorio(_) => StatusCode::BAD_REQUEST,

            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,

            AppError::InactiveUser
            | AppError::AccessLevelRequired(_)
            | AppError::UnidadeNaoPermitida
            | AppError::EquipeNaoPermitida => StatusCode::FORBIDDEN,

            AppError::UserNotFound | AppError::NotFound(_) => StatusCode::NOT_FOUND,

            AppError::EmailAlreadyExists
            | AppError::AlreadyExists(_)
            | AppError::ReferencedRecord
            | AppError::UsuarioJaNasEquipes => StatusCode::CONFLICT,

            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_)
            | AppError::CsvError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Chave da mensagem em `locales/*.yml`.
    pub fn message_key(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "errors.validation",
            AppError::EmailAlreadyExists => "errors.email_already_exists",
            AppError::InvalidCredentials => "errors.invalid_credentials",
            AppError::InvalidToken => "errors.invalid_token",
            AppError::UserNotFound => "errors.user_not_found",
            AppError::InactiveUser => "errors.inactive_user",
            AppError::AccessLevelRequired(_) => "errors.access_level_required",
            AppError::NotFound(_) => "errors.not_found",
            AppError::AlreadyExists(_) => "errors.already_exists",
            AppError::ReferencedRecord => "errors.referenced_record",
            AppError::UnidadeNaoPermitida => "errors.unidade_nao_permitida",
            AppError::EquipeNaoPermitida => "errors.equipe_nao_permitida",
            AppError::EquipeForaDaUnidade => "errors.equipe_fora_da_unidade",
            AppError::ProdutoNaoVinculado => "errors.produto_nao_vinculado",
            AppError::NenhumaEquipeSelecionada => "errors.nenhuma_equipe_selecionada",
            AppError::UsuarioJaNasEquipes => "errors.usuario_ja_nas_equipes",
            AppError::VinculoObrigatorio(_) => "errors.vinculo_obrigatorio",
            _ => "errors.internal",
        }
    }

    pub fn to_api_error(&self, locale: &Locale) -> ApiError {
        let status = self.status();
        let lang = locale.0.as_str();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            tracing::error!("Erro Interno do Servidor: {:?}", self);
        }

        let error = match self {
            AppError::NotFound(recurso) | AppError::AlreadyExists(recurso) => {
                let nome = translate(&format!("recursos.{}", recurso), lang);
                translate_with_args(self.message_key(), lang, &[("recurso", &nome)])
            }
            AppError::VinculoObrigatorio(recurso) => {
                let nome = translate(&format!("recursos.{}", recurso), lang);
                translate_with_args(self.message_key(), lang, &[("recurso", &nome)])
            }
            AppError::AccessLevelRequired(nivel) => {
                translate_with_args(self.message_key(), lang, &[("nivel", &nivel.to_string())])
            }
            _ => translate(self.message_key(), lang),
        };

        let details = match self {
            AppError::ValidationError(errors) => {
                let mut details = serde_json::Map::new();
                collect_validation_details(errors, "", lang, &mut details);
                Some(Value::Object(details))
            }
            _ => None,
        };

        ApiError { status, error, details }
    }
}

/// Achata os erros (inclusive de structs e listas aninhadas) em `{"campo": [mensagens]}`.
/// Itens de lista viram `itens[0].quantidade`.
fn collect_validation_details(
    errors: &ValidationErrors,
    prefix: &str,
    lang: &str,
    out: &mut serde_json::Map<String, Value>,
) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let messages = field_errors
                    .iter()
                    .map(|e| {
                        let key = e.message.as_deref().unwrap_or(e.code.as_ref());
                        Value::String(translate(key, lang))
                    })
                    .collect();
                out.insert(path, Value::Array(messages));
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_validation_details(nested, &path, lang, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_validation_details(nested, &format!("{}[{}]", path, index), lang, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{Validate, ValidationError};

    #[test]
    fn status_de_cada_familia_de_erro() {
        assert_eq!(AppError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InactiveUser.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NotFound("venda").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::AlreadyExists("marca").status(), StatusCode::CONFLICT);
        assert_eq!(AppError::UnidadeNaoPermitida.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::ProdutoNaoVinculado.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InternalServerError(anyhow::anyhow!("falhou")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn mensagens_sao_traduzidas_pelo_idioma() {
        let pt = AppError::InvalidCredentials.to_api_error(&Locale("pt".into()));
        let en = AppError::InvalidCredentials.to_api_error(&Locale("en".into()));

        assert_eq!(pt.error, "E-mail ou senha inválidos.");
        assert_eq!(en.error, "Invalid email or password.");
    }

    #[test]
    fn recurso_entra_na_mensagem() {
        let err = AppError::NotFound("venda").to_api_error(&Locale("pt".into()));
        assert_eq!(err.error, "Registro não encontrado: Venda.");
    }

    #[test]
    fn erros_de_validacao_trazem_detalhes_por_campo() {
        let mut errors = ValidationErrors::new();
        let mut e = ValidationError::new("length");
        e.message = Some("validation.password_length".into());
        errors.add("password", e);

        let api = AppError::ValidationError(errors).to_api_error(&Locale("pt".into()));
        assert_eq!(api.status, StatusCode::BAD_REQUEST);

        let details = api.details.expect("detalhes");
        assert_eq!(
            details["password"][0],
            Value::String("A senha deve ter no mínimo 6 caracteres.".into())
        );
    }

    #[derive(Validate)]
    struct Item {
        #[validate(range(min = 1, message = "validation.quantidade"))]
        quantidade: i32,
    }

    #[derive(Validate)]
    struct Pedido {
        #[validate(nested)]
        itens: Vec<Item>,
    }

    #[test]
    fn erros_de_listas_aninhadas_indicam_o_item() {
        let pedido = Pedido { itens: vec![Item { quantidade: 2 }, Item { quantidade: 0 }] };
        let errors = pedido.validate().expect_err("quantidade zero");

        let api = AppError::ValidationError(errors).to_api_error(&Locale("en".into()));
        let details = api.details.expect("detalhes");
        assert_eq!(
            details["itens[1].quantidade"][0],
            Value::String("Quantity must be greater than zero.".into())
        );
    }

    #[test]
    fn erro_interno_nao_vaza_detalhes() {
        let api = AppError::InternalServerError(anyhow::anyhow!("senha do banco: 123"))
            .to_api_error(&Locale("pt".into()));
        assert_eq!(api.error, "Ocorreu um erro inesperado.");
        assert!(api.details.is_none());
    }
}
