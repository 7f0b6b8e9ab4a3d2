// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

/// Idioma usado quando o cliente não manda `Accept-Language` (ou manda um que não temos).
pub const DEFAULT_LOCALE: &str = "pt";
const SUPPORTED_LOCALES: [&str; 2] = ["pt", "en"];

// Nosso extrator de idioma
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(pub String);

impl Default for Locale {
    fn default() -> Self {
        Locale(DEFAULT_LOCALE.to_string())
    }
}

impl Locale {
    /// "pt-BR,pt;q=0.9,en;q=0.8" -> "pt"
    pub fn from_header(value: &str) -> Self {
        accept_language::parse(value)
            .iter()
            // "pt-BR" -> split vira ["pt", "BR"] -> next() pega "pt"
            .filter_map(|tag| tag.split('-').next())
            .map(|lang| lang.to_lowercase())
            .find(|lang| SUPPORTED_LOCALES.contains(&lang.as_str()))
            .map(Locale)
            .unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let locale = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .map(Locale::from_header)
            .unwrap_or_default();

        Ok(locale)
    }
}

/// Traduz uma chave de `locales/*.yml`.
pub fn translate(key: &str, locale: &str) -> String {
    rust_i18n::t!(key, locale = locale).to_string()
}

/// Traduz e substitui os `%{nome}` pelos valores dados.
pub fn translate_with_args(key: &str, locale: &str, args: &[(&str, &str)]) -> String {
    let mut result = translate(key, locale);
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usa_a_primeira_lingua_suportada() {
        assert_eq!(Locale::from_header("pt-BR,pt;q=0.9,en;q=0.8").0, "pt");
        assert_eq!(Locale::from_header("en-US,en;q=0.9").0, "en");
        assert_eq!(Locale::from_header("fr-FR,en;q=0.5").0, "en");
    }

    #[test]
    fn cai_no_portugues_quando_nao_reconhece() {
        assert_eq!(Locale::from_header("de-DE").0, DEFAULT_LOCALE);
        assert_eq!(Locale::from_header("").0, DEFAULT_LOCALE);
    }

    #[test]
    fn traducao_com_argumentos() {
        let msg = translate_with_args("errors.not_found", "en", &[("recurso", "Sale")]);
        assert_eq!(msg, "Record not found: Sale.");
    }
}
