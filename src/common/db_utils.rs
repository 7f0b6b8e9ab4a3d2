use crate::common::error::AppError;

// ---
// Helper de constraints: traduz violações do Postgres para o nosso AppError
// ---
/// `recurso` é a chave em `recursos.*` usada na mensagem de conflito.
pub(crate) fn map_constraint_error(e: sqlx::Error, recurso: &'static str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                // Índice único em lower(email)
                Some("usuarios_email_key") => AppError::EmailAlreadyExists,
                _ => AppError::AlreadyExists(recurso),
            };
        }
        if db_err.is_foreign_key_violation() {
            return AppError::ReferencedRecord;
        }
    }
    e.into()
}

/// Padrão para `ILIKE ... ESCAPE '\'` (`%busca%`), ou `None` quando a busca está vazia.
/// `%` e `_` digitados pelo usuário são buscados literalmente.
pub(crate) fn like_pattern(busca: Option<&str>) -> Option<String> {
    busca
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(|b| format!("%{}%", escape_like(b)))
}

fn escape_like(texto: &str) -> String {
    let mut escapado = String::with_capacity(texto.len());
    for c in texto.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escapado.push('\\');
        }
        escapado.push(c);
    }
    escapado
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erro_que_nao_e_de_banco_vira_database_error() {
        let err = map_constraint_error(sqlx::Error::RowNotFound, "marca");
        assert!(matches!(err, AppError::DatabaseError(_)));
    }

    #[test]
    fn padrao_de_busca() {
        assert_eq!(like_pattern(Some(" sinal ")).as_deref(), Some("%sinal%"));
        assert!(like_pattern(Some("   ")).is_none());
        assert!(like_pattern(None).is_none());
    }

    #[test]
    fn curingas_digitados_sao_literais() {
        assert_eq!(like_pattern(Some("_")).as_deref(), Some(r"%\_%"));
        assert_eq!(like_pattern(Some("10%")).as_deref(), Some(r"%10\%%"));
        assert_eq!(like_pattern(Some(r"a\b")).as_deref(), Some(r"%a\\b%"));
    }
}
