// src/common/validation.rs
// Validações customizadas usadas pelos payloads (`#[validate(custom(...))]`).
// As mensagens são chaves de `locales/*.yml`.

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use validator::ValidationError;

use crate::models::organizacao::normalize_cnpj;

fn erro(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Rejeita textos vazios ou só com espaços.
pub fn nao_vazio(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(erro("required", "validation.required"));
    }
    Ok(())
}

/// CNPJ com ou sem pontuação, desde que tenha 14 dígitos.
pub fn cnpj_valido(value: &str) -> Result<(), ValidationError> {
    if normalize_cnpj(value).len() != 14 {
        return Err(erro("cnpj", "validation.cnpj"));
    }
    Ok(())
}

/// Maior valor que cabe nas colunas `NUMERIC(12, 2)`.
pub fn valor_maximo() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

/// Preço entre zero e o limite das colunas monetárias.
pub fn preco_valido(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut err = erro("range", "validation.preco_negativo");
        err.add_param("min".into(), &0.0);
        return Err(err);
    }
    if *value > valor_maximo() {
        return Err(erro("range", "validation.valor_maximo"));
    }
    Ok(())
}

/// Data de hoje no relógio do servidor (a mesma do dashboard e do nome do CSV).
pub fn hoje() -> NaiveDate {
    Local::now().date_naive()
}

/// A data da venda não pode estar no futuro.
pub fn data_nao_futura(value: &NaiveDate) -> Result<(), ValidationError> {
    if *value > hoje() {
        return Err(erro("data_futura", "validation.data_futura"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn texto_em_branco_e_rejeitado() {
        assert!(nao_vazio("OS-1").is_ok());
        assert!(nao_vazio("   ").is_err());
        assert!(nao_vazio("").is_err());
    }

    #[test]
    fn cnpj_aceita_pontuacao() {
        assert!(cnpj_valido("12.345.678/0001-99").is_ok());
        assert!(cnpj_valido("12345678000199").is_ok());
        assert!(cnpj_valido("12.345.678/0001").is_err());
    }

    #[test]
    fn preco_zero_e_permitido() {
        assert!(preco_valido(&Decimal::ZERO).is_ok());
        assert!(preco_valido(&Decimal::new(1050, 2)).is_ok());
        assert!(preco_valido(&Decimal::new(-1, 0)).is_err());
    }

    #[test]
    fn preco_acima_da_coluna_e_rejeitado() {
        assert!(preco_valido(&valor_maximo()).is_ok());
        assert!(preco_valido(&Decimal::new(100_000_000_000, 0)).is_err());
        assert!(preco_valido(&Decimal::MAX).is_err());
    }

    #[test]
    fn data_de_amanha_e_rejeitada() {
        let dia = hoje();
        assert!(data_nao_futura(&dia).is_ok());
        assert!(data_nao_futura(&(dia - Duration::days(30))).is_ok());
        assert!(data_nao_futura(&(dia + Duration::days(1))).is_err());
    }
}
