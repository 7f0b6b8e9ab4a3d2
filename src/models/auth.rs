// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::nao_vazio;
use crate::models::cargo::{Cargo, TipoEquipe};
use crate::models::escopo::Vinculos;
use crate::models::organizacao::{Conglomerado, Equipe, Grupo, Unidade};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tipo_empresa", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoEmpresa {
    Cliente,
    Tunap,
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    pub id: Uuid,
    #[schema(example = "Maria Souza")]
    pub nome_completo: String,
    #[schema(example = "maria@concessionaria.com.br")]
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub cargo_id: Option<Uuid>,
    #[schema(example = "Consultor Técnico")]
    pub cargo_label: Option<String>,
    pub cargo_descricao: Option<String>,
    pub tipo_empresa: TipoEmpresa,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(email(message = "validation.email"))]
    #[schema(example = "maria@concessionaria.com.br")]
    pub email: String,
    #[validate(length(min = 6, message = "validation.password_length"))]
    pub password: String,
}

// Resposta de autenticação com o token e o perfil
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub usuario: Usuario,
    pub cargo: Option<Cargo>,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}

/// Perfil do usuário com o cargo e todos os vínculos de escopo.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsuarioCompleto {
    pub usuario: Usuario,
    pub cargo: Option<Cargo>,
    pub tipos_equipe: Vec<TipoEquipe>,
    pub equipes_diretas: Vec<Equipe>,
    pub unidades: Vec<Unidade>,
    pub grupos: Vec<Grupo>,
    pub conglomerados: Vec<Conglomerado>,
}

/// Linha da listagem de usuários no painel admin.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsuarioResumo {
    pub id: Uuid,
    pub nome_completo: String,
    pub email: String,
    pub tipo_empresa: TipoEmpresa,
    pub ativo: bool,
    pub cargo_id: Option<Uuid>,
    pub cargo_nome: Option<String>,
    pub cargo_label: Option<String>,
    pub nivel_acesso: Option<i32>,
    pub created_at: DateTime<Utc>,
}

// ---
// Payloads do cadastro de usuários (painel admin)
// ---
fn tipo_empresa_padrao() -> TipoEmpresa {
    TipoEmpresa::Cliente
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarUsuarioPayload {
    #[validate(email(message = "validation.email"))]
    pub email: String,
    #[validate(length(min = 6, message = "validation.password_length"))]
    pub password: String,
    #[validate(custom(function = "nao_vazio"))]
    pub nome_completo: String,
    pub cargo_id: Uuid,
    pub cargo_label: Option<String>,
    pub cargo_descricao: Option<String>,
    #[serde(default = "tipo_empresa_padrao")]
    pub tipo_empresa: TipoEmpresa,
    pub ativo: Option<bool>,
    #[serde(flatten)]
    pub vinculos: Vinculos,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarUsuarioPayload {
    #[validate(custom(function = "nao_vazio"))]
    pub nome_completo: String,
    pub cargo_id: Uuid,
    pub cargo_label: Option<String>,
    pub cargo_descricao: Option<String>,
    #[serde(default = "tipo_empresa_padrao")]
    pub tipo_empresa: TipoEmpresa,
    #[serde(default = "ativo_padrao")]
    pub ativo: bool,
    /// Quando informada, substitui a senha atual.
    #[validate(length(min = 6, message = "validation.password_length"))]
    pub password: Option<String>,
    #[serde(flatten)]
    pub vinculos: Vinculos,
}

fn ativo_padrao() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RedefinirSenhaPayload {
    #[validate(length(min = 6, message = "validation.password_length"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "validation.password_mismatch"))]
    pub confirm_password: String,
}

// ---
// Vínculos usuário x equipe
// ---
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdicionarEquipesPayload {
    pub usuario_id: Uuid,
    #[serde(default)]
    pub equipe_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipesAdicionadas {
    pub adicionadas: u64,
}

/// Linha crua da listagem de vínculos.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VinculoEquipeLinha {
    pub id: Uuid,
    pub usuario_id: Uuid,
    pub nome_completo: String,
    pub email: String,
    pub equipe_id: Uuid,
    pub equipe_nome: String,
    pub unidade_nome: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VinculoEquipe {
    pub id: Uuid,
    pub equipe_id: Uuid,
    pub equipe_nome: String,
    pub unidade_nome: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsuarioComEquipes {
    pub usuario_id: Uuid,
    pub nome_completo: String,
    pub email: String,
    pub equipes: Vec<VinculoEquipe>,
}

/// Agrupa as linhas por usuário, mantendo a ordem em que os usuários aparecem.
pub fn agrupar_por_usuario(linhas: Vec<VinculoEquipeLinha>) -> Vec<UsuarioComEquipes> {
    let mut grupos: Vec<UsuarioComEquipes> = Vec::new();

    for linha in linhas {
        let vinculo = VinculoEquipe {
            id: linha.id,
            equipe_id: linha.equipe_id,
            equipe_nome: linha.equipe_nome,
            unidade_nome: linha.unidade_nome,
        };

        match grupos.iter_mut().find(|g| g.usuario_id == linha.usuario_id) {
            Some(grupo) => grupo.equipes.push(vinculo),
            None => grupos.push(UsuarioComEquipes {
                usuario_id: linha.usuario_id,
                nome_completo: linha.nome_completo,
                email: linha.email,
                equipes: vec![vinculo],
            }),
        }
    }

    grupos
}

/// Forma gravada e comparada no banco (`usuarios_email_key` é único em `lower(email)`).
pub fn normalizar_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_e_comparado_sem_maiusculas() {
        assert_eq!(normalizar_email("  Maria@X.com "), "maria@x.com");
        assert_eq!(normalizar_email("Maria@x.com"), normalizar_email("maria@x.com"));
    }

    #[test]
    fn confirmacao_de_senha_precisa_bater() {
        let ok = RedefinirSenhaPayload { password: "segredo1".into(), confirm_password: "segredo1".into() };
        assert!(ok.validate().is_ok());

        let diferente = RedefinirSenhaPayload { password: "segredo1".into(), confirm_password: "segredo2".into() };
        let errors = diferente.validate().expect_err("senhas diferentes");
        assert!(errors.field_errors().contains_key("confirm_password"));

        let curta = RedefinirSenhaPayload { password: "123".into(), confirm_password: "123".into() };
        let errors = curta.validate().expect_err("senha curta");
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn login_exige_email_valido() {
        let payload = LoginPayload { email: "sem-arroba".into(), password: "123456".into() };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn payload_de_criacao_aceita_vinculos_no_mesmo_nivel() {
        let equipe = Uuid::new_v4();
        let json = serde_json::json!({
            "email": "ana@loja.com.br",
            "password": "segredo1",
            "nomeCompleto": "Ana",
            "cargoId": Uuid::new_v4(),
            "equipeIds": [equipe]
        });

        let payload: CriarUsuarioPayload = serde_json::from_value(json).expect("payload válido");
        assert_eq!(payload.tipo_empresa, TipoEmpresa::Cliente);
        assert_eq!(payload.vinculos.equipe_ids, vec![equipe]);
        assert!(payload.vinculos.unidade_ids.is_empty());
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn vinculos_sao_agrupados_por_usuario() {
        let ana = Uuid::new_v4();
        let bia = Uuid::new_v4();
        let linha = |usuario_id: Uuid, nome: &str, equipe: &str| VinculoEquipeLinha {
            id: Uuid::new_v4(),
            usuario_id,
            nome_completo: nome.into(),
            email: format!("{}@loja.com.br", nome.to_lowercase()),
            equipe_id: Uuid::new_v4(),
            equipe_nome: equipe.into(),
            unidade_nome: "Centro".into(),
        };

        let grupos = agrupar_por_usuario(vec![
            linha(ana, "Ana", "Mecânica"),
            linha(bia, "Bia", "Funilaria"),
            linha(ana, "Ana", "Estética"),
        ]);

        assert_eq!(grupos.len(), 2);
        assert_eq!(grupos[0].usuario_id, ana);
        assert_eq!(grupos[0].equipes.len(), 2);
        assert_eq!(grupos[1].equipes[0].equipe_nome, "Funilaria");
    }
}
