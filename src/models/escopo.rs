// src/models/escopo.rs

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Nível mínimo para entrar no painel administrativo.
pub const NIVEL_ADMIN: i32 = 80;

// ---
// 1. Escopo do Cargo
// ---
// A ordem das variantes é a ordem de abrangência: proprio < equipe < ... < todos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "cargo_escopo", rename_all = "lowercase")] // Banco
#[serde(rename_all = "lowercase")] // JSON
pub enum Escopo {
    Proprio,
    Equipe,
    Unidade,
    Grupo,
    Conglomerado,
    Todos,
}

impl Escopo {
    const TODOS: [Escopo; 6] = [
        Escopo::Proprio,
        Escopo::Equipe,
        Escopo::Unidade,
        Escopo::Grupo,
        Escopo::Conglomerado,
        Escopo::Todos,
    ];

    /// Nível de acesso mínimo que um cargo precisa para usar este escopo.
    pub fn nivel_minimo(self) -> i32 {
        match self {
            Escopo::Proprio => 10,
            Escopo::Equipe => 30,
            Escopo::Unidade => 50,
            Escopo::Grupo => 70,
            Escopo::Conglomerado => 90,
            Escopo::Todos => 100,
        }
    }

    /// O escopo mais amplo, até `self`, que o nível permite. Nunca abaixo de `Proprio`.
    pub fn limitado_ao_nivel(self, nivel_acesso: i32) -> Escopo {
        Self::TODOS
            .iter()
            .rev()
            .copied()
            .find(|e| *e <= self && nivel_suficiente(nivel_acesso, *e))
            .unwrap_or(Escopo::Proprio)
    }

    /// Quais vínculos um usuário com este escopo carrega no cadastro.
    pub fn campos_formulario(self) -> CamposFormulario {
        let mut campos = CamposFormulario::default();
        match self {
            Escopo::Proprio | Escopo::Equipe => campos.equipes = true,
            Escopo::Unidade => {
                campos.tipos_equipe = true;
                campos.unidades = true;
            }
            Escopo::Grupo => {
                campos.tipos_equipe = true;
                campos.grupos = true;
            }
            Escopo::Conglomerado => {
                campos.tipos_equipe = true;
                campos.conglomerados = true;
            }
            Escopo::Todos => {}
        }
        campos
    }
}

pub fn nivel_suficiente(nivel_acesso: i32, escopo: Escopo) -> bool {
    nivel_acesso >= escopo.nivel_minimo()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CamposFormulario {
    pub equipes: bool,
    pub tipos_equipe: bool,
    pub unidades: bool,
    pub grupos: bool,
    pub conglomerados: bool,
}

/// Vínculos de escopo informados no cadastro de um usuário.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vinculos {
    #[serde(default)]
    pub equipe_ids: Vec<Uuid>,
    #[serde(default)]
    pub tipo_equipe_ids: Vec<Uuid>,
    #[serde(default)]
    pub unidade_ids: Vec<Uuid>,
    #[serde(default)]
    pub grupo_ids: Vec<Uuid>,
    #[serde(default)]
    pub conglomerado_ids: Vec<Uuid>,
}

impl Vinculos {
    /// Mantém só as listas que o escopo usa, sem repetições.
    pub fn para_escopo(self, escopo: Escopo) -> Self {
        let campos = escopo.campos_formulario();
        let manter = |usa: bool, mut ids: Vec<Uuid>| {
            if !usa {
                return Vec::new();
            }
            ids.sort();
            ids.dedup();
            ids
        };

        Self {
            equipe_ids: manter(campos.equipes, self.equipe_ids),
            tipo_equipe_ids: manter(campos.tipos_equipe, self.tipo_equipe_ids),
            unidade_ids: manter(campos.unidades, self.unidade_ids),
            grupo_ids: manter(campos.grupos, self.grupo_ids),
            conglomerado_ids: manter(campos.conglomerados, self.conglomerado_ids),
        }
    }

    /// Recurso do vínculo principal que está faltando para o escopo, se houver.
    pub fn vinculo_principal_ausente(&self, escopo: Escopo) -> Option<&'static str> {
        match escopo {
            Escopo::Proprio | Escopo::Equipe if self.equipe_ids.is_empty() => Some("equipe"),
            Escopo::Unidade if self.unidade_ids.is_empty() => Some("unidade"),
            Escopo::Grupo if self.grupo_ids.is_empty() => Some("grupo"),
            Escopo::Conglomerado if self.conglomerado_ids.is_empty() => Some("conglomerado"),
            _ => None,
        }
    }
}

// ---
// 2. Snapshot da hierarquia
// ---
// Usado para transformar "grupo" e "conglomerado" em conjuntos de unidades.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct UnidadeNo {
    pub unidade_id: Uuid,
    pub grupo_id: Uuid,
    pub conglomerado_id: Uuid,
}

#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct EquipeNo {
    pub equipe_id: Uuid,
    pub unidade_id: Uuid,
    pub tipo_equipe_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub struct Hierarquia {
    pub unidades: Vec<UnidadeNo>,
    pub equipes: Vec<EquipeNo>,
}

impl Hierarquia {
    pub fn new(unidades: Vec<UnidadeNo>, equipes: Vec<EquipeNo>) -> Self {
        Self { unidades, equipes }
    }

    fn unidade_da_equipe(&self) -> HashMap<Uuid, Uuid> {
        self.equipes.iter().map(|e| (e.equipe_id, e.unidade_id)).collect()
    }
}

// ---
// 3. Escopo resolvido de um usuário
// ---
#[derive(Debug, Clone)]
pub struct AccessScope {
    pub usuario_id: Uuid,
    pub escopo: Escopo,
    pub nivel_acesso: i32,
    pub equipe_ids: Vec<Uuid>,
    pub tipo_equipe_ids: Vec<Uuid>,
    pub unidade_ids: Vec<Uuid>,
    pub grupo_ids: Vec<Uuid>,
    pub conglomerado_ids: Vec<Uuid>,
}

impl AccessScope {
    /// Usuário sem cargo: enxerga apenas o que ele mesmo registrou.
    pub fn somente_proprio(usuario_id: Uuid) -> Self {
        Self {
            usuario_id,
            escopo: Escopo::Proprio,
            nivel_acesso: 0,
            equipe_ids: Vec::new(),
            tipo_equipe_ids: Vec::new(),
            unidade_ids: Vec::new(),
            grupo_ids: Vec::new(),
            conglomerado_ids: Vec::new(),
        }
    }

    /// Quais vendas o usuário pode ver.
    pub fn visibilidade(&self, hierarquia: &Hierarquia) -> Visibilidade {
        match self.escopo {
            Escopo::Todos => Visibilidade::Todas,
            Escopo::Proprio => Visibilidade::Proprias(self.usuario_id),
            Escopo::Equipe => Visibilidade::Equipes {
                usuario_id: self.usuario_id,
                equipe_ids: self.equipe_ids.clone(),
            },
            Escopo::Unidade | Escopo::Grupo | Escopo::Conglomerado => {
                let mut ids: Vec<Uuid> = self
                    .unidades_do_escopo(hierarquia)
                    .into_iter()
                    .collect();
                ids.sort();
                Visibilidade::Unidades(ids)
            }
        }
    }

    /// Unidades onde o usuário pode lançar vendas. `None` significa todas.
    pub fn unidades_permitidas(&self, hierarquia: &Hierarquia) -> Option<HashSet<Uuid>> {
        match self.escopo {
            Escopo::Todos => None,
            Escopo::Proprio | Escopo::Equipe => {
                let mapa = hierarquia.unidade_da_equipe();
                Some(
                    self.equipe_ids
                        .iter()
                        .filter_map(|equipe_id| mapa.get(equipe_id).copied())
                        .collect(),
                )
            }
            Escopo::Unidade | Escopo::Grupo | Escopo::Conglomerado => {
                Some(self.unidades_do_escopo(hierarquia))
            }
        }
    }

    /// Equipes que o usuário pode escolher numa venda. `None` significa todas.
    pub fn equipes_permitidas(&self, hierarquia: &Hierarquia) -> Option<HashSet<Uuid>> {
        match self.escopo {
            Escopo::Todos => None,
            Escopo::Proprio | Escopo::Equipe => Some(self.equipe_ids.iter().copied().collect()),
            Escopo::Unidade | Escopo::Grupo | Escopo::Conglomerado => {
                let unidades = self.unidades_do_escopo(hierarquia);
                let tipos: HashSet<Uuid> = self.tipo_equipe_ids.iter().copied().collect();

                Some(
                    hierarquia
                        .equipes
                        .iter()
                        .filter(|e| unidades.contains(&e.unidade_id))
                        // Gerentes/Diretores com tipos definidos só veem equipes desses tipos
                        .filter(|e| {
                            tipos.is_empty()
                                || e.tipo_equipe_id.is_some_and(|t| tipos.contains(&t))
                        })
                        .map(|e| e.equipe_id)
                        .collect(),
                )
            }
        }
    }

    pub fn pode_usar_unidade(&self, hierarquia: &Hierarquia, unidade_id: Uuid) -> bool {
        self.unidades_permitidas(hierarquia)
            .is_none_or(|ids| ids.contains(&unidade_id))
    }

    pub fn pode_usar_equipe(&self, hierarquia: &Hierarquia, equipe_id: Uuid) -> bool {
        self.equipes_permitidas(hierarquia)
            .is_none_or(|ids| ids.contains(&equipe_id))
    }

    fn unidades_do_escopo(&self, hierarquia: &Hierarquia) -> HashSet<Uuid> {
        let alvo: HashSet<Uuid> = match self.escopo {
            Escopo::Unidade => self.unidade_ids.iter().copied().collect(),
            Escopo::Grupo => self.grupo_ids.iter().copied().collect(),
            Escopo::Conglomerado => self.conglomerado_ids.iter().copied().collect(),
            _ => return HashSet::new(),
        };

        hierarquia
            .unidades
            .iter()
            .filter(|u| match self.escopo {
                Escopo::Unidade => alvo.contains(&u.unidade_id),
                Escopo::Grupo => alvo.contains(&u.grupo_id),
                _ => alvo.contains(&u.conglomerado_id),
            })
            .map(|u| u.unidade_id)
            .collect()
    }
}

// ---
// 4. Visibilidade de vendas
// ---
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibilidade {
    Todas,
    Proprias(Uuid),
    Equipes { usuario_id: Uuid, equipe_ids: Vec<Uuid> },
    Unidades(Vec<Uuid>),
}

/// O mínimo de uma venda necessário para decidir se ela é visível.
#[derive(Debug, Clone, Copy)]
pub struct VendaRef {
    pub usuario_id: Uuid,
    pub unidade_id: Uuid,
    pub equipe_id: Option<Uuid>,
}

/// Parâmetros de SQL equivalentes a uma `Visibilidade`.
/// A consulta usa: `$todas OR usuario_id = $usuario OR equipe_id = ANY($equipes) OR unidade_id = ANY($unidades)`.
#[derive(Debug, Clone, Default)]
pub struct FiltroVisibilidade {
    pub todas: bool,
    pub usuario_id: Option<Uuid>,
    pub equipe_ids: Vec<Uuid>,
    pub unidade_ids: Vec<Uuid>,
}

impl Visibilidade {
    pub fn permite(&self, venda: &VendaRef) -> bool {
        match self {
            Visibilidade::Todas => true,
            Visibilidade::Proprias(usuario_id) => venda.usuario_id == *usuario_id,
            Visibilidade::Equipes { usuario_id, equipe_ids } => {
                venda.usuario_id == *usuario_id
                    || venda.equipe_id.is_some_and(|e| equipe_ids.contains(&e))
            }
            Visibilidade::Unidades(unidade_ids) => unidade_ids.contains(&venda.unidade_id),
        }
    }

    pub fn as_filtro(&self) -> FiltroVisibilidade {
        match self {
            Visibilidade::Todas => FiltroVisibilidade { todas: true, ..Default::default() },
            Visibilidade::Proprias(usuario_id) => FiltroVisibilidade {
                usuario_id: Some(*usuario_id),
                ..Default::default()
            },
            Visibilidade::Equipes { usuario_id, equipe_ids } => FiltroVisibilidade {
                usuario_id: Some(*usuario_id),
                equipe_ids: equipe_ids.clone(),
                ..Default::default()
            },
            Visibilidade::Unidades(unidade_ids) => FiltroVisibilidade {
                unidade_ids: unidade_ids.clone(),
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Cenario {
        conglomerado: Uuid,
        grupo_a: Uuid,
        grupo_b: Uuid,
        unidade_a1: Uuid,
        unidade_a2: Uuid,
        unidade_b1: Uuid,
        equipe_mecanica_a1: Uuid,
        equipe_funilaria_a1: Uuid,
        equipe_b1: Uuid,
        tipo_mecanica: Uuid,
        hierarquia: Hierarquia,
    }

    fn cenario() -> Cenario {
        let conglomerado = Uuid::new_v4();
        let outro_conglomerado = Uuid::new_v4();
        let grupo_a = Uuid::new_v4();
        let grupo_b = Uuid::new_v4();
        let unidade_a1 = Uuid::new_v4();
        let unidade_a2 = Uuid::new_v4();
        let unidade_b1 = Uuid::new_v4();
        let tipo_mecanica = Uuid::new_v4();
        let tipo_funilaria = Uuid::new_v4();
        let equipe_mecanica_a1 = Uuid::new_v4();
        let equipe_funilaria_a1 = Uuid::new_v4();
        let equipe_b1 = Uuid::new_v4();

        let hierarquia = Hierarquia::new(
            vec![
                UnidadeNo { unidade_id: unidade_a1, grupo_id: grupo_a, conglomerado_id: conglomerado },
                UnidadeNo { unidade_id: unidade_a2, grupo_id: grupo_a, conglomerado_id: conglomerado },
                UnidadeNo { unidade_id: unidade_b1, grupo_id: grupo_b, conglomerado_id: outro_conglomerado },
            ],
            vec![
                EquipeNo { equipe_id: equipe_mecanica_a1, unidade_id: unidade_a1, tipo_equipe_id: Some(tipo_mecanica) },
                EquipeNo { equipe_id: equipe_funilaria_a1, unidade_id: unidade_a1, tipo_equipe_id: Some(tipo_funilaria) },
                EquipeNo { equipe_id: equipe_b1, unidade_id: unidade_b1, tipo_equipe_id: None },
            ],
        );

        Cenario {
            conglomerado,
            grupo_a,
            grupo_b,
            unidade_a1,
            unidade_a2,
            unidade_b1,
            equipe_mecanica_a1,
            equipe_funilaria_a1,
            equipe_b1,
            tipo_mecanica,
            hierarquia,
        }
    }

    fn scope(escopo: Escopo) -> AccessScope {
        AccessScope {
            escopo,
            nivel_acesso: 50,
            ..AccessScope::somente_proprio(Uuid::new_v4())
        }
    }

    #[test]
    fn escopos_seguem_ordem_de_abrangencia() {
        assert!(Escopo::Proprio < Escopo::Equipe);
        assert!(Escopo::Equipe < Escopo::Unidade);
        assert!(Escopo::Unidade < Escopo::Grupo);
        assert!(Escopo::Grupo < Escopo::Conglomerado);
        assert!(Escopo::Conglomerado < Escopo::Todos);
    }

    #[test]
    fn nivel_minimo_cresce_com_o_escopo() {
        let niveis: Vec<i32> = Escopo::TODOS.iter().map(|e| e.nivel_minimo()).collect();
        assert_eq!(niveis, vec![10, 30, 50, 70, 90, 100]);
        assert!(niveis.windows(2).all(|par| par[0] < par[1]));
    }

    #[test]
    fn nivel_suficiente_e_monotonico() {
        assert!(nivel_suficiente(50, Escopo::Unidade));
        assert!(nivel_suficiente(50, Escopo::Equipe));
        assert!(!nivel_suficiente(49, Escopo::Unidade));
        assert!(!nivel_suficiente(90, Escopo::Todos));

        // Quem alcança um escopo alcança todos os menores
        for nivel in 0..=100 {
            for (i, escopo) in Escopo::TODOS.iter().enumerate() {
                if nivel_suficiente(nivel, *escopo) {
                    assert!(Escopo::TODOS[..i].iter().all(|menor| nivel_suficiente(nivel, *menor)));
                }
            }
        }
    }

    #[test]
    fn escopo_e_limitado_pelo_nivel_do_cargo() {
        assert_eq!(Escopo::Todos.limitado_ao_nivel(100), Escopo::Todos);
        assert_eq!(Escopo::Todos.limitado_ao_nivel(75), Escopo::Grupo);
        assert_eq!(Escopo::Unidade.limitado_ao_nivel(100), Escopo::Unidade);
        assert_eq!(Escopo::Equipe.limitado_ao_nivel(0), Escopo::Proprio);
    }

    #[test]
    fn proprio_ve_apenas_as_proprias_vendas() {
        let c = cenario();
        let s = scope(Escopo::Proprio);
        let vis = s.visibilidade(&c.hierarquia);

        let minha = VendaRef { usuario_id: s.usuario_id, unidade_id: c.unidade_a1, equipe_id: None };
        let alheia = VendaRef { usuario_id: Uuid::new_v4(), unidade_id: c.unidade_a1, equipe_id: None };

        assert!(vis.permite(&minha));
        assert!(!vis.permite(&alheia));
    }

    #[test]
    fn equipe_ve_vendas_das_suas_equipes_e_as_proprias() {
        let c = cenario();
        let mut s = scope(Escopo::Equipe);
        s.equipe_ids = vec![c.equipe_mecanica_a1];
        let vis = s.visibilidade(&c.hierarquia);

        let da_equipe = VendaRef {
            usuario_id: Uuid::new_v4(),
            unidade_id: c.unidade_a1,
            equipe_id: Some(c.equipe_mecanica_a1),
        };
        let outra_equipe = VendaRef {
            usuario_id: Uuid::new_v4(),
            unidade_id: c.unidade_a1,
            equipe_id: Some(c.equipe_funilaria_a1),
        };
        let propria_sem_equipe = VendaRef { usuario_id: s.usuario_id, unidade_id: c.unidade_b1, equipe_id: None };

        assert!(vis.permite(&da_equipe));
        assert!(!vis.permite(&outra_equipe));
        assert!(vis.permite(&propria_sem_equipe));
    }

    #[test]
    fn grupo_resolve_para_as_unidades_do_grupo() {
        let c = cenario();
        let mut s = scope(Escopo::Grupo);
        s.grupo_ids = vec![c.grupo_a];

        let mut esperado = vec![c.unidade_a1, c.unidade_a2];
        esperado.sort();
        assert_eq!(s.visibilidade(&c.hierarquia), Visibilidade::Unidades(esperado));

        let fora = VendaRef { usuario_id: s.usuario_id, unidade_id: c.unidade_b1, equipe_id: None };
        assert!(!s.visibilidade(&c.hierarquia).permite(&fora));
    }

    #[test]
    fn conglomerado_resolve_para_todas_as_unidades_dos_seus_grupos() {
        let c = cenario();
        let mut s = scope(Escopo::Conglomerado);
        s.conglomerado_ids = vec![c.conglomerado];

        let permitidas = s.unidades_permitidas(&c.hierarquia).unwrap();
        assert!(permitidas.contains(&c.unidade_a1));
        assert!(permitidas.contains(&c.unidade_a2));
        assert!(!permitidas.contains(&c.unidade_b1));
    }

    #[test]
    fn todos_nao_restringe_nada() {
        let c = cenario();
        let s = scope(Escopo::Todos);

        assert_eq!(s.visibilidade(&c.hierarquia), Visibilidade::Todas);
        assert!(s.unidades_permitidas(&c.hierarquia).is_none());
        assert!(s.pode_usar_unidade(&c.hierarquia, c.unidade_b1));
        assert!(s.pode_usar_equipe(&c.hierarquia, c.equipe_b1));
        assert!(s.visibilidade(&c.hierarquia).as_filtro().todas);
    }

    #[test]
    fn operador_lanca_vendas_nas_unidades_das_suas_equipes() {
        let c = cenario();
        let mut s = scope(Escopo::Proprio);
        s.equipe_ids = vec![c.equipe_b1];

        assert!(s.pode_usar_unidade(&c.hierarquia, c.unidade_b1));
        assert!(!s.pode_usar_unidade(&c.hierarquia, c.unidade_a1));
        assert!(s.pode_usar_equipe(&c.hierarquia, c.equipe_b1));
        assert!(!s.pode_usar_equipe(&c.hierarquia, c.equipe_mecanica_a1));
    }

    #[test]
    fn gerente_com_tipos_ve_apenas_equipes_desses_tipos() {
        let c = cenario();
        let mut s = scope(Escopo::Unidade);
        s.unidade_ids = vec![c.unidade_a1];

        let todas = s.equipes_permitidas(&c.hierarquia).unwrap();
        assert_eq!(todas.len(), 2);

        s.tipo_equipe_ids = vec![c.tipo_mecanica];
        let filtradas = s.equipes_permitidas(&c.hierarquia).unwrap();
        assert_eq!(filtradas.len(), 1);
        assert!(filtradas.contains(&c.equipe_mecanica_a1));
    }

    #[test]
    fn diretor_de_outro_grupo_nao_usa_unidade_alheia() {
        let c = cenario();
        let mut s = scope(Escopo::Grupo);
        s.grupo_ids = vec![c.grupo_b];

        assert!(s.pode_usar_unidade(&c.hierarquia, c.unidade_b1));
        assert!(!s.pode_usar_unidade(&c.hierarquia, c.unidade_a2));
    }

    #[test]
    fn filtro_sql_espelha_a_visibilidade() {
        let usuario = Uuid::new_v4();
        let equipe = Uuid::new_v4();
        let filtro = Visibilidade::Equipes { usuario_id: usuario, equipe_ids: vec![equipe] }.as_filtro();

        assert!(!filtro.todas);
        assert_eq!(filtro.usuario_id, Some(usuario));
        assert_eq!(filtro.equipe_ids, vec![equipe]);
        assert!(filtro.unidade_ids.is_empty());
    }

    #[test]
    fn campos_do_formulario_por_escopo() {
        let equipe = Escopo::Equipe.campos_formulario();
        assert!(equipe.equipes && !equipe.tipos_equipe && !equipe.unidades);

        let grupo = Escopo::Grupo.campos_formulario();
        assert!(grupo.grupos && grupo.tipos_equipe && !grupo.equipes);

        assert_eq!(Escopo::Todos.campos_formulario(), CamposFormulario::default());
    }

    #[test]
    fn vinculos_irrelevantes_sao_descartados() {
        let equipe = Uuid::new_v4();
        let unidade = Uuid::new_v4();
        let tipo = Uuid::new_v4();
        let vinculos = Vinculos {
            equipe_ids: vec![equipe, equipe],
            tipo_equipe_ids: vec![tipo],
            unidade_ids: vec![unidade],
            ..Default::default()
        };

        let supervisor = vinculos.clone().para_escopo(Escopo::Equipe);
        assert_eq!(supervisor.equipe_ids, vec![equipe]);
        assert!(supervisor.unidade_ids.is_empty());
        assert!(supervisor.tipo_equipe_ids.is_empty());

        let gerente = vinculos.clone().para_escopo(Escopo::Unidade);
        assert!(gerente.equipe_ids.is_empty());
        assert_eq!(gerente.unidade_ids, vec![unidade]);
        assert_eq!(gerente.tipo_equipe_ids, vec![tipo]);

        assert_eq!(vinculos.para_escopo(Escopo::Todos), Vinculos::default());
    }

    #[test]
    fn vinculo_principal_e_obrigatorio() {
        let vazio = Vinculos::default();
        assert_eq!(vazio.vinculo_principal_ausente(Escopo::Proprio), Some("equipe"));
        assert_eq!(vazio.vinculo_principal_ausente(Escopo::Grupo), Some("grupo"));
        assert_eq!(vazio.vinculo_principal_ausente(Escopo::Todos), None);

        let com_unidade = Vinculos { unidade_ids: vec![Uuid::new_v4()], ..Default::default() };
        assert_eq!(com_unidade.vinculo_principal_ausente(Escopo::Unidade), None);
        assert_eq!(com_unidade.vinculo_principal_ausente(Escopo::Conglomerado), Some("conglomerado"));
    }
}
