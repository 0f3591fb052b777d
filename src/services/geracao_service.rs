// src/services/geracao_service.rs
//
// Geração diária de vagas fixas a partir dos contratos vigentes. A operação
// é idempotente por dia: só o déficit entre a quantidade contratada e as
// vagas já lançadas é criado, nunca se apaga vaga existente.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{PgVagasRepositorio, VagasRepositorio},
    models::vagas::{ContratoVigente, NovaVaga, TipoVaga, Turno},
    services::horarios::{resolver_horario, resolver_quantidade, QuantidadeVagas},
};

/// Decisão tomada para um turno de um contrato durante a geração.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisaoTurno {
    HorarioAusente,
    QuantidadeAusente,
    QuantidadeInvalida,
    JaLancadas,
    Criadas { quantidade: i64 },
}

/// Uma linha do relatório de geração, na granularidade em que o comando
/// imprime progresso: uma decisão por contrato/turno, mais uma linha de
/// falha por contrato que não pôde ser processado.
#[derive(Debug, Clone)]
pub enum LinhaGeracao {
    Turno {
        contrato_id: i64,
        estabelecimento: String,
        turno: &'static str,
        decisao: DecisaoTurno,
    },
    FalhaContrato {
        contrato_id: i64,
        estabelecimento: String,
        erro: String,
    },
}

impl std::fmt::Display for LinhaGeracao {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinhaGeracao::Turno {
                estabelecimento,
                turno,
                decisao,
                ..
            } => match decisao {
                DecisaoTurno::HorarioAusente => write!(
                    f,
                    "Horário ausente ou inválido para o período \"{turno}\" em {estabelecimento}"
                ),
                DecisaoTurno::QuantidadeAusente => write!(
                    f,
                    "Contrato sem item \"max_vagas_fixas_{turno}\" para {estabelecimento}"
                ),
                DecisaoTurno::QuantidadeInvalida => write!(
                    f,
                    "Valor inválido para \"max_vagas_fixas_{turno}\" no contrato de {estabelecimento}"
                ),
                DecisaoTurno::JaLancadas => {
                    write!(f, "Vagas já lançadas ({turno}): {estabelecimento}")
                }
                DecisaoTurno::Criadas { quantidade } => write!(
                    f,
                    "{quantidade} vaga(s) criada(s) para {estabelecimento} ({turno})"
                ),
            },
            LinhaGeracao::FalhaContrato {
                estabelecimento,
                erro,
                ..
            } => write!(f, "Erro ao processar contrato de {estabelecimento}: {erro}"),
        }
    }
}

#[derive(Debug, Default)]
pub struct RelatorioGeracao {
    pub linhas: Vec<LinhaGeracao>,
}

impl RelatorioGeracao {
    pub fn vagas_criadas_total(&self) -> i64 {
        self.linhas
            .iter()
            .map(|linha| match linha {
                LinhaGeracao::Turno {
                    decisao: DecisaoTurno::Criadas { quantidade },
                    ..
                } => *quantidade,
                _ => 0,
            })
            .sum()
    }
}

/// Percorre os contratos vigentes e completa as vagas fixas do dia.
///
/// Falha em um contrato não derruba os demais: vira uma linha de relatório
/// e o laço segue. Só o erro na própria listagem de contratos aborta a
/// execução.
pub async fn gerar_vagas_fixas<R: VagasRepositorio>(
    repo: &mut R,
    hoje: NaiveDate,
) -> Result<RelatorioGeracao, AppError> {
    let contratos = repo.listar_contratos_vigentes().await?;
    let mut relatorio = RelatorioGeracao::default();

    for contrato in &contratos {
        if !contrato.vigente_em(hoje) {
            continue;
        }

        match gerar_para_contrato(repo, contrato, hoje).await {
            Ok(linhas) => relatorio.linhas.extend(linhas),
            Err(erro) => {
                tracing::error!(
                    "Falha ao gerar vagas para o contrato {} ({}): {}",
                    contrato.id,
                    contrato.estabelecimento_nome,
                    erro
                );
                relatorio.linhas.push(LinhaGeracao::FalhaContrato {
                    contrato_id: contrato.id,
                    estabelecimento: contrato.estabelecimento_nome.clone(),
                    erro: erro.to_string(),
                });
            }
        }
    }

    Ok(relatorio)
}

async fn gerar_para_contrato<R: VagasRepositorio>(
    repo: &mut R,
    contrato: &ContratoVigente,
    hoje: NaiveDate,
) -> Result<Vec<LinhaGeracao>, AppError> {
    let mut linhas = Vec::with_capacity(Turno::TODOS.len());

    for turno in Turno::TODOS {
        let decisao = gerar_turno(repo, contrato, turno, hoje).await?;
        linhas.push(LinhaGeracao::Turno {
            contrato_id: contrato.id,
            estabelecimento: contrato.estabelecimento_nome.clone(),
            turno: turno.chave(),
            decisao,
        });
    }

    Ok(linhas)
}

async fn gerar_turno<R: VagasRepositorio>(
    repo: &mut R,
    contrato: &ContratoVigente,
    turno: Turno,
    hoje: NaiveDate,
) -> Result<DecisaoTurno, AppError> {
    // Na geração fixa não há horário padrão: sem o par configurado, o turno
    // é pulado.
    let inicio = resolver_horario(repo, contrato, turno.chave_hora_inicio()).await?;
    let fim = resolver_horario(repo, contrato, turno.chave_hora_fim()).await?;
    let (Some(inicio), Some(fim)) = (inicio, fim) else {
        return Ok(DecisaoTurno::HorarioAusente);
    };

    let alvo = match resolver_quantidade(repo, contrato, turno.chave_max_vagas()).await? {
        QuantidadeVagas::Definida(quantidade) => quantidade,
        QuantidadeVagas::NaoConfigurada => return Ok(DecisaoTurno::QuantidadeAusente),
        QuantidadeVagas::Invalida => return Ok(DecisaoTurno::QuantidadeInvalida),
    };

    let existentes = repo
        .contar_vagas_fixas(contrato.id, hoje, inicio, fim)
        .await?;
    if existentes >= alvo {
        return Ok(DecisaoTurno::JaLancadas);
    }

    let deficit = alvo - existentes;
    for _ in 0..deficit {
        // Sem status explícito: vale o default da camada de persistência.
        repo.criar_vaga(&NovaVaga {
            contrato_id: contrato.id,
            data_da_vaga: hoje,
            hora_inicio_padrao: inicio,
            hora_fim_padrao: fim,
            tipo_vaga: TipoVaga::Fixa,
            status: None,
        })
        .await?;
    }

    Ok(DecisaoTurno::Criadas {
        quantidade: deficit,
    })
}

#[derive(Clone)]
pub struct GeracaoService {
    pool: PgPool,
}

impl GeracaoService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A geração fixa não é transacional entre contratos: cada vaga criada é
    /// uma unidade independente, e um contrato com problema não impede os
    /// seguintes.
    pub async fn executar(&self, hoje: NaiveDate) -> Result<RelatorioGeracao, AppError> {
        let mut conn = self.pool.acquire().await?;
        gerar_vagas_fixas(&mut PgVagasRepositorio::new(&mut conn), hoje).await
    }
}
