// src/services/vagas_service.rs
//
// Operações sob demanda sobre vagas: criação de vagas extras e encerramento
// com geração automática de candidaturas. As duas rodam como unidade
// atômica: o service abre a transação e o rollback é garantido em qualquer
// saída com erro.

use anyhow::anyhow;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{PgVagasRepositorio, VagasRepositorio},
    models::vagas::{GerarVagasExtrasPayload, NovaVaga, StatusVaga, TipoVaga, Turno, VagaCriada},
    services::horarios::resolver_horario,
};

#[derive(Debug)]
pub struct VagasExtrasCriadas {
    pub vagas_criadas: Vec<VagaCriada>,
    pub estabelecimento_id: i64,
    pub data_inicio: String,
    pub turno: Turno,
}

#[derive(Debug)]
pub struct EncerramentoVaga {
    pub vaga_id: i64,
    pub candidaturas_geradas: i64,
}

/// Valida o pedido e cria exatamente `quantidade` vagas extras.
///
/// A validação segue uma ordem fixa, cada condição com seu próprio erro,
/// inclusive a busca do contrato ANTES do parse da data: estabelecimento
/// desconhecido responde 404 mesmo com data ruim.
pub async fn criar_vagas_extras<R: VagasRepositorio>(
    repo: &mut R,
    pedido: &GerarVagasExtrasPayload,
) -> Result<VagasExtrasCriadas, AppError> {
    let Some(estabelecimento_id) = pedido.estabelecimento_id else {
        return Err(AppError::CampoObrigatorio("estabelecimento_id"));
    };
    let Some(data_inicio) = pedido.data_inicio.as_deref() else {
        return Err(AppError::CampoObrigatorio("data_inicio"));
    };
    let quantidade = match pedido.quantidade {
        Some(quantidade) if quantidade >= 1 => quantidade,
        _ => return Err(AppError::QuantidadeInvalida),
    };
    let turno = pedido
        .turno
        .as_deref()
        .and_then(Turno::from_rotulo)
        .ok_or(AppError::TurnoInvalido)?;

    let contrato = repo
        .buscar_contrato_vigente(estabelecimento_id)
        .await?
        .ok_or(AppError::ContratoNaoEncontrado(estabelecimento_id))?;

    let data_vaga = NaiveDate::parse_from_str(data_inicio, "%Y-%m-%d")
        .map_err(|_| AppError::FormatoDataInvalido)?;

    // Horários do contrato; faltando qualquer um dos lados, o par inteiro
    // cai no padrão do turno (manha 08:00–18:00, noite 18:00–02:00).
    let inicio = resolver_horario(repo, &contrato, turno.chave_hora_inicio()).await?;
    let fim = resolver_horario(repo, &contrato, turno.chave_hora_fim()).await?;
    let (inicio, fim) = match (inicio, fim) {
        (Some(inicio), Some(fim)) => (inicio, fim),
        _ => {
            tracing::warn!(
                "Horários não encontrados no contrato para o turno \"{}\". Usando horários padrão.",
                turno.rotulo()
            );
            turno.horario_padrao()
        }
    };

    let mut vagas_criadas = Vec::with_capacity(quantidade as usize);
    for _ in 0..quantidade {
        let vaga = repo
            .criar_vaga(&NovaVaga {
                contrato_id: contrato.id,
                data_da_vaga: data_vaga,
                hora_inicio_padrao: inicio,
                hora_fim_padrao: fim,
                tipo_vaga: TipoVaga::Extra,
                status: Some(StatusVaga::Aberta),
            })
            .await?;
        vagas_criadas.push(VagaCriada::resumir(&vaga, turno));
    }

    Ok(VagasExtrasCriadas {
        vagas_criadas,
        estabelecimento_id,
        data_inicio: data_inicio.to_string(),
        turno,
    })
}

/// Encerra a vaga e gera uma candidatura pendente para cada motoboy ativo
/// da empresa dona que ainda não se candidatou a ela.
pub async fn encerrar_e_candidatar<R: VagasRepositorio>(
    repo: &mut R,
    vaga_id: i64,
    agora: DateTime<Utc>,
) -> Result<EncerramentoVaga, AppError> {
    let vaga = repo
        .buscar_vaga_para_atualizar(vaga_id)
        .await?
        .ok_or(AppError::VagaNaoEncontrada)?;

    if vaga.status != StatusVaga::Aberta {
        return Err(AppError::VagaNaoAberta {
            status: vaga.status,
        });
    }

    repo.atualizar_status_vaga(vaga_id, StatusVaga::Encerrada)
        .await?;

    let empresa_id = repo.empresa_da_vaga(vaga_id).await?.ok_or_else(|| {
        AppError::Interno(anyhow!(
            "vaga {vaga_id} sem cadeia contrato/estabelecimento/empresa"
        ))
    })?;

    let motoboys = repo.listar_motoboys_ativos(empresa_id).await?;
    let mut candidaturas_geradas = 0;
    for motoboy in &motoboys {
        // No máximo uma candidatura por (motoboy, vaga); a unicidade é
        // checada aqui, não no banco.
        if repo.existe_candidatura(motoboy.id, vaga_id).await? {
            continue;
        }
        repo.criar_candidatura(motoboy.id, vaga_id, agora).await?;
        candidaturas_geradas += 1;
    }

    Ok(EncerramentoVaga {
        vaga_id,
        candidaturas_geradas,
    })
}

#[derive(Clone)]
pub struct VagasService {
    pool: PgPool,
}

impl VagasService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Criação das vagas extras em lote: ou todas entram, ou nenhuma.
    pub async fn gerar_vagas_extras(
        &self,
        pedido: &GerarVagasExtrasPayload,
    ) -> Result<VagasExtrasCriadas, AppError> {
        let mut tx = self.pool.begin().await?;
        let resultado = criar_vagas_extras(&mut PgVagasRepositorio::new(&mut *tx), pedido).await?;
        tx.commit().await?;
        Ok(resultado)
    }

    /// Encerramento e fanout na mesma unidade atômica: qualquer falha na
    /// geração de candidaturas desfaz também a mudança de status. A linha da
    /// vaga é lida com trava de atualização, então dois encerramentos
    /// concorrentes terminam em um sucesso e uma rejeição.
    pub async fn fechar_e_candidatar(&self, vaga_id: i64) -> Result<EncerramentoVaga, AppError> {
        let mut tx = self.pool.begin().await?;
        let resultado =
            encerrar_e_candidatar(&mut PgVagasRepositorio::new(&mut *tx), vaga_id, Utc::now())
                .await?;
        tx.commit().await?;
        Ok(resultado)
    }
}
