// src/services/horarios.rs
//
// Resolução dos parâmetros de turno configurados nos itens do contrato:
// horários ("HH:MM") e quantidade máxima de vagas fixas.

use chrono::NaiveTime;

use crate::{common::error::AppError, db::VagasRepositorio, models::vagas::ContratoVigente};

/// Resultado da consulta de quantidade de vagas fixas de um turno.
///
/// Ausente e inválida só se distinguem para efeito de log; nos dois casos o
/// chamador pula o turno inteiro; não existe quantidade padrão, ao
/// contrário dos horários, que têm fallback fixo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantidadeVagas {
    Definida(i64),
    NaoConfigurada,
    Invalida,
}

/// Busca o horário configurado no contrato para a chave de sistema dada.
///
/// Item ausente ou valor malformado viram `None`, nunca erro para o
/// chamador, que decide entre pular o turno (geração fixa) e aplicar o
/// horário padrão (vagas extras).
pub async fn resolver_horario<R: VagasRepositorio>(
    repo: &mut R,
    contrato: &ContratoVigente,
    chave: &str,
) -> Result<Option<NaiveTime>, AppError> {
    match repo.buscar_item_contrato(contrato.id, chave).await? {
        Some(valor) => match interpretar_horario(&valor) {
            Some(horario) => Ok(Some(horario)),
            None => {
                tracing::warn!(
                    "Formato inválido para horário \"{}\" no contrato de {}: \"{}\"",
                    chave,
                    contrato.estabelecimento_nome,
                    valor
                );
                Ok(None)
            }
        },
        None => {
            tracing::warn!(
                "Item de horário \"{}\" não encontrado no contrato de {}",
                chave,
                contrato.estabelecimento_nome
            );
            Ok(None)
        }
    }
}

/// Quantidade de vagas fixas configurada para a chave `max_vagas_fixas_*`.
pub async fn resolver_quantidade<R: VagasRepositorio>(
    repo: &mut R,
    contrato: &ContratoVigente,
    chave: &str,
) -> Result<QuantidadeVagas, AppError> {
    match repo.buscar_item_contrato(contrato.id, chave).await? {
        None => Ok(QuantidadeVagas::NaoConfigurada),
        Some(valor) => match valor.trim().parse::<i64>() {
            Ok(quantidade) => Ok(QuantidadeVagas::Definida(quantidade)),
            Err(_) => Ok(QuantidadeVagas::Invalida),
        },
    }
}

/// Interpreta um valor "H:M" de item de contrato.
/// Exige exatamente duas partes inteiras dentro do relógio; qualquer outra
/// coisa invalida o valor por completo.
pub fn interpretar_horario(valor: &str) -> Option<NaiveTime> {
    let (hora, minuto) = valor.split_once(':')?;
    if minuto.contains(':') {
        return None;
    }
    let hora: u32 = hora.trim().parse().ok()?;
    let minuto: u32 = minuto.trim().parse().ok()?;
    NaiveTime::from_hms_opt(hora, minuto, 0)
}
