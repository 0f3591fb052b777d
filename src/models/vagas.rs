// src/models/vagas.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tipo_vaga", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TipoVaga {
    Fixa,
    Extra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "status_vaga", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StatusVaga {
    Aberta,
    EmAndamento,
    Encerrada,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "status_candidatura", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StatusCandidatura {
    Pendente,
    Aceita,
    Recusada,
}

/// Turno de trabalho. A API pública fala "manha"/"noite", mas as chaves de
/// contrato herdaram a grafia "dia"/"noite": é o mesmo conceito com duas
/// grafias, não dois turnos distintos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Turno {
    Manha,
    Noite,
}

impl Turno {
    pub const TODOS: [Turno; 2] = [Turno::Manha, Turno::Noite];

    /// Grafia usada nas chaves de sistema do contrato e no relatório do
    /// comando de geração ("dia"/"noite").
    pub fn chave(self) -> &'static str {
        match self {
            Turno::Manha => "dia",
            Turno::Noite => "noite",
        }
    }

    /// Grafia aceita pela API ("manha"/"noite").
    pub fn rotulo(self) -> &'static str {
        match self {
            Turno::Manha => "manha",
            Turno::Noite => "noite",
        }
    }

    pub fn from_rotulo(valor: &str) -> Option<Turno> {
        match valor {
            "manha" => Some(Turno::Manha),
            "noite" => Some(Turno::Noite),
            _ => None,
        }
    }

    pub fn chave_hora_inicio(self) -> &'static str {
        match self {
            Turno::Manha => "hora_inicio_dia",
            Turno::Noite => "hora_inicio_noite",
        }
    }

    pub fn chave_hora_fim(self) -> &'static str {
        match self {
            Turno::Manha => "hora_fim_dia",
            Turno::Noite => "hora_fim_noite",
        }
    }

    pub fn chave_max_vagas(self) -> &'static str {
        match self {
            Turno::Manha => "max_vagas_fixas_dia",
            Turno::Noite => "max_vagas_fixas_noite",
        }
    }

    /// Horários de fallback quando o contrato não define o turno.
    /// O par da noite (18:00–02:00) atravessa a meia-noite e é guardado como
    /// um par de horas de relógio, sem flag de virada de dia.
    pub fn horario_padrao(self) -> (NaiveTime, NaiveTime) {
        match self {
            Turno::Manha => (hora(8, 0), hora(18, 0)),
            Turno::Noite => (hora(18, 0), hora(2, 0)),
        }
    }
}

fn hora(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN)
}

// --- Structs de Linha (banco) ---

#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct ContratoVigente {
    #[schema(example = 7)]
    pub id: i64,
    #[schema(example = 11)]
    pub estabelecimento_id: i64,
    #[schema(example = "Mister X Centro")]
    pub estabelecimento_nome: String,
    pub data_inicio: Option<NaiveDate>,
    pub data_fim: Option<NaiveDate>,
}

impl ContratoVigente {
    /// Janela de validade do contrato; cada limite só vale quando presente.
    pub fn vigente_em(&self, dia: NaiveDate) -> bool {
        if let Some(inicio) = self.data_inicio {
            if inicio > dia {
                return false;
            }
        }
        if let Some(fim) = self.data_fim {
            if fim < dia {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Vaga {
    #[schema(example = 42)]
    pub id: i64,
    pub contrato_id: i64,
    pub data_da_vaga: NaiveDate,
    pub hora_inicio_padrao: NaiveTime,
    pub hora_fim_padrao: NaiveTime,
    pub tipo_vaga: TipoVaga,
    pub status: StatusVaga,
    pub criado_em: DateTime<Utc>,
}

/// Dados de inserção de uma vaga. `status = None` deixa valer o default da
/// camada de persistência.
#[derive(Debug, Clone)]
pub struct NovaVaga {
    pub contrato_id: i64,
    pub data_da_vaga: NaiveDate,
    pub hora_inicio_padrao: NaiveTime,
    pub hora_fim_padrao: NaiveTime,
    pub tipo_vaga: TipoVaga,
    pub status: Option<StatusVaga>,
}

#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Motoboy {
    pub id: i64,
    pub empresa_id: i64,
    #[schema(example = "João da Silva")]
    pub nome: String,
    #[schema(example = "ativo")]
    pub status: String,
}

#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Candidatura {
    pub id: i64,
    pub motoboy_id: i64,
    pub vaga_id: i64,
    pub status: StatusCandidatura,
    pub data_candidatura: DateTime<Utc>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, ToSchema)]
pub struct GerarVagasExtrasPayload {
    #[schema(example = 11)]
    pub estabelecimento_id: Option<i64>,
    #[schema(example = "2025-03-01")]
    pub data_inicio: Option<String>,
    #[schema(example = 2)]
    pub quantidade: Option<i64>,
    #[schema(example = "noite")]
    pub turno: Option<String>,
}

/// Resumo de uma vaga recém-criada, no formato que o desktop espera
/// (data `YYYY-MM-DD`, horas `HH:MM`).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VagaCriada {
    #[schema(example = 101)]
    pub id: i64,
    pub status: StatusVaga,
    #[schema(example = "2025-03-01")]
    pub data: String,
    #[schema(example = "18:00")]
    pub inicio: String,
    #[schema(example = "02:00")]
    pub fim: String,
    pub turno: Turno,
}

impl VagaCriada {
    pub fn resumir(vaga: &Vaga, turno: Turno) -> Self {
        Self {
            id: vaga.id,
            status: vaga.status,
            data: vaga.data_da_vaga.format("%Y-%m-%d").to_string(),
            inicio: vaga.hora_inicio_padrao.format("%H:%M").to_string(),
            fim: vaga.hora_fim_padrao.format("%H:%M").to_string(),
            turno,
        }
    }
}
