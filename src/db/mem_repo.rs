// src/db/mem_repo.rs
//! Implementação em memória do [`VagasRepositorio`] para os testes de
//! service, com um construtor fluente para montar o cenário de cada teste.

use std::collections::HashMap;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::{
    common::error::AppError,
    db::vagas_repo::VagasRepositorio,
    models::vagas::{
        Candidatura, ContratoVigente, Motoboy, NovaVaga, StatusCandidatura, StatusVaga, TipoVaga,
        Vaga,
    },
};

#[derive(Default)]
pub struct MemRepositorio {
    pub contratos: Vec<ContratoVigente>,
    /// (contrato_id, chave_sistema, valor)
    pub itens: Vec<(i64, String, String)>,
    pub vagas: Vec<Vaga>,
    pub motoboys: Vec<Motoboy>,
    pub candidaturas: Vec<Candidatura>,
    pub empresa_do_estabelecimento: HashMap<i64, i64>,
    /// Falha injetada: `criar_vaga` devolve erro para este contrato.
    pub falhar_criacao_no_contrato: Option<i64>,
    proximo_id: i64,
}

impl MemRepositorio {
    pub fn novo() -> Self {
        Self {
            proximo_id: 1000,
            ..Default::default()
        }
    }

    pub fn com_contrato(mut self, id: i64, estabelecimento_id: i64, nome: &str) -> Self {
        self.contratos.push(ContratoVigente {
            id,
            estabelecimento_id,
            estabelecimento_nome: nome.to_string(),
            data_inicio: None,
            data_fim: None,
        });
        self
    }

    pub fn com_vigencia(
        mut self,
        contrato_id: i64,
        data_inicio: Option<NaiveDate>,
        data_fim: Option<NaiveDate>,
    ) -> Self {
        if let Some(contrato) = self.contratos.iter_mut().find(|c| c.id == contrato_id) {
            contrato.data_inicio = data_inicio;
            contrato.data_fim = data_fim;
        }
        self
    }

    pub fn com_item(mut self, contrato_id: i64, chave: &str, valor: &str) -> Self {
        self.itens
            .push((contrato_id, chave.to_string(), valor.to_string()));
        self
    }

    pub fn com_empresa(mut self, estabelecimento_id: i64, empresa_id: i64) -> Self {
        self.empresa_do_estabelecimento
            .insert(estabelecimento_id, empresa_id);
        self
    }

    pub fn com_motoboy(mut self, id: i64, empresa_id: i64, status: &str) -> Self {
        self.motoboys.push(Motoboy {
            id,
            empresa_id,
            nome: format!("Motoboy {id}"),
            status: status.to_string(),
        });
        self
    }

    pub fn com_vaga(mut self, vaga: Vaga) -> Self {
        self.vagas.push(vaga);
        self
    }

    pub fn com_candidatura(mut self, motoboy_id: i64, vaga_id: i64) -> Self {
        let id = self.gerar_id();
        self.candidaturas.push(Candidatura {
            id,
            motoboy_id,
            vaga_id,
            status: StatusCandidatura::Pendente,
            data_candidatura: Utc::now(),
        });
        self
    }

    fn gerar_id(&mut self) -> i64 {
        self.proximo_id += 1;
        self.proximo_id
    }
}

#[async_trait]
impl VagasRepositorio for MemRepositorio {
    async fn listar_contratos_vigentes(&mut self) -> Result<Vec<ContratoVigente>, AppError> {
        Ok(self.contratos.clone())
    }

    async fn buscar_contrato_vigente(
        &mut self,
        estabelecimento_id: i64,
    ) -> Result<Option<ContratoVigente>, AppError> {
        Ok(self
            .contratos
            .iter()
            .find(|c| c.estabelecimento_id == estabelecimento_id)
            .cloned())
    }

    async fn buscar_item_contrato(
        &mut self,
        contrato_id: i64,
        chave: &str,
    ) -> Result<Option<String>, AppError> {
        Ok(self
            .itens
            .iter()
            .find(|(id, c, _)| *id == contrato_id && c == chave)
            .map(|(_, _, valor)| valor.clone()))
    }

    async fn contar_vagas_fixas(
        &mut self,
        contrato_id: i64,
        data: NaiveDate,
        inicio: NaiveTime,
        fim: NaiveTime,
    ) -> Result<i64, AppError> {
        Ok(self
            .vagas
            .iter()
            .filter(|v| {
                v.contrato_id == contrato_id
                    && v.data_da_vaga == data
                    && v.hora_inicio_padrao == inicio
                    && v.hora_fim_padrao == fim
                    && v.tipo_vaga == TipoVaga::Fixa
            })
            .count() as i64)
    }

    async fn criar_vaga(&mut self, nova: &NovaVaga) -> Result<Vaga, AppError> {
        if self.falhar_criacao_no_contrato == Some(nova.contrato_id) {
            return Err(AppError::Interno(anyhow!("falha injetada pelo teste")));
        }

        let vaga = Vaga {
            id: self.gerar_id(),
            contrato_id: nova.contrato_id,
            data_da_vaga: nova.data_da_vaga,
            hora_inicio_padrao: nova.hora_inicio_padrao,
            hora_fim_padrao: nova.hora_fim_padrao,
            tipo_vaga: nova.tipo_vaga,
            // Mesmo comportamento do DEFAULT da tabela.
            status: nova.status.unwrap_or(StatusVaga::Aberta),
            criado_em: Utc::now(),
        };
        self.vagas.push(vaga.clone());
        Ok(vaga)
    }

    async fn buscar_vaga_para_atualizar(
        &mut self,
        vaga_id: i64,
    ) -> Result<Option<Vaga>, AppError> {
        Ok(self.vagas.iter().find(|v| v.id == vaga_id).cloned())
    }

    async fn atualizar_status_vaga(
        &mut self,
        vaga_id: i64,
        status: StatusVaga,
    ) -> Result<(), AppError> {
        if let Some(vaga) = self.vagas.iter_mut().find(|v| v.id == vaga_id) {
            vaga.status = status;
        }
        Ok(())
    }

    async fn empresa_da_vaga(&mut self, vaga_id: i64) -> Result<Option<i64>, AppError> {
        let Some(vaga) = self.vagas.iter().find(|v| v.id == vaga_id) else {
            return Ok(None);
        };
        let Some(contrato) = self.contratos.iter().find(|c| c.id == vaga.contrato_id) else {
            return Ok(None);
        };
        Ok(self
            .empresa_do_estabelecimento
            .get(&contrato.estabelecimento_id)
            .copied())
    }

    async fn listar_motoboys_ativos(
        &mut self,
        empresa_id: i64,
    ) -> Result<Vec<Motoboy>, AppError> {
        Ok(self
            .motoboys
            .iter()
            .filter(|m| m.empresa_id == empresa_id && m.status == "ativo")
            .cloned()
            .collect())
    }

    async fn existe_candidatura(
        &mut self,
        motoboy_id: i64,
        vaga_id: i64,
    ) -> Result<bool, AppError> {
        Ok(self
            .candidaturas
            .iter()
            .any(|c| c.motoboy_id == motoboy_id && c.vaga_id == vaga_id))
    }

    async fn criar_candidatura(
        &mut self,
        motoboy_id: i64,
        vaga_id: i64,
        agora: DateTime<Utc>,
    ) -> Result<Candidatura, AppError> {
        let candidatura = Candidatura {
            id: self.gerar_id(),
            motoboy_id,
            vaga_id,
            status: StatusCandidatura::Pendente,
            data_candidatura: agora,
        };
        self.candidaturas.push(candidatura.clone());
        Ok(candidatura)
    }
}
