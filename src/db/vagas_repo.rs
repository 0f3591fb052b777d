// src/db/vagas_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::PgConnection;

use crate::{
    common::error::AppError,
    models::vagas::{
        Candidatura, ContratoVigente, Motoboy, NovaVaga, StatusCandidatura, StatusVaga, TipoVaga,
        Vaga,
    },
};

/// Contrato de persistência das operações de vaga.
///
/// A implementação Postgres enxerga uma conexão crua (`&mut PgConnection`),
/// então o mesmo valor funciona tanto dentro de uma transação quanto fora
/// dela; quem decide o escopo transacional é o service. Os testes usam uma
/// implementação em memória deste mesmo trait.
#[async_trait]
pub trait VagasRepositorio: Send {
    async fn listar_contratos_vigentes(&mut self) -> Result<Vec<ContratoVigente>, AppError>;

    async fn buscar_contrato_vigente(
        &mut self,
        estabelecimento_id: i64,
    ) -> Result<Option<ContratoVigente>, AppError>;

    /// Valor bruto do primeiro item do contrato com a chave de sistema dada.
    async fn buscar_item_contrato(
        &mut self,
        contrato_id: i64,
        chave: &str,
    ) -> Result<Option<String>, AppError>;

    async fn contar_vagas_fixas(
        &mut self,
        contrato_id: i64,
        data: NaiveDate,
        inicio: NaiveTime,
        fim: NaiveTime,
    ) -> Result<i64, AppError>;

    async fn criar_vaga(&mut self, nova: &NovaVaga) -> Result<Vaga, AppError>;

    /// Busca a vaga travando a linha para atualização (`FOR UPDATE` no
    /// Postgres): dois encerramentos concorrentes resultam em exatamente um
    /// sucesso e uma rejeição.
    async fn buscar_vaga_para_atualizar(&mut self, vaga_id: i64)
        -> Result<Option<Vaga>, AppError>;

    async fn atualizar_status_vaga(
        &mut self,
        vaga_id: i64,
        status: StatusVaga,
    ) -> Result<(), AppError>;

    /// Empresa dona da vaga (vaga -> contrato -> estabelecimento -> empresa).
    async fn empresa_da_vaga(&mut self, vaga_id: i64) -> Result<Option<i64>, AppError>;

    async fn listar_motoboys_ativos(&mut self, empresa_id: i64)
        -> Result<Vec<Motoboy>, AppError>;

    async fn existe_candidatura(
        &mut self,
        motoboy_id: i64,
        vaga_id: i64,
    ) -> Result<bool, AppError>;

    async fn criar_candidatura(
        &mut self,
        motoboy_id: i64,
        vaga_id: i64,
        agora: DateTime<Utc>,
    ) -> Result<Candidatura, AppError>;
}

pub struct PgVagasRepositorio<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> PgVagasRepositorio<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }
}

const COLUNAS_VAGA: &str =
    "id, contrato_id, data_da_vaga, hora_inicio_padrao, hora_fim_padrao, tipo_vaga, status, criado_em";

#[async_trait]
impl VagasRepositorio for PgVagasRepositorio<'_> {
    async fn listar_contratos_vigentes(&mut self) -> Result<Vec<ContratoVigente>, AppError> {
        let contratos = sqlx::query_as::<_, ContratoVigente>(
            r#"
            SELECT c.id, c.estabelecimento_id, e.nome AS estabelecimento_nome,
                   c.data_inicio, c.data_fim
            FROM estabelecimento_contratos c
            JOIN estabelecimentos e ON e.id = c.estabelecimento_id
            WHERE c.status = 'vigente'
            ORDER BY c.id
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(contratos)
    }

    async fn buscar_contrato_vigente(
        &mut self,
        estabelecimento_id: i64,
    ) -> Result<Option<ContratoVigente>, AppError> {
        let contrato = sqlx::query_as::<_, ContratoVigente>(
            r#"
            SELECT c.id, c.estabelecimento_id, e.nome AS estabelecimento_nome,
                   c.data_inicio, c.data_fim
            FROM estabelecimento_contratos c
            JOIN estabelecimentos e ON e.id = c.estabelecimento_id
            WHERE c.estabelecimento_id = $1 AND c.status = 'vigente'
            LIMIT 1
            "#,
        )
        .bind(estabelecimento_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(contrato)
    }

    async fn buscar_item_contrato(
        &mut self,
        contrato_id: i64,
        chave: &str,
    ) -> Result<Option<String>, AppError> {
        let valor = sqlx::query_scalar::<_, String>(
            r#"
            SELECT valor FROM contrato_itens
            WHERE contrato_id = $1 AND chave_sistema = $2
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(contrato_id)
        .bind(chave)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(valor)
    }

    async fn contar_vagas_fixas(
        &mut self,
        contrato_id: i64,
        data: NaiveDate,
        inicio: NaiveTime,
        fim: NaiveTime,
    ) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM vagas
            WHERE contrato_id = $1
              AND data_da_vaga = $2
              AND hora_inicio_padrao = $3
              AND hora_fim_padrao = $4
              AND tipo_vaga = $5
            "#,
        )
        .bind(contrato_id)
        .bind(data)
        .bind(inicio)
        .bind(fim)
        .bind(TipoVaga::Fixa)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(total)
    }

    async fn criar_vaga(&mut self, nova: &NovaVaga) -> Result<Vaga, AppError> {
        // Sem status explícito o DEFAULT da tabela ('aberta') prevalece.
        let vaga = match nova.status {
            Some(status) => {
                sqlx::query_as::<_, Vaga>(&format!(
                    r#"
                    INSERT INTO vagas (contrato_id, data_da_vaga, hora_inicio_padrao,
                                       hora_fim_padrao, tipo_vaga, status)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    RETURNING {COLUNAS_VAGA}
                    "#
                ))
                .bind(nova.contrato_id)
                .bind(nova.data_da_vaga)
                .bind(nova.hora_inicio_padrao)
                .bind(nova.hora_fim_padrao)
                .bind(nova.tipo_vaga)
                .bind(status)
                .fetch_one(&mut *self.conn)
                .await?
            }
            None => {
                sqlx::query_as::<_, Vaga>(&format!(
                    r#"
                    INSERT INTO vagas (contrato_id, data_da_vaga, hora_inicio_padrao,
                                       hora_fim_padrao, tipo_vaga)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING {COLUNAS_VAGA}
                    "#
                ))
                .bind(nova.contrato_id)
                .bind(nova.data_da_vaga)
                .bind(nova.hora_inicio_padrao)
                .bind(nova.hora_fim_padrao)
                .bind(nova.tipo_vaga)
                .fetch_one(&mut *self.conn)
                .await?
            }
        };

        Ok(vaga)
    }

    async fn buscar_vaga_para_atualizar(
        &mut self,
        vaga_id: i64,
    ) -> Result<Option<Vaga>, AppError> {
        let vaga = sqlx::query_as::<_, Vaga>(&format!(
            "SELECT {COLUNAS_VAGA} FROM vagas WHERE id = $1 FOR UPDATE"
        ))
        .bind(vaga_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(vaga)
    }

    async fn atualizar_status_vaga(
        &mut self,
        vaga_id: i64,
        status: StatusVaga,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE vagas SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(vaga_id)
            .execute(&mut *self.conn)
            .await?;

        Ok(())
    }

    async fn empresa_da_vaga(&mut self, vaga_id: i64) -> Result<Option<i64>, AppError> {
        let empresa_id = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT e.empresa_id
            FROM vagas v
            JOIN estabelecimento_contratos c ON c.id = v.contrato_id
            JOIN estabelecimentos e ON e.id = c.estabelecimento_id
            WHERE v.id = $1
            "#,
        )
        .bind(vaga_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(empresa_id)
    }

    async fn listar_motoboys_ativos(
        &mut self,
        empresa_id: i64,
    ) -> Result<Vec<Motoboy>, AppError> {
        let motoboys = sqlx::query_as::<_, Motoboy>(
            r#"
            SELECT id, empresa_id, nome, status FROM motoboys
            WHERE empresa_id = $1 AND status = 'ativo'
            ORDER BY id
            "#,
        )
        .bind(empresa_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(motoboys)
    }

    async fn existe_candidatura(
        &mut self,
        motoboy_id: i64,
        vaga_id: i64,
    ) -> Result<bool, AppError> {
        let existe = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM motoboy_vaga_candidaturas
                WHERE motoboy_id = $1 AND vaga_id = $2
            )
            "#,
        )
        .bind(motoboy_id)
        .bind(vaga_id)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(existe)
    }

    async fn criar_candidatura(
        &mut self,
        motoboy_id: i64,
        vaga_id: i64,
        agora: DateTime<Utc>,
    ) -> Result<Candidatura, AppError> {
        let candidatura = sqlx::query_as::<_, Candidatura>(
            r#"
            INSERT INTO motoboy_vaga_candidaturas (motoboy_id, vaga_id, status, data_candidatura)
            VALUES ($1, $2, $3, $4)
            RETURNING id, motoboy_id, vaga_id, status, data_candidatura
            "#,
        )
        .bind(motoboy_id)
        .bind(vaga_id)
        .bind(StatusCandidatura::Pendente)
        .bind(agora)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(candidatura)
    }
}
