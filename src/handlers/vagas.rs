// src/handlers/vagas.rs

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    config::AppState,
    models::vagas::{GerarVagasExtrasPayload, Turno, VagaCriada},
};

#[derive(Debug, Serialize, ToSchema)]
pub struct GerarVagasExtrasResponse {
    pub success: bool,
    #[schema(example = "2 vagas extras criadas com sucesso")]
    pub message: String,
    pub vagas_criadas: Vec<VagaCriada>,
    #[schema(example = 2)]
    pub vagas_criadas_total: usize,
    #[schema(example = 11)]
    pub estabelecimento_id: i64,
    #[schema(example = "2025-03-01")]
    pub data_inicio: String,
    pub turno: Turno,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FecharECandidatarResponse {
    pub success: bool,
    #[schema(example = "Vaga fechada e 3 candidaturas geradas")]
    pub message: String,
    #[schema(example = 42)]
    pub vaga_id: i64,
    #[schema(example = 3)]
    pub candidaturas_geradas: i64,
}

// POST /api/v1/desktop/motoboy-vaga/gerar-vagas-extras/
#[utoipa::path(
    post,
    path = "/api/v1/desktop/motoboy-vaga/gerar-vagas-extras/",
    tag = "Vagas",
    request_body = GerarVagasExtrasPayload,
    responses(
        (status = 200, description = "Vagas extras criadas", body = GerarVagasExtrasResponse),
        (status = 400, description = "Pedido inválido (campo ausente, quantidade, turno, data ou JSON)"),
        (status = 404, description = "Contrato ativo não encontrado para o estabelecimento"),
    )
)]
pub async fn gerar_vagas_extras(
    State(app_state): State<AppState>,
    payload: Result<Json<GerarVagasExtrasPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    // Corpo que nem é JSON válido: 400 genérico, antes de qualquer
    // validação de campo.
    let Json(payload) = payload.map_err(|_| AppError::JsonInvalido)?;

    let resultado = app_state.vagas_service.gerar_vagas_extras(&payload).await?;

    let total = resultado.vagas_criadas.len();
    tracing::info!(
        "{} vagas extras criadas para estabelecimento {} em {}",
        total,
        resultado.estabelecimento_id,
        resultado.data_inicio
    );

    Ok(Json(GerarVagasExtrasResponse {
        success: true,
        message: format!("{total} vagas extras criadas com sucesso"),
        vagas_criadas: resultado.vagas_criadas,
        vagas_criadas_total: total,
        estabelecimento_id: resultado.estabelecimento_id,
        data_inicio: resultado.data_inicio,
        turno: resultado.turno,
    }))
}

// POST /api/v1/desktop/vagas/{vaga_id}/fechar-e-candidatar/
#[utoipa::path(
    post,
    path = "/api/v1/desktop/vagas/{vaga_id}/fechar-e-candidatar/",
    tag = "Vagas",
    responses(
        (status = 200, description = "Vaga encerrada e candidaturas geradas", body = FecharECandidatarResponse),
        (status = 400, description = "Vaga não está aberta (resposta inclui o status atual)"),
        (status = 404, description = "Vaga não encontrada"),
    ),
    params(
        ("vaga_id" = i64, Path, description = "ID da vaga"),
    )
)]
pub async fn fechar_e_candidatar(
    State(app_state): State<AppState>,
    Path(vaga_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let resultado = app_state.vagas_service.fechar_e_candidatar(vaga_id).await?;

    tracing::info!(
        "Vaga {} fechada e {} candidaturas geradas",
        vaga_id,
        resultado.candidaturas_geradas
    );

    Ok(Json(FecharECandidatarResponse {
        success: true,
        message: format!(
            "Vaga fechada e {} candidaturas geradas",
            resultado.candidaturas_geradas
        ),
        vaga_id: resultado.vaga_id,
        candidaturas_geradas: resultado.candidaturas_geradas,
    }))
}
